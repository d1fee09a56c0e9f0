use overloader::prelude::*;

#[derive(Target)]
struct Nothing {}

#[derive(Target)]
struct Generic<T: FromValue + Send + Sync + 'static> {
    value: Option<T>,
}

fn main() {
    let mut nothing = Nothing {};
    assert!(nothing.resource_requests().is_empty());
    assert!(!nothing.answer_resource_request("x", Value::Null));
    assert!(nothing.check_requests_answered());

    let mut generic = Generic::<i64> { value: None };
    assert!(generic.answer_resource_request("value", Value::from(4)));
    assert_eq!(generic.value, Some(4));
}
