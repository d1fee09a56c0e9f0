use overloader::prelude::*;

#[derive(Target, Default)]
#[target(after = ready)]
struct Page {
    #[target(required)]
    db: Option<String>,
    loader: Option<Overloader>,
    lookup: Option<std::sync::Arc<dyn Lookup>>,
    #[target(skip)]
    ready: bool,
    _cached: Option<Value>,
}

impl Page {
    fn ready(&mut self) {
        self.ready = true;
    }
}

fn main() {
    let mut page = Page::default();
    assert_eq!(page.resource_requests(), ["db", "loader", "lookup"]);
    assert!(page.answer_resource_request("db", Value::from("sqlite")));
    assert!(page.check_requests_answered());
    page.after_injection();
    assert!(page.ready);
    assert!(page.as_target().is_some());
    assert!(page._cached.is_none());
}
