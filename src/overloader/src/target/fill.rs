use crate::value::{FromValue, Value};

/// A field that can hold an injected resource.
///
/// `#[derive(Target)]` stores every requested resource through this trait,
/// so requested fields have to be `Option<T>`.
pub trait Fillable {
    /// Stores `resource`, returning `false` if it has the wrong type.
    fn fill(&mut self, resource: Value) -> bool;

    fn is_filled(&self) -> bool;
}

impl<T: FromValue> Fillable for Option<T> {
    fn fill(&mut self, resource: Value) -> bool {
        match T::from_value(resource) {
            Ok(value) => {
                *self = Some(value);
                true
            }
            Err(_) => false,
        }
    }

    fn is_filled(&self) -> bool {
        self.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_fill() {
        let mut slot: Option<i64> = None;
        assert!(!slot.is_filled());
        assert!(!slot.fill(Value::from("text")));
        assert_eq!(slot, None);

        assert!(slot.fill(Value::from(3)));
        assert!(slot.is_filled());
        assert_eq!(slot, Some(3));
    }
}
