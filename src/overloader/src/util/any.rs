use std::any::{self, Any};

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// Moves a boxed trait object out into its concrete type, handing the box
/// back untouched when the types don't match.
pub fn downcast_box<S, T>(boxed: Box<S>) -> Result<Box<T>, Box<S>>
where
    S: AsAny + ?Sized,
    T: Any,
{
    if <S as AsAny>::as_any(&*boxed).is::<T>() {
        let res = <S as AsAny>::into_any(boxed)
            .downcast::<T>()
            .unwrap_or_else(|_| unreachable!("`boxed` should be `Box<T>`"));
        Ok(res)
    } else {
        Err(boxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Trait: AsAny + Send + Sync {}

    impl Trait for i32 {}

    #[test]
    fn downcast_box_succeeds_when_types_match() {
        let x: Box<dyn Trait> = Box::new(7i32);
        let y = downcast_box::<dyn Trait, i32>(x).unwrap_or_else(|_| Box::new(0));
        assert_eq!(*y, 7);
    }

    #[test]
    fn downcast_box_returns_original_when_types_differ() {
        let x: Box<dyn Trait> = Box::new(7i32);
        let back = downcast_box::<dyn Trait, String>(x).unwrap_err();
        assert_eq!(<dyn Trait as AsAny>::type_name(&*back), "i32");
    }
}
