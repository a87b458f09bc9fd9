use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionalInfo, TypeInfo, Typed};
use crate::ops::Optional;
use crate::reflection::impl_reflect_cast_fn;

fn wrap<T: Reflect + Typed>(
    value: Option<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    let value: Option<T> = match value {
        Some(value) => Some(value.take::<T>()?),
        None => None,
    };
    Ok(Box::new(value))
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>(wrap::<T>)))
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|v| v as &mut dyn Reflect)
    }

    fn replace(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), Box<dyn Reflect>> {
        *self = match value {
            Some(value) => Some(value.take::<T>()?),
            None => None,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::info::Typed;

    #[test]
    fn info_is_per_instantiation() {
        let a = <Option<i32>>::type_info().as_optional().unwrap();
        let b = <Option<String>>::type_info().as_optional().unwrap();

        assert!(a.inner_info().type_is::<i32>());
        assert!(b.inner_info().type_is::<String>());
    }

    #[test]
    fn wrap_builds_the_option() {
        let info = <Option<u8>>::type_info().as_optional().unwrap();

        let some = info.wrap(Some(Box::new(3_u8))).unwrap();
        assert_eq!(some.downcast_ref::<Option<u8>>(), Some(&Some(3)));

        let none = info.wrap(None).unwrap();
        assert_eq!(none.downcast_ref::<Option<u8>>(), Some(&None));

        assert!(info.wrap(Some(Box::new(3_i8))).is_err());
    }
}
