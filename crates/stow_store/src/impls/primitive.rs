use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_opaque {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    let info = OpaqueInfo::new::<Self>()
                        .with_default(|| Box::new(<$ty>::default()) as Box<dyn Reflect>);
                    TypeInfo::Opaque(info)
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Opaque);
        }
    )*};
}

impl_opaque!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String);
