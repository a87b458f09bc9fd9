use alloc::boxed::Box;
use alloc::collections::{LinkedList, VecDeque};
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, boxed_default};
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::{List, ListItemIter};
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_list {
    ($ty:ident, $push:ident, |$this:ident, $index:ident| $get:expr, $get_mut:expr) => {
        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>(boxed_default::<Self>))
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            impl_reflect_cast_fn!(List);
        }

        impl<T: Reflect + Typed> List for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            #[inline]
            fn get(&self, $index: usize) -> Option<&dyn Reflect> {
                let $this = self;
                $get.map(|v: &T| v as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, $index: usize) -> Option<&mut dyn Reflect> {
                let $this = self;
                $get_mut.map(|v: &mut T| v as &mut dyn Reflect)
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                $ty::$push(self, value.take::<T>()?);
                Ok(())
            }

            #[inline]
            fn clear(&mut self) {
                $ty::clear(self);
            }

            #[inline]
            fn iter(&self) -> ListItemIter<'_> {
                ListItemIter::new(self)
            }
        }
    };
}

impl_list!(Vec, push, |this, index| this.as_slice().get(index), this.as_mut_slice().get_mut(index));
impl_list!(VecDeque, push_back, |this, index| VecDeque::get(this, index), VecDeque::get_mut(this, index));
impl_list!(LinkedList, push_back, |this, index| this.iter().nth(index), this.iter_mut().nth(index));

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{LinkedList, VecDeque};
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::{ReflectKind, Typed};
    use crate::ops::List;

    #[test]
    fn list_infos() {
        let info = <VecDeque<u32>>::type_info();
        assert_eq!(info.kind(), ReflectKind::List);
        assert!(info.as_list().unwrap().item_is::<u32>());

        let empty = info.as_list().unwrap().new_empty();
        assert_eq!(empty.downcast_ref::<VecDeque<u32>>().map(VecDeque::len), Some(0));
    }

    #[test]
    fn linked_list_access() {
        let mut linked: LinkedList<i8> = [1, 2].into_iter().collect();
        let list: &mut dyn List = &mut linked;

        list.push(Box::new(3_i8)).unwrap();
        *list.get_mut(0).unwrap().downcast_mut::<i8>().unwrap() = 9;

        let seen: Vec<i8> = list.iter().map(|v| *v.downcast_ref::<i8>().unwrap()).collect();
        assert_eq!(seen, vec![9, 2, 3]);
        assert!(list.get(3).is_none());
    }
}
