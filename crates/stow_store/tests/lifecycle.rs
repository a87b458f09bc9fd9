use std::sync::Arc;

use stow_doc::Compound;
use stow_store::impls::NonGenericTypeInfoCell;
use stow_store::info::{NamedField, ReflectKind, Storable, StructInfo, TypeInfo, Typed};
use stow_store::ops::{ReflectMut, ReflectRef, Struct};
use stow_store::{Phases, Reflect, Registry, StorageEngine, StoreError, derive::Reflect, lifecycle};

fn engine() -> StorageEngine {
    StorageEngine::new(Arc::new(Registry::with_builtins()))
}

// -----------------------------------------------------------------------------
// Factories

#[derive(Reflect, Debug, PartialEq)]
#[storable]
#[reflect(factory = Self::charged)]
struct Battery {
    #[store]
    charge: u32,
    #[store(phase(save))]
    cycles: u32,
}

impl Battery {
    fn charged() -> Self {
        Self {
            charge: 100,
            cycles: 0,
        }
    }
}

#[derive(Reflect, Debug, PartialEq)]
#[storable]
struct Fuse {
    #[store]
    blown: bool,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Device {
    #[store]
    battery: Option<Battery>,
    #[store]
    fuse: Option<Fuse>,
}

#[test]
fn factories_create_missing_objects() {
    let mut engine = engine();

    let mut battery = Compound::new();
    battery.put_int("charge", 40);
    let mut node = Compound::new();
    node.put_compound("battery", battery);

    let mut device = Device::default();
    engine.read(Phases::SYNC, &node, &mut device).unwrap();

    // `cycles` is a save-only field, so it keeps the factory value.
    assert_eq!(
        device.battery,
        Some(Battery {
            charge: 40,
            cycles: 0
        })
    );
}

#[test]
fn objects_without_factory_fail_to_instantiate() {
    let mut engine = engine();

    let mut fuse = Compound::new();
    fuse.put_bool("blown", true);
    let mut node = Compound::new();
    node.put_compound("fuse", fuse);

    let mut device = Device::default();
    let err = engine.read(Phases::all(), &node, &mut device).unwrap_err();
    assert!(matches!(err, StoreError::InstantiationFailure { .. }));

    // An existing instance is updated in place instead.
    let mut device = Device {
        battery: None,
        fuse: Some(Fuse { blown: false }),
    };
    engine.read(Phases::all(), &node, &mut device).unwrap();
    assert_eq!(device.fuse, Some(Fuse { blown: true }));
}

#[test]
fn instantiate_by_kind() {
    let battery = lifecycle::instantiate(Battery::type_info()).unwrap();
    assert_eq!(battery.downcast_ref::<Battery>(), Some(&Battery::charged()));

    let list = lifecycle::instantiate(<Vec<String>>::type_info()).unwrap();
    assert_eq!(list.downcast_ref::<Vec<String>>(), Some(&Vec::new()));

    let option = lifecycle::instantiate(<Option<i32>>::type_info()).unwrap();
    assert_eq!(option.downcast_ref::<Option<i32>>(), Some(&None));

    assert!(lifecycle::instantiate(Fuse::type_info()).is_err());
}

// -----------------------------------------------------------------------------
// Callbacks

#[derive(Reflect, Default, Debug)]
#[storable]
#[reflect(default, after_decode = Self::finish)]
struct Frame {
    #[store]
    width: u32,
    #[store]
    height: u32,
    area: u32,
    finished: bool,
}

impl Frame {
    fn finish(&mut self) {
        self.area = self.width * self.height;
        self.finished = true;
    }
}

#[derive(Reflect, Default, Debug)]
#[storable]
#[reflect(default)]
#[reflect(after_decode = Self::check, after_decode = Self::count)]
struct Window {
    #[reflect(base)]
    frame: Frame,
    #[store]
    title: String,
    saw_finished_frame: bool,
    callbacks: u32,
}

impl Window {
    fn check(&mut self) {
        self.saw_finished_frame = self.frame.finished;
        self.callbacks += 1;
    }

    fn count(&mut self) {
        self.callbacks += 1;
    }
}

#[test]
fn after_decode_callbacks() {
    let mut engine = engine();
    let window = Window {
        frame: Frame {
            width: 3,
            height: 4,
            ..Frame::default()
        },
        title: "main".into(),
        ..Window::default()
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &window).unwrap();
    assert!(!window.frame.finished);

    let mut decoded = Window::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();

    assert_eq!(decoded.title, "main");
    assert_eq!(decoded.frame.area, 12);
    assert!(decoded.saw_finished_frame);
    assert_eq!(decoded.callbacks, 2);
}

#[test]
fn after_decode_runs_own_callbacks_only() {
    let mut window = Window::default();
    lifecycle::after_decode(Window::type_info(), &mut window);

    assert_eq!(window.callbacks, 2);
    assert!(!window.frame.finished);
}

#[derive(Reflect, Default, Debug)]
#[storable]
#[reflect(default, after_decode = Self::touch)]
struct Stamp {
    #[store(phase(save))]
    at: u32,
    touched: bool,
}

impl Stamp {
    fn touch(&mut self) {
        self.touched = true;
    }
}

/// A struct whose base can be read but not borrowed mutably.
#[derive(Default)]
struct Sealed {
    stamp: Stamp,
}

impl Typed for Sealed {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            let fields = [NamedField::new::<Stamp>("stamp")];
            TypeInfo::Struct(
                StructInfo::new::<Self>(&fields)
                    .with_base(0)
                    .with_storable(Storable::reflective()),
            )
        })
    }
}

impl Reflect for Sealed {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Struct
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Struct(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Struct(self)
    }
}

impl Struct for Sealed {
    fn field_len(&self) -> usize {
        1
    }

    fn field_at(&self, index: usize) -> Option<&dyn Reflect> {
        (index == 0).then_some(&self.stamp as &dyn Reflect)
    }

    fn field_at_mut(&mut self, _index: usize) -> Option<&mut dyn Reflect> {
        None
    }
}

#[test]
fn unreachable_callback_targets_are_reported() {
    let mut engine = engine();
    let mut sealed = Sealed::default();

    // No field is in the sync phase, so only the callbacks touch the base.
    let err = engine
        .read(Phases::SYNC, &Compound::new(), &mut sealed)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotAStruct { .. }));
    assert!(!sealed.stamp.touched);

    let mut stamp = Stamp::default();
    engine.read(Phases::SYNC, &Compound::new(), &mut stamp).unwrap();
    assert!(stamp.touched);
}
