use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use stow_doc::Compound;
use stow_store::handler::{Decoded, Handler, RootType};
use stow_store::handlers::{
    ArrayHandler, CollectionCodec, CollectionHandler, DelegatingHandler, EnumMapCodec, EnumSetHandler,
    EnumToEnumMapHandler, MapCodec, PrimitiveHandler, StorableHandler, StringHandler,
};
use stow_store::info::{TypeInfo, Typed};
use stow_store::{Context, Phases, Reflect, Registry, StorageEngine, StoreError, derive::Reflect};

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mode {
    Off,
    On,
}

/// Stores strings upper-cased, reads them back lower-cased.
#[derive(Default)]
struct ShoutingHandler;

impl Handler for ShoutingHandler {
    fn root_type(&self) -> Option<RootType> {
        Some(RootType::of::<String>())
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(text) = value.downcast_ref::<String>() else {
            return Ok(false);
        };
        node.put_string(name, text.to_uppercase());
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        _ty: &'static TypeInfo,
        name: &str,
        _existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        Ok(match node.get_string(name)? {
            Some(text) => Decoded::Replaced(Box::new(text.to_lowercase())),
            None => Decoded::Absent,
        })
    }
}

// -----------------------------------------------------------------------------
// Resolution order

#[test]
fn builtin_chains() {
    let registry = Registry::with_builtins();

    let chain = registry.find_handlers(<HashMap<Mode, Mode>>::type_info()).unwrap();
    assert!(chain[0].is::<EnumToEnumMapHandler>());
    assert!(chain[1].is::<EnumMapCodec>());
    assert!(chain[2].is::<MapCodec>());
    assert_eq!(chain.len(), 3);

    let chain = registry.find_handlers(<HashSet<Mode>>::type_info()).unwrap();
    assert!(chain[0].is::<EnumSetHandler>());
    assert!(chain[1].is::<CollectionCodec>());

    let chain = registry.find_handlers(<Vec<i32>>::type_info()).unwrap();
    assert!(chain[0].is::<ArrayHandler<i32>>());
    assert!(chain[1].is::<CollectionCodec>());

    let chain = registry.find_handlers(<Vec<f64>>::type_info()).unwrap();
    assert!(chain[0].is::<DelegatingHandler<Vec<f64>, Vec<i64>>>());

    let codec = chain[1].downcast_ref::<CollectionCodec>().unwrap();
    assert!(codec.element().value_ty().type_is::<f64>());
}

#[test]
fn shared_handler_instances() {
    let registry = Registry::with_builtins();
    let first = registry.find_handlers(<HashMap<Mode, Mode>>::type_info()).unwrap();
    let second = registry.find_handlers(<HashMap<Mode, Mode>>::type_info()).unwrap();

    assert!(Arc::ptr_eq(&first[0], &second[0]));
    // Specialized handlers are built per lookup.
    assert!(!Arc::ptr_eq(&first[1], &second[1]));
}

#[test]
fn unknown_element_types_fail_to_resolve() {
    let mut registry = Registry::empty();
    registry.register(CollectionHandler);

    let err = registry.find_handlers(<Vec<Mode>>::type_info()).unwrap_err();
    assert!(matches!(err, StoreError::NoHandlerFound { .. }));
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Sign {
    #[store]
    text: String,
}

#[test]
fn child_registry_overrides_builtins() {
    let root = Arc::new(Registry::with_builtins());
    let mut child = Registry::with_parent(root.clone());
    child.register(ShoutingHandler);

    let sign = Sign {
        text: "hello".into(),
    };

    let mut node = Compound::new();
    StorageEngine::new(Arc::new(child))
        .store(Phases::all(), &mut node, &sign)
        .unwrap();
    assert_eq!(node.get_string("text"), Ok(Some("HELLO")));

    let mut node = Compound::new();
    StorageEngine::new(root).store(Phases::all(), &mut node, &sign).unwrap();
    assert_eq!(node.get_string("text"), Ok(Some("hello")));
}

#[test]
fn priority_registration() {
    let mut registry = Registry::with_builtins();
    registry.register(ShoutingHandler);
    assert!(registry.find_handlers(String::type_info()).unwrap()[0].is::<StringHandler>());

    registry.register_priority(ShoutingHandler);
    let mut engine = StorageEngine::new(Arc::new(registry));

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &Sign { text: "Quiet".into() }).unwrap();
    assert_eq!(node.get_string("text"), Ok(Some("QUIET")));

    let mut sign = Sign::default();
    engine.read(Phases::all(), &node, &mut sign).unwrap();
    assert_eq!(sign.text, "quiet");
}

// -----------------------------------------------------------------------------
// Field overrides

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Banner {
    #[store(handler = ShoutingHandler)]
    motto: String,
    #[store]
    plain: String,
}

#[derive(Reflect, Default)]
#[storable]
#[reflect(default)]
struct Mislabeled {
    #[store(handler = ShoutingHandler)]
    level: i32,
}

#[derive(Reflect, Default)]
struct Loose {
    #[store]
    value: i32,
}

#[derive(Reflect, Default)]
#[storable]
#[reflect(default)]
struct Holder {
    #[store]
    loose: Loose,
}

#[test]
fn field_handler_override() {
    let mut engine = StorageEngine::new(Arc::new(Registry::with_builtins()));
    let banner = Banner {
        motto: "onward".into(),
        plain: "onward".into(),
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &banner).unwrap();
    assert_eq!(node.get_string("motto"), Ok(Some("ONWARD")));
    assert_eq!(node.get_string("plain"), Ok(Some("onward")));
}

#[test]
fn mismatched_override_and_missing_handler() {
    let mut engine = StorageEngine::new(Arc::new(Registry::with_builtins()));
    let mut node = Compound::new();

    let err = engine
        .store(Phases::all(), &mut node, &Mislabeled::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::HandlerMismatch { name, .. } if name == "level"));

    let err = engine.store(Phases::all(), &mut node, &Holder::default()).unwrap_err();
    assert!(matches!(err, StoreError::NoHandlerFound { name, .. } if name == "loose"));

    let err = engine.store(Phases::all(), &mut node, &7_u8).unwrap_err();
    assert!(matches!(err, StoreError::NotAStruct { .. }));
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
struct Meters {
    #[store]
    value: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Track {
    #[store]
    length: Option<Meters>,
    #[store]
    laps: i32,
}

fn meters_registry() -> Arc<Registry> {
    let mut registry = Registry::with_parent(Arc::new(Registry::with_builtins()));
    registry.register(DelegatingHandler::<Meters, i32>::new(
        |meters| meters.value,
        |value| Meters { value },
        PrimitiveHandler::<i32>::default(),
    ));
    Arc::new(registry)
}

#[test]
fn delegating_handler_keeps_missing_values() {
    let mut engine = StorageEngine::new(meters_registry());
    let track = Track {
        length: Some(Meters { value: 400 }),
        laps: 3,
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &track).unwrap();
    assert_eq!(node.get_int("length"), Ok(Some(400)));

    let mut decoded = Track::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, track);

    let mut node = Compound::new();
    node.put_int("laps", 5);
    let mut kept = Track {
        length: Some(Meters { value: 42 }),
        laps: 0,
    };
    engine.read(Phases::all(), &node, &mut kept).unwrap();
    assert_eq!(kept.length, Some(Meters { value: 42 }));
    assert_eq!(kept.laps, 5);

    let mut cx = engine.context(Phases::all());
    let mut meters = Meters { value: 42 };
    assert!(!cx.get_single_field(&node, "length", &mut meters).unwrap());
    assert_eq!(meters, Meters { value: 42 });

    node.put_int("length", 7);
    assert!(cx.get_single_field(&node, "length", &mut meters).unwrap());
    assert_eq!(meters, Meters { value: 7 });
}

// -----------------------------------------------------------------------------
// Bases

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable(handler = PositionHandler)]
#[reflect(default)]
struct Position {
    #[store]
    x: i32,
    #[store]
    y: i32,
}

/// Stores a position as a two-element int array.
#[derive(Default)]
struct PositionHandler;

impl Handler for PositionHandler {
    fn root_type(&self) -> Option<RootType> {
        Some(RootType::of::<Position>())
    }

    fn encode(
        &self,
        _cx: &mut Context<'_>,
        node: &mut Compound,
        _ty: &'static TypeInfo,
        name: &str,
        value: &dyn Reflect,
    ) -> Result<bool, StoreError> {
        let Some(position) = value.downcast_ref::<Position>() else {
            return Ok(false);
        };
        node.put_int_array(name, vec![position.x, position.y]);
        Ok(true)
    }

    fn decode(
        &self,
        _cx: &mut Context<'_>,
        node: &Compound,
        _ty: &'static TypeInfo,
        name: &str,
        existing: Option<&mut dyn Reflect>,
    ) -> Result<Decoded, StoreError> {
        let Some(&[x, y]) = node.get_int_array(name)? else {
            return Ok(Decoded::Absent);
        };
        match existing.and_then(|existing| existing.downcast_mut::<Position>()) {
            Some(position) => {
                *position = Position { x, y };
                Ok(Decoded::Updated)
            }
            None => Ok(Decoded::Replaced(Box::new(Position { x, y }))),
        }
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Waypoint {
    #[reflect(base)]
    position: Position,
    #[store]
    label: String,
}

#[test]
fn base_with_custom_handler() {
    let mut engine = StorageEngine::new(Arc::new(Registry::with_builtins()));
    let waypoint = Waypoint {
        position: Position { x: -4, y: 12 },
        label: "camp".into(),
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &waypoint).unwrap();
    assert_eq!(node.get_string("label"), Ok(Some("camp")));
    assert_eq!(
        node.get_int_array(stow_store::SUPERCLASS_KEY),
        Ok(Some(&[-4, 12][..]))
    );

    let mut decoded = Waypoint::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, waypoint);
}

#[test]
fn ancestor_handlers_come_first() {
    let registry = Registry::with_builtins();
    let chain = registry.find_handlers(Waypoint::type_info()).unwrap();

    assert_eq!(chain[0].name(), core::any::type_name::<PositionHandler>());
    assert!(chain.last().unwrap().is::<StorableHandler>());
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Entity {
    #[store]
    id: u32,
    #[store(phase(sync))]
    health: f32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Player {
    #[reflect(base)]
    entity: Entity,
    #[store]
    name: String,
    #[store]
    companion: Option<Entity>,
}

#[test]
fn storable_base_fields_are_inlined() {
    let mut engine = StorageEngine::new(Arc::new(Registry::with_builtins()));
    let player = Player {
        entity: Entity { id: 8, health: 0.5 },
        name: "ada".into(),
        companion: None,
    };

    let mut node = Compound::new();
    engine.store(Phases::SYNC, &mut node, &player).unwrap();
    assert_eq!(node.get_int("id"), Ok(Some(8)));
    assert_eq!(node.get_float("health"), Ok(Some(0.5)));
    assert!(!node.contains_key(stow_store::SUPERCLASS_KEY));

    let mut decoded = Player::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, player);
}
