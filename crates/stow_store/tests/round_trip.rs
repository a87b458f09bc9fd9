use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use stow_doc::{Compound, Tag};
use stow_store::{Phases, Registry, StorageEngine, StoreError, derive::Reflect};

#[derive(Reflect, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Letter {
    #[default]
    A,
    B,
    C,
}

fn engine() -> StorageEngine {
    StorageEngine::new(Arc::new(Registry::with_builtins()))
}

// -----------------------------------------------------------------------------
// Scalars and containers

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Everything {
    #[store]
    flag: bool,
    #[store]
    initial: char,
    #[store]
    small: i8,
    #[store]
    short: u16,
    #[store]
    count: i32,
    #[store]
    big: u64,
    #[store]
    ratio: f32,
    #[store]
    precise: f64,
    #[store]
    name: String,
    #[store]
    letter: Letter,
    #[store]
    tags: Vec<String>,
    #[store]
    unique: BTreeSet<i64>,
    #[store]
    scores: BTreeMap<String, i32>,
    #[store]
    maybe: Option<u8>,
    scratch: Vec<u8>,
}

fn everything() -> Everything {
    Everything {
        flag: true,
        initial: 'ß',
        small: -3,
        short: 60_000,
        count: 1_234,
        big: u64::MAX,
        ratio: 0.25,
        precise: -1.0e-9,
        name: "tank".into(),
        letter: Letter::C,
        tags: vec!["hot".into(), "full".into()],
        unique: BTreeSet::from([-5, 7, 1 << 40]),
        scores: BTreeMap::from([("alice".into(), 3), ("bob".into(), -1)]),
        maybe: Some(9),
        scratch: vec![1, 2, 3],
    }
}

#[test]
fn scalars_and_containers() {
    let mut engine = engine();
    let original = everything();

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    assert_eq!(node.get_bool("flag"), Ok(Some(true)));
    assert_eq!(node.get_int("count"), Ok(Some(1_234)));
    assert_eq!(node.get_long("big"), Ok(Some(-1)));
    assert_eq!(node.get_string("name"), Ok(Some("tank")));
    assert_eq!(node.get_int("letter"), Ok(Some(2)));
    assert!(!node.contains_key("scratch"));

    let tags = node.get_compound("tags").unwrap().unwrap();
    assert_eq!(tags.get_int("size"), Ok(Some(2)));
    assert_eq!(tags.get_string("0"), Ok(Some("hot")));
    assert_eq!(tags.get_string("1"), Ok(Some("full")));

    let scores = node.get_list("scores").unwrap().unwrap();
    assert_eq!(scores.len(), 2);

    let mut decoded = Everything::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, Everything { scratch: Vec::new(), ..original });
}

#[test]
fn field_tables_are_cached() {
    let mut engine = engine();
    let mut node = Compound::new();

    engine.store(Phases::all(), &mut node, &everything()).unwrap();
    engine.store(Phases::all(), &mut node, &everything()).unwrap();

    assert_eq!(engine.cached_types(), 1);
}

// -----------------------------------------------------------------------------
// Nested containers

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Index {
    #[store]
    entries: HashMap<String, Vec<HashMap<i32, HashSet<Letter>>>>,
}

#[test]
fn nested_containers() {
    let mut engine = engine();
    let original = Index {
        entries: HashMap::from([(
            "k".into(),
            vec![HashMap::from([(42, HashSet::from([Letter::A, Letter::B]))])],
        )]),
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    let outer = node.get_list("entries").unwrap().unwrap();
    let Some(Tag::Compound(entry)) = outer.get(0) else {
        panic!("map entries are compounds");
    };
    assert_eq!(entry.get_string("key"), Ok(Some("k")));

    let list = entry.get_compound("val").unwrap().unwrap();
    assert_eq!(list.get_int("size"), Ok(Some(1)));

    let inner = list.get_list("0").unwrap().unwrap();
    let Some(Tag::Compound(inner_entry)) = inner.get(0) else {
        panic!("map entries are compounds");
    };
    assert_eq!(inner_entry.get_int("key"), Ok(Some(42)));
    assert_eq!(inner_entry.get_long("val"), Ok(Some(0b011)));

    let mut decoded = Index::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Ledger {
    #[store]
    balances: BTreeMap<Option<String>, Option<i32>>,
}

#[test]
fn null_map_keys_and_values() {
    let mut engine = engine();
    let original = Ledger {
        balances: BTreeMap::from([(None, Some(1)), (Some("a".into()), None)]),
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    let entries = node.get_list("balances").unwrap().unwrap();
    assert_eq!(entries.len(), 2);
    let Some(Tag::Compound(unkeyed)) = entries.get(0) else {
        panic!("map entries are compounds");
    };
    assert_eq!(unkeyed.get_bool("key-"), Ok(Some(true)));
    assert!(!unkeyed.contains_key("key"));
    assert_eq!(unkeyed.get_int("val"), Ok(Some(1)));

    let Some(Tag::Compound(keyed)) = entries.get(1) else {
        panic!("map entries are compounds");
    };
    assert_eq!(keyed.get_string("key"), Ok(Some("a")));
    assert_eq!(keyed.get_bool("val-"), Ok(Some(true)));

    let mut decoded = Ledger {
        balances: BTreeMap::from([(Some("stale".into()), Some(9))]),
    };
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}

// -----------------------------------------------------------------------------
// Enum containers

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Routing {
    #[store]
    next: HashMap<Letter, Letter>,
    #[store]
    names: BTreeMap<Letter, String>,
    #[store]
    seen: BTreeSet<Letter>,
}

#[test]
fn enum_containers() {
    let mut engine = engine();
    let original = Routing {
        next: HashMap::from([(Letter::A, Letter::C), (Letter::C, Letter::B)]),
        names: BTreeMap::from([(Letter::B, "bee".into())]),
        seen: BTreeSet::from([Letter::C]),
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    assert_eq!(node.get_int_array("next"), Ok(Some(&[2, -1, 1][..])));
    assert_eq!(node.get_long("seen"), Ok(Some(0b100)));
    let names = node.get_compound("names").unwrap().unwrap();
    assert_eq!(names.get_string("1"), Ok(Some("bee")));
    assert_eq!(names.len(), 1);

    let mut decoded = Routing::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn out_of_range_ordinal_is_clamped() {
    let mut engine = engine();
    let mut node = Compound::new();
    node.put_int("letter", 99);

    let mut decoded = Everything::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded.letter, Letter::C);

    node.put_int("letter", -4);
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded.letter, Letter::A);
}

// -----------------------------------------------------------------------------
// Packed arrays

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Samples {
    #[store]
    bytes: Vec<u8>,
    #[store]
    ints: Vec<i32>,
    #[store]
    shorts: Vec<i16>,
    #[store]
    longs: Vec<i64>,
    #[store]
    doubles: Vec<f64>,
    #[store]
    chars: Vec<char>,
}

#[test]
fn packed_arrays() {
    let mut engine = engine();
    let original = Samples {
        bytes: vec![0, 128, 255],
        ints: vec![i32::MIN, 0, i32::MAX],
        shorts: vec![-2, 2],
        longs: vec![i64::MIN, -1, 1 << 33],
        doubles: vec![0.5, f64::MAX, -0.0],
        chars: vec!['a', '€'],
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    assert_eq!(node.get_byte_array("bytes"), Ok(Some(&[0, -128, -1][..])));
    assert_eq!(node.get_int_array("ints").unwrap().unwrap().len(), 3);
    assert_eq!(node.get_int_array("longs").unwrap().unwrap().len(), 6);
    assert_eq!(node.get_int_array("doubles").unwrap().unwrap().len(), 6);
    assert_eq!(node.get_int_array("chars"), Ok(Some(&['a' as i32, '€' as i32][..])));

    let mut decoded = Samples::default();
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}

// -----------------------------------------------------------------------------
// Decoding into existing objects

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Part {
    #[store(phase(save))]
    serial: u32,
    #[store(phase(sync))]
    wear: f32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Assembly {
    #[store]
    labels: Vec<String>,
    #[store]
    counts: BTreeMap<String, i32>,
    #[store]
    part: Part,
}

#[test]
fn containers_are_replaced_objects_are_updated() {
    let mut engine = engine();
    let source = Assembly {
        labels: vec!["new".into()],
        counts: BTreeMap::from([("x".into(), 1)]),
        part: Part { serial: 0, wear: 0.75 },
    };

    let mut node = Compound::new();
    engine.store(Phases::SYNC, &mut node, &source).unwrap();

    let mut target = Assembly {
        labels: vec!["old".into(), "older".into()],
        counts: BTreeMap::from([("y".into(), 2)]),
        part: Part { serial: 77, wear: 0.0 },
    };
    engine.read(Phases::all(), &node, &mut target).unwrap();

    assert_eq!(target.labels, ["new"]);
    assert_eq!(target.counts, BTreeMap::from([("x".into(), 1)]));
    // `serial` was not part of the sync document.
    assert_eq!(target.part, Part { serial: 77, wear: 0.75 });
}

#[test]
fn malformed_collections() {
    let mut engine = engine();

    let mut labels = Compound::new();
    labels.put_string("0", "no size");
    let mut node = Compound::new();
    node.put_compound("labels", labels);

    let mut target = Assembly::default();
    let err = engine.read(Phases::all(), &node, &mut target).unwrap_err();
    assert!(matches!(err, StoreError::MalformedDocument { name, .. } if name == "labels"));

    let mut node = Compound::new();
    node.put_string("labels", "not a compound");
    let err = engine.read(Phases::all(), &node, &mut target).unwrap_err();
    assert!(matches!(err, StoreError::Document(_)));
}

// -----------------------------------------------------------------------------
// Text formats

#[test]
fn documents_survive_text_formats() {
    let mut engine = engine();
    let original = Index {
        entries: HashMap::from([(
            "k".into(),
            vec![HashMap::from([(42, HashSet::from([Letter::A, Letter::C]))]), HashMap::new()],
        )]),
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    let json = serde_json::to_string(&node).unwrap();
    let from_json: Compound = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, node);

    let text = ron::to_string(&node).unwrap();
    let from_ron: Compound = ron::from_str(&text).unwrap();
    assert_eq!(from_ron, node);

    let mut decoded = Index::default();
    engine.read(Phases::all(), &from_ron, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}
