use std::sync::Arc;

use stow_doc::Compound;
use stow_store::{Phases, Registry, StorageEngine, derive::Reflect};

fn registry() -> Arc<Registry> {
    Arc::new(Registry::with_builtins())
}

// -----------------------------------------------------------------------------
// Null protocol

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Profile {
    #[store]
    nickname: Option<String>,
    #[store]
    age: Option<u32>,
    #[store]
    friends: Vec<Option<String>>,
}

#[test]
fn null_round_trip() {
    let mut engine = StorageEngine::new(registry());
    let original = Profile {
        nickname: None,
        age: Some(3),
        friends: vec![Some("a".into()), None, Some("c".into())],
    };

    let mut node = Compound::new();
    engine.store(Phases::all(), &mut node, &original).unwrap();

    assert!(!node.contains_key("nickname"));
    assert_eq!(node.get_bool("nickname-"), Ok(Some(true)));
    assert_eq!(node.get_int("age"), Ok(Some(3)));
    assert!(!node.contains_key("age-"));

    let friends = node.get_compound("friends").unwrap().unwrap();
    assert_eq!(friends.get_int("size"), Ok(Some(3)));
    assert!(!friends.contains_key("1"));
    assert_eq!(friends.get_string("2"), Ok(Some("c")));

    let mut decoded = Profile {
        nickname: Some("stale".into()),
        age: None,
        friends: vec![Some("x".into())],
    };
    engine.read(Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn rewriting_clears_the_other_key() {
    let mut engine = StorageEngine::new(registry());
    let mut node = Compound::new();

    let mut profile = Profile::default();
    engine.store(Phases::all(), &mut node, &profile).unwrap();
    assert!(node.contains_key("nickname-"));

    profile.nickname = Some("back".into());
    engine.store(Phases::all(), &mut node, &profile).unwrap();
    assert!(!node.contains_key("nickname-"));
    assert_eq!(node.get_string("nickname"), Ok(Some("back")));
}

#[test]
fn missing_entries_keep_values() {
    let mut engine = StorageEngine::new(registry());
    let node = Compound::new();

    let mut profile = Profile {
        nickname: Some("kept".into()),
        age: None,
        friends: vec![None],
    };
    engine.read(Phases::all(), &node, &mut profile).unwrap();

    assert_eq!(profile.nickname.as_deref(), Some("kept"));
    assert_eq!(profile.age, None);
    assert_eq!(profile.friends, [None]);
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Gauge {
    #[store]
    level: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Meter {
    #[store]
    reading: u64,
    #[store]
    unit: String,
    #[store]
    history: Vec<i32>,
    #[store]
    gauge: Gauge,
}

#[test]
fn null_marker_on_plain_field_resets_it() {
    let mut engine = StorageEngine::new(registry());
    let mut node = Compound::new();
    node.put_bool("level-", true);

    let mut gauge = Gauge { level: 7 };
    engine.read(Phases::all(), &node, &mut gauge).unwrap();
    assert_eq!(gauge, Gauge::default());

    let mut node = Compound::new();
    for name in ["reading-", "unit-", "history-", "gauge-"] {
        node.put_bool(name, true);
    }
    let mut meter = Meter {
        reading: 90,
        unit: "kPa".into(),
        history: vec![1, 2],
        gauge: Gauge { level: 3 },
    };
    engine.read(Phases::all(), &node, &mut meter).unwrap();
    assert_eq!(meter, Meter::default());
}

#[test]
fn single_fields() {
    let mut engine = StorageEngine::new(registry());
    let mut cx = engine.context(Phases::all());
    let mut node = Compound::new();

    cx.set_single_field(&mut node, "count", &7_i16).unwrap();
    cx.set_single_field(&mut node, "missing", &None::<Gauge>).unwrap();
    assert_eq!(node.get_short("count"), Ok(Some(7)));
    assert_eq!(node.get_bool("missing-"), Ok(Some(true)));

    let mut count = 0_i16;
    assert!(cx.get_single_field(&node, "count", &mut count).unwrap());
    assert_eq!(count, 7);

    let mut other = 5_i16;
    assert!(cx.get_single_field(&node, "other", &mut other).unwrap());
    assert_eq!(other, 5);

    let mut gauge = Some(Gauge { level: 1 });
    assert!(cx.get_single_field(&node, "missing", &mut gauge).unwrap());
    assert_eq!(gauge, None);
}

// -----------------------------------------------------------------------------
// Phases

#[derive(Reflect, Default, Debug, PartialEq)]
#[storable]
#[reflect(default)]
struct Machine {
    #[store(phase(save))]
    energy: i32,
    #[store(phase(client, sync))]
    active: bool,
    #[store]
    id: String,
}

#[test]
fn phase_filtering() {
    let mut engine = StorageEngine::new(registry());
    let machine = Machine {
        energy: 500,
        active: true,
        id: "m1".into(),
    };

    let mut sync = Compound::new();
    engine.store(Phases::SYNC, &mut sync, &machine).unwrap();
    assert!(!sync.contains_key("energy"));
    assert_eq!(sync.get_bool("active"), Ok(Some(true)));
    assert_eq!(sync.get_string("id"), Ok(Some("m1")));

    let mut save = Compound::new();
    engine.store(Phases::SAVE, &mut save, &machine).unwrap();
    assert_eq!(save.get_int("energy"), Ok(Some(500)));
    assert!(!save.contains_key("active"));

    let mut full = Compound::new();
    engine.store(Phases::all(), &mut full, &machine).unwrap();

    let mut client_view = Machine {
        energy: -1,
        ..Machine::default()
    };
    engine.read(Phases::CLIENT, &full, &mut client_view).unwrap();
    assert_eq!(client_view.energy, -1);
    assert!(client_view.active);
    assert_eq!(client_view.id, "m1");
}

#[test]
fn thread_local_engines() {
    let registry = registry();
    let machine = Machine {
        energy: 3,
        active: false,
        id: "local".into(),
    };

    let mut node = Compound::new();
    stow_store::write(&registry, Phases::SAVE | Phases::ITEM, &mut node, &machine).unwrap();

    let mut decoded = Machine::default();
    stow_store::read(&registry, Phases::SAVE, &node, &mut decoded).unwrap();
    assert_eq!(decoded.energy, 3);
    assert_eq!(decoded.id, "local");

    let handle = std::thread::spawn(move || {
        let mut decoded = Machine::default();
        stow_store::read(&registry, Phases::all(), &node, &mut decoded).map(|()| decoded)
    });
    assert_eq!(handle.join().unwrap().unwrap().id, "local");
}

#[test]
fn thread_local_engines_release_registries() {
    let first = registry();
    let mut node = Compound::new();
    stow_store::write(&first, Phases::all(), &mut node, &Machine::default()).unwrap();
    assert_eq!(Arc::strong_count(&first), 1);

    let released = Arc::downgrade(&first);
    drop(first);
    assert!(released.upgrade().is_none());

    for _ in 0..8 {
        let other = registry();
        stow_store::write(&other, Phases::all(), &mut node, &Machine::default()).unwrap();
        assert_eq!(Arc::strong_count(&other), 1);
    }

    let last = registry();
    let mut decoded = Machine::default();
    stow_store::read(&last, Phases::all(), &node, &mut decoded).unwrap();
    assert_eq!(decoded, Machine::default());
}
