#![cfg(feature = "serde")]

use stow_doc::{Compound, List, Tag};

fn sample() -> Compound {
    let mut entry = Compound::new();
    entry.put_string("key", "k");
    entry.put_long("val", -7);

    let mut entries = List::new();
    entries.push(entry).unwrap();

    let mut root = Compound::new();
    root.put_bool("flag-", true);
    root.put_float("speed", 1.5);
    root.put_int_array("packed", vec![0, 1, -1]);
    root.put_byte_array("bytes", vec![-1, 2]);
    root.put_list("entries", entries);
    root
}

#[test]
fn json_round_trip() {
    let root = sample();
    let text = serde_json::to_string(&root).unwrap();
    let back: Compound = serde_json::from_str(&text).unwrap();
    assert_eq!(root, back);
}

#[test]
fn ron_round_trip() {
    let root = sample();
    let text = ron::to_string(&root).unwrap();
    let back: Compound = ron::from_str(&text).unwrap();
    assert_eq!(root, back);
}

#[test]
fn json_shape() {
    let mut root = Compound::new();
    root.put_int("size", 2);
    let value = serde_json::to_value(&root).unwrap();
    assert_eq!(value, serde_json::json!({ "size": { "Int": 2 } }));
    assert_eq!(root.get("size"), Some(&Tag::Int(2)));
}
