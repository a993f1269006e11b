use super::*;
use rustc_hash::FxHashSet;

#[test]
fn names_compare_by_content() {
    let a = Name::from("value");
    let b = Name::new(String::from("value"));
    assert_eq!(a, b);
    assert_eq!(a, "value");
    assert!(!Arc::ptr_eq(&a.0, &b.0));
}

#[test]
fn lookup_by_str() {
    let mut set = FxHashSet::default();
    set.insert(Name::from("rest"));
    assert!(set.contains("rest"));
    assert!(!set.contains("other"));
}

#[test]
fn wildcard_and_empty_are_not_bindable() {
    assert!(Name::from("x").is_bindable());
    assert!(Name::from("_x").is_bindable());
    assert!(!Name::from("_").is_bindable());
    assert!(!Name::from("").is_bindable());
}

#[test]
fn display_and_debug() {
    let name = Name::from("first");
    assert_eq!(name.to_string(), "first");
    assert_eq!(format!("{name:?}"), "Name(\"first\")");
}
