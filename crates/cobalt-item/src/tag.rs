//! Small helpers over the item's NBT compound.
//!
//! Nested values are taken out, edited and reinserted so the caller never
//! holds two mutable borrows into the same compound.

use valence_protocol::nbt::{Compound, List, Value};

pub const DISPLAY: &str = "display";
pub const NAME: &str = "Name";
pub const LORE: &str = "Lore";

pub fn with_compound<R>(parent: &mut Compound, key: &str, f: impl FnOnce(&mut Compound) -> R) -> R {
    let mut child = match parent.remove(key) {
        Some(Value::Compound(child)) => child,
        _ => Compound::new(),
    };

    let result = f(&mut child);

    if !child.is_empty() {
        parent.insert(key, Value::Compound(child));
    }

    result
}

pub fn take_compounds(parent: &mut Compound, key: &str) -> Vec<Compound> {
    match parent.remove(key) {
        Some(Value::List(List::Compound(list))) => list,
        _ => Vec::new(),
    }
}

pub fn put_compounds(parent: &mut Compound, key: &str, list: Vec<Compound>) {
    if list.is_empty() {
        parent.remove(key);
    } else {
        parent.insert(key, Value::List(List::Compound(list)));
    }
}

pub fn take_strings(parent: &mut Compound, key: &str) -> Vec<String> {
    match parent.remove(key) {
        Some(Value::List(List::String(list))) => list,
        _ => Vec::new(),
    }
}

pub fn put_strings(parent: &mut Compound, key: &str, list: Vec<String>) {
    if list.is_empty() {
        parent.remove(key);
    } else {
        parent.insert(key, Value::List(List::String(list)));
    }
}

pub fn compound<'a>(parent: &'a Compound, key: &str) -> Option<&'a Compound> {
    match parent.get(key)? {
        Value::Compound(child) => Some(child),
        _ => None,
    }
}

pub fn compounds<'a>(parent: &'a Compound, key: &str) -> &'a [Compound] {
    match parent.get(key) {
        Some(Value::List(List::Compound(list))) => list,
        _ => &[],
    }
}

pub fn strings<'a>(parent: &'a Compound, key: &str) -> &'a [String] {
    match parent.get(key) {
        Some(Value::List(List::String(list))) => list,
        _ => &[],
    }
}

pub fn string<'a>(parent: &'a Compound, key: &str) -> Option<&'a str> {
    match parent.get(key)? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Reads any integral tag as `i32`; vanilla is loose about which width it writes.
pub fn int(parent: &Compound, key: &str) -> Option<i32> {
    match parent.get(key)? {
        Value::Byte(v) => Some(i32::from(*v)),
        Value::Short(v) => Some(i32::from(*v)),
        Value::Int(v) => Some(*v),
        _ => None,
    }
}

pub fn flag(parent: &Compound, key: &str) -> bool {
    int(parent, key).is_some_and(|v| v != 0)
}

pub fn int_array<'a>(parent: &'a Compound, key: &str) -> &'a [i32] {
    match parent.get(key) {
        Some(Value::IntArray(values)) => values,
        _ => &[],
    }
}

pub fn put_flag(parent: &mut Compound, key: &str, value: bool) {
    parent.insert(key, Value::Byte(i8::from(value)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_children_are_dropped() {
        let mut root = Compound::new();

        with_compound(&mut root, DISPLAY, |display| {
            display.insert(NAME, Value::String("x".to_owned()));
        });
        assert!(compound(&root, DISPLAY).is_some());

        with_compound(&mut root, DISPLAY, |display| {
            display.remove(NAME);
        });
        assert!(compound(&root, DISPLAY).is_none());
    }

    #[test]
    fn test_int_widens() {
        let mut root = Compound::new();
        root.insert("b", Value::Byte(-3));
        root.insert("s", Value::Short(300));
        root.insert("s2", Value::String("no".to_owned()));

        assert_eq!(int(&root, "b"), Some(-3));
        assert_eq!(int(&root, "s"), Some(300));
        assert_eq!(int(&root, "s2"), None);
        assert!(flag(&root, "b"));
        assert!(!flag(&root, "missing"));
    }
}
