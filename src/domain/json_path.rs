//! Dot-addressed access into untyped JSON trees
//!
//! Paths are dot-separated keys (`scripts.prepare`). A segment that parses as
//! an unsigned integer indexes into an array when the current node is one.
//! Empty segments are ignored, so `a..b` and `a.b` address the same node.
//!
//! Package names can contain dots (`chart.js`), so dependency maps must be
//! accessed by key directly rather than through a path.

use serde_json::{Map, Value};

fn segments(path: &str) -> Vec<&str> {
    path.split('.').filter(|s| !s.is_empty()).collect()
}

/// Returns the value at `path`, or `None` when any segment is missing
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path)
        .into_iter()
        .try_fold(root, |current, key| match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// Scalars sitting where a container is required are replaced by an empty
/// object, so this never fails regardless of what the tree looked like. An
/// index one past the end of an array appends to it. Indices further out, or
/// non-numeric keys, turn the array into an object keyed by index.
pub fn set(root: &mut Value, path: &str, value: Value) {
    let parts = segments(path);
    set_in(root, &parts, value);
}

fn set_in(current: &mut Value, parts: &[&str], value: Value) {
    match parts.split_first() {
        None => *current = value,
        Some((key, rest)) => set_in(child_mut(current, key), rest, value),
    }
}

fn child_mut<'a>(current: &'a mut Value, key: &str) -> &'a mut Value {
    // Arrays only grow by appending. Any other segment turns the array into
    // an object keyed by index so no element is lost.
    if let Value::Array(items) = &mut *current {
        if !key.parse::<usize>().is_ok_and(|index| index <= items.len()) {
            let entries = std::mem::take(items)
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect();
            *current = Value::Object(entries);
        }
    }

    match (current, key.parse::<usize>()) {
        (Value::Array(items), Ok(index)) => {
            if index == items.len() {
                items.push(Value::Null);
            }
            &mut items[index]
        }
        (Value::Object(map), _) => map.entry(key).or_insert(Value::Null),
        (other, _) => {
            *other = Value::Object(Map::new());
            child_mut(other, key)
        }
    }
}

/// Removes the value at `path`, returning it when something was removed.
///
/// Object keys are removed without disturbing the order of their siblings.
/// Array slots are nulled so later indices keep their positions.
pub fn unset(root: &mut Value, path: &str) -> Option<Value> {
    let parts = segments(path);
    let (last, parents) = parts.split_last()?;

    let parent = parents
        .iter()
        .try_fold(root, |current, key| match current {
            Value::Object(map) => map.get_mut(*key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        })?;

    match parent {
        Value::Object(map) => map.shift_remove(*last),
        Value::Array(items) => {
            let index = last.parse::<usize>().ok()?;
            items
                .get_mut(index)
                .map(|slot| std::mem::replace(slot, Value::Null))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn get_nested_value() {
        let root = json!({"scripts": {"test": "jest"}});
        assert_eq!(get(&root, "scripts.test"), Some(&json!("jest")));
        assert_eq!(get(&root, "scripts.lint"), None);
        assert_eq!(get(&root, "missing.deeply.nested"), None);
    }

    #[test]
    fn get_through_scalar_is_none() {
        let root = json!({"name": "demo"});
        assert_eq!(get(&root, "name.first"), None);
    }

    #[test]
    fn get_array_index() {
        let root = json!({"files": ["dist", "lib"]});
        assert_eq!(get(&root, "files.1"), Some(&json!("lib")));
        assert_eq!(get(&root, "files.7"), None);
    }

    #[test]
    fn set_creates_intermediates() {
        let mut root = json!({});
        set(&mut root, "a.b.c", json!(1));
        assert_eq!(root, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn set_replaces_scalar_parent() {
        let mut root = json!({"scripts": "oops"});
        set(&mut root, "scripts.prepare", json!("husky install"));
        assert_eq!(root, json!({"scripts": {"prepare": "husky install"}}));
    }

    #[test]
    fn set_appends_to_array() {
        let mut root = json!({"files": ["dist"]});
        set(&mut root, "files.0", json!("build"));
        set(&mut root, "files.1", json!("lib"));
        assert_eq!(root, json!({"files": ["build", "lib"]}));
    }

    #[test]
    fn set_far_index_keeps_elements_under_index_keys() {
        let mut root = json!({"files": ["dist"]});
        set(&mut root, "files.4000000000", json!("x"));
        assert_eq!(root, json!({"files": {"0": "dist", "4000000000": "x"}}));

        let mut root = json!({"files": ["dist"]});
        set(&mut root, "files.18446744073709551615", json!("x"));
        assert_eq!(get(&root, "files.18446744073709551615"), Some(&json!("x")));
        assert_eq!(get(&root, "files.0"), Some(&json!("dist")));
    }

    #[test]
    fn set_named_key_on_array() {
        let mut root = json!({"files": ["dist"]});
        set(&mut root, "files.main", json!("index.js"));
        assert_eq!(root, json!({"files": {"0": "dist", "main": "index.js"}}));
    }

    #[test]
    fn set_keeps_sibling_order() {
        let mut root = json!({"name": "demo", "version": "1.0.0", "scripts": {}});
        set(&mut root, "version", json!("2.0.0"));

        let keys: Vec<_> = root.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "version", "scripts"]);
    }

    #[test]
    fn unset_removes_key() {
        let mut root = json!({"husky": {"hooks": {}}, "name": "demo"});
        assert_eq!(unset(&mut root, "husky"), Some(json!({"hooks": {}})));
        assert_eq!(root, json!({"name": "demo"}));
    }

    #[test]
    fn unset_missing_is_none() {
        let mut root = json!({"scripts": {"test": "jest"}});
        assert_eq!(unset(&mut root, "scripts.postinstall"), None);
        assert_eq!(unset(&mut root, "nothing.here"), None);
        assert_eq!(unset(&mut root, ""), None);
        assert_eq!(root, json!({"scripts": {"test": "jest"}}));
    }

    #[test]
    fn unset_preserves_order() {
        let mut root = json!({"a": 1, "b": 2, "c": 3, "d": 4});
        unset(&mut root, "b");

        let keys: Vec<_> = root.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
    }

    fn key() -> impl Strategy<Value = String> {
        "[a-z]{1,6}"
    }

    proptest! {
        #[test]
        fn set_then_get_returns_value(path in prop::collection::vec(key(), 1..6), n in any::<i64>()) {
            let path = path.join(".");
            let mut root = json!({"name": "demo"});
            set(&mut root, &path, json!(n));
            prop_assert_eq!(get(&root, &path), Some(&json!(n)));
        }

        #[test]
        fn unset_after_set_restores_absence(path in prop::collection::vec(key(), 1..6)) {
            let path = path.join(".");
            let mut root = json!({});
            set(&mut root, &path, json!(true));
            prop_assert_eq!(unset(&mut root, &path), Some(json!(true)));
            prop_assert_eq!(get(&root, &path), None);
        }
    }
}
