//! Tests for the variable environment

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use typeval::*;

#[test]
fn test_set_and_get() {
    let mut env = Environment::new();
    assert!(env.is_empty());
    assert_eq!(env.get("ncpus"), None);

    env.set("ncpus", Value::int(4));
    assert_eq!(env.get("ncpus"), Some(&Value::int(4)));
    assert!(env.contains("ncpus"));
    assert_eq!(env.len(), 1);

    // set overwrites
    env.set("ncpus", Value::int(8));
    assert_eq!(env.get("ncpus"), Some(&Value::int(8)));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_clear() {
    let mut env = Environment::new();
    env.set("a", Value::int(1));
    env.set("b", Value::int(2));
    env.clear();
    assert!(env.is_empty());
    assert_eq!(env.get("a"), None);
}

#[test]
fn test_bulk_load_replace() {
    let mut env = Environment::new();
    env.set("old", Value::int(1));

    let mut vars = IndexMap::new();
    vars.insert("ncpus".to_string(), Value::int(4));
    env.bulk_load(vars, true);

    assert_eq!(env.get("old"), None);
    assert_eq!(env.get("ncpus"), Some(&Value::int(4)));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_bulk_load_merge() {
    let mut env = Environment::new();
    env.set("old", Value::int(1));
    env.set("ncpus", Value::int(2));

    let mut vars = IndexMap::new();
    vars.insert("ncpus".to_string(), Value::int(4));
    vars.insert("state".to_string(), Value::string("free"));
    env.bulk_load(vars, false);

    // existing bindings survive, colliding keys take the new value
    assert_eq!(env.get("old"), Some(&Value::int(1)));
    assert_eq!(env.get("ncpus"), Some(&Value::int(4)));
    assert_eq!(env.get("state"), Some(&Value::string("free")));
    assert_eq!(env.len(), 3);
}

#[test]
fn test_iteration_preserves_insertion_order() {
    let mut env = Environment::new();
    env.set("b", Value::int(1));
    env.set("a", Value::int(2));
    env.set("c", Value::int(3));

    let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_from_map() {
    let mut vars = IndexMap::new();
    vars.insert("ncpus".to_string(), Value::int(4));
    let env = Environment::from(vars.clone());
    assert_eq!(env.get("ncpus"), Some(&Value::int(4)));
    assert_eq!(env.to_map(), vars);
}
