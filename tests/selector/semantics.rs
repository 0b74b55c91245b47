//! Compiled predicates executed against SQLite
//!
//! Every query runs in both inline and bound form and the two must agree.

use crate::common::*;

fn numbers() -> RawTable {
    RawTable::with_docs(&[
        json!({"a": 1, "b": 2, "c": 3}),    // r00
        json!({"a": 6, "b": 7, "c": 8}),    // r01
        json!({"a": 11, "b": 12, "c": 13}), // r02
        json!({"a": 1, "b": 9, "c": 3}),    // r03
    ])
}

fn mixed() -> RawTable {
    RawTable::with_docs(&[
        json!({"name": "John Smith", "active": true, "score": 0.75, "tag": null}), // r00
        json!({"name": "Ioan Iliescu", "active": false, "score": 1.5}),            // r01
        json!({"name": "ALL", "nested": {"deep": {"x": 5}}}),                      // r02
    ])
}

#[test]
fn comparison_operators() {
    let t = numbers();
    assert_eq!(t.select(&json!({"$.a": 1})), vec!["r00", "r03"]);
    assert_eq!(t.select(&json!({"$.a": {"$gt": 1}})), vec!["r01", "r02"]);
    assert_eq!(t.select(&json!({"$.a": {"$gte": 6}})), vec!["r01", "r02"]);
    assert_eq!(t.select(&json!({"$.b": {"$lt": 7}})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.b": {"$lte": 7}})), vec!["r00", "r01"]);
    assert_eq!(t.select(&json!({"$.a": {"$ne": 1}})), vec!["r01", "r02"]);
}

#[test]
fn multiple_keys_are_anded() {
    let t = numbers();
    assert_eq!(t.select(&json!({"$.a": 1, "$.b": 2})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.a": 1, "$.b": 12})), Vec::<String>::new());
}

#[test]
fn or_of_and_matches_fixture() {
    let t = numbers();
    let rows = t.select(&json!({
        "$or": [
            {"$.a": 6},
            {"$and": [{"$.b": 9}, {"$.c": 3}]}
        ]
    }));
    assert_eq!(rows, vec!["r01", "r03"]);
}

#[test]
fn or_elements_and_their_own_keys() {
    let t = numbers();
    let rows = t.select(&json!({
        "$or": [
            {"$.a": 1, "$.b": 2},
            {"$.c": 13}
        ]
    }));
    assert_eq!(rows, vec!["r00", "r02"]);
}

#[test]
fn empty_combinators() {
    let t = numbers();
    assert_eq!(t.select(&json!({})).len(), 4);
    assert_eq!(t.select(&json!({"$and": []})).len(), 4);
    assert!(t.select(&json!({"$or": []})).is_empty());
}

#[test]
fn booleans_and_floats() {
    let t = mixed();
    assert_eq!(t.select(&json!({"$.active": true})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.active": false})), vec!["r01"]);
    assert_eq!(t.select(&json!({"$.score": {"$gt": 1.0}})), vec!["r01"]);
    assert_eq!(t.select(&json!({"$.score": 0.75})), vec!["r00"]);
}

#[test]
fn nested_paths() {
    let t = mixed();
    assert_eq!(t.select(&json!({"$.nested.deep.x": 5})), vec!["r02"]);
}

#[test]
fn null_notnull_exists() {
    let t = mixed();
    // $null: absent or JSON null
    assert_eq!(t.select(&json!({"$null": "$.tag"})), vec!["r00", "r01", "r02"]);
    // $notnull: present and not null
    assert_eq!(t.select(&json!({"$notnull": "$.score"})), vec!["r00", "r01"]);
    assert!(t.select(&json!({"$notnull": "$.tag"})).is_empty());
    // $exists: present, even when null
    assert_eq!(t.select(&json!({"$exists": "$.tag"})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.tag": {"$exists": true}})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.tag": {"$exists": false}})), vec!["r01", "r02"]);
}

#[test]
fn pattern_operators() {
    let t = mixed();
    assert_eq!(t.select(&json!({"$.name": {"$like": "%smith%"}})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.name": {"$glob": "*Smith"}})), vec!["r00"]);
    assert!(t.select(&json!({"$.name": {"$glob": "*smith"}})).is_empty());
    assert_eq!(t.select(&json!({"$.name": {"$regexp": "^I.*u$"}})), vec!["r01"]);
}

#[test]
fn numeric_regexp_pattern_is_its_decimal_text() {
    let t = RawTable::with_docs(&[json!({"n": 512}), json!({"n": 7})]);
    assert_eq!(t.select(&json!({"$.n": {"$regexp": 5}})), vec!["r00"]);
    assert_eq!(t.select(&json!({"$.n": {"$regexp": 7}})), vec!["r01"]);
}

#[test]
fn injection_payloads_are_inert() {
    let payload = "x'); DROP TABLE docs; --";
    let t = RawTable::with_docs(&[json!({"s": payload}), json!({"s": "x"})]);
    assert_eq!(t.select(&json!({"$.s": payload})), vec!["r00"]);
    // Table still there.
    assert_eq!(t.select(&json!({})).len(), 2);
}

#[test]
fn hostile_paths_are_inert() {
    let t = numbers();
    // The whole key stays inside the path literal, so it names a field that never exists.
    assert!(t.select(&json!({"$.a') OR 1=1 --": 1})).is_empty());
    assert_eq!(t.select(&json!({})).len(), 4);
}
