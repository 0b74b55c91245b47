//! Single-row operations and key listing

use crate::common::*;

#[test]
fn put_then_get() {
    let t = TestDb::new();
    let store = t.store("docs");
    let doc = json!({"name": "John Smith", "tags": ["a", "b"], "nested": {"n": 1.5}});
    store.put("k1", &doc).unwrap();
    assert_eq!(store.get("k1").unwrap(), Some(doc));
}

#[test]
fn get_missing_is_none() {
    let t = TestDb::new();
    let store = t.store("docs");
    assert_eq!(store.get("nope").unwrap(), None);
    assert!(!store.exists("nope").unwrap());
}

#[test]
fn put_overwrites() {
    let t = TestDb::new();
    let store = t.store("docs");
    store.put("k", &json!({"v": 1})).unwrap();
    store.put("k", &json!({"v": 2})).unwrap();
    assert_eq!(store.get("k").unwrap(), Some(json!({"v": 2})));
    assert_eq!(store.keys(None).unwrap(), vec!["k"]);
}

#[test]
fn numeric_looking_keys_stay_text() {
    let t = TestDb::new();
    let store = t.store("docs");
    store.put("42", &json!({"answer": true})).unwrap();
    assert!(store.exists("42").unwrap());
    assert_eq!(store.get("42").unwrap(), Some(json!({"answer": true})));
    assert_eq!(store.get("042").unwrap(), None);
}

#[test]
fn scalar_documents_round_trip() {
    let t = TestDb::new();
    let store = t.store("docs");
    store.put("s", "just text").unwrap();
    store.put("n", &7).unwrap();
    store.put("null", &Value::Null).unwrap();
    assert_eq!(store.get("s").unwrap(), Some(json!("just text")));
    assert_eq!(store.get("n").unwrap(), Some(json!(7)));
    assert_eq!(store.get("null").unwrap(), Some(Value::Null));
}

#[test]
fn update_only_touches_existing_keys() {
    let t = TestDb::new();
    let store = t.store("docs");
    assert!(!store.update("k", &json!({"v": 1})).unwrap());
    assert!(!store.exists("k").unwrap());

    store.put("k", &json!({"v": 1})).unwrap();
    assert!(store.update("k", &json!({"v": 3})).unwrap());
    assert_eq!(store.get("k").unwrap(), Some(json!({"v": 3})));
}

#[test]
fn delete_removes_once() {
    let t = TestDb::new();
    let store = t.store("docs");
    store.put("k", &json!({})).unwrap();
    assert!(store.delete("k").unwrap());
    assert!(!store.delete("k").unwrap());
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn keys_are_sorted_and_filterable() {
    let t = TestDb::new();
    let store = t.multi();
    let text = t.text();

    let all = store.keys(None).unwrap();
    assert_eq!(all.len(), 8);
    assert_eq!(all.first().map(String::as_str), Some("key0"));
    assert_eq!(all.last().map(String::as_str), Some("key7"));

    assert_eq!(store.keys(Some("key1")).unwrap(), vec!["key1"]);
    assert_eq!(store.keys(Some("KEY_")).unwrap().len(), 8);
    assert!(store.keys(Some("text%")).unwrap().is_empty());
    assert_eq!(text.keys(Some("text%")).unwrap(), vec!["text0", "text1", "text2"]);
}

#[test]
fn find_all_returns_documents_in_key_order() {
    let t = TestDb::new();
    let store = t.store("docs");
    store.put("b", &json!({"k": "b"})).unwrap();
    store.put("a", &json!({"k": "a"})).unwrap();
    store.put("c", &json!({"k": "c"})).unwrap();
    assert_eq!(
        store.find_all().unwrap(),
        vec![json!({"k": "a"}), json!({"k": "b"}), json!({"k": "c"})]
    );
}

#[test]
fn put_accepts_serializable_types() {
    #[derive(serde::Serialize)]
    struct Person<'a> {
        name: &'a str,
        age: u32,
    }

    let t = TestDb::new();
    let store = t.store("people");
    store.put("p", &Person { name: "Ioan", age: 30 }).unwrap();
    assert_eq!(store.get("p").unwrap(), Some(json!({"name": "Ioan", "age": 30})));
}
