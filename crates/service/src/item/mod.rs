//! Untyped records keyed by a server-assigned integer `id`.
//!
//! An [`Item`] is an insertion-ordered JSON object. The store assigns `id` at
//! creation; every other field belongs to the caller and is never inspected.

pub mod memory;
pub mod repository;

use serde::Serialize;
use serde_json::{Map, Value};

pub use memory::MemoryItemStore;
pub use repository::ItemStore;

/// Caller-supplied fields of a create or update request.
pub type Fields = Map<String, Value>;

pub const ID_FIELD: &str = "id";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Item(Fields);

impl Item {
    /// Build a new item with `id` first; a caller `id` field is dropped in favour of the assigned one.
    pub fn with_id(id: i64, fields: Fields) -> Self {
        let mut map = Map::with_capacity(fields.len() + 1);
        map.insert(ID_FIELD.to_string(), Value::from(id));
        for (k, v) in fields {
            if k != ID_FIELD {
                map.insert(k, v);
            }
        }
        Self(map)
    }

    /// Integer `id`, or `None` if an update replaced it with something non-integral.
    /// A float with no fractional part (`2.0`) counts as that integer.
    pub fn id(&self) -> Option<i64> {
        self.0.get(ID_FIELD).and_then(integral)
    }

    pub fn matches(&self, id: i64) -> bool {
        self.id() == Some(id)
    }

    /// Overlay every patch field onto this item. Existing keys keep their position;
    /// `id` is overwritten like any other key; an integral float `id` is stored as an integer.
    pub fn overlay(&mut self, patch: Fields) {
        for (k, v) in patch {
            let v = match integral(&v) {
                Some(n) if k == ID_FIELD => Value::from(n),
                _ => v,
            };
            self.0.insert(k, v);
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }
}

fn integral(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parse the leading integer of an id path segment: leading whitespace and an
/// optional sign, then the run of ASCII digits. Trailing text is ignored
/// (`1abc` and `1.5` are both 1); no digits at all matches no item.
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    format!("{sign}{}", &rest[..digits]).parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Fields {
        match v {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn with_id_puts_id_first_and_overrides_caller_id() {
        let item = Item::with_id(7, fields(json!({"name": "pen", "id": 99, "qty": 1})));
        assert_eq!(item.id(), Some(7));
        let keys: Vec<&str> = item.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "qty"]);
    }

    #[test]
    fn overlay_keeps_unspecified_fields_and_key_order() {
        let mut item = Item::with_id(1, fields(json!({"name": "a", "qty": 1})));
        item.overlay(fields(json!({"qty": 2, "color": "red"})));
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"id":1,"name":"a","qty":2,"color":"red"}"#
        );
    }

    #[test]
    fn overlay_can_replace_id() {
        let mut item = Item::with_id(1, Fields::new());
        item.overlay(fields(json!({"id": "abc"})));
        assert_eq!(item.id(), None);
        assert!(!item.matches(1));
    }

    #[test]
    fn parse_id_reads_leading_integer() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 3 "), Some(3));
        assert_eq!(parse_id("-1"), Some(-1));
        assert_eq!(parse_id("+7"), Some(7));
        assert_eq!(parse_id("1abc"), Some(1));
        assert_eq!(parse_id("1.5"), Some(1));
        assert_eq!(parse_id("1.0"), Some(1));
    }

    #[test]
    fn parse_id_without_digits_is_none() {
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id(".5"), None);
        assert_eq!(parse_id("a1"), None);
    }

    #[test]
    fn integral_float_id_matches_and_is_stored_as_integer() {
        let mut item = Item::with_id(1, Fields::new());
        item.overlay(fields(json!({"id": 2.0})));
        assert!(item.matches(2));
        assert_eq!(item.fields()["id"], json!(2));
        assert_eq!(serde_json::to_string(&item).unwrap(), r#"{"id":2}"#);

        item.overlay(fields(json!({"id": 2.5})));
        assert_eq!(item.id(), None);
    }

    #[test]
    fn raw_float_id_still_counts_as_integer() {
        let mut map = Fields::new();
        map.insert("id".into(), json!(4.0));
        let item = Item(map);
        assert_eq!(item.id(), Some(4));
    }
}
