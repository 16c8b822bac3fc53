//! Dynamic view over an entity's attributes.
//!
//! Validators and the in-memory search engine both work against named fields rather
//! than concrete struct members. [`FieldSource`] exposes an entity (or a raw payload)
//! as `name -> FieldValue`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Snapshot of a single attribute value.
///
/// Ordering is total: values of the same kind compare naturally (strings by byte
/// order, timestamps chronologically); `Null` sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Something whose attributes can be read by name.
pub trait FieldSource {
    /// Current value of `name`; unknown fields read as [`FieldValue::Null`].
    fn field(&self, name: &str) -> FieldValue;
}

impl FieldSource for HashMap<String, FieldValue> {
    fn field(&self, name: &str) -> FieldValue {
        self.get(name).cloned().unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn text_orders_by_bytes() {
        let mut values: Vec<FieldValue> = ["aTest", "AaATest", "AAATest"]
            .into_iter()
            .map(FieldValue::from)
            .collect();
        values.sort();
        assert_eq!(
            values,
            vec![
                FieldValue::from("AAATest"),
                FieldValue::from("AaATest"),
                FieldValue::from("aTest"),
            ]
        );
    }

    #[test]
    fn timestamps_order_chronologically() {
        let now = Utc::now();
        assert!(FieldValue::from(now) < FieldValue::from(now + Duration::seconds(1)));
    }

    #[test]
    fn options_map_to_null() {
        assert!(FieldValue::from(None::<String>).is_null());
        assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".into()));
    }

    #[test]
    fn map_source_reads_missing_as_null() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), FieldValue::from("Movie"));
        assert_eq!(map.field("name").as_text(), Some("Movie"));
        assert!(map.field("description").is_null());
    }
}
