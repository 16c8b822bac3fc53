//! Field-keyed validation error accumulation.
//!
//! A [`Notification`] collects validation messages without interrupting control flow.
//! Each entity owns one; validators write into it, and the application layer decides
//! whether accumulated errors should become a [`DomainError`](crate::DomainError).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Serializable view of one notification entry.
///
/// Global messages serialize as plain strings, field messages as `{"field": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationEntry {
    Global(String),
    Field(BTreeMap<String, Vec<String>>),
}

impl NotificationEntry {
    /// Single-field entry.
    pub fn field(field: impl Into<String>, messages: Vec<String>) -> Self {
        NotificationEntry::Field(BTreeMap::from([(field.into(), messages)]))
    }

    pub fn messages(&self) -> Vec<&str> {
        match self {
            NotificationEntry::Global(msg) => vec![msg.as_str()],
            NotificationEntry::Field(map) => map
                .values()
                .flat_map(|msgs| msgs.iter().map(String::as_str))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Global(String),
    Field { field: String, messages: Vec<String> },
}

/// Error-accumulation sink keyed by field name.
///
/// Insertion order is preserved across fields and within a field. Nothing is ever
/// removed: validating again only appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    entries: Vec<Entry>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, or in the global bucket when `field` is `None`.
    ///
    /// Field messages are appended as-is. A global message that is already present is
    /// not recorded twice.
    pub fn set_error(&mut self, message: impl Into<String>, field: Option<&str>) {
        let message = message.into();
        match field {
            Some(field) => {
                let existing = self.entries.iter_mut().find_map(|e| match e {
                    Entry::Field { field: f, messages } if f.as_str() == field => Some(messages),
                    _ => None,
                });
                match existing {
                    Some(messages) => messages.push(message),
                    None => self.entries.push(Entry::Field {
                        field: field.to_string(),
                        messages: vec![message],
                    }),
                }
            }
            None => {
                let seen = self
                    .entries
                    .iter()
                    .any(|e| matches!(e, Entry::Global(m) if *m == message));
                if !seen {
                    self.entries.push(Entry::Global(message));
                }
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Messages recorded for `field`, in insertion order.
    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.entries.iter().find_map(|e| match e {
            Entry::Field { field: f, messages } if f.as_str() == field => Some(messages.as_slice()),
            _ => None,
        })
    }

    pub fn global_errors(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                Entry::Global(m) => Some(m.as_str()),
                Entry::Field { .. } => None,
            })
            .collect()
    }

    /// Append every message of `other` into `self`, keeping field association.
    pub fn copy_errors(&mut self, other: &Notification) {
        for entry in &other.entries {
            match entry {
                Entry::Global(m) => self.set_error(m.clone(), None),
                Entry::Field { field, messages } => {
                    for m in messages {
                        self.set_error(m.clone(), Some(field.as_str()));
                    }
                }
            }
        }
    }

    pub fn to_json(&self) -> Vec<NotificationEntry> {
        self.entries
            .iter()
            .map(|e| match e {
                Entry::Global(m) => NotificationEntry::Global(m.clone()),
                Entry::Field { field, messages } => {
                    NotificationEntry::Field(BTreeMap::from([(field.clone(), messages.clone())]))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_notification_has_no_errors() {
        let notification = Notification::new();
        assert!(!notification.has_errors());
        assert!(notification.to_json().is_empty());
    }

    #[test]
    fn field_errors_accumulate_in_order() {
        let mut notification = Notification::new();
        notification.set_error("first", Some("name"));
        notification.set_error("second", Some("name"));

        assert!(notification.has_errors());
        assert_eq!(
            notification.field_errors("name").unwrap(),
            &["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn global_errors_are_list_entries_not_map_entries() {
        let mut notification = Notification::new();
        notification.set_error("global failure", None);
        notification.set_error("global failure", None);
        notification.set_error("bad name", Some("name"));

        assert_eq!(notification.global_errors(), vec!["global failure"]);
        assert!(notification.field_errors("global failure").is_none());

        let json = serde_json::to_value(notification.to_json()).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["global failure", { "name": ["bad name"] }])
        );
    }

    #[test]
    fn copy_errors_keeps_fields() {
        let mut a = Notification::new();
        a.set_error("a1", Some("name"));

        let mut b = Notification::new();
        b.set_error("b1", Some("name"));
        b.set_error("b2", Some("type"));
        b.set_error("g", None);

        a.copy_errors(&b);
        assert_eq!(a.field_errors("name").unwrap(), &["a1".to_string(), "b1".to_string()]);
        assert_eq!(a.field_errors("type").unwrap(), &["b2".to_string()]);
        assert_eq!(a.global_errors(), vec!["g"]);
    }

    proptest! {
        #[test]
        fn every_field_message_is_kept(messages in proptest::collection::vec("[a-z ]{1,20}", 1..10)) {
            let mut notification = Notification::new();
            for m in &messages {
                notification.set_error(m.clone(), Some("field"));
            }
            prop_assert!(notification.has_errors());
            prop_assert_eq!(notification.field_errors("field").unwrap(), messages.as_slice());
        }
    }
}
