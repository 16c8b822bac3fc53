//! Rule-based field validation.
//!
//! Each entity declares a [`RuleSet`]: an ordered list of fields, each with an ordered
//! list of [`Rule`]s. Running the set against a [`FieldSource`] writes one message per
//! failing rule into a [`Notification`]. Rules never short-circuit, so a field that
//! breaks three constraints reports three messages.

use crate::field::{FieldSource, FieldValue};
use crate::notification::Notification;

/// A single field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value is present and not the empty string.
    NotEmpty,
    IsString,
    IsBoolean,
    IsInt,
    /// String with at least this many characters.
    MinLength(usize),
    /// String with at most this many characters.
    MaxLength(usize),
    /// Integer that belongs to the listed values.
    OneOf(Vec<i64>),
}

impl Rule {
    /// Message for `field` when `value` breaks this rule, `None` otherwise.
    pub fn check(&self, field: &str, value: &FieldValue) -> Option<String> {
        match self {
            Rule::NotEmpty => match value {
                FieldValue::Null => Some(format!("{field} should not be empty")),
                FieldValue::Text(s) if s.is_empty() => Some(format!("{field} should not be empty")),
                _ => None,
            },
            Rule::IsString => (!matches!(value, FieldValue::Text(_)))
                .then(|| format!("{field} must be a string")),
            Rule::IsBoolean => (!matches!(value, FieldValue::Bool(_)))
                .then(|| format!("{field} must be a boolean value")),
            Rule::IsInt => (!matches!(value, FieldValue::Int(_)))
                .then(|| format!("{field} must be an integer number")),
            Rule::MinLength(min) => {
                let ok = matches!(value, FieldValue::Text(s) if s.chars().count() >= *min);
                (!ok).then(|| format!("{field} must be longer than or equal to {min} characters"))
            }
            Rule::MaxLength(max) => {
                let ok = matches!(value, FieldValue::Text(s) if s.chars().count() <= *max);
                (!ok).then(|| format!("{field} must be shorter than or equal to {max} characters"))
            }
            Rule::OneOf(allowed) => {
                let ok = matches!(value, FieldValue::Int(v) if allowed.contains(v));
                (!ok).then(|| {
                    let listed = allowed
                        .iter()
                        .map(i64::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{field} must be one of the following values: {listed}")
                })
            }
        }
    }
}

/// Constraints attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    field: &'static str,
    optional: bool,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Rules always run, a null value included.
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Rules are skipped when the value is null.
    pub fn optional(field: &'static str) -> Self {
        Self {
            field,
            optional: true,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    fn run(&self, notification: &mut Notification, value: &FieldValue) -> bool {
        if self.optional && value.is_null() {
            return true;
        }
        let mut valid = true;
        for rule in &self.rules {
            if let Some(message) = rule.check(self.field, value) {
                notification.set_error(message, Some(self.field));
                valid = false;
            }
        }
        valid
    }
}

/// Validates entity state into a notification.
pub trait EntityValidator<T: ?Sized> {
    /// Validate `fields` (or everything when `None`/empty). Returns `true` when no
    /// violation was recorded by this call.
    fn validate(&self, notification: &mut Notification, data: &T, fields: Option<&[&str]>) -> bool;
}

/// Ordered collection of [`FieldRules`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldRules::field)
    }
}

impl<T> EntityValidator<T> for RuleSet
where
    T: FieldSource + ?Sized,
{
    fn validate(&self, notification: &mut Notification, data: &T, fields: Option<&[&str]>) -> bool {
        let selected = fields.filter(|f| !f.is_empty());
        let mut valid = true;
        for rules in &self.fields {
            if let Some(selected) = selected {
                if !selected.contains(&rules.field) {
                    continue;
                }
            }
            let value = data.field(rules.field);
            valid &= rules.run(notification, &value);
        }
        valid
    }
}
