use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use catalog_core::{
    Entity, EntityId, EntityValidator, FieldRules, FieldSource, FieldValue, Notification, Rule,
    RuleSet, created_now, impl_entity_id,
};

/// Category identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub EntityId);

impl_entity_id!(CategoryId);

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .field(
            FieldRules::required("name")
                .rule(Rule::NotEmpty)
                .rule(Rule::IsString)
                .rule(Rule::MaxLength(255)),
        )
        .field(
            FieldRules::optional("description")
                .rule(Rule::IsString)
                .rule(Rule::MaxLength(255))
                .rule(Rule::MinLength(8)),
        )
        .field(FieldRules::optional("is_active").rule(Rule::IsBoolean))
});

/// Constructor input. Missing values are defaulted (fresh id, active, now).
#[derive(Debug, Clone, Default)]
pub struct CategoryProps {
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input of [`Category::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCreateCommand {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Aggregate root: Category.
///
/// Mutations re-validate the fields they touch and record violations in the
/// category's [`Notification`] instead of failing.
#[derive(Debug, Clone)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    notification: Notification,
}

impl Category {
    /// Build a category as-is, without validation (e.g. when loading from storage).
    pub fn new(props: CategoryProps) -> Self {
        Self {
            category_id: props.category_id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(created_now),
            notification: Notification::new(),
        }
    }

    /// Build a fresh category and validate every field.
    ///
    /// Never fails: callers inspect [`Entity::notification`] to decide.
    pub fn create(command: CategoryCreateCommand) -> Self {
        let mut category = Self::new(CategoryProps {
            name: command.name,
            description: command.description,
            is_active: command.is_active,
            ..CategoryProps::default()
        });
        category.validate(None);
        category
    }

    /// Rules every category is checked against.
    pub fn rules() -> &'static RuleSet {
        &RULES
    }

    /// Run the rules for `fields` (all when `None`), appending to the notification.
    pub fn validate(&mut self, fields: Option<&[&str]>) -> bool {
        let mut notification = std::mem::take(&mut self.notification);
        let valid = RULES.validate(&mut notification, &*self, fields);
        self.notification = notification;
        valid
    }

    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate(Some(&["name"][..]));
    }

    /// `None` clears the description.
    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
        self.validate(Some(&["description"][..]));
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Category {}

impl FieldSource for Category {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "category_id" => FieldValue::from(self.category_id.to_string()),
            "name" => FieldValue::from(self.name.as_str()),
            "description" => FieldValue::from(self.description.clone()),
            "is_active" => FieldValue::from(self.is_active),
            "created_at" => FieldValue::from(self.created_at),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    const NAME: &'static str = "Category";

    fn entity_id(&self) -> &Self::Id {
        &self.category_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn notification_mut(&mut self) -> &mut Notification {
        &mut self.notification
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "category_id": self.category_id.to_string(),
            "name": self.name,
            "description": self.description,
            "is_active": self.is_active,
            "created_at": self.created_at,
        })
    }
}
