use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use catalog_core::{
    Entity, EntityId, EntityValidator, FieldRules, FieldSource, FieldValue, Notification, Rule,
    RuleSet, created_now, impl_entity_id,
};

use crate::cast_member_type::CastMemberType;

/// Cast member identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastMemberId(pub EntityId);

impl_entity_id!(CastMemberId);

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .field(
            FieldRules::required("name")
                .rule(Rule::NotEmpty)
                .rule(Rule::IsString)
                .rule(Rule::MaxLength(255)),
        )
        .field(
            FieldRules::required("type")
                .rule(Rule::IsInt)
                .rule(Rule::OneOf(CastMemberType::CODES.to_vec())),
        )
});

#[derive(Debug, Clone)]
pub struct CastMemberProps {
    pub cast_member_id: Option<CastMemberId>,
    pub name: String,
    pub member_type: CastMemberType,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMemberCreateCommand {
    pub name: String,
    pub member_type: CastMemberType,
}

/// Aggregate root: CastMember.
#[derive(Debug, Clone)]
pub struct CastMember {
    cast_member_id: CastMemberId,
    name: String,
    member_type: CastMemberType,
    created_at: DateTime<Utc>,
    notification: Notification,
}

impl CastMember {
    pub fn new(props: CastMemberProps) -> Self {
        Self {
            cast_member_id: props.cast_member_id.unwrap_or_default(),
            name: props.name,
            member_type: props.member_type,
            created_at: props.created_at.unwrap_or_else(created_now),
            notification: Notification::new(),
        }
    }

    /// Build a fresh cast member and validate it. Violations land in the notification.
    pub fn create(command: CastMemberCreateCommand) -> Self {
        let mut member = Self::new(CastMemberProps {
            cast_member_id: None,
            name: command.name,
            member_type: command.member_type,
            created_at: None,
        });
        member.validate(None);
        member
    }

    pub fn rules() -> &'static RuleSet {
        &RULES
    }

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

    /// The type is already a valid value; nothing left to check.
    pub fn change_type(&mut self, member_type: CastMemberType) {
        self.member_type = member_type;
    }

    pub fn cast_member_id(&self) -> CastMemberId {
        self.cast_member_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_type(&self) -> CastMemberType {
        self.member_type
    }
}

impl PartialEq for CastMember {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for CastMember {}

impl FieldSource for CastMember {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "cast_member_id" => FieldValue::from(self.cast_member_id.to_string()),
            "name" => FieldValue::from(self.name.as_str()),
            "type" => FieldValue::from(self.member_type.value()),
            "created_at" => FieldValue::from(self.created_at),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for CastMember {
    type Id = CastMemberId;

    const NAME: &'static str = "CastMember";

    fn entity_id(&self) -> &Self::Id {
        &self.cast_member_id
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
            "cast_member_id": self.cast_member_id.to_string(),
            "name": self.name,
            "type": self.member_type,
            "created_at": self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn actor(name: &str) -> CastMember {
        CastMember::create(CastMemberCreateCommand {
            name: name.to_string(),
            member_type: CastMemberType::Actor,
        })
    }

    #[test]
    fn create_sets_defaults() {
        let member = actor("John Doe");
        assert_eq!(member.name(), "John Doe");
        assert_eq!(member.member_type(), CastMemberType::Actor);
        assert!(!member.notification().has_errors());
        assert!(member.created_at() <= Utc::now());
        assert_eq!(member.created_at().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn too_long_name_is_recorded() {
        let member = actor(&"a".repeat(256));
        assert_eq!(
            member.notification().field_errors("name").unwrap(),
            &["name must be shorter than or equal to 255 characters".to_string()]
        );
    }

    #[test]
    fn change_name_and_type() {
        let mut member = actor("John Doe");
        member.change_name("Jane Doe");
        member.change_type(CastMemberType::Director);
        assert_eq!(member.name(), "Jane Doe");
        assert_eq!(member.member_type(), CastMemberType::Director);
        assert!(!member.notification().has_errors());

        member.change_name("");
        assert_eq!(
            member.notification().field_errors("name").unwrap(),
            &["name should not be empty".to_string()]
        );
    }

    #[test]
    fn rules_reject_unknown_type_codes_in_raw_payloads() {
        let payload: HashMap<String, FieldValue> = [
            ("name".to_string(), FieldValue::from("John")),
            ("type".to_string(), FieldValue::from(5i64)),
        ]
        .into_iter()
        .collect();
        let mut notification = Notification::new();
        assert!(!CastMember::rules().validate(&mut notification, &payload, None));
        assert_eq!(
            notification.field_errors("type").unwrap(),
            &["type must be one of the following values: 1, 2".to_string()]
        );
    }

    #[test]
    fn to_json_renders_type_as_code() {
        let member = actor("John Doe");
        let json = member.to_json();
        assert_eq!(json["cast_member_id"], member.cast_member_id().to_string());
        assert_eq!(json["type"], 2);
        assert_eq!(json["name"], "John Doe");
    }

    #[test]
    fn same_id_same_member() {
        let member = actor("John Doe");
        let mut renamed = member.clone();
        renamed.change_name("Other");
        assert_eq!(member, renamed);
        assert_ne!(member, actor("John Doe"));
    }
}
