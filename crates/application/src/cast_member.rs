//! Cast member use cases.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use catalog_cast_member::{
    CastMember, CastMemberCreateCommand, CastMemberFilterInput, CastMemberId,
    CastMemberRepository, CastMemberType, build_search_params,
};
use catalog_core::{
    DomainError, Entity, EntityValidator, FieldValue, Notification, Repository, SearchInput,
    SearchableRepository,
};

use crate::error::ApplicationResult;
use crate::pagination::PaginationOutput;
use crate::use_case::UseCase;

/// Cast member as returned to callers; the identifier is exposed as `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMemberOutput {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub member_type: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&CastMember> for CastMemberOutput {
    fn from(member: &CastMember) -> Self {
        Self {
            id: member.cast_member_id().to_string(),
            name: member.name().to_string(),
            member_type: member.member_type().value(),
            created_at: member.created_at(),
        }
    }
}

fn validation_error(notification: &Notification) -> DomainError {
    DomainError::EntityValidation(notification.to_json())
}

async fn load(repo: &dyn CastMemberRepository, raw_id: &str) -> ApplicationResult<CastMember> {
    let id = CastMemberId::parse(raw_id)?;
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found(CastMember::NAME, raw_id).into())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCastMemberInput {
    pub name: String,
    /// Raw type code; checked against [`CastMemberType`].
    pub member_type: i64,
}

pub struct CreateCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl CreateCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for CreateCastMemberUseCase {
    type Input = CreateCastMemberInput;
    type Output = CastMemberOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let member_type = match CastMemberType::create(input.member_type) {
            Ok(member_type) => member_type,
            Err(type_error) => {
                // No aggregate without a valid type: check the name on the raw input so
                // both problems are reported together.
                let payload = HashMap::from([("name".to_string(), FieldValue::from(input.name))]);
                let mut notification = Notification::new();
                CastMember::rules().validate(&mut notification, &payload, Some(&["name"][..]));
                notification.set_error(type_error.to_string(), Some("type"));
                warn!(member_type = input.member_type, "cast member type rejected");
                return Err(validation_error(&notification).into());
            }
        };

        let member = CastMember::create(CastMemberCreateCommand {
            name: input.name,
            member_type,
        });
        if member.notification().has_errors() {
            warn!(cast_member_id = %member.cast_member_id(), "cast member failed validation");
            return Err(validation_error(member.notification()).into());
        }

        self.repo.insert(member.clone()).await?;
        info!(cast_member_id = %member.cast_member_id(), "cast member created");
        Ok(CastMemberOutput::from(&member))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCastMemberInput {
    pub id: String,
}

pub struct GetCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl GetCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for GetCastMemberUseCase {
    type Input = GetCastMemberInput;
    type Output = CastMemberOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let member = load(self.repo.as_ref(), &input.id).await?;
        Ok(CastMemberOutput::from(&member))
    }
}

pub type ListCastMembersInput = SearchInput<CastMemberFilterInput>;

pub type ListCastMembersOutput = PaginationOutput<CastMemberOutput>;

pub struct ListCastMembersUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl ListCastMembersUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for ListCastMembersUseCase {
    type Input = ListCastMembersInput;
    type Output = ListCastMembersOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let params = build_search_params(input)?;
        debug!(page = params.page(), per_page = params.per_page(), "searching cast members");
        let result = self.repo.search(&params).await?;
        Ok(PaginationOutput::from_search_result(result, |m| {
            CastMemberOutput::from(&m)
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCastMemberInput {
    pub id: String,
    pub name: Option<String>,
    pub member_type: Option<i64>,
}

pub struct UpdateCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl UpdateCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for UpdateCastMemberUseCase {
    type Input = UpdateCastMemberInput;
    type Output = CastMemberOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let mut member = load(self.repo.as_ref(), &input.id).await?;

        if let Some(name) = input.name.filter(|n| !n.is_empty()) {
            member.change_name(name);
        }
        if let Some(code) = input.member_type.filter(|c| *c != 0) {
            match CastMemberType::create(code) {
                Ok(member_type) => member.change_type(member_type),
                Err(err) => member
                    .notification_mut()
                    .set_error(err.to_string(), Some("type")),
            }
        }
        if member.notification().has_errors() {
            warn!(cast_member_id = %member.cast_member_id(), "cast member failed validation");
            return Err(validation_error(member.notification()).into());
        }

        self.repo.update(member.clone()).await?;
        info!(cast_member_id = %member.cast_member_id(), "cast member updated");
        Ok(CastMemberOutput::from(&member))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCastMemberInput {
    pub id: String,
}

pub struct DeleteCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl DeleteCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for DeleteCastMemberUseCase {
    type Input = DeleteCastMemberInput;
    type Output = ();

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let id = CastMemberId::parse(&input.id)?;
        self.repo.delete(&id).await?;
        info!(cast_member_id = %id, "cast member deleted");
        Ok(())
    }
}
