use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use catalog_application::PaginationOutput;
use catalog_application::cast_member::{
    CreateCastMemberInput, ListCastMembersInput, UpdateCastMemberInput,
};
use catalog_application::category::{
    CreateCategoryInput, ListCategoriesInput, UpdateCategoryInput,
};
use catalog_cast_member::{CastMemberFilterInput, InvalidCastMemberTypeError};
use catalog_core::{DomainError, SearchInput};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<CreateCategoryRequest> for CreateCategoryInput {
    fn from(body: CreateCategoryRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            is_active: body.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    /// Outer `None`: key absent. `Some(None)`: explicit `null`, clearing the description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateCategoryRequest {
    pub fn into_input(self, id: String) -> UpdateCategoryInput {
        UpdateCategoryInput {
            id,
            name: self.name,
            description: self.description,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCastMemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub member_type: i64,
}

impl From<CreateCastMemberRequest> for CreateCastMemberInput {
    fn from(body: CreateCastMemberRequest) -> Self {
        Self {
            name: body.name,
            member_type: body.member_type,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCastMemberRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub member_type: Option<i64>,
}

impl UpdateCastMemberRequest {
    pub fn into_input(self, id: String) -> UpdateCastMemberInput {
        UpdateCastMemberInput {
            id,
            name: self.name,
            member_type: self.member_type,
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// -------------------------
// Query strings
// -------------------------

/// Paging numbers arrive as text: absent stays absent, anything unparseable becomes `0`
/// and is normalized like any other non-positive value.
fn number(query: &HashMap<String, String>, key: &str) -> Option<i64> {
    query
        .get(key)
        .map(|raw| raw.trim().parse::<i64>().unwrap_or(0))
}

fn text(query: &HashMap<String, String>, key: &str) -> Option<String> {
    query.get(key).cloned()
}

fn paging<F>(query: &HashMap<String, String>, filter: Option<F>) -> SearchInput<F> {
    SearchInput {
        page: number(query, "page"),
        per_page: number(query, "per_page"),
        sort: text(query, "sort"),
        sort_dir: text(query, "sort_dir"),
        filter,
    }
}

/// `?page=&per_page=&sort=&sort_dir=&filter=`
pub fn category_search_input(query: &HashMap<String, String>) -> ListCategoriesInput {
    paging(query, text(query, "filter"))
}

/// `?page=&per_page=&sort=&sort_dir=&filter[name]=&filter[type]=`
///
/// A non-numeric `filter[type]` is reported the same way as an unknown type code.
pub fn cast_member_search_input(
    query: &HashMap<String, String>,
) -> Result<ListCastMembersInput, DomainError> {
    let name = text(query, "filter[name]");
    let member_type = match query.get("filter[type]").map(|raw| raw.trim()) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| InvalidCastMemberTypeError::new(raw).into_search_error())?,
        ),
    };

    let filter = (name.is_some() || member_type.is_some())
        .then_some(CastMemberFilterInput { name, member_type });
    Ok(paging(query, filter))
}

// -------------------------
// Presenters
// -------------------------

pub fn data<T: Serialize>(item: &T) -> Value {
    json!({ "data": item })
}

pub fn collection<T: Serialize>(page: &PaginationOutput<T>) -> Value {
    json!({
        "data": page.items,
        "meta": {
            "current_page": page.current_page,
            "per_page": page.per_page,
            "last_page": page.last_page,
            "total": page.total,
        },
    })
}
