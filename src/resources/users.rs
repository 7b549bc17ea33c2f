//! Console users.
//!
//! Users are not nested under a bucket; they live in [`GlobalScope`]. Editing
//! a user first fetches the full record, since the list row may not carry the
//! current group membership.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use super::{null_as_empty, FormMode, Resource};
use crate::api::{decode, encode_segment, ApiClient, ApiError, Method};
use crate::constants::{API_PREFIX, ERROR_ACCESS_KEY_REQUIRED, ERROR_SECRET_KEY_REQUIRED};
use crate::lifecycle::select::{SelectField, SelectOption};
use crate::table::Column;

/// Whether a user may authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Enabled => "enabled",
            UserStatus::Disabled => "disabled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Enabled => "Enabled",
            UserStatus::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(UserStatus::Enabled),
            "disabled" => Ok(UserStatus::Disabled),
            other => Err(ApiError::Validation(format!("Unknown user status '{}'", other))),
        }
    }
}

/// A user as listed or fetched by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "accessKey")]
    pub access_key: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, rename = "memberOf", deserialize_with = "null_as_empty")]
    pub member_of: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub policy: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    users: Vec<User>,
}

/// Users are global to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlobalScope;

/// Form state for adding or editing a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    pub access_key: String,
    pub secret_key: String,
    pub status: UserStatus,
    pub groups: Vec<String>,
}

/// Resource kind for console users
#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

impl Users {
    /// Enabled/Disabled picker, only offered when editing
    pub fn status_select(current: UserStatus) -> SelectField {
        let options = [UserStatus::Enabled, UserStatus::Disabled]
            .iter()
            .map(|status| SelectOption::new(status.label(), status.as_str()))
            .collect();
        SelectField::new("user-status", "user-status", "Status", options, current.as_str())
    }

    fn user_path(access_key: &str) -> String {
        format!("{}/users/{}", API_PREFIX, encode_segment(access_key))
    }

    fn users_path() -> String {
        format!("{}/users", API_PREFIX)
    }
}

#[async_trait]
impl Resource for Users {
    type Scope = GlobalScope;
    type Record = User;
    type Draft = UserDraft;

    const DISPLAY_NAME: &'static str = "User";
    const ENTITY_NAME: &'static str = "Users";

    fn key(record: &User) -> &str {
        &record.access_key
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Access Key", "accessKey"),
            Column::new("Status", "status"),
            Column::new("Groups", "memberOf"),
        ]
    }

    fn cell(record: &User, element_key: &str) -> String {
        match element_key {
            "accessKey" => record.access_key.clone(),
            "status" => record.status.to_string(),
            "memberOf" => record.member_of.join(", "),
            "policy" => record.policy.join(", "),
            _ => String::new(),
        }
    }

    fn blank_draft() -> UserDraft {
        UserDraft::default()
    }

    fn draft_from_record(record: &User) -> UserDraft {
        UserDraft {
            access_key: record.access_key.clone(),
            secret_key: String::new(),
            status: record.status,
            groups: record.member_of.clone(),
        }
    }

    fn selectors(mode: &FormMode, draft: &UserDraft) -> Vec<SelectField> {
        if mode.is_edit() {
            vec![Self::status_select(draft.status)]
        } else {
            Vec::new()
        }
    }

    fn apply_selection(draft: &mut UserDraft, name: &str, value: &str) -> Result<(), ApiError> {
        match name {
            "user-status" => {
                draft.status = value.parse()?;
                Ok(())
            }
            other => Err(ApiError::Validation(format!("Unknown field '{}'", other))),
        }
    }

    fn validate(mode: &FormMode, draft: &UserDraft) -> Result<(), ApiError> {
        if *mode == FormMode::Create {
            if draft.access_key.trim().is_empty() {
                return Err(ApiError::Validation(ERROR_ACCESS_KEY_REQUIRED.to_string()));
            }
            if draft.secret_key.is_empty() {
                return Err(ApiError::Validation(ERROR_SECRET_KEY_REQUIRED.to_string()));
            }
        }
        Ok(())
    }

    async fn list(client: &dyn ApiClient, _scope: &GlobalScope) -> Result<Vec<User>, ApiError> {
        let value = client.invoke(Method::Get, &Self::users_path(), None).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let response: UsersResponse = decode(value)?;
        Ok(response.users)
    }

    async fn fetch(client: &dyn ApiClient, _scope: &GlobalScope, key: &str) -> Result<Option<UserDraft>, ApiError> {
        let value = client.invoke(Method::Get, &Self::user_path(key), None).await?;
        let user: User = decode(value)?;
        Ok(Some(Self::draft_from_record(&user)))
    }

    async fn create(client: &dyn ApiClient, _scope: &GlobalScope, draft: &UserDraft) -> Result<(), ApiError> {
        client
            .invoke(
                Method::Post,
                &Self::users_path(),
                Some(json!({
                    "accessKey": draft.access_key.trim(),
                    "secretKey": draft.secret_key,
                    "groups": draft.groups,
                })),
            )
            .await?;
        Ok(())
    }

    async fn update(client: &dyn ApiClient, _scope: &GlobalScope, key: &str, draft: &UserDraft) -> Result<(), ApiError> {
        client
            .invoke(
                Method::Put,
                &Self::user_path(key),
                Some(json!({
                    "status": draft.status.as_str(),
                    "groups": draft.groups,
                })),
            )
            .await?;
        Ok(())
    }

    async fn delete(client: &dyn ApiClient, _scope: &GlobalScope, key: &str) -> Result<(), ApiError> {
        client.invoke(Method::Delete, &Self::user_path(key), None).await?;
        Ok(())
    }
}
