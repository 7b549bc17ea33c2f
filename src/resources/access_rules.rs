//! Prefix access rules of a bucket.
//!
//! The server sets a rule per prefix, so add and edit both issue the same
//! `PUT`; there is no single-rule endpoint and edit starts from the list row.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use super::{null_as_empty, FormMode, Resource};
use crate::api::{decode, encode_segment, ApiClient, ApiError, Method};
use crate::constants::{API_PREFIX, ERROR_PREFIX_REQUIRED};
use crate::lifecycle::select::{SelectField, SelectOption};
use crate::table::Column;

/// Access granted on a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Readonly,
    Writeonly,
    Readwrite,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 3] = [AccessLevel::Readonly, AccessLevel::Writeonly, AccessLevel::Readwrite];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Readonly => "readonly",
            AccessLevel::Writeonly => "writeonly",
            AccessLevel::Readwrite => "readwrite",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ApiError::Validation(format!("Unknown access level '{}'", s)))
    }
}

/// One rule as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub prefix: String,
    pub access: AccessLevel,
}

#[derive(Debug, Deserialize)]
struct AccessRulesResponse {
    #[serde(default, rename = "accessRules", deserialize_with = "null_as_empty")]
    access_rules: Vec<AccessRule>,
}

/// Bucket under which access rules live
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketScope {
    pub bucket: String,
}

impl BucketScope {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self { bucket: bucket.into() }
    }

    fn rules_path(&self) -> String {
        format!("{}/bucket/{}/access-rules", API_PREFIX, encode_segment(&self.bucket))
    }
}

impl fmt::Display for BucketScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bucket)
    }
}

/// Form state for adding or editing a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRuleDraft {
    pub prefix: String,
    pub access: AccessLevel,
}

/// Resource kind for bucket access rules
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRules;

impl AccessRules {
    /// Picker for the access level
    pub fn access_select(current: AccessLevel) -> SelectField {
        let options = AccessLevel::ALL
            .iter()
            .map(|level| SelectOption::new(level.as_str(), level.as_str()))
            .collect();
        SelectField::new("access", "access", "Access", options, current.as_str())
    }

    async fn put_rule(client: &dyn ApiClient, scope: &BucketScope, prefix: &str, access: AccessLevel) -> Result<(), ApiError> {
        client
            .invoke(
                Method::Put,
                &scope.rules_path(),
                Some(json!({ "prefix": prefix, "access": access.as_str() })),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Resource for AccessRules {
    type Scope = BucketScope;
    type Record = AccessRule;
    type Draft = AccessRuleDraft;

    const DISPLAY_NAME: &'static str = "Access Rule";
    const ENTITY_NAME: &'static str = "Access Rules";

    fn key(record: &AccessRule) -> &str {
        &record.prefix
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("Prefix", "prefix"), Column::new("Access", "access")]
    }

    fn cell(record: &AccessRule, element_key: &str) -> String {
        match element_key {
            "prefix" => record.prefix.clone(),
            "access" => record.access.to_string(),
            _ => String::new(),
        }
    }

    fn blank_draft() -> AccessRuleDraft {
        AccessRuleDraft {
            prefix: String::new(),
            access: AccessLevel::Readonly,
        }
    }

    fn draft_from_record(record: &AccessRule) -> AccessRuleDraft {
        AccessRuleDraft {
            prefix: record.prefix.clone(),
            access: record.access,
        }
    }

    fn selectors(_mode: &FormMode, draft: &AccessRuleDraft) -> Vec<SelectField> {
        vec![Self::access_select(draft.access)]
    }

    fn apply_selection(draft: &mut AccessRuleDraft, name: &str, value: &str) -> Result<(), ApiError> {
        match name {
            "access" => {
                draft.access = value.parse()?;
                Ok(())
            }
            other => Err(ApiError::Validation(format!("Unknown field '{}'", other))),
        }
    }

    fn validate(mode: &FormMode, draft: &AccessRuleDraft) -> Result<(), ApiError> {
        if *mode == FormMode::Create && draft.prefix.trim().is_empty() {
            return Err(ApiError::Validation(ERROR_PREFIX_REQUIRED.to_string()));
        }
        Ok(())
    }

    async fn list(client: &dyn ApiClient, scope: &BucketScope) -> Result<Vec<AccessRule>, ApiError> {
        let value = client.invoke(Method::Get, &scope.rules_path(), None).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let response: AccessRulesResponse = decode(value)?;
        Ok(response.access_rules)
    }

    async fn fetch(_client: &dyn ApiClient, _scope: &BucketScope, _key: &str) -> Result<Option<AccessRuleDraft>, ApiError> {
        Ok(None)
    }

    async fn create(client: &dyn ApiClient, scope: &BucketScope, draft: &AccessRuleDraft) -> Result<(), ApiError> {
        Self::put_rule(client, scope, draft.prefix.trim(), draft.access).await
    }

    async fn update(
        client: &dyn ApiClient,
        scope: &BucketScope,
        key: &str,
        draft: &AccessRuleDraft,
    ) -> Result<(), ApiError> {
        Self::put_rule(client, scope, key, draft.access).await
    }

    async fn delete(client: &dyn ApiClient, scope: &BucketScope, key: &str) -> Result<(), ApiError> {
        client
            .invoke(Method::Delete, &scope.rules_path(), Some(json!({ "prefix": key })))
            .await?;
        Ok(())
    }
}
