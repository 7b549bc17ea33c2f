//! Resource kinds managed through the console API.
//!
//! A resource kind describes one remote collection: the scope it lives under,
//! the record schema returned by the server, the editable draft a form works
//! on, and the REST calls for list/get/create/update/delete. The lifecycle
//! layer is generic over [`Resource`], so access rules and users share one
//! loader, controller, form, and delete confirmation.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::api::{ApiClient, ApiError};
use crate::lifecycle::select::SelectField;
use crate::table::Column;

/// Bucket access rules
pub mod access_rules;

/// Console users
pub mod users;

pub use access_rules::{AccessLevel, AccessRule, AccessRuleDraft, AccessRules, BucketScope};
pub use users::{GlobalScope, User, UserDraft, UserStatus, Users};

/// Whether a form creates a new record or edits the record with the given key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// A remote collection of records nested under a parent scope
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Parent scope partitioning the collection
    type Scope: Clone + Debug + Send + Sync + 'static;
    /// Record as returned by the list endpoint
    type Record: Clone + Debug + Send + Sync + 'static;
    /// Editable field state bound to the Add/Edit form
    type Draft: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Singular display name, e.g. "Access Rule"
    const DISPLAY_NAME: &'static str;
    /// Plural display name used by tables, e.g. "Access Rules"
    const ENTITY_NAME: &'static str;

    /// Key identifying a record within its scope
    fn key(record: &Self::Record) -> &str;

    /// Table columns
    fn columns() -> Vec<Column>;

    /// Display value of `record` for a column's element key
    fn cell(record: &Self::Record, element_key: &str) -> String;

    /// Empty draft for create mode
    fn blank_draft() -> Self::Draft;

    /// Draft seeded from a list row for edit mode
    fn draft_from_record(record: &Self::Record) -> Self::Draft;

    /// Select inputs shown by the form in `mode`
    fn selectors(mode: &FormMode, draft: &Self::Draft) -> Vec<SelectField>;

    /// Write an accepted select value back into the draft
    fn apply_selection(draft: &mut Self::Draft, name: &str, value: &str) -> Result<(), ApiError>;

    /// Local required-field checks run before any request is issued
    fn validate(mode: &FormMode, draft: &Self::Draft) -> Result<(), ApiError>;

    /// Fetch the collection for `scope`
    async fn list(client: &dyn ApiClient, scope: &Self::Scope) -> Result<Vec<Self::Record>, ApiError>;

    /// Fetch the full editable state of one record.
    ///
    /// `None` means the kind has no single-record endpoint and the list row is
    /// authoritative.
    async fn fetch(client: &dyn ApiClient, scope: &Self::Scope, key: &str) -> Result<Option<Self::Draft>, ApiError>;

    async fn create(client: &dyn ApiClient, scope: &Self::Scope, draft: &Self::Draft) -> Result<(), ApiError>;

    async fn update(client: &dyn ApiClient, scope: &Self::Scope, key: &str, draft: &Self::Draft)
        -> Result<(), ApiError>;

    async fn delete(client: &dyn ApiClient, scope: &Self::Scope, key: &str) -> Result<(), ApiError>;
}

/// Deserialize a JSON array that the server may send as `null`
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
