//! Delete confirmation for one record.

use log::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::lifecycle::form::FormOutcome;
use crate::resources::Resource;

/// Confirmation modal targeting one record
#[derive(Debug, Clone)]
pub struct DeleteConfirmation<R: Resource> {
    scope: R::Scope,
    key: String,
    deleting: bool,
    error: Option<String>,
}

impl<R: Resource> DeleteConfirmation<R> {
    pub fn new(scope: R::Scope, key: impl Into<String>) -> Self {
        Self {
            scope,
            key: key.into(),
            deleting: false,
            error: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> String {
        format!("Delete {}", R::DISPLAY_NAME)
    }

    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete {} \"{}\"?",
            R::DISPLAY_NAME.to_lowercase(),
            self.key
        )
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Issue the DELETE.
    ///
    /// On failure the error is kept and the confirmation stays usable for a retry.
    pub async fn confirm(&mut self, client: &dyn ApiClient) -> FormOutcome {
        if self.deleting {
            return FormOutcome::Busy;
        }
        self.deleting = true;
        let result: Result<(), ApiError> = R::delete(client, &self.scope, &self.key).await;
        self.deleting = false;

        match result {
            Ok(()) => {
                info!("{} '{}' deleted", R::DISPLAY_NAME, self.key);
                self.error = None;
                FormOutcome::Completed
            }
            Err(e) => {
                warn!("Failed to delete {} '{}': {}", R::DISPLAY_NAME, self.key, e);
                self.error = Some(e.to_string());
                FormOutcome::Failed
            }
        }
    }
}
