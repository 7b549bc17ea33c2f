//! Add/Edit form for one resource kind.
//!
//! Submission is split in two phases so the "submit disabled while a request
//! is outstanding" rule is observable: [`ResourceForm::begin_submit`] validates
//! and locks the form, the returned [`Submission`] performs the request, and
//! [`ResourceForm::finish_submit`] records the outcome and unlocks it.

use log::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::lifecycle::select::SelectField;
use crate::resources::{FormMode, Resource};

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// The request succeeded; the caller closes the modal and reloads
    Completed,
    /// Local validation failed; no request was issued
    Rejected,
    /// The request failed; the error is shown inline and the form stays open
    Failed,
    /// A submission is already outstanding
    Busy,
}

/// Editable state of an Add or Edit modal
#[derive(Debug, Clone)]
pub struct ResourceForm<R: Resource> {
    scope: R::Scope,
    mode: FormMode,
    draft: R::Draft,
    submitting: bool,
    error: Option<String>,
}

/// A validated request detached from the form
#[derive(Debug, Clone)]
pub struct Submission<R: Resource> {
    scope: R::Scope,
    mode: FormMode,
    draft: R::Draft,
}

impl<R: Resource> Submission<R> {
    /// Issue the POST/PUT for this submission
    pub async fn send(&self, client: &dyn ApiClient) -> Result<(), ApiError> {
        match &self.mode {
            FormMode::Create => R::create(client, &self.scope, &self.draft).await,
            FormMode::Edit(key) => R::update(client, &self.scope, key, &self.draft).await,
        }
    }
}

impl<R: Resource> ResourceForm<R> {
    /// Form for a new record
    pub fn create(scope: R::Scope) -> Self {
        Self {
            scope,
            mode: FormMode::Create,
            draft: R::blank_draft(),
            submitting: false,
            error: None,
        }
    }

    /// Form for an existing record, seeded with `initial`
    pub fn edit(scope: R::Scope, key: impl Into<String>, initial: R::Draft) -> Self {
        Self {
            scope,
            mode: FormMode::Edit(key.into()),
            draft: initial,
            submitting: false,
            error: None,
        }
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create => format!("Add {}", R::DISPLAY_NAME),
            FormMode::Edit(_) => format!("Edit {}", R::DISPLAY_NAME),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// Inline error from the last load or submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Select inputs for the current mode, reflecting the draft
    pub fn selectors(&self) -> Vec<SelectField> {
        R::selectors(&self.mode, &self.draft)
    }

    /// Pick `value` in the select input `name`
    pub fn select(&mut self, name: &str, value: &str) -> Result<(), ApiError> {
        let mut field = self
            .selectors()
            .into_iter()
            .find(|field| field.name == name)
            .ok_or_else(|| ApiError::Validation(format!("{} form has no field '{}'", R::DISPLAY_NAME, name)))?;
        field.select(value)?;
        R::apply_selection(&mut self.draft, name, value)
    }

    /// Populate the fields from the server in edit mode.
    ///
    /// A failure is kept as the inline error; the seeded values stay in place.
    pub async fn load(&mut self, client: &dyn ApiClient) {
        let FormMode::Edit(key) = &self.mode else {
            return;
        };
        match R::fetch(client, &self.scope, key).await {
            Ok(Some(draft)) => {
                self.draft = draft;
                self.error = None;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to load {} '{}': {}", R::DISPLAY_NAME, key, e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Validate and lock the form.
    ///
    /// Returns the request to send, or the outcome when no request may be issued.
    pub fn begin_submit(&mut self) -> Result<Submission<R>, FormOutcome> {
        if self.submitting {
            return Err(FormOutcome::Busy);
        }
        if let Err(e) = R::validate(&self.mode, &self.draft) {
            self.error = Some(e.to_string());
            return Err(FormOutcome::Rejected);
        }
        self.submitting = true;
        Ok(Submission {
            scope: self.scope.clone(),
            mode: self.mode.clone(),
            draft: self.draft.clone(),
        })
    }

    /// Record the result of a submission and unlock the form
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> FormOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                info!("{} saved", R::DISPLAY_NAME);
                self.error = None;
                FormOutcome::Completed
            }
            Err(e) => {
                warn!("Failed to save {}: {}", R::DISPLAY_NAME, e);
                self.error = Some(e.to_string());
                FormOutcome::Failed
            }
        }
    }

    /// Validate, send, and record the result
    pub async fn submit(&mut self, client: &dyn ApiClient) -> FormOutcome {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };
        let result = submission.send(client).await;
        self.finish_submit(result)
    }
}
