//! Create/edit/delete lifecycle for remote resource collections.
//!
//! This module contains the client-side orchestration shared by every resource
//! panel: fetch the collection, display it, mutate one record through a modal,
//! and refetch.
//!
//! # Module Components
//!
//! - [`actions`] - Modal state, reducer actions, effects and lifecycle errors
//! - [`loader`] - Reload gate preventing overlapping list fetches
//! - [`state`] - Panel state and the pure reducer
//! - [`task_manager`] - Background list loads reporting back over a channel
//! - [`form`] - Add/Edit form with local validation and guarded submission
//! - [`delete`] - Delete confirmation
//! - [`select`] - Select input model for enumerated fields
//! - [`controller`] - Ties the pieces together for one panel
//!
//! # Architecture
//!
//! 1. User intents and load results are [`Action`]s
//! 2. [`reduce`] applies an action to [`PanelState`] and returns [`Effect`]s
//! 3. The [`LifecycleController`] runs effects: list fetches are spawned by the
//!    [`TaskManager`], messages go to the injected notification sink
//! 4. A completed mutation closes the modal before the reload is spawned, and
//!    the list is always refetched rather than patched

pub mod actions;
pub mod controller;
pub mod delete;
pub mod form;
pub mod loader;
pub mod select;
pub mod state;
pub mod task_manager;

pub use actions::{Action, Effect, LifecycleError, ModalState};
pub use controller::LifecycleController;
pub use delete::DeleteConfirmation;
pub use form::{FormOutcome, ResourceForm, Submission};
pub use loader::ReloadGate;
pub use select::{SelectField, SelectOption};
pub use state::{reduce, PanelState};
pub use task_manager::{TaskId, TaskManager};
