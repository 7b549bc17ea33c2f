use crate::api::ApiError;

/// Which modal is open, and for which record.
///
/// One value covers all modal kinds, so two modals can never be open at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Idle,
    Adding,
    Editing(String),
    Deleting(String),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Idle)
    }

    /// Key of the record targeted by edit/delete
    pub fn target(&self) -> Option<&str> {
        match self {
            ModalState::Editing(key) | ModalState::Deleting(key) => Some(key),
            ModalState::Idle | ModalState::Adding => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModalState::Idle => "idle",
            ModalState::Adding => "add",
            ModalState::Editing(_) => "edit",
            ModalState::Deleting(_) => "delete",
        }
    }
}

/// Inputs to the panel reducer, generic over the record type
#[derive(Debug, Clone)]
pub enum Action<T> {
    // Modal operations
    OpenAdd,
    OpenEdit(String),
    OpenDelete(String),
    CloseModal,
    MutationCompleted,

    // List loading
    RequestReload,
    LoadSucceeded(Vec<T>),
    LoadFailed(ApiError),
}

/// Side effects requested by the reducer, run by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one GET for the collection
    FetchList,
    /// Hand a list-load error to the notification sink as returned by the client
    Notify(ApiError),
}

/// Illegal lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Cannot open a modal while the {0} modal is open")]
    ModalAlreadyOpen(&'static str),

    #[error("{0} '{1}' is not in the loaded list")]
    UnknownRecord(&'static str, String),

    #[error("No modal is open")]
    NoModalOpen,

    #[error("No form is open")]
    NoFormOpen,

    #[error("No delete confirmation is open")]
    NoDeleteOpen,
}
