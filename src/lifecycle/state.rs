//! Panel state and its reducer.
//!
//! [`reduce`] is a pure function of the state and one [`Action`]; it never
//! performs I/O. Network work is returned as [`Effect`]s for the controller.

use log::{debug, info, warn};

use super::actions::{Action, Effect, LifecycleError, ModalState};
use super::loader::ReloadGate;
use crate::api::ApiError;
use crate::resources::Resource;

/// Transient per-panel session state
#[derive(Debug, Clone)]
pub struct PanelState<R: Resource> {
    /// Records from the last successful load
    pub records: Vec<R::Record>,
    /// Last list-load error, cleared by the next successful load
    pub last_error: Option<ApiError>,
    pub modal: ModalState,
    pub gate: ReloadGate,
}

impl<R: Resource> Default for PanelState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            last_error: None,
            modal: ModalState::Idle,
            gate: ReloadGate::new(),
        }
    }
}

impl<R: Resource> PanelState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    /// Record with `key` in the last loaded list
    pub fn find(&self, key: &str) -> Option<&R::Record> {
        self.records.iter().find(|record| R::key(record) == key)
    }
}

/// Apply one action to the panel state
pub fn reduce<R: Resource>(state: &mut PanelState<R>, action: Action<R::Record>) -> Result<Vec<Effect>, LifecycleError> {
    match action {
        Action::OpenAdd => {
            ensure_idle(state)?;
            state.modal = ModalState::Adding;
            Ok(Vec::new())
        }
        Action::OpenEdit(key) => {
            ensure_idle(state)?;
            ensure_known(state, &key)?;
            state.modal = ModalState::Editing(key);
            Ok(Vec::new())
        }
        Action::OpenDelete(key) => {
            ensure_idle(state)?;
            ensure_known(state, &key)?;
            state.modal = ModalState::Deleting(key);
            Ok(Vec::new())
        }
        Action::CloseModal => {
            if !state.modal.is_open() {
                return Ok(Vec::new());
            }
            debug!("Closing {} modal for {}", state.modal.name(), R::ENTITY_NAME);
            state.modal = ModalState::Idle;
            Ok(request_reload(state, false))
        }
        Action::MutationCompleted => {
            if !state.modal.is_open() {
                return Err(LifecycleError::NoModalOpen);
            }
            info!("{} {} completed, reloading", R::DISPLAY_NAME, state.modal.name());
            state.modal = ModalState::Idle;
            Ok(request_reload(state, true))
        }
        Action::RequestReload => Ok(request_reload(state, false)),
        Action::LoadSucceeded(records) => {
            if !state.gate.is_loading() {
                debug!("Ignoring {} list that arrived with no load outstanding", R::ENTITY_NAME);
                return Ok(Vec::new());
            }
            info!("Loaded {} {}", records.len(), R::ENTITY_NAME);
            state.records = records;
            state.last_error = None;
            Ok(settle(state))
        }
        Action::LoadFailed(error) => {
            if !state.gate.is_loading() {
                return Ok(Vec::new());
            }
            warn!("Failed to load {}: {}", R::ENTITY_NAME, error);
            state.last_error = Some(error.clone());
            let mut effects = vec![Effect::Notify(error)];
            effects.extend(settle(state));
            Ok(effects)
        }
    }
}

fn ensure_idle<R: Resource>(state: &PanelState<R>) -> Result<(), LifecycleError> {
    if state.modal.is_open() {
        return Err(LifecycleError::ModalAlreadyOpen(state.modal.name()));
    }
    Ok(())
}

fn ensure_known<R: Resource>(state: &PanelState<R>, key: &str) -> Result<(), LifecycleError> {
    if state.find(key).is_none() {
        return Err(LifecycleError::UnknownRecord(R::DISPLAY_NAME, key.to_string()));
    }
    Ok(())
}

fn request_reload<R: Resource>(state: &mut PanelState<R>, after_mutation: bool) -> Vec<Effect> {
    if state.gate.request(after_mutation) {
        vec![Effect::FetchList]
    } else {
        debug!("{} load already outstanding", R::ENTITY_NAME);
        Vec::new()
    }
}

fn settle<R: Resource>(state: &mut PanelState<R>) -> Vec<Effect> {
    if state.gate.settle() {
        vec![Effect::FetchList]
    } else {
        Vec::new()
    }
}
