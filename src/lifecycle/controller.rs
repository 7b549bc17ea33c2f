//! Modal lifecycle controller for one resource panel.
//!
//! The controller owns the panel state, the open form or delete confirmation,
//! and the background list loads. Every state change goes through the
//! reducer; the controller only interprets the effects it returns.

use log::{debug, info};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::actions::{Action, Effect, LifecycleError, ModalState};
use super::delete::DeleteConfirmation;
use super::form::{FormOutcome, ResourceForm};
use super::state::{reduce, PanelState};
use super::task_manager::TaskManager;
use crate::api::ApiClient;
use crate::notify::Notifier;
use crate::resources::Resource;

pub struct LifecycleController<R: Resource> {
    scope: R::Scope,
    client: Arc<dyn ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: PanelState<R>,
    form: Option<ResourceForm<R>>,
    delete: Option<DeleteConfirmation<R>>,
    tasks: TaskManager<R::Record>,
    actions: mpsc::UnboundedReceiver<Action<R::Record>>,
}

impl<R: Resource> LifecycleController<R> {
    pub fn new(client: Arc<dyn ApiClient>, notifier: Arc<dyn Notifier>, scope: R::Scope) -> Self {
        let (tasks, actions) = TaskManager::new();
        Self {
            scope,
            client,
            notifier,
            state: PanelState::new(),
            form: None,
            delete: None,
            tasks,
            actions,
        }
    }

    /// Start the initial list load
    pub fn mount(&mut self) -> Result<(), LifecycleError> {
        debug!("Mounting {} panel for {:?}", R::ENTITY_NAME, self.scope);
        self.dispatch(Action::RequestReload)
    }

    /// Ask for a reload, e.g. because the parent scope itself was reloaded
    pub fn request_reload(&mut self) -> Result<(), LifecycleError> {
        self.dispatch(Action::RequestReload)
    }

    pub fn open_add(&mut self) -> Result<(), LifecycleError> {
        self.dispatch(Action::OpenAdd)
    }

    /// Open the edit form for `key` and load the record's current state
    pub async fn open_edit(&mut self, key: &str) -> Result<(), LifecycleError> {
        self.dispatch(Action::OpenEdit(key.to_string()))?;
        if let Some(form) = self.form.as_mut() {
            form.load(self.client.as_ref()).await;
        }
        Ok(())
    }

    pub fn open_delete(&mut self, key: &str) -> Result<(), LifecycleError> {
        self.dispatch(Action::OpenDelete(key.to_string()))
    }

    /// Close the open modal without saving; the list is reloaded
    pub fn close_modal(&mut self) -> Result<(), LifecycleError> {
        self.dispatch(Action::CloseModal)
    }

    /// Submit the open form. On success the modal closes and a reload is issued.
    pub async fn submit_form(&mut self) -> Result<FormOutcome, LifecycleError> {
        let form = self.form.as_mut().ok_or(LifecycleError::NoFormOpen)?;
        let outcome = form.submit(self.client.as_ref()).await;
        if outcome == FormOutcome::Completed {
            self.dispatch(Action::MutationCompleted)?;
        }
        Ok(outcome)
    }

    /// Confirm the open delete. On success the modal closes and a reload is issued.
    pub async fn confirm_delete(&mut self) -> Result<FormOutcome, LifecycleError> {
        let confirmation = self.delete.as_mut().ok_or(LifecycleError::NoDeleteOpen)?;
        let outcome = confirmation.confirm(self.client.as_ref()).await;
        if outcome == FormOutcome::Completed {
            self.dispatch(Action::MutationCompleted)?;
        }
        Ok(outcome)
    }

    /// Apply results until no list load is outstanding
    pub async fn settle(&mut self) -> Result<(), LifecycleError> {
        while self.state.is_loading() {
            match self.actions.recv().await {
                Some(action) => self.dispatch(action)?,
                None => break,
            }
        }
        self.tasks.cleanup_finished_tasks();
        Ok(())
    }

    /// Apply any results that already arrived, without waiting
    pub fn process_pending(&mut self) -> Result<usize, LifecycleError> {
        let mut applied = 0;
        while let Ok(action) = self.actions.try_recv() {
            self.dispatch(action)?;
            applied += 1;
        }
        self.tasks.cleanup_finished_tasks();
        Ok(applied)
    }

    pub fn scope(&self) -> &R::Scope {
        &self.scope
    }

    pub fn state(&self) -> &PanelState<R> {
        &self.state
    }

    pub fn records(&self) -> &[R::Record] {
        &self.state.records
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn modal(&self) -> &ModalState {
        &self.state.modal
    }

    pub fn form(&self) -> Option<&ResourceForm<R>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ResourceForm<R>> {
        self.form.as_mut()
    }

    pub fn delete_confirmation(&self) -> Option<&DeleteConfirmation<R>> {
        self.delete.as_ref()
    }

    pub fn active_task_count(&self) -> usize {
        self.tasks.task_count()
    }

    fn dispatch(&mut self, action: Action<R::Record>) -> Result<(), LifecycleError> {
        let effects = reduce(&mut self.state, action)?;
        self.sync_modal_components();
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    /// Keep the form/confirmation objects in step with the modal state
    fn sync_modal_components(&mut self) {
        match &self.state.modal {
            ModalState::Idle => {
                self.form = None;
                self.delete = None;
            }
            ModalState::Adding => {
                if self.form.is_none() {
                    self.form = Some(ResourceForm::create(self.scope.clone()));
                }
            }
            ModalState::Editing(key) => {
                if self.form.is_none() {
                    if let Some(record) = self.state.find(key) {
                        let initial = R::draft_from_record(record);
                        self.form = Some(ResourceForm::edit(self.scope.clone(), key.clone(), initial));
                    }
                }
            }
            ModalState::Deleting(key) => {
                if self.delete.is_none() {
                    self.delete = Some(DeleteConfirmation::new(self.scope.clone(), key.clone()));
                }
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchList => {
                info!("Loading {} for {:?}", R::ENTITY_NAME, self.scope);
                self.tasks
                    .spawn_list_load::<R>(Arc::clone(&self.client), self.scope.clone());
            }
            Effect::Notify(error) => self.notifier.notify(&error),
        }
    }
}
