use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::actions::Action;
use crate::api::ApiClient;
use crate::resources::Resource;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Spawns list loads and reports their results back as actions.
///
/// Results travel over an unbounded channel whose receiver belongs to the
/// controller. Once the controller is dropped, sends fail and late results
/// are discarded instead of being applied to state that no longer exists.
pub struct TaskManager<T> {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action<T>>,
}

impl<T: Send + 'static> TaskManager<T> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Spawn a background list load for `scope`
    pub fn spawn_list_load<R>(&mut self, client: Arc<dyn ApiClient>, scope: R::Scope) -> TaskId
    where
        R: Resource<Record = T>,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        let description = format!("Load {} for {:?}", R::ENTITY_NAME, scope);

        let handle = tokio::spawn(async move {
            let action = match R::list(client.as_ref(), &scope).await {
                Ok(records) => Action::LoadSucceeded(records),
                Err(e) => Action::LoadFailed(e),
            };
            if action_sender.send(action).is_err() {
                debug!("Panel closed before {} finished loading, discarding result", R::ENTITY_NAME);
            }
        });

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Remove finished tasks and return their ids
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                debug!("{} finished after {:?}", task.description, task.started_at.elapsed());
            }
        }

        finished
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
