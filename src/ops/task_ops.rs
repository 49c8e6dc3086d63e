use crate::model::task::{Task, TaskId, TaskStore};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),
    #[error("no task IDs left")]
    IdsExhausted,
}

/// Caller-supplied fields for a new task or subtask
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// `Some` to add a subtask under this top-level task
    pub parent_id: Option<TaskId>,
}

impl NewTask {
    pub fn task(title: impl Into<String>, description: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            description: description.into(),
            parent_id: None,
        }
    }

    pub fn subtask(
        title: impl Into<String>,
        description: impl Into<String>,
        parent_id: TaskId,
    ) -> Self {
        NewTask {
            parent_id: Some(parent_id),
            ..NewTask::task(title, description)
        }
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Add a task, or a subtask when `new.parent_id` is set.
/// Returns the assigned ID. A missing parent or a spent ID counter leaves the
/// store untouched.
pub fn add_task(store: &mut TaskStore, new: NewTask) -> Result<TaskId, TaskError> {
    let NewTask {
        title,
        description,
        parent_id,
    } = new;

    match parent_id {
        Some(parent_id) => {
            // Resolve the parent before touching the counter
            let idx = store
                .tasks()
                .iter()
                .position(|t| t.id == parent_id)
                .ok_or(TaskError::ParentNotFound(parent_id))?;
            let id = store.allocate_id().ok_or(TaskError::IdsExhausted)?;
            store.tasks_mut()[idx]
                .subtasks
                .push(Task::subtask(id, title, description, parent_id));
            tracing::debug!(id, parent_id, "added subtask");
            Ok(id)
        }
        None => {
            let id = store.allocate_id().ok_or(TaskError::IdsExhausted)?;
            store.tasks_mut().push(Task::new(id, title, description));
            tracing::debug!(id, "added task");
            Ok(id)
        }
    }
}

/// Mark a task complete, cascading to its direct subtasks.
/// Completing a subtask leaves its parent and siblings alone.
pub fn complete_task(store: &mut TaskStore, id: TaskId) -> Result<(), TaskError> {
    let task = store.find_mut(id).ok_or(TaskError::NotFound(id))?;
    task.completed = true;
    for sub in &mut task.subtasks {
        sub.completed = true;
    }
    tracing::debug!(id, cascaded = task.subtasks.len(), "marked task complete");
    Ok(())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Find a task or subtask by ID
pub fn find_task(store: &TaskStore, id: TaskId) -> Option<&Task> {
    store.find(id)
}

/// Task counts across the whole store (subtasks included)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn open(&self) -> usize {
        self.total - self.completed
    }
}

pub fn task_stats(store: &TaskStore) -> TaskStats {
    let mut stats = TaskStats::default();
    for task in store.tasks() {
        for t in std::iter::once(task).chain(task.subtasks.iter()) {
            stats.total += 1;
            if t.completed {
                stats.completed += 1;
            }
        }
    }
    stats
}
