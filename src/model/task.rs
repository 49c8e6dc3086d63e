/// Task identifier. Allocated from the store's counter, or taken verbatim from the seed.
pub type TaskId = u64;

/// A single to-do item. Subtasks share the same shape and carry `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Task title text
    pub title: String,
    /// Free-form description (empty when absent)
    pub description: String,
    /// Completion flag (one-way: never reset once set)
    pub completed: bool,
    /// Parent task ID; `Some` only for subtasks
    pub parent_id: Option<TaskId>,
    /// Direct subtasks, in insertion order
    pub subtasks: Vec<Task>,
}

impl Task {
    /// Create a new, open top-level task
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
            parent_id: None,
            subtasks: Vec::new(),
        }
    }

    /// Create a new, open subtask of `parent_id`
    pub fn subtask(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        parent_id: TaskId,
    ) -> Self {
        Task {
            parent_id: Some(parent_id),
            ..Task::new(id, title, description)
        }
    }

    pub fn is_subtask(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Highest ID in this task's subtree
    fn max_id(&self) -> TaskId {
        self.subtasks
            .iter()
            .map(Task::max_id)
            .fold(self.id, TaskId::max)
    }
}

/// In-memory task store: the ordered top-level tasks plus the ID counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// `None` once every ID up to `TaskId::MAX` is taken
    next_id: Option<TaskId>,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing tasks (counter starts after the highest ID)
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = TaskStore::new();
        store.replace(tasks);
        store
    }

    /// The current top-level tasks, by reference
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    /// Number of top-level tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The ID the next added task will receive, if any are left
    pub fn next_id(&self) -> Option<TaskId> {
        self.next_id
    }

    /// Replace the whole content. The counter never moves backwards.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        let highest = tasks.iter().map(Task::max_id).max().unwrap_or(0);
        self.next_id = match (self.next_id, highest.checked_add(1)) {
            (Some(current), Some(after)) => Some(current.max(after)),
            _ => None,
        };
        self.tasks = tasks;
    }

    /// Take the next ID from the counter. `None` leaves the store untouched.
    pub(crate) fn allocate_id(&mut self) -> Option<TaskId> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }

    /// Find a task by ID: top-level tasks first, then their subtasks
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id).or_else(|| {
            self.tasks
                .iter()
                .flat_map(|t| t.subtasks.iter())
                .find(|s| s.id == id)
        })
    }

    /// Mutable variant of [`TaskStore::find`]
    pub fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        if let Some(idx) = self.tasks.iter().position(|t| t.id == id) {
            return self.tasks.get_mut(idx);
        }
        self.tasks
            .iter_mut()
            .flat_map(|t| t.subtasks.iter_mut())
            .find(|s| s.id == id)
    }
}
