use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::model::config::SeedConfig;
use crate::model::task::{Task, TaskId, TaskStore};

/// Error type for fetching the seed batch
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid endpoint url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned status {0}")]
    Status(u16),
}

/// One record as returned by the list endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<TaskId>,
}

/// Something that can produce the initial task batch.
pub trait TaskSource: Send {
    /// Fetch at most `limit` records
    fn fetch(&self, limit: usize) -> Result<Vec<SeedRecord>, SeedError>;

    /// Human-readable origin, used in logs and output
    fn describe(&self) -> String;
}

/// Seed source backed by an HTTP list endpoint
pub struct HttpSource {
    client: reqwest::blocking::Client,
    endpoint: reqwest::Url,
}

impl HttpSource {
    pub fn new(config: &SeedConfig) -> Result<Self, SeedError> {
        let endpoint =
            reqwest::Url::parse(&config.endpoint).map_err(|e| SeedError::InvalidEndpoint {
                url: config.endpoint.clone(),
                reason: e.to_string(),
            })?;
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tasklist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpSource { client, endpoint })
    }
}

impl TaskSource for HttpSource {
    fn fetch(&self, limit: usize) -> Result<Vec<SeedRecord>, SeedError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("_limit", limit)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }

        let mut records: Vec<SeedRecord> = response.json()?;
        records.truncate(limit);
        Ok(records)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

/// Convert endpoint records into store tasks.
///
/// A record whose `parentId` names a top-level record of the same batch is
/// nested under it; any other `parentId` is dropped and the record stays
/// top-level. Order is preserved.
pub fn records_to_tasks(records: Vec<SeedRecord>) -> Vec<Task> {
    let top_level: HashSet<TaskId> = records
        .iter()
        .filter(|r| r.parent_id.is_none())
        .map(|r| r.id)
        .collect();

    let mut tasks: Vec<Task> = Vec::new();
    let mut children: Vec<Task> = Vec::new();
    for record in records {
        let mut task = Task::new(
            record.id,
            record.title,
            record.description.unwrap_or_default(),
        );
        task.completed = record.completed;
        match record.parent_id {
            Some(parent_id) if top_level.contains(&parent_id) => {
                task.parent_id = Some(parent_id);
                children.push(task);
            }
            Some(parent_id) => {
                tracing::warn!(id = task.id, parent_id, "seed record references unknown parent");
                tasks.push(task);
            }
            None => tasks.push(task),
        }
    }

    for child in children {
        if let Some(parent) = tasks
            .iter_mut()
            .find(|t| Some(t.id) == child.parent_id && t.parent_id.is_none())
        {
            parent.subtasks.push(child);
        }
    }
    tasks
}

/// Fetch the batch and convert it, without touching any store
pub fn fetch_seed(source: &dyn TaskSource, limit: usize) -> Result<Vec<Task>, SeedError> {
    tracing::info!(source = %source.describe(), limit, "fetching seed tasks");
    let records = source.fetch(limit)?;
    Ok(records_to_tasks(records))
}

/// Apply a fetch result to the store. Errors are logged and leave the store as it was.
/// Returns the number of top-level tasks loaded.
pub fn apply_seed(store: &mut TaskStore, result: Result<Vec<Task>, SeedError>) -> Option<usize> {
    match result {
        Ok(tasks) => {
            let count = tasks.len();
            store.replace(tasks);
            tracing::info!(count, "seeded task store");
            Some(count)
        }
        Err(e) => {
            tracing::error!(error = %e, "error fetching tasks");
            None
        }
    }
}

/// Fetch and apply in one step
pub fn seed_store(store: &mut TaskStore, source: &dyn TaskSource, limit: usize) -> Option<usize> {
    apply_seed(store, fetch_seed(source, limit))
}
