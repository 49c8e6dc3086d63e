use std::sync::mpsc;
use std::thread;

use crate::io::seed::{SeedError, TaskSource, fetch_seed};
use crate::model::task::Task;

/// Sent from the seed thread to the TUI event loop.
#[derive(Debug)]
pub enum SeedEvent {
    /// The fetch finished; the result still has to be applied to the store.
    Finished(Result<Vec<Task>, SeedError>),
}

/// Runs the one-off seed fetch off the UI thread.
pub struct SeedWorker {
    rx: mpsc::Receiver<SeedEvent>,
    origin: String,
}

impl SeedWorker {
    /// Spawn the fetch. Call `poll()` each tick to pick up the result.
    pub fn start(source: Box<dyn TaskSource>, limit: usize) -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel();
        let origin = source.describe();

        thread::Builder::new()
            .name("seed-fetch".into())
            .spawn(move || {
                let result = fetch_seed(source.as_ref(), limit);
                // Receiver gone means the UI already quit
                let _ = tx.send(SeedEvent::Finished(result));
            })?;

        Ok(SeedWorker { rx, origin })
    }

    /// Where the tasks are being fetched from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Non-blocking poll for the fetch result.
    pub fn poll(&self) -> Option<SeedEvent> {
        self.rx.try_recv().ok()
    }
}
