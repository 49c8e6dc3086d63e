use std::io;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::seed::{HttpSource, apply_seed};
use crate::io::seed_worker::{SeedEvent, SeedWorker};
use crate::model::{Config, TaskId, TaskStore};
use crate::ops::task_ops::{self, TaskError};

use super::form::TaskForm;
use super::input;
use super::render;
use super::theme::Theme;

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Title,
    Description,
    Subtask,
    Parent,
}

/// Progress of the one-off seed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedState {
    /// No fetch was started
    Idle,
    Pending { origin: String },
    Loaded { count: usize, at: DateTime<Local> },
    Failed,
}

/// A visible row in the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRow {
    pub id: TaskId,
    /// 0 = top-level, 1 = subtask
    pub depth: usize,
    pub completed: bool,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub form: TaskForm,
    pub focus: Focus,
    /// Cursor index into `rows()`
    pub cursor: usize,
    /// First visible list row
    pub scroll_offset: usize,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// One-line message for the status row, cleared on the next key press
    pub status: Option<String>,
    pub seed_state: SeedState,
    seed_worker: Option<SeedWorker>,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        App {
            store,
            form: TaskForm::default(),
            focus: Focus::List,
            cursor: 0,
            scroll_offset: 0,
            theme: Theme::from_config(&config.ui),
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
            status: None,
            seed_state: SeedState::Idle,
            seed_worker: None,
        }
    }

    /// Attach a running seed fetch; its result is applied by `poll_seed`.
    pub fn with_seed_worker(mut self, worker: SeedWorker) -> Self {
        self.seed_state = SeedState::Pending {
            origin: worker.origin().to_string(),
        };
        self.seed_worker = Some(worker);
        self
    }

    /// Flatten the store into list rows: each task followed by its subtasks
    pub fn rows(&self) -> Vec<ListRow> {
        let mut rows = Vec::new();
        for task in self.store.tasks() {
            rows.push(ListRow {
                id: task.id,
                depth: 0,
                completed: task.completed,
            });
            for sub in &task.subtasks {
                rows.push(ListRow {
                    id: sub.id,
                    depth: 1,
                    completed: sub.completed,
                });
            }
        }
        rows
    }

    /// The task under the list cursor
    pub fn cursor_row(&self) -> Option<ListRow> {
        self.rows().get(self.cursor).copied()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Apply the seed result if it has arrived.
    pub fn poll_seed(&mut self) {
        let Some(worker) = &self.seed_worker else {
            return;
        };
        let Some(SeedEvent::Finished(result)) = worker.poll() else {
            return;
        };
        self.seed_worker = None;

        match apply_seed(&mut self.store, result) {
            Some(count) => {
                self.seed_state = SeedState::Loaded {
                    count,
                    at: Local::now(),
                };
                self.cursor = 0;
                self.scroll_offset = 0;
            }
            None => {
                self.seed_state = SeedState::Failed;
                self.set_status("Could not load tasks (see log)");
            }
        }

        // Keep an open parent selector in step with the new tasks
        if self.form.is_subtask {
            self.form.refresh_parent_options(&self.store);
        }
    }

    /// Mark a task complete. Failures are logged and returned to the caller.
    pub fn complete_task(&mut self, id: TaskId) -> Result<(), TaskError> {
        match task_ops::complete_task(&mut self.store, id) {
            Ok(()) => {
                tracing::info!(id, "task marked as completed");
                self.set_status(format!("Task {} marked as completed", id));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "error marking task as complete");
                self.set_status(e.to_string());
                Err(e)
            }
        }
    }

    /// Complete the task under the cursor. Completed rows have their control disabled.
    pub fn complete_selected(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        if row.completed {
            return;
        }
        let _ = self.complete_task(row.id);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Tab order: list → title → description → subtask box → parent (when shown) → list
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::Title,
            Focus::Title => Focus::Description,
            Focus::Description => Focus::Subtask,
            Focus::Subtask if self.form.parent_visible() => Focus::Parent,
            Focus::Subtask | Focus::Parent => Focus::List,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::List if self.form.parent_visible() => Focus::Parent,
            Focus::List => Focus::Subtask,
            Focus::Parent => Focus::Subtask,
            Focus::Subtask => Focus::Description,
            Focus::Description => Focus::Title,
            Focus::Title => Focus::List,
        };
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(TaskStore::new(), config);

    // Start the seed fetch before taking over the terminal
    match HttpSource::new(&config.seed) {
        Ok(source) => {
            let worker = SeedWorker::start(Box::new(source), config.seed.limit)?;
            app = app.with_seed_worker(worker);
        }
        Err(e) => {
            tracing::error!(error = %e, "error fetching tasks");
            app.seed_state = SeedState::Failed;
            app.set_status(format!("Could not load tasks: {}", e));
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.poll_seed();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::seed::tests::{FakeSource, record};
    use crate::model::Task;
    use crate::ops::task_ops::NewTask;
    use std::time::Instant;

    fn app() -> App {
        let mut store = TaskStore::from_tasks(vec![Task::new(1, "A", ""), Task::new(2, "B", "")]);
        task_ops::add_task(&mut store, NewTask::subtask("A.1", "", 1)).unwrap();
        App::new(store, &Config::default())
    }

    fn wait_for_seed(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while matches!(app.seed_state, SeedState::Pending { .. }) {
            assert!(Instant::now() < deadline, "seed never arrived");
            std::thread::sleep(Duration::from_millis(10));
            app.poll_seed();
        }
    }

    #[test]
    fn rows_list_subtasks_after_parent() {
        let app = app();
        let rows: Vec<_> = app.rows().iter().map(|r| (r.id, r.depth)).collect();
        assert_eq!(rows, vec![(1, 0), (3, 1), (2, 0)]);
    }

    #[test]
    fn complete_selected_cascades_and_skips_completed_rows() {
        let mut app = app();
        app.complete_selected();
        assert!(app.store.tasks()[0].completed);
        assert!(app.store.tasks()[0].subtasks[0].completed);
        assert_eq!(app.status.as_deref(), Some("Task 1 marked as completed"));

        // Control is disabled on a completed row
        app.status = None;
        app.complete_selected();
        assert_eq!(app.status, None);
    }

    #[test]
    fn complete_unknown_task_reports_not_found() {
        let mut app = app();
        let before = app.store.clone();
        assert_eq!(app.complete_task(99), Err(TaskError::NotFound(99)));
        assert_eq!(app.store, before);
        assert_eq!(app.status.as_deref(), Some("task not found: 99"));
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app();
        app.move_cursor(-1);
        assert_eq!(app.cursor, 0);
        app.move_cursor(10);
        assert_eq!(app.cursor, 2);
        assert_eq!(app.cursor_row().map(|r| r.id), Some(2));
    }

    #[test]
    fn focus_cycle_includes_parent_only_when_visible() {
        let mut app = app();
        let mut order = Vec::new();
        for _ in 0..5 {
            app.focus_next();
            order.push(app.focus);
        }
        assert_eq!(
            order,
            vec![
                Focus::Title,
                Focus::Description,
                Focus::Subtask,
                Focus::List,
                Focus::Title
            ]
        );

        app.form.toggle_subtask(&app.store);
        app.focus = Focus::Subtask;
        app.focus_next();
        assert_eq!(app.focus, Focus::Parent);
        app.focus_next();
        assert_eq!(app.focus, Focus::List);
        app.focus_prev();
        assert_eq!(app.focus, Focus::Parent);
    }

    #[test]
    fn seed_result_replaces_store() {
        let source = FakeSource(Ok(vec![record(10, "seeded", false), record(11, "done", true)]));
        let worker = SeedWorker::start(Box::new(source), 10).unwrap();
        let mut app = App::new(TaskStore::new(), &Config::default()).with_seed_worker(worker);
        app.form.toggle_subtask(&app.store);
        assert!(app.form.parent_options.is_empty());

        wait_for_seed(&mut app);

        assert!(matches!(app.seed_state, SeedState::Loaded { count: 2, .. }));
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.store.next_id(), Some(12));
        // Open selector picks up the seeded tasks
        assert_eq!(app.form.parent_options.len(), 2);
    }

    #[test]
    fn seed_failure_keeps_store_and_sets_status() {
        let worker = SeedWorker::start(Box::new(FakeSource(Err(500))), 10).unwrap();
        let mut app = app().with_seed_worker(worker);
        let before = app.store.clone();

        wait_for_seed(&mut app);

        assert_eq!(app.seed_state, SeedState::Failed);
        assert_eq!(app.store, before);
        assert!(app.status.is_some());
    }
}
