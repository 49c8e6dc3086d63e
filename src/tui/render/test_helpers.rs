use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, Task, TaskId, TaskStore};
use crate::ops::task_ops::{self, NewTask};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over top-level tasks given as `(id, title, completed)`.
pub fn app_with_tasks(tasks: &[(TaskId, &str, bool)]) -> App {
    let tasks = tasks
        .iter()
        .map(|&(id, title, completed)| {
            let mut task = Task::new(id, title, "");
            task.completed = completed;
            task
        })
        .collect();
    App::new(TaskStore::from_tasks(tasks), &Config::default())
}

/// Add an open subtask under `parent`.
pub fn add_subtask(app: &mut App, parent: TaskId, title: &str) -> TaskId {
    task_ops::add_task(&mut app.store, NewTask::subtask(title, "", parent)).unwrap()
}
