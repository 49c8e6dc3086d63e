use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops::{self, NewTask};

use super::app::{App, Focus};
use super::form::TextField;

/// Handle a key event for the focused widget
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    app.status = None;

    // Help overlay swallows everything but its own toggles
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::List => handle_list(app, key),
        Focus::Title => {
            if let Some(submitted) = handle_text(&mut app.form.title, key) {
                finish_field(app, submitted);
            }
        }
        Focus::Description => {
            if let Some(submitted) = handle_text(&mut app.form.description, key) {
                finish_field(app, submitted);
            }
        }
        Focus::Subtask => handle_subtask_toggle(app, key),
        Focus::Parent => handle_parent_select(app, key),
    }
}

fn handle_list(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('x') => app.complete_selected(),
        KeyCode::Char('a') => app.focus = Focus::Title,
        _ => {}
    }
}

/// What a text field wants after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldExit {
    Submit,
    Cancel,
}

/// Edit a text field. Returns `Some` when the key leaves the field.
fn handle_text(field: &mut TextField, key: KeyEvent) -> Option<FieldExit> {
    match key.code {
        KeyCode::Enter => return Some(FieldExit::Submit),
        KeyCode::Esc => return Some(FieldExit::Cancel),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.insert_char(c)
        }
        _ => {}
    }
    None
}

fn finish_field(app: &mut App, exit: FieldExit) {
    match exit {
        FieldExit::Submit => submit_form(app),
        FieldExit::Cancel => app.focus = Focus::List,
    }
}

fn handle_subtask_toggle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.form.toggle_subtask(&app.store),
        KeyCode::Enter => submit_form(app),
        KeyCode::Esc => app.focus = Focus::List,
        _ => {}
    }
}

fn handle_parent_select(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.form.select_prev_parent(),
        KeyCode::Down | KeyCode::Char('j') => app.form.select_next_parent(),
        KeyCode::Enter => submit_form(app),
        KeyCode::Esc => app.focus = Focus::List,
        _ => {}
    }
}

/// Read the form and add the task or subtask it describes.
/// Failures are logged and leave the store as it was.
pub fn submit_form(app: &mut App) {
    let values = app.form.values();
    if values.title.trim().is_empty() {
        app.set_status("Title is required");
        return;
    }

    let new = if values.is_subtask {
        let Some(parent_id) = values.parent_id else {
            tracing::error!("parent task not found: no parent selected");
            app.set_status("Parent task not found");
            return;
        };
        NewTask::subtask(values.title, values.description, parent_id)
    } else {
        NewTask::task(values.title, values.description)
    };

    match task_ops::add_task(&mut app.store, new) {
        Ok(id) => {
            tracing::info!(id, "task added");
            app.form.reset_text();
            app.set_status(format!("Added task {}", id));
        }
        Err(e) => {
            tracing::error!(error = %e, "error adding task");
            app.set_status(e.to_string());
        }
    }
}
