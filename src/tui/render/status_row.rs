use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, SeedState};
use crate::util::unicode;

use super::helpers::push_right_aligned;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (message, color) = match (&app.status, &app.seed_state) {
        (Some(msg), _) => (msg.clone(), app.theme.yellow),
        (None, SeedState::Pending { origin }) => {
            (format!("Loading tasks from {}\u{2026}", origin), app.theme.dim)
        }
        (None, SeedState::Loaded { count, at }) => (
            format!("Loaded {} tasks at {}", count, at.format("%H:%M:%S")),
            app.theme.dim,
        ),
        (None, SeedState::Failed) => ("Could not load tasks".to_string(), app.theme.red),
        (None, SeedState::Idle) => (String::new(), app.theme.dim),
    };

    let hint = if app.show_key_hints {
        key_hint(app.focus)
    } else {
        ""
    };
    let hint_width = unicode::display_width(hint);
    let budget = width.saturating_sub(hint_width + 3);
    let mut spans = vec![Span::styled(
        format!(" {}", unicode::truncate_to_width(&message, budget)),
        Style::default().fg(color).bg(bg),
    )];
    if !hint.is_empty() {
        push_right_aligned(
            &mut spans,
            vec![
                Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)),
                Span::styled(" ", Style::default().bg(bg)),
            ],
            width,
            Style::default().bg(bg),
        );
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hint(focus: Focus) -> &'static str {
    match focus {
        Focus::List => "x complete  a add  ? help  q quit",
        Focus::Title | Focus::Description => "Enter add  Tab next  Esc list",
        Focus::Subtask => "Space toggle  Enter add  Tab next",
        Focus::Parent => "\u{2191}\u{2193} choose  Enter add  Tab next",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use chrono::{Local, TimeZone};

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn status_message_takes_priority() {
        let mut app = app_with_tasks(&[]);
        app.seed_state = SeedState::Failed;
        app.set_status("Added task 3");
        let output = render(&app);
        assert!(output.starts_with(" Added task 3"), "{output}");
        assert!(output.ends_with("x complete  a add  ? help  q quit"), "{output}");
    }

    #[test]
    fn seed_progress_is_shown() {
        let mut app = app_with_tasks(&[]);
        app.seed_state = SeedState::Pending {
            origin: "http://localhost/todos".into(),
        };
        assert!(render(&app).starts_with(" Loading tasks from http://localhost/todos\u{2026}"));

        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap();
        app.seed_state = SeedState::Loaded { count: 10, at };
        assert!(render(&app).starts_with(" Loaded 10 tasks at 09:30:15"));

        app.seed_state = SeedState::Failed;
        assert!(render(&app).starts_with(" Could not load tasks"));
    }

    #[test]
    fn hints_follow_focus_and_can_be_hidden() {
        let mut app = app_with_tasks(&[]);
        app.focus = Focus::Subtask;
        assert!(render(&app).ends_with("Space toggle  Enter add  Tab next"));

        app.show_key_hints = false;
        assert_eq!(render(&app), "");
    }
}
