pub mod form_view;
pub mod help_overlay;
mod helpers;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::ops::task_ops;

use super::app::App;
use helpers::push_right_aligned;

/// Main render function: header, task list, form, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                     // header
            Constraint::Min(1),                        // task list
            Constraint::Length(form_view::FORM_HEIGHT), // add-task form
            Constraint::Length(1),                     // status row
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, chunks[1]);
    form_view::render_form(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let stats = task_ops::task_stats(&app.store);
    let mut spans = vec![Span::styled(
        " tasklist",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    push_right_aligned(
        &mut spans,
        vec![Span::styled(
            format!("{} open \u{00B7} {} done ", stats.open(), stats.completed),
            Style::default().fg(app.theme.dim).bg(bg),
        )],
        area.width as usize,
        Style::default().bg(bg),
    );
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Focus;
    use super::test_helpers::*;

    #[test]
    fn full_screen_layout() {
        let mut app = app_with_tasks(&[(1, "Buy milk", false), (2, "Walk dog", true)]);
        add_subtask(&mut app, 1, "Skimmed");
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with(" tasklist"), "{output}");
        assert!(lines[0].ends_with("2 open \u{00B7} 1 done"), "{output}");
        assert!(lines[1].contains("ID: 1 - Buy milk"), "{output}");
        assert!(lines[2].contains("ID: 3 - Skimmed"), "{output}");
        assert!(lines[3].contains("ID: 2 - Walk dog"), "{output}");
        assert!(output.contains("Add task"), "{output}");
        assert!(lines[TERM_H as usize - 1].contains("? help"), "{output}");
    }

    #[test]
    fn help_overlay_draws_over_the_list() {
        let mut app = app_with_tasks(&[(1, "Buy milk", false)]);
        app.show_help = true;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Key Bindings"), "{output}");
    }

    #[test]
    fn form_focus_switches_key_hints() {
        let mut app = app_with_tasks(&[(1, "Buy milk", false)]);
        app.focus = Focus::Title;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Enter add  Tab next  Esc list"), "{output}");
    }
}
