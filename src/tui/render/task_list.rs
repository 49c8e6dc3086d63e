use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, SeedState};
use crate::util::unicode;

use super::helpers::{check_symbol, push_right_aligned};

const COMPLETE_CONTROL: &str = "[ Mark completed ]";
const DISABLED_CONTROL: &str = "[ completed ]";

/// Render the task list: one row per task, subtasks indented under their parent
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let rows = app.rows();

    if rows.is_empty() {
        let msg = if matches!(app.seed_state, SeedState::Pending { .. }) {
            " Loading tasks\u{2026}"
        } else {
            " No tasks"
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor on screen
    let visible_height = area.height as usize;
    app.cursor = app.cursor.min(rows.len() - 1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let width = area.width as usize;
    let list_focused = app.focus == Focus::List;
    let end = rows.len().min(app.scroll_offset + visible_height);
    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);

    for (idx, row) in rows.iter().enumerate().take(end).skip(app.scroll_offset) {
        let Some(task) = app.store.find(row.id) else {
            continue;
        };
        let is_cursor = list_focused && idx == app.cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let fg = app.theme.task_color(task.completed);

        let mut title_style = Style::default().fg(fg).bg(row_bg);
        if task.completed {
            title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
        } else if is_cursor {
            title_style = title_style.fg(app.theme.text_bright);
        }

        let indent = if row.depth == 0 { " " } else { "   \u{2514} " };
        let check_color = if task.completed { app.theme.green } else { fg };
        let id_label = format!("ID: {} - ", task.id);

        let (control, control_style) = if task.completed {
            (DISABLED_CONTROL, Style::default().fg(app.theme.dim).bg(row_bg))
        } else {
            let style = Style::default().fg(app.theme.highlight).bg(row_bg);
            let style = if is_cursor {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            (COMPLETE_CONTROL, style)
        };

        let prefix_width = unicode::display_width(indent)
            + 4 // checkbox + space
            + unicode::display_width(&id_label);
        let title_budget = width.saturating_sub(prefix_width + control.len() + 2);
        let title = unicode::truncate_to_width(&task.title, title_budget);

        let mut spans = vec![
            Span::styled(indent, Style::default().fg(app.theme.dim).bg(row_bg)),
            Span::styled(
                format!("{} ", check_symbol(task.completed)),
                Style::default().fg(check_color).bg(row_bg),
            ),
            Span::styled(id_label, Style::default().fg(app.theme.dim).bg(row_bg)),
            Span::styled(title, title_style),
        ];
        push_right_aligned(
            &mut spans,
            vec![
                Span::styled(control, control_style),
                Span::styled(" ", Style::default().bg(row_bg)),
            ],
            width,
            Style::default().bg(row_bg),
        );
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
