use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::form::TextField;
use crate::util::unicode;

use super::helpers::check_symbol;

/// Rows taken by the form, including its top border
pub const FORM_HEIGHT: u16 = 5;

const LABEL_WIDTH: usize = 14;

/// Render the add-task form below the list
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::with_capacity(4);
    lines.push(field_line(
        app,
        "Title",
        "Enter task title",
        &app.form.title,
        app.focus == Focus::Title,
        width,
    ));
    lines.push(field_line(
        app,
        "Description",
        "Enter task description",
        &app.form.description,
        app.focus == Focus::Description,
        width,
    ));

    let box_focused = app.focus == Focus::Subtask;
    let box_style = if box_focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    lines.push(Line::from(vec![
        Span::styled(" ", label_style),
        Span::styled(
            format!("{} Is subtask", check_symbol(app.form.is_subtask)),
            box_style,
        ),
    ]));

    if app.form.parent_visible() {
        lines.push(parent_line(app, width));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .title(Span::styled(
            " Add task ",
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn label_span<'a>(app: &App, label: &str, focused: bool) -> Span<'a> {
    let fg = if focused {
        app.theme.text_bright
    } else {
        app.theme.dim
    };
    Span::styled(
        format!(" {:<width$}", label, width = LABEL_WIDTH - 1),
        Style::default().fg(fg).bg(app.theme.background),
    )
}

fn field_line<'a>(
    app: &App,
    label: &str,
    placeholder: &'a str,
    field: &'a TextField,
    focused: bool,
    width: usize,
) -> Line<'a> {
    let field_bg = app.theme.field_bg;
    let text_style = Style::default().fg(app.theme.text_bright).bg(field_bg);
    let budget = width.saturating_sub(LABEL_WIDTH + 1);
    let mut spans = vec![label_span(app, label, focused)];

    if focused {
        // Keep the cursor in view: show the tail of the text before it
        let before = unicode::tail_to_width(&field.value[..field.cursor], budget.saturating_sub(1));
        let room = budget.saturating_sub(unicode::display_width(before) + 1);
        let after = unicode::truncate_to_width(&field.value[field.cursor..], room);
        spans.push(Span::styled(before, text_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(field_bg),
        ));
        spans.push(Span::styled(after, text_style));
    } else if field.value.is_empty() {
        spans.push(Span::styled(
            placeholder,
            Style::default().fg(app.theme.dim).bg(field_bg),
        ));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(&field.value, budget),
            text_style,
        ));
    }
    Line::from(spans)
}

fn parent_line<'a>(app: &'a App, width: usize) -> Line<'a> {
    let focused = app.focus == Focus::Parent;
    let mut spans = vec![label_span(app, "Parent", focused)];

    let Some(option) = app.form.parent_options.get(app.form.parent_index) else {
        spans.push(Span::styled(
            "(no tasks)",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
        return Line::from(spans);
    };

    let arrow_style = Style::default().fg(app.theme.dim).bg(app.theme.background);
    let value_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    };
    let budget = width.saturating_sub(LABEL_WIDTH + 5);
    spans.push(Span::styled("< ", arrow_style));
    spans.push(Span::styled(
        unicode::truncate_to_width(&option.label, budget),
        value_style,
    ));
    spans.push(Span::styled(" >", arrow_style));
    Line::from(spans)
}
