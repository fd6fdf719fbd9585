use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

/// Main render function — header, task list, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title + separator | task list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_task_list(frame, app, chunks[1]);
    render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            " [>] tick",
            Style::default().fg(app.theme.highlight).bg(bg),
        )),
        Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;

    // Keep the cursor visible
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let tasks = app.store.tasks();
    if tasks.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            " no tasks yet. press a to add one",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(hint, area);
        return;
    }

    let width = area.width as usize;
    let mut lines = Vec::new();
    for (i, task) in tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let selected = i == app.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };

        let marker = if selected { " ▸ " } else { "   " };
        let checkbox_fg = if task.completed {
            app.theme.green
        } else {
            app.theme.text
        };
        let text_style = if task.completed {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if selected {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(
                format!("[{}] ", task.checkbox_char()),
                Style::default().fg(checkbox_fg).bg(row_bg),
            ),
            Span::styled(task.text.clone(), text_style),
        ];

        // Pad the row so the selection background reaches the edge
        let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if content_width < width {
            spans.push(Span::styled(
                " ".repeat(width - content_width),
                Style::default().bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// Render the status row (bottom of screen)
fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            let mut spans = if let Some(ref err) = app.save_error {
                vec![Span::styled(
                    format!(" {err}"),
                    Style::default().fg(app.theme.red).bg(bg),
                )]
            } else {
                vec![Span::styled(
                    format!(" {}", open_count_message(app.store.open_count())),
                    Style::default().fg(app.theme.text).bg(bg),
                )]
            };
            push_padded_hint(
                &mut spans,
                width,
                "a add  space toggle  d delete  q quit ",
                app.theme.dim,
                bg,
            );
            Line::from(spans)
        }
        Mode::Insert => {
            // Prompt with block cursor: > before▌after
            let before = &app.input[..app.input_cursor];
            let after = &app.input[app.input_cursor..];
            let mut spans = vec![
                Span::styled(" > ", Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    before.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    after.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            match app.save_error {
                Some(ref err) => {
                    push_padded_hint(&mut spans, width, &format!("{err} "), app.theme.red, bg);
                }
                None => {
                    push_padded_hint(&mut spans, width, "Enter add  Esc cancel ", app.theme.dim, bg);
                }
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align a dimmed hint by padding with background-colored spaces
fn push_padded_hint(spans: &mut Vec<Span>, width: usize, hint: &str, fg: Color, bg: Color) {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint.to_string(),
            Style::default().fg(fg).bg(bg),
        ));
    }
}

fn open_count_message(open: usize) -> String {
    match open {
        0 => "no open tasks".to_string(),
        1 => "1 open task".to_string(),
        n => format!("{n} open tasks"),
    }
}
