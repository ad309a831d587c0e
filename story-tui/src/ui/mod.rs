//! UI rendering
//!
//! Pure rendering: state in, frame out, no side effects. The text editor is
//! a stateful tui-textarea owned by the main loop and passed in by reference.

pub mod composer;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::AppState;

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState, textarea: &TextArea) {
    let area = frame.area();

    if state.composer.expanded {
        render_expanded(frame, area, state, textarea);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        composer::render_collapsed_prompt(frame, chunks[0], state);
        render_status_bar(frame, chunks[2], state);
    }

    if state.help_visible {
        render_help_overlay(frame, area);
    }
}

fn render_expanded(frame: &mut Frame, area: Rect, state: &AppState, textarea: &TextArea) {
    let attachments_height = if state.composer.attachments.is_empty() {
        0
    } else {
        state.composer.attachments.len() as u16 + 2
    };
    let prompt_height = if state.composer.attach_prompt.is_some() {
        3
    } else {
        0
    };
    let error_height = if state.composer.error.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(attachments_height),
            Constraint::Length(prompt_height),
            Constraint::Length(error_height),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(textarea, chunks[0]);

    if attachments_height > 0 {
        composer::render_attachments(frame, chunks[1], state);
    }
    if prompt_height > 0 {
        composer::render_attach_prompt(frame, chunks[2], state);
    }
    if let Some(ref message) = state.composer.error {
        composer::render_error(frame, chunks[3], message);
    }

    render_status_bar(frame, chunks[4], state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let widget = if state.composer.submitting {
        Paragraph::new("Posting...")
            .block(Block::default().borders(Borders::ALL).title(" Posting "))
            .style(Style::default().fg(Color::Yellow))
    } else if let Some(ref post_id) = state.composer.last_post_id {
        Paragraph::new(format!("✓ Posted! ID: {}", post_id))
            .block(Block::default().borders(Borders::ALL).title(" Success "))
            .style(Style::default().fg(Color::Green))
    } else {
        let char_info = format!("{} chars", state.composer.char_count);
        let media_info = format!("{} media", state.composer.attachments.len());

        let hints = if state.can_submit() {
            "Ctrl+S: Post | Ctrl+A: Attach | F1: Help | Ctrl+Q: Quit"
        } else {
            "Ctrl+A: Attach | F1: Help | Ctrl+Q: Quit"
        };

        let lines = vec![
            Line::from(vec![
                Span::raw(char_info),
                Span::raw(" | "),
                Span::raw(media_info),
                Span::raw(" | "),
                Span::styled(
                    state.status.message.as_deref().unwrap_or("Ready"),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        ];

        Paragraph::new(lines).block(Block::default().borders(Borders::ALL))
    };

    frame.render_widget(widget, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  Ctrl+Q   - Quit"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Ctrl+E   - Expand/collapse composer"),
        Line::from(""),
        Line::from("Composer:"),
        Line::from("  Ctrl+S   - Post (when the draft has text or media)"),
        Line::from("  Ctrl+A   - Attach a media file by path"),
        Line::from("  Ctrl+X   - Remove the last attachment"),
        Line::from("  Esc      - Dismiss error / cancel prompt / collapse"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Center a percentage-sized rectangle inside `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
