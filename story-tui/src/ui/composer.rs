//! Composer pane rendering
//!
//! The collapsed prompt, the attachments panel, the attach prompt line, and
//! the inline error bar. The text editor itself is a stateful tui-textarea
//! owned by the main loop; this module renders everything around it.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::AppState;

/// Collapsed one-line prompt, shown instead of the editor
pub fn render_collapsed_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let has_draft =
        !state.composer.content.trim().is_empty() || !state.composer.attachments.is_empty();
    let hint = if has_draft {
        "What's on your mind? (draft saved, Ctrl+E to continue)"
    } else {
        "What's on your mind? (Ctrl+E to write)"
    };

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled("+ ", Style::default().fg(Color::Cyan)),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(prompt, area);
}

/// Attachments panel listing every media file in the draft
pub fn render_attachments(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .composer
        .attachments
        .iter()
        .enumerate()
        .map(|(i, attachment)| {
            let marker = if attachment.video { "▶" } else { "◻" };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", marker),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(
                    "{}. {} ({}, {})",
                    i + 1,
                    attachment.file_name,
                    attachment.mime,
                    human_size(attachment.size)
                )),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(
                " Media ({}) — Ctrl+X removes last ",
                state.composer.attachments.len()
            ))
            .borders(Borders::ALL),
    );

    frame.render_widget(list, area);
}

/// One-line input for the path being attached
pub fn render_attach_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let input = state.composer.attach_prompt.as_deref().unwrap_or("");

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled("Attach: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(input),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" Attach media (Enter to add, Esc to cancel) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(prompt, area);
}

/// Inline error bar for media rejections and submission failures
pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let error = Paragraph::new(Line::from(vec![
        Span::styled("! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(message),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(error, area);
}

/// Render a byte count the way a person reads one
pub fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}
