//! story-tui - Terminal UI for Storycast
//!
//! Interactive composer for the story-sharing backend: draft text, attach
//! media files, preview the selection, and submit, with inline errors and
//! retry on failure.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::TextArea;

use libstorycast::service::EMPTY_DRAFT_MESSAGE;
use story_tui::{
    app::{
        event::{EventHandler, TuiEvent},
        reduce, Action, AppState,
    },
    error::Result,
    services::{ServiceHandle, SubmitOutcome},
    terminal::{install_panic_hook, restore_terminal, setup_terminal},
    ui,
};

const PLACEHOLDER: &str = "Share your thoughts... (Ctrl+S to post, Ctrl+A to attach, F1 for help)";

fn main() -> Result<()> {
    // No log subscriber here: stderr writes would tear the alternate screen.
    install_panic_hook();

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal);
    restore_terminal(terminal)?;

    result
}

fn run_app(terminal: &mut story_tui::terminal::Tui) -> Result<()> {
    let mut state = AppState::new();
    let services = ServiceHandle::new()?;

    // In-flight submission outcome channel, if any
    let mut submit_rx: Option<crossbeam_channel::Receiver<SubmitOutcome>> = None;

    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(PLACEHOLDER);

    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        style_editor(&mut textarea, &state);

        terminal.draw(|frame| ui::render(frame, &state, &textarea))?;

        let tui_event = event_handler.next()?;
        let action = match tui_event {
            TuiEvent::Key(key) => translate_key(&state, &mut textarea, key),
            other => other.into(),
        };

        state = reduce(state, action.clone());

        // Drain the submission outcome, if one is in flight
        if let Some(ref rx) = submit_rx {
            let mut finished = false;
            while let Ok(outcome) = rx.try_recv() {
                let action = match outcome {
                    SubmitOutcome::Succeeded { post_id } => Action::SubmitSucceeded { post_id },
                    SubmitOutcome::Failed { error } => Action::SubmitFailed { error },
                };
                state = reduce(state, action);
                finished = true;
            }
            if finished {
                submit_rx = None;
            }
        }

        // Side effects for the action we just applied
        match action {
            Action::InputChanged(ref content) => {
                services.set_content(content);
            }
            Action::ToggleExpanded => {
                services.set_expanded(state.composer.expanded);
            }
            Action::AttachRequested(ref paths) => {
                let (attachments, rejections) = services.attach(paths);
                state = reduce(
                    state,
                    Action::SelectionApplied {
                        attachments,
                        rejections,
                    },
                );
            }
            Action::RemoveAttachment(index) => match services.remove_attachment(index) {
                Ok(attachments) => {
                    state = reduce(state, Action::AttachmentRemoved { attachments });
                }
                Err(e) => {
                    state = reduce(state, Action::SetStatus(e.to_string()));
                }
            },
            Action::SubmitRequested => {
                state = reduce(state, Action::SubmitStarted);
                submit_rx = Some(services.submit());
            }
            _ => {}
        }

        // After a successful submit the draft is empty; reset the editor too
        if state.composer.content.is_empty() && !textarea.is_empty() {
            textarea = TextArea::default();
            textarea.set_placeholder_text(PLACEHOLDER);
        }

        // An empty-draft submit bounced: bring the editor back into view
        if state.composer.focus_content {
            if !state.composer.expanded {
                state = reduce(state, Action::ToggleExpanded);
                services.set_expanded(true);
            }
            state = reduce(state, Action::FocusConsumed);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn style_editor(textarea: &mut TextArea, state: &AppState) {
    use ratatui::style::{Color, Style};
    use ratatui::widgets::{Block, Borders};

    let border_color = if state.composer.submitting {
        Color::Yellow
    } else if state.composer.error.is_some() {
        Color::Red
    } else {
        Color::Green
    };

    textarea.set_block(
        Block::default()
            .title(" Composer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
}

/// Translate a key event into an action.
///
/// Hotkeys with side effects (submit, attach, remove) are translated here so
/// the main loop both reduces and performs them; plain typing is routed into
/// the editor, everything else goes to the reducer untouched.
fn translate_key(state: &AppState, textarea: &mut TextArea, key: KeyEvent) -> Action {
    // Attach prompt takes over the keyboard while open
    if let Some(ref prompt) = state.composer.attach_prompt {
        return match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                let path = prompt.trim().to_string();
                if path.is_empty() {
                    Action::CancelAttachPrompt
                } else {
                    Action::AttachRequested(vec![PathBuf::from(path)])
                }
            }
            (KeyCode::Esc, _) => Action::CancelAttachPrompt,
            (KeyCode::Backspace, _) => {
                let mut next = prompt.clone();
                next.pop();
                Action::AttachPromptChanged(next)
            }
            (KeyCode::Char(c), m) if m.is_empty() || m == KeyModifiers::SHIFT => {
                Action::AttachPromptChanged(format!("{}{}", prompt, c))
            }
            _ => Action::Key(key),
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            if state.can_submit() {
                Action::SubmitRequested
            } else if !state.composer.submitting {
                // Empty draft: no network, show the message, refocus the editor
                Action::EmptyDraftRejected {
                    message: EMPTY_DRAFT_MESSAGE.to_string(),
                }
            } else {
                // Submit control is inert while a submission is in flight
                Action::Tick
            }
        }

        (KeyCode::Char('a'), KeyModifiers::CONTROL) if !state.composer.submitting => {
            Action::OpenAttachPrompt
        }

        (KeyCode::Char('x'), KeyModifiers::CONTROL) if !state.composer.submitting => {
            match state.composer.attachments.len() {
                0 => Action::Tick,
                n => Action::RemoveAttachment(n - 1),
            }
        }

        _ => {
            let editable =
                state.composer.expanded && !state.composer.submitting && !state.help_visible;
            let is_hotkey = matches!(
                (key.code, key.modifiers),
                (KeyCode::Char('q'), KeyModifiers::CONTROL)
                    | (KeyCode::Char('e'), KeyModifiers::CONTROL)
                    | (KeyCode::F(_), _)
                    | (KeyCode::Esc, _)
            );

            if editable && !is_hotkey {
                textarea.input(key);
                Action::InputChanged(textarea.lines().join("\n"))
            } else {
                Action::Key(key)
            }
        }
    }
}
