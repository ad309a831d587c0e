//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`, no side effects. File screening and Posts API
//! calls happen in the main loop; their results come back as actions.

use crossterm::event::{KeyCode, KeyModifiers};

use super::actions::Action;
use super::state::{AppState, ComposerView, StatusBarState};

/// Pure reducer function
///
/// Deterministic and side-effect free: no I/O, no mutation of the input.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state,
        Action::Resize(_, _) => state,

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Draft text ===
        Action::InputChanged(content) => {
            let char_count = content.chars().count();
            AppState {
                composer: ComposerView {
                    content,
                    char_count,
                    ..state.composer
                },
                ..state
            }
        }

        Action::FocusConsumed => AppState {
            composer: ComposerView {
                focus_content: false,
                ..state.composer
            },
            ..state
        },

        // === Presentation ===
        // Collapsing hides the editor but never clears the draft
        Action::ToggleExpanded => AppState {
            composer: ComposerView {
                expanded: !state.composer.expanded,
                ..state.composer
            },
            ..state
        },

        // === Attachments ===
        Action::OpenAttachPrompt => AppState {
            composer: ComposerView {
                attach_prompt: Some(String::new()),
                ..state.composer
            },
            ..state
        },

        Action::AttachPromptChanged(input) => AppState {
            composer: ComposerView {
                attach_prompt: Some(input),
                ..state.composer
            },
            ..state
        },

        Action::CancelAttachPrompt => AppState {
            composer: ComposerView {
                attach_prompt: None,
                ..state.composer
            },
            ..state
        },

        Action::AttachRequested(_) => AppState {
            composer: ComposerView {
                attach_prompt: None,
                ..state.composer
            },
            ..state
        },

        Action::SelectionApplied {
            attachments,
            rejections,
        } => {
            let error = if rejections.is_empty() {
                None
            } else {
                Some(rejections.join("; "))
            };
            AppState {
                composer: ComposerView {
                    attachments,
                    error,
                    ..state.composer
                },
                ..state
            }
        }

        Action::RemoveAttachment(_) => state,

        Action::AttachmentRemoved { attachments } => AppState {
            composer: ComposerView {
                attachments,
                ..state.composer
            },
            ..state
        },

        // === Submission ===
        Action::SubmitRequested => state,

        Action::SubmitStarted => AppState {
            composer: ComposerView {
                submitting: true,
                error: None,
                ..state.composer
            },
            ..state
        },

        Action::SubmitSucceeded { post_id } => AppState {
            composer: ComposerView {
                content: String::new(),
                char_count: 0,
                attachments: Vec::new(),
                submitting: false,
                expanded: false,
                error: None,
                last_post_id: Some(post_id),
                ..state.composer
            },
            status: StatusBarState {
                message: Some("Post created!".to_string()),
            },
            ..state
        },

        Action::SubmitFailed { error } => AppState {
            composer: ComposerView {
                submitting: false,
                error: Some(error),
                ..state.composer
            },
            ..state
        },

        Action::EmptyDraftRejected { message } => AppState {
            composer: ComposerView {
                error: Some(message),
                focus_content: true,
                ..state.composer
            },
            ..state
        },

        // === Error handling ===
        Action::DismissError => AppState {
            composer: ComposerView {
                error: None,
                ..state.composer
            },
            ..state
        },

        // === Status bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// Handle keys the reducer can apply purely.
///
/// Keys that trigger side effects (submit, attach, remove) are translated by
/// the main loop instead, so the effect and the state change stay together.
fn handle_key(state: AppState, key: crossterm::event::KeyEvent) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => reduce(state, Action::Quit),

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            reduce(state, action)
        }

        (KeyCode::Char('e'), KeyModifiers::CONTROL) if !state.composer.submitting => {
            reduce(state, Action::ToggleExpanded)
        }

        // Esc peels overlays in order: error, help, attach prompt, collapse
        (KeyCode::Esc, _) if state.composer.error.is_some() => {
            reduce(state, Action::DismissError)
        }
        (KeyCode::Esc, _) if state.help_visible => reduce(state, Action::HideHelp),
        (KeyCode::Esc, _) if state.composer.attach_prompt.is_some() => {
            reduce(state, Action::CancelAttachPrompt)
        }
        (KeyCode::Esc, _) if state.composer.expanded && !state.composer.submitting => {
            reduce(state, Action::ToggleExpanded)
        }

        _ => state,
    }
}
