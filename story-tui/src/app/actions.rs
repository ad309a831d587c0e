//! Actions for the reducer pattern
//!
//! Actions are immutable descriptions of what happened; the reducer applies
//! them to state. Side effects (screening files, talking to the Posts API)
//! run in the main loop and feed their results back as actions.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use super::state::AttachmentView;

#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick for progress updates
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    // === Composer: draft text ===
    /// Draft text changed in the editor
    InputChanged(String),

    /// The editor took the focus it was asked to grab
    FocusConsumed,

    // === Composer: presentation ===
    /// Toggle between collapsed prompt and expanded editor
    ToggleExpanded,

    // === Composer: attachments ===
    /// Open the attach prompt
    OpenAttachPrompt,

    /// Attach prompt input changed
    AttachPromptChanged(String),

    /// Close the attach prompt without attaching
    CancelAttachPrompt,

    /// User confirmed the attach prompt; screening happens outside the reducer
    AttachRequested(Vec<PathBuf>),

    /// Screening finished: the accepted set replaced the attachments,
    /// rejections (if any) become the inline error
    SelectionApplied {
        attachments: Vec<AttachmentView>,
        rejections: Vec<String>,
    },

    /// User asked to remove an attachment; the service applies it
    RemoveAttachment(usize),

    /// Removal finished with the remaining attachments
    AttachmentRemoved { attachments: Vec<AttachmentView> },

    // === Composer: submission ===
    /// User requested to submit; handled outside the reducer
    SubmitRequested,

    /// Submission left for the Posts API
    SubmitStarted,

    /// The Posts API accepted the submission
    SubmitSucceeded { post_id: String },

    /// Submission failed; the draft is preserved for retry
    SubmitFailed { error: String },

    /// An empty draft was submitted: show the message, refocus the editor
    EmptyDraftRejected { message: String },

    // === Error handling ===
    /// Dismiss the inline error
    DismissError,

    // === Status bar ===
    /// Update status message
    SetStatus(String),

    /// Clear status message
    ClearStatus,
}
