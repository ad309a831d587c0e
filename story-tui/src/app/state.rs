//! Application state
//!
//! Immutable state structure; every transition goes through the reducer
//! (see `reducer.rs`). The view mirrors the composer service: the service
//! owns the canonical draft and preview handles, the state here is what the
//! terminal renders.

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Composer state
    pub composer: ComposerView,

    /// Status bar state
    pub status: StatusBarState,

    /// UI configuration
    pub config: UiConfig,
}

/// Rendered view of the composer
#[derive(Debug, Clone)]
pub struct ComposerView {
    /// Current draft text
    pub content: String,

    /// Character count of the draft text
    pub char_count: usize,

    /// Expanded editor vs. the one-line collapsed prompt
    pub expanded: bool,

    /// Attachments currently in the draft, in order
    pub attachments: Vec<AttachmentView>,

    /// Path being typed into the attach prompt, when it is open
    pub attach_prompt: Option<String>,

    /// Rejection or submission failure message shown inline
    pub error: Option<String>,

    /// Submission in flight? The submit control is inert while true.
    pub submitting: bool,

    /// The editor should grab focus (set when an empty submit bounced)
    pub focus_content: bool,

    /// Last created post id, for the success banner
    pub last_post_id: Option<String>,
}

/// Display info for one attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentView {
    pub file_name: String,
    pub mime: String,
    pub video: bool,
    pub size: u64,
    pub preview_token: String,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            composer: ComposerView::default(),
            status: StatusBarState::default(),
            config: UiConfig::default(),
        }
    }
}

impl Default for ComposerView {
    fn default() -> Self {
        Self {
            content: String::new(),
            char_count: 0,
            expanded: false,
            attachments: Vec::new(),
            attach_prompt: None,
            error: None,
            submitting: false,
            focus_content: false,
            last_post_id: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("STORY_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("STORY_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if submitting is allowed: nothing in flight and a non-empty draft
    pub fn can_submit(&self) -> bool {
        !self.composer.submitting
            && (!self.composer.content.trim().is_empty() || !self.composer.attachments.is_empty())
    }
}
