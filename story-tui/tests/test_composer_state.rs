//! Test composer state transitions
//!
//! Verifies the reducer across input changes, media selection, removal,
//! and the submission lifecycle, independent of any rendering.

use story_tui::app::{reduce, Action, AppState, AttachmentView};

fn image_view(name: &str, size: u64) -> AttachmentView {
    AttachmentView {
        file_name: name.to_string(),
        mime: "image/jpeg".to_string(),
        video: false,
        size,
        preview_token: format!("preview://{}", name),
    }
}

#[test]
fn test_input_change_updates_content_and_char_count() {
    let state = AppState::new();

    let state = reduce(state, Action::InputChanged("Hello world!".to_string()));

    assert_eq!(state.composer.content, "Hello world!");
    assert_eq!(state.composer.char_count, 12);
}

#[test]
fn test_input_change_counts_characters_not_bytes() {
    let state = AppState::new();

    let state = reduce(state, Action::InputChanged("Hello 世界 🚀".to_string()));

    assert_eq!(state.composer.char_count, 10);
}

#[test]
fn test_selection_applied_replaces_attachments() {
    let mut state = AppState::new();
    state.composer.attachments = vec![image_view("old.jpg", 100)];

    let state = reduce(
        state,
        Action::SelectionApplied {
            attachments: vec![image_view("a.jpg", 100), image_view("b.jpg", 200)],
            rejections: vec![],
        },
    );

    let names: Vec<&str> = state
        .composer
        .attachments
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    assert!(state.composer.error.is_none());
}

#[test]
fn test_selection_with_rejections_shows_error() {
    let state = AppState::new();

    let state = reduce(
        state,
        Action::SelectionApplied {
            attachments: vec![image_view("photo.jpg", 2 * 1024 * 1024)],
            rejections: vec!["File too large (max 10MB): movie.mp4".to_string()],
        },
    );

    // The valid file is kept, the rejection becomes the inline error
    assert_eq!(state.composer.attachments.len(), 1);
    assert_eq!(
        state.composer.error.as_deref(),
        Some("File too large (max 10MB): movie.mp4")
    );
}

#[test]
fn test_clean_selection_clears_previous_error() {
    let mut state = AppState::new();
    state.composer.error = Some("Unsupported file type: text/plain".to_string());

    let state = reduce(
        state,
        Action::SelectionApplied {
            attachments: vec![image_view("ok.jpg", 100)],
            rejections: vec![],
        },
    );

    assert!(state.composer.error.is_none());
}

#[test]
fn test_attachment_removed_updates_list() {
    let mut state = AppState::new();
    state.composer.attachments = vec![
        image_view("a.jpg", 1),
        image_view("b.jpg", 2),
        image_view("c.jpg", 3),
    ];

    let state = reduce(
        state,
        Action::AttachmentRemoved {
            attachments: vec![image_view("a.jpg", 1), image_view("c.jpg", 3)],
        },
    );

    let names: Vec<&str> = state
        .composer
        .attachments
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["a.jpg", "c.jpg"]);
}

#[test]
fn test_can_submit_requires_text_or_media() {
    let state = AppState::new();
    assert!(!state.can_submit());

    let with_text = reduce(state.clone(), Action::InputChanged("hello".to_string()));
    assert!(with_text.can_submit());

    let whitespace = reduce(state.clone(), Action::InputChanged("   \n".to_string()));
    assert!(!whitespace.can_submit());

    let with_media = reduce(
        state,
        Action::SelectionApplied {
            attachments: vec![image_view("a.jpg", 1)],
            rejections: vec![],
        },
    );
    assert!(with_media.can_submit());
}

#[test]
fn test_submitting_disables_further_submits() {
    let mut state = AppState::new();
    state.composer.content = "hello".to_string();

    let state = reduce(state, Action::SubmitStarted);

    assert!(state.composer.submitting);
    assert!(!state.can_submit());
}

#[test]
fn test_full_submit_success_flow() {
    let state = AppState::new();
    let state = reduce(state, Action::ToggleExpanded);
    let state = reduce(state, Action::InputChanged("hello".to_string()));
    let state = reduce(
        state,
        Action::SelectionApplied {
            attachments: vec![image_view("photo.jpg", 100)],
            rejections: vec![],
        },
    );

    let state = reduce(state, Action::SubmitStarted);
    assert!(state.composer.submitting);

    let state = reduce(
        state,
        Action::SubmitSucceeded {
            post_id: "p1".to_string(),
        },
    );

    // Draft view reset, composer collapsed, success recorded
    assert!(!state.composer.submitting);
    assert!(state.composer.content.is_empty());
    assert!(state.composer.attachments.is_empty());
    assert!(!state.composer.expanded);
    assert_eq!(state.composer.last_post_id, Some("p1".to_string()));
}

#[test]
fn test_submit_failure_preserves_draft_and_permits_retry() {
    let state = AppState::new();
    let state = reduce(state, Action::InputChanged("keep me".to_string()));
    let state = reduce(state, Action::SubmitStarted);

    let state = reduce(
        state,
        Action::SubmitFailed {
            error: "Posts API returned HTTP 500: Internal Server Error".to_string(),
        },
    );

    assert!(!state.composer.submitting);
    assert_eq!(state.composer.content, "keep me");
    assert!(state.composer.error.is_some());

    // The user may immediately retry
    assert!(state.can_submit());
}

#[test]
fn test_empty_submit_shows_message_and_focuses_editor() {
    let state = AppState::new();

    let state = reduce(
        state,
        Action::EmptyDraftRejected {
            message: "Please add text or media".to_string(),
        },
    );

    assert_eq!(
        state.composer.error.as_deref(),
        Some("Please add text or media")
    );
    assert!(state.composer.focus_content);
    assert!(!state.composer.submitting);
}

#[test]
fn test_collapse_and_expand_preserve_draft() {
    let state = AppState::new();
    let state = reduce(state, Action::ToggleExpanded);
    let state = reduce(state, Action::InputChanged("persistent draft".to_string()));
    let state = reduce(
        state,
        Action::SelectionApplied {
            attachments: vec![image_view("a.jpg", 1)],
            rejections: vec![],
        },
    );

    let collapsed = reduce(state, Action::ToggleExpanded);
    assert!(!collapsed.composer.expanded);
    assert_eq!(collapsed.composer.content, "persistent draft");
    assert_eq!(collapsed.composer.attachments.len(), 1);

    let expanded = reduce(collapsed, Action::ToggleExpanded);
    assert!(expanded.composer.expanded);
    assert_eq!(expanded.composer.content, "persistent draft");
}

#[test]
fn test_attach_prompt_lifecycle() {
    let state = AppState::new();

    let state = reduce(state, Action::OpenAttachPrompt);
    assert_eq!(state.composer.attach_prompt.as_deref(), Some(""));

    let state = reduce(
        state,
        Action::AttachPromptChanged("/tmp/photo.jpg".to_string()),
    );
    assert_eq!(state.composer.attach_prompt.as_deref(), Some("/tmp/photo.jpg"));

    let state = reduce(
        state,
        Action::AttachRequested(vec!["/tmp/photo.jpg".into()]),
    );
    assert!(state.composer.attach_prompt.is_none());
}
