//! Composer service
//!
//! The composer owns the draft (text plus screened attachments with their
//! preview handles) and the submission lifecycle. Front-ends render its state
//! and forward user intent; all transitions happen here so they can be tested
//! without any UI.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use super::events::{Event, EventBus};
use crate::api::{CreatePostRequest, PostsApi};
use crate::error::{Result, StorycastError};
use crate::media::{self, MediaFile, Selection};
use crate::preview::{PreviewHandle, PreviewRegistry};
use crate::types::Post;

/// Error message for a submit attempt on an empty draft.
///
/// Front-ends match on this to refocus the text input.
pub const EMPTY_DRAFT_MESSAGE: &str = "Please add text or media";

/// One attached media file plus its preview reference
#[derive(Debug)]
pub struct Attachment {
    pub media: MediaFile,
    pub preview: PreviewHandle,
}

/// The in-progress, unsaved post
#[derive(Debug)]
pub struct Draft {
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    fn empty() -> Self {
        Self {
            content: String::new(),
            attachments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Empty means nothing to submit: whitespace-only text and no attachments
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.attachments.is_empty()
    }
}

/// Submission lifecycle. Exactly one value at a time; `Submitting` is the
/// only state in which the submit control is inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Failed(String),
    Succeeded,
}

/// What happened to a file selection
#[derive(Debug, Clone)]
pub struct SelectOutcome {
    /// Number of files now attached (the accepted set replaced the old one)
    pub accepted: usize,
    /// Per-file rejection messages, empty when everything was valid
    pub rejections: Vec<String>,
}

/// The post-creation composer
pub struct Composer {
    api: Arc<dyn PostsApi>,
    events: EventBus,
    registry: PreviewRegistry,
    draft: Draft,
    submission: SubmissionState,
    expanded: bool,
}

impl Composer {
    pub fn new(api: Arc<dyn PostsApi>, events: EventBus) -> Self {
        Self::with_registry(api, events, PreviewRegistry::new())
    }

    /// Build a composer over a shared registry (tests count handles there)
    pub fn with_registry(
        api: Arc<dyn PostsApi>,
        events: EventBus,
        registry: PreviewRegistry,
    ) -> Self {
        Self {
            api,
            events,
            registry,
            draft: Draft::empty(),
            submission: SubmissionState::Idle,
            expanded: false,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Submit is allowed when nothing is in flight and the draft has content
    pub fn can_submit(&self) -> bool {
        self.submission != SubmissionState::Submitting && !self.draft.is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Presentational toggle; collapsing never clears the draft.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Screen candidate paths and apply the selection.
    ///
    /// See [`Composer::apply_selection`] for the acceptance policy.
    pub fn select_paths(&mut self, paths: &[PathBuf]) -> SelectOutcome {
        self.apply_selection(media::screen_paths(paths))
    }

    /// Apply an already-screened selection.
    ///
    /// Policy is per-file: every valid candidate is kept even when others in
    /// the batch were rejected. Accepted files REPLACE the current attachment
    /// list; the old preview handles are released before fresh ones are
    /// acquired. A selection with at least one accepted file clears any prior
    /// error; rejections surface as the composer's error text.
    pub fn apply_selection(&mut self, selection: Selection) -> SelectOutcome {
        let rejections: Vec<String> = selection
            .rejected
            .iter()
            .map(|r| r.reason.to_string())
            .collect();

        if !selection.accepted.is_empty() {
            self.release_previews();
            let registry = self.registry.clone();
            self.draft.attachments = selection
                .accepted
                .into_iter()
                .map(|media| Attachment {
                    preview: registry.acquire(),
                    media,
                })
                .collect();
            if matches!(self.submission, SubmissionState::Failed(_)) {
                self.submission = SubmissionState::Idle;
            }
        }

        if !rejections.is_empty() {
            let summary = rejections.join("; ");
            tracing::warn!("Media selection rejected candidates: {}", summary);
            if self.submission != SubmissionState::Submitting {
                self.submission = SubmissionState::Failed(summary);
            }
            self.events.emit(Event::MediaRejected {
                messages: rejections.clone(),
            });
        }

        SelectOutcome {
            accepted: self.draft.attachments.len(),
            rejections,
        }
    }

    /// Remove one attachment, releasing its preview and preserving the
    /// relative order of the rest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `index` is out of range; the attachment
    /// list is left untouched.
    pub fn remove_attachment(&mut self, index: usize) -> Result<()> {
        if index >= self.draft.attachments.len() {
            return Err(StorycastError::InvalidInput(format!(
                "Attachment index {} out of range (have {})",
                index,
                self.draft.attachments.len()
            )));
        }

        let mut attachment = self.draft.attachments.remove(index);
        attachment.preview.revoke();
        Ok(())
    }

    /// Submit the draft to the Posts API.
    ///
    /// The bearer token is read from the session store by the caller at
    /// submission time and passed in; the composer never caches it. On
    /// success the created post is returned (the completion value), the draft
    /// resets, and every preview handle is released. On failure the draft is
    /// preserved so the user can retry. Either way the composer leaves
    /// `Submitting`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the draft is empty or a submission is already in
    ///   flight; no network traffic happens.
    /// - Any [`crate::error::ApiError`] from the Posts API.
    pub async fn submit(&mut self, token: &SecretString, user_id: &str) -> Result<Post> {
        if self.submission == SubmissionState::Submitting {
            return Err(StorycastError::InvalidInput(
                "A submission is already in flight".to_string(),
            ));
        }

        let content = self.draft.content.trim().to_string();
        if content.is_empty() && self.draft.attachments.is_empty() {
            return Err(StorycastError::InvalidInput(EMPTY_DRAFT_MESSAGE.to_string()));
        }

        self.submission = SubmissionState::Submitting;
        self.events.emit(Event::SubmitStarted {
            content_chars: content.chars().count(),
            media_count: self.draft.attachments.len(),
        });

        let request = CreatePostRequest {
            user_id: user_id.to_string(),
            content,
            media: self
                .draft
                .attachments
                .iter()
                .map(|a| a.media.clone())
                .collect(),
        };

        let api = Arc::clone(&self.api);
        let result = api.create_post(token, &request).await;

        match result {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post created");
                self.submission = SubmissionState::Succeeded;
                self.events.emit(Event::SubmitSucceeded { post: post.clone() });

                // Reset: draft destroyed, previews released, back to Idle
                self.release_previews();
                self.draft = Draft::empty();
                self.submission = SubmissionState::Idle;
                self.expanded = false;

                Ok(post)
            }
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                self.submission = SubmissionState::Failed(e.to_string());
                self.events.emit(Event::SubmitFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Throw the draft away without submitting
    pub fn discard(&mut self) {
        self.release_previews();
        self.draft = Draft::empty();
        self.submission = SubmissionState::Idle;
    }

    fn release_previews(&mut self) {
        for attachment in &mut self.draft.attachments {
            attachment.preview.revoke();
        }
        self.draft.attachments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockPostsApi;
    use std::io::Write;
    use tempfile::TempDir;

    fn media_path(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&vec![1u8; len]).unwrap();
        path
    }

    fn composer_with(api: MockPostsApi) -> (Composer, Arc<MockPostsApi>) {
        let api = Arc::new(api);
        let composer = Composer::new(api.clone(), EventBus::new(16));
        (composer, api)
    }

    fn token() -> SecretString {
        SecretString::from("test-token".to_string())
    }

    #[test]
    fn test_new_composer_is_idle_and_empty() {
        let (composer, _) = composer_with(MockPostsApi::success());

        assert!(composer.draft().is_empty());
        assert_eq!(*composer.submission(), SubmissionState::Idle);
        assert!(!composer.is_expanded());
        assert!(!composer.can_submit());
    }

    #[test]
    fn test_can_submit_with_text_only() {
        let (mut composer, _) = composer_with(MockPostsApi::success());
        composer.set_content("hello");
        assert!(composer.can_submit());

        composer.set_content("   \n\t ");
        assert!(!composer.can_submit());
    }

    #[test]
    fn test_selection_replaces_previous_attachments() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        let first = media_path(&dir, "first.jpg", 100);
        composer.select_paths(&[first]);
        assert_eq!(composer.draft().attachments.len(), 1);
        assert_eq!(composer.registry().outstanding(), 1);

        let a = media_path(&dir, "a.png", 100);
        let b = media_path(&dir, "b.gif", 100);
        let outcome = composer.select_paths(&[a, b]);

        assert_eq!(outcome.accepted, 2);
        assert_eq!(composer.draft().attachments.len(), 2);
        // Old preview released, two fresh handles held
        assert_eq!(composer.registry().outstanding(), 2);
    }

    #[test]
    fn test_selection_keeps_valid_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        let jpeg = media_path(&dir, "photo.jpg", 2 * 1024 * 1024);
        let oversized = media_path(&dir, "movie.mp4", 15 * 1024 * 1024);
        let outcome = composer.select_paths(&[jpeg, oversized]);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.rejections.len(), 1);
        assert!(outcome.rejections[0].contains("File too large (max 10MB): movie.mp4"));
        assert_eq!(composer.draft().attachments[0].media.file_name, "photo.jpg");

        // The rejection is surfaced as the composer's error text
        match composer.submission() {
            SubmissionState::Failed(msg) => assert!(msg.contains("File too large")),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_fully_invalid_selection_keeps_existing_attachments() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        let good = media_path(&dir, "keep.png", 100);
        composer.select_paths(&[good]);

        let bad = media_path(&dir, "reject.pdf", 100);
        let outcome = composer.select_paths(&[bad]);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(composer.draft().attachments.len(), 1);
        assert_eq!(composer.draft().attachments[0].media.file_name, "keep.png");
        assert_eq!(composer.registry().outstanding(), 1);
    }

    #[test]
    fn test_clean_selection_clears_prior_error() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        let bad = media_path(&dir, "reject.pdf", 100);
        composer.select_paths(&[bad]);
        assert!(matches!(composer.submission(), SubmissionState::Failed(_)));

        let good = media_path(&dir, "ok.jpg", 100);
        composer.select_paths(&[good]);
        assert_eq!(*composer.submission(), SubmissionState::Idle);
    }

    #[test]
    fn test_remove_attachment_preserves_order() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        let a = media_path(&dir, "a.png", 10);
        let b = media_path(&dir, "b.png", 10);
        let c = media_path(&dir, "c.png", 10);
        composer.select_paths(&[a, b, c]);
        assert_eq!(composer.registry().outstanding(), 3);

        composer.remove_attachment(1).unwrap();

        let names: Vec<&str> = composer
            .draft()
            .attachments
            .iter()
            .map(|a| a.media.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
        assert_eq!(composer.registry().outstanding(), 2);
    }

    #[test]
    fn test_remove_attachment_out_of_range() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        let a = media_path(&dir, "a.png", 10);
        composer.select_paths(&[a]);

        let err = composer.remove_attachment(5).unwrap_err();
        assert!(matches!(err, StorycastError::InvalidInput(_)));

        // List untouched
        assert_eq!(composer.draft().attachments.len(), 1);
        assert_eq!(composer.registry().outstanding(), 1);
    }

    #[tokio::test]
    async fn test_submit_empty_draft_never_touches_the_api() {
        let (mut composer, api) = composer_with(MockPostsApi::success());

        let err = composer.submit(&token(), "u-1").await.unwrap_err();
        match err {
            StorycastError::InvalidInput(msg) => assert_eq!(msg, EMPTY_DRAFT_MESSAGE),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(api.call_count(), 0);
        assert_eq!(*composer.submission(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_whitespace_only_draft_is_rejected() {
        let (mut composer, api) = composer_with(MockPostsApi::success());
        composer.set_content("   \n\t  ");

        assert!(composer.submit(&token(), "u-1").await.is_err());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_success_returns_post_and_resets() {
        let dir = TempDir::new().unwrap();
        let (mut composer, api) =
            composer_with(MockPostsApi::with_response_body(r#"{"id":"p1","content":"hello"}"#));

        composer.set_content("  hello  ");
        let photo = media_path(&dir, "photo.jpg", 100);
        composer.select_paths(&[photo]);
        composer.set_expanded(true);

        let post = composer.submit(&token(), "u-1").await.unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.content, "hello");

        // Draft reset, previews released, state back to Idle, form collapsed
        assert!(composer.draft().is_empty());
        assert_eq!(composer.registry().outstanding(), 0);
        assert_eq!(*composer.submission(), SubmissionState::Idle);
        assert!(!composer.is_expanded());

        // The request carried the trimmed content and the media part
        let sent = api.last_request().unwrap();
        assert_eq!(sent.user_id, "u-1");
        assert_eq!(sent.content, "hello");
        assert_eq!(sent.media_names, vec!["photo.jpg"]);
        assert_eq!(sent.token, "test-token");
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_draft_and_allows_retry() {
        let dir = TempDir::new().unwrap();
        let api = MockPostsApi::fail_status(500, "Internal Server Error");
        let (mut composer, api) = composer_with(api);

        composer.set_content("try me");
        let photo = media_path(&dir, "photo.jpg", 100);
        composer.select_paths(&[photo]);

        let err = composer.submit(&token(), "u-1").await.unwrap_err();
        assert!(err.to_string().contains("500"));

        // Draft preserved for retry; never stuck in Submitting
        assert_eq!(composer.draft().content, "try me");
        assert_eq!(composer.draft().attachments.len(), 1);
        assert_eq!(composer.registry().outstanding(), 1);
        assert!(matches!(composer.submission(), SubmissionState::Failed(_)));

        // Retry after the backend recovers
        api.set_behavior(crate::api::mock::MockBehavior::Succeed(Post {
            id: "p2".to_string(),
            content: "try me".to_string(),
            extra: serde_json::Map::new(),
        }));
        let post = composer.submit(&token(), "u-1").await.unwrap();
        assert_eq!(post.id, "p2");
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_submit_network_failure_is_recoverable() {
        let (mut composer, _) = composer_with(MockPostsApi::fail_network("Connection refused"));
        composer.set_content("hello");

        let err = composer.submit(&token(), "u-1").await.unwrap_err();
        assert!(err.to_string().contains("Connection refused"));
        assert!(matches!(composer.submission(), SubmissionState::Failed(_)));
        assert_eq!(composer.draft().content, "hello");
    }

    #[test]
    fn test_collapse_preserves_draft() {
        let (mut composer, _) = composer_with(MockPostsApi::success());
        composer.set_content("draft in progress");
        composer.set_expanded(true);

        composer.toggle_expanded();
        assert!(!composer.is_expanded());
        assert_eq!(composer.draft().content, "draft in progress");

        composer.toggle_expanded();
        assert!(composer.is_expanded());
        assert_eq!(composer.draft().content, "draft in progress");
    }

    #[test]
    fn test_discard_releases_previews_and_clears_draft() {
        let dir = TempDir::new().unwrap();
        let (mut composer, _) = composer_with(MockPostsApi::success());

        composer.set_content("bye");
        let a = media_path(&dir, "a.png", 10);
        let b = media_path(&dir, "b.png", 10);
        composer.select_paths(&[a, b]);
        assert_eq!(composer.registry().outstanding(), 2);

        composer.discard();

        assert!(composer.draft().is_empty());
        assert_eq!(composer.registry().outstanding(), 0);
        assert_eq!(*composer.submission(), SubmissionState::Idle);
    }

    #[test]
    fn test_teardown_releases_previews() {
        let dir = TempDir::new().unwrap();
        let registry = PreviewRegistry::new();
        {
            let api: Arc<dyn PostsApi> = Arc::new(MockPostsApi::success());
            let mut composer =
                Composer::with_registry(api, EventBus::new(16), registry.clone());
            let a = media_path(&dir, "a.png", 10);
            composer.select_paths(&[a]);
            assert_eq!(registry.outstanding(), 1);
        }
        // Composer dropped: its handles released themselves
        assert_eq!(registry.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_submit_events_on_success() {
        let dir = TempDir::new().unwrap();
        let api: Arc<dyn PostsApi> =
            Arc::new(MockPostsApi::with_response_body(r#"{"id":"p1","content":"hi"}"#));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let mut composer = Composer::new(api, bus);

        composer.set_content("hi");
        let photo = media_path(&dir, "p.jpg", 10);
        composer.select_paths(&[photo]);
        composer.submit(&token(), "u-1").await.unwrap();

        match rx.recv().await.unwrap() {
            Event::SubmitStarted {
                content_chars,
                media_count,
            } => {
                assert_eq!(content_chars, 2);
                assert_eq!(media_count, 1);
            }
            other => panic!("Expected SubmitStarted, got {:?}", other),
        }
        match rx.recv().await.unwrap() {
            Event::SubmitSucceeded { post } => assert_eq!(post.id, "p1"),
            other => panic!("Expected SubmitSucceeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_events_on_failure() {
        let api: Arc<dyn PostsApi> = Arc::new(MockPostsApi::fail_status(503, "down"));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let mut composer = Composer::new(api, bus);

        composer.set_content("hi");
        let _ = composer.submit(&token(), "u-1").await;

        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::SubmitStarted { .. }
        ));
        match rx.recv().await.unwrap() {
            Event::SubmitFailed { error } => assert!(error.contains("503")),
            other => panic!("Expected SubmitFailed, got {:?}", other),
        }
    }
}
