//! Service layer adapter for the TUI
//!
//! Bridges the async composer service to the synchronous event loop. The
//! composer (which owns the canonical draft and preview handles) lives behind
//! an async mutex; draft edits are applied synchronously between frames,
//! while submission runs on an owned tokio runtime and reports back through a
//! crossbeam channel the loop drains on every tick.
//!
//! While a submission is in flight the main loop treats the draft as
//! read-only (the submit control is inert and editor input is not routed), so
//! the mutex is never contended from the UI side.

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use tokio::sync::Mutex;

use libstorycast::service::{Composer, StorycastService};

use crate::app::AttachmentView;
use crate::error::{Result, TuiError};

/// Terminal result of one submission attempt
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Succeeded { post_id: String },
    Failed { error: String },
}

/// Handle over the composer service for TUI operations
pub struct ServiceHandle {
    service: Arc<StorycastService>,
    composer: Arc<Mutex<Composer>>,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Create a handle with configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the tokio
    /// runtime cannot be created.
    pub fn new() -> Result<Self> {
        let service = StorycastService::new()?;
        Self::with_service(service)
    }

    /// Create a handle over a pre-built service (tests inject a mock API)
    pub fn with_service(service: StorycastService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().map_err(TuiError::Terminal)?;
        let composer = service.composer();

        Ok(Self {
            service: Arc::new(service),
            composer: Arc::new(Mutex::new(composer)),
            runtime,
        })
    }

    /// Sync the draft text from the editor
    pub fn set_content(&self, content: &str) {
        if let Ok(mut composer) = self.composer.try_lock() {
            composer.set_content(content);
        }
    }

    pub fn set_expanded(&self, expanded: bool) {
        if let Ok(mut composer) = self.composer.try_lock() {
            composer.set_expanded(expanded);
        }
    }

    /// Screen candidate paths and apply the selection.
    ///
    /// Returns the attachments now in the draft plus per-file rejection
    /// messages. Screening is synchronous (local fs only, no network).
    pub fn attach(&self, paths: &[PathBuf]) -> (Vec<AttachmentView>, Vec<String>) {
        let mut composer = self.composer.blocking_lock();
        let outcome = composer.select_paths(paths);
        (attachment_views(&composer), outcome.rejections)
    }

    /// Remove one attachment by index, returning the remaining list
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range; the list is unchanged.
    pub fn remove_attachment(&self, index: usize) -> Result<Vec<AttachmentView>> {
        let mut composer = self.composer.blocking_lock();
        composer.remove_attachment(index)?;
        Ok(attachment_views(&composer))
    }

    pub fn attachments(&self) -> Vec<AttachmentView> {
        attachment_views(&self.composer.blocking_lock())
    }

    /// Submit the draft on the runtime; the outcome arrives on the returned
    /// channel. The session token is read from the store inside the task, at
    /// submission time.
    pub fn submit(&self) -> Receiver<SubmitOutcome> {
        let (tx, rx) = unbounded();
        let composer = Arc::clone(&self.composer);
        let service = Arc::clone(&self.service);

        self.runtime.spawn(async move {
            let mut composer = composer.lock().await;

            let outcome = match service.session().load_token() {
                Ok(token) => match composer.submit(&token, service.user_id()).await {
                    Ok(post) => {
                        tracing::info!(post_id = %post.id, "Post created");
                        SubmitOutcome::Succeeded { post_id: post.id }
                    }
                    Err(e) => SubmitOutcome::Failed {
                        error: e.to_string(),
                    },
                },
                Err(e) => SubmitOutcome::Failed {
                    error: e.to_string(),
                },
            };

            let _ = tx.send(outcome);
        });

        rx
    }
}

fn attachment_views(composer: &Composer) -> Vec<AttachmentView> {
    composer
        .draft()
        .attachments
        .iter()
        .map(|a| AttachmentView {
            file_name: a.media.file_name.clone(),
            mime: a.media.mime.to_string(),
            video: a.media.mime.is_video(),
            size: a.media.size,
            preview_token: a.preview.token().to_string(),
        })
        .collect()
}
