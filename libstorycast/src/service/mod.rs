//! Service layer for Storycast
//!
//! A single entry point (`StorycastService`) wires configuration, the session
//! credential store, and the Posts API client together, and hands out
//! composers to front-ends (CLI, TUI) so business logic is never duplicated
//! in an interface.

pub mod composer;
pub mod events;

pub use composer::{
    Attachment, Composer, Draft, SelectOutcome, SubmissionState, EMPTY_DRAFT_MESSAGE,
};
pub use events::{Event, EventBus, EventReceiver};

use std::sync::Arc;

use crate::api::{PostsApi, PostsClient};
use crate::session::SessionStore;
use crate::{Config, Result};

/// Main service facade
///
/// Owns the shared resources (config, session store, API client, event bus)
/// and builds [`Composer`] instances over them. Each composer owns its draft
/// and submission state independently; the bus is shared so any subscriber
/// sees all submission progress.
pub struct StorycastService {
    config: Arc<Config>,
    session: SessionStore,
    api: Arc<dyn PostsApi>,
    events: EventBus,
}

impl StorycastService {
    /// Create a service with configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(config))
    }

    /// Create a service over a pre-built configuration
    pub fn from_config(config: Config) -> Self {
        let api: Arc<dyn PostsApi> = Arc::new(PostsClient::from_config(&config.api));
        Self::with_api(config, api)
    }

    /// Create a service over a custom API implementation (tests use the mock)
    pub fn with_api(config: Config, api: Arc<dyn PostsApi>) -> Self {
        let session = SessionStore::new(config.session.token_file.clone());
        Self {
            config: Arc::new(config),
            session,
            api,
            events: EventBus::new(100),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The session credential store; the bearer token is read from here at
    /// submission time, never earlier.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn user_id(&self) -> &str {
        &self.config.identity.user_id
    }

    /// Build a fresh composer wired to the shared API client and event bus
    pub fn composer(&self) -> Composer {
        Composer::new(Arc::clone(&self.api), self.events.clone())
    }

    /// Subscribe to submission progress events
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }
}
