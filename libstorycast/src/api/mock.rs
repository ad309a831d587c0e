//! Mock Posts API for testing
//!
//! A configurable stand-in for the real backend: it can succeed with a canned
//! post, fail with a given status or a transport error, and delay to simulate
//! latency. Every request is captured for verification, so tests can assert
//! both what was sent and how often.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::time::sleep;

use super::{CreatePostRequest, PostsApi};
use crate::error::{ApiError, Result};
use crate::types::Post;

/// What the mock saw for one call
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub token: String,
    pub user_id: String,
    pub content: String,
    pub media_names: Vec<String>,
}

/// Behavior the mock should exhibit
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Respond 2xx with this post
    Succeed(Post),
    /// Respond with a non-2xx status and body
    FailStatus { status: u16, message: String },
    /// Fail at the transport layer
    FailNetwork(String),
}

/// Mock Posts API implementation
pub struct MockPostsApi {
    behavior: Mutex<MockBehavior>,
    delay: Duration,
    call_count: Arc<Mutex<usize>>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockPostsApi {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            delay: Duration::from_millis(0),
            call_count: Arc::new(Mutex::new(0)),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock that accepts every submission with a default post body
    pub fn success() -> Self {
        Self::new(MockBehavior::Succeed(Post {
            id: "post-1".to_string(),
            content: String::new(),
            extra: serde_json::Map::new(),
        }))
    }

    /// A mock that responds 2xx with exactly this JSON body
    pub fn with_response_body(body: &str) -> Self {
        let post: Post = serde_json::from_str(body).expect("mock response body must be valid");
        Self::new(MockBehavior::Succeed(post))
    }

    /// A mock that responds with the given status and message
    pub fn fail_status(status: u16, message: &str) -> Self {
        Self::new(MockBehavior::FailStatus {
            status,
            message: message.to_string(),
        })
    }

    /// A mock whose requests never reach a server
    pub fn fail_network(message: &str) -> Self {
        Self::new(MockBehavior::FailNetwork(message.to_string()))
    }

    /// Simulate latency before responding
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Swap behavior mid-test (e.g., fail once, then succeed on retry)
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<CapturedRequest> {
        self.captured.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PostsApi for MockPostsApi {
    async fn create_post(
        &self,
        token: &SecretString,
        request: &CreatePostRequest,
    ) -> Result<Post> {
        *self.call_count.lock().unwrap() += 1;
        self.captured.lock().unwrap().push(CapturedRequest {
            token: token.expose_secret().to_string(),
            user_id: request.user_id.clone(),
            content: request.content.clone(),
            media_names: request.media.iter().map(|m| m.file_name.clone()).collect(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            MockBehavior::Succeed(post) => Ok(post),
            MockBehavior::FailStatus { status, message } => {
                Err(ApiError::Status { status, message }.into())
            }
            MockBehavior::FailNetwork(message) => Err(ApiError::Network(message).into()),
        }
    }
}
