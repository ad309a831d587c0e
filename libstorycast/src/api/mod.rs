//! Posts API abstraction and implementations
//!
//! The composer talks to the backend through the [`PostsApi`] trait. The real
//! implementation ([`client::PostsClient`]) speaks multipart HTTP; the mock
//! ([`mock::MockPostsApi`]) is available to all builds so integration tests
//! can exercise the full submission flow without a network.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::Result;
use crate::media::MediaFile;
use crate::types::Post;

pub mod client;
// Mock API is available for all builds (not just tests) to support integration tests
pub mod mock;

pub use client::PostsClient;

/// One submission bound for the Posts API
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    /// Author, sent as the `userId` multipart field
    pub user_id: String,
    /// Post text, already trimmed by the composer; sent as `content`
    pub content: String,
    /// Zero or more screened media files, each sent as a `media` file part
    pub media: Vec<MediaFile>,
}

/// Client interface for creating posts
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Submit a post and return the backend's representation of it.
    ///
    /// The bearer token is supplied by the caller at submission time; the
    /// client never caches it.
    ///
    /// # Errors
    ///
    /// - `ApiError::Authentication` when the token is rejected
    /// - `ApiError::Status` for any other non-2xx response
    /// - `ApiError::Network` for transport failures
    /// - `ApiError::Parse` when the 2xx body is not a valid post
    async fn create_post(&self, token: &SecretString, request: &CreatePostRequest)
        -> Result<Post>;
}
