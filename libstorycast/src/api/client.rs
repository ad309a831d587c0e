//! HTTP implementation of the Posts API client

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::{CreatePostRequest, PostsApi};
use crate::config::ApiConfig;
use crate::error::{ApiError, MediaError, Result};
use crate::types::Post;

/// Multipart HTTP client for `POST /api/posts/create`
pub struct PostsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostsClient {
    /// Create a client for the given base URL (trailing slashes are dropped)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn build_form(&self, request: &CreatePostRequest) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new()
            .text("userId", request.user_id.clone())
            .text("content", request.content.clone());

        for file in &request.media {
            let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
                MediaError::Unreadable {
                    name: file.file_name.clone(),
                    reason: e.to_string(),
                }
            })?;

            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file.file_name.clone())
                .mime_str(file.mime.as_str())
                .map_err(|e| ApiError::Network(format!("Failed to build media part: {}", e)))?;

            form = form.part("media", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl PostsApi for PostsClient {
    async fn create_post(
        &self,
        token: &SecretString,
        request: &CreatePostRequest,
    ) -> Result<Post> {
        let url = format!("{}/api/posts/create", self.base_url);
        let form = self.build_form(request).await?;

        tracing::debug!(
            url = %url,
            media_parts = request.media.len(),
            "Submitting post"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), &body).into());
        }

        let post: Post = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(post)
    }
}

/// Map a non-2xx response to the matching [`ApiError`]
///
/// 401/403 mean the session token was rejected and become authentication
/// errors (exit code 2 at the CLI); everything else keeps the status and the
/// response body so the composer can show what the server said.
fn map_status_error(status: u16, body: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::Authentication(format!(
            "Posts API rejected the session token (HTTP {}). \
             Suggestion: sign in again to refresh the session.",
            status
        )),
        _ => {
            let body = body.trim();
            let message = if body.is_empty() {
                canonical_reason(status).to_string()
            } else {
                body.to_string()
            };
            ApiError::Status { status, message }
        }
    }
}

fn canonical_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = PostsClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");

        let client = PostsClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_from_config() {
        let config = ApiConfig {
            base_url: "https://stories.example.org/".to_string(),
        };
        let client = PostsClient::from_config(&config);
        assert_eq!(client.base_url(), "https://stories.example.org");
    }

    #[test]
    fn test_map_status_error_unauthorized() {
        let err = map_status_error(401, "");
        match err {
            ApiError::Authentication(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("sign in again"));
            }
            other => panic!("Expected Authentication, got {:?}", other),
        }

        assert!(matches!(
            map_status_error(403, "forbidden"),
            ApiError::Authentication(_)
        ));
    }

    #[test]
    fn test_map_status_error_server_error_uses_body() {
        let err = map_status_error(500, "database exploded");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database exploded");
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_map_status_error_empty_body_falls_back_to_reason() {
        let err = map_status_error(503, "   ");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_map_status_error_unknown_status() {
        let err = map_status_error(418, "");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 418);
                assert_eq!(message, "Request failed");
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_canonical_reasons() {
        assert_eq!(canonical_reason(413), "Payload Too Large");
        assert_eq!(canonical_reason(429), "Too Many Requests");
        assert_eq!(canonical_reason(500), "Internal Server Error");
    }
}
