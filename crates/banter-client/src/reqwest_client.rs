//! reqwest-based banter API client
//!
//! Direct implementation of the `BanterClient` trait over HTTP. Status
//! handling mirrors what callers show the user: 401 becomes
//! `Unauthorized`, refused writes become `Rejected` with the server's
//! reason where the route provides one, and everything unreadable
//! becomes `ServerError`.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::BanterClient;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    AuthTokens, CommentNode, ImageUpload, KarmaStanding, LeaderboardRow, LikeOutcome, Post,
};

/// Default server root when no URL is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Banter API client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    base_url: String,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ReqwestClient {
    /// Create a client against the server root `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        request.send().await.map_err(|e| {
            warn!("Request did not complete: {}", e);
            ApiError::NetworkUnreachable
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(|e| {
            warn!("Response body was not the expected JSON: {}", e);
            ApiError::ServerError
        })
    }

    /// Error for a refused write whose body may carry an `error` field.
    async fn error_with_reason(response: Response, fallback: &str) -> ApiError {
        let reason = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| Some(body.get("error")?.as_str()?.to_string()))
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Rejected(reason)
    }

    /// Shared login/register flow.
    ///
    /// The body is parsed before the status check: an unreadable body is
    /// a server error no matter the status, and a refused sign-in
    /// carries its reason in the body's `error` field.
    async fn auth_request(
        &self,
        path: &str,
        username: &str,
        password: &str,
        fallback: &str,
    ) -> ApiResult<AuthTokens> {
        let payload = serde_json::json!({
            "username": username,
            "password": password,
        });
        let response = self.send(self.client.post(self.url(path)).json(&payload)).await?;

        let status = response.status();
        let body: Value = Self::read_json(response).await?;

        if !status.is_success() {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string();
            return Err(ApiError::Rejected(reason));
        }

        serde_json::from_value(body).map_err(|e| {
            warn!("Sign-in response missing token fields: {}", e);
            ApiError::ServerError
        })
    }
}

#[async_trait]
impl BanterClient for ReqwestClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthTokens> {
        debug!("Signing in {}", username);
        self.auth_request("api/accounts/login/", username, password, "Login failed")
            .await
    }

    async fn register(&self, username: &str, password: &str) -> ApiResult<AuthTokens> {
        debug!("Registering {}", username);
        self.auth_request("api/accounts/register/", username, password, "Registration failed")
            .await
    }

    async fn fetch_posts(&self, limit: u32) -> ApiResult<Vec<Post>> {
        debug!("Fetching posts, limit={}", limit);
        let request = self
            .client
            .get(self.url("api/posts/"))
            .query(&[("limit", limit)]);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            warn!("Fetching posts returned {}", response.status());
            return Err(ApiError::ServerError);
        }
        Self::read_json(response).await
    }

    async fn create_post(
        &self,
        token: &str,
        content: Option<&str>,
        image: Option<ImageUpload>,
    ) -> ApiResult<Post> {
        debug!("Creating post (image: {})", image.is_some());
        let mut form = Form::new();
        if let Some(image) = image {
            form = form.part("image", Part::bytes(image.bytes).file_name(image.file_name));
        }
        if let Some(content) = content {
            form = form.text("content", content.to_string());
        }

        let request = self
            .client
            .post(self.url("api/posts/"))
            .bearer_auth(token)
            .multipart(form);
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => Self::read_json(response).await,
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                warn!("Post upload returned {}", status);
                Err(ApiError::Rejected("Post upload failed".to_string()))
            }
        }
    }

    async fn fetch_comments(&self, post_id: u64) -> ApiResult<Vec<CommentNode>> {
        debug!("Fetching comments for post {}", post_id);
        let request = self.client.get(self.url(&format!("api/comments/post/{post_id}/")));
        let response = self.send(request).await?;

        if !response.status().is_success() {
            warn!("Fetching comments returned {}", response.status());
            return Err(ApiError::ServerError);
        }
        Self::read_json(response).await
    }

    async fn create_comment(
        &self,
        token: &str,
        post_id: u64,
        content: &str,
        parent_id: Option<u64>,
    ) -> ApiResult<CommentNode> {
        debug!("Commenting on post {} (reply to {:?})", post_id, parent_id);
        let payload = serde_json::json!({
            "content": content,
            "parent_id": parent_id,
        });
        let request = self
            .client
            .post(self.url(&format!("api/comments/post/{post_id}/")))
            .bearer_auth(token)
            .json(&payload);
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => Self::read_json(response).await,
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                warn!("Comment create returned {}", status);
                Err(ApiError::Rejected("Comment failed".to_string()))
            }
        }
    }

    async fn toggle_like(&self, token: &str, post_id: u64) -> ApiResult<LikeOutcome> {
        debug!("Toggling like on post {}", post_id);
        let request = self
            .client
            .post(self.url(&format!("api/likes/post/{post_id}/")))
            .bearer_auth(token);
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => Self::read_json(response).await,
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            _ => Err(Self::error_with_reason(response, "Like failed").await),
        }
    }

    async fn fetch_leaderboard(&self) -> ApiResult<Vec<LeaderboardRow>> {
        debug!("Fetching leaderboard");
        let response = self.send(self.client.get(self.url("api/leaderboard/"))).await?;

        if !response.status().is_success() {
            warn!("Fetching leaderboard returned {}", response.status());
            return Err(ApiError::ServerError);
        }
        Self::read_json(response).await
    }

    async fn fetch_my_standing(&self, token: &str) -> ApiResult<KarmaStanding> {
        debug!("Fetching own leaderboard standing");
        let request = self
            .client
            .get(self.url("api/leaderboard/me/"))
            .bearer_auth(token);
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => Self::read_json(response).await,
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                warn!("Fetching standing returned {}", status);
                Err(ApiError::ServerError)
            }
        }
    }
}
