//! Banter API client trait
//!
//! This module defines the `BanterClient` trait that all client
//! implementations must satisfy. The trait is the seam the application
//! layer depends on, so production code talks HTTP while tests inject a
//! recording mock.

use crate::error::ApiResult;
use crate::types::{
    AuthTokens, CommentNode, ImageUpload, KarmaStanding, LeaderboardRow, LikeOutcome, Post,
};
use async_trait::async_trait;

/// Banter API client trait
///
/// One method per route. Authenticated operations take the bearer
/// credential explicitly; callers suppress the call entirely when no
/// credential is held rather than sending an empty header.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one client can be shared
/// across spawned tasks.
///
/// # Example
///
/// ```rust,ignore
/// use banter_client::{BanterClient, Post};
///
/// async fn first_page(client: &dyn BanterClient) -> banter_client::ApiResult<Vec<Post>> {
///     client.fetch_posts(10).await
/// }
/// ```
#[async_trait]
pub trait BanterClient: Send + Sync {
    /// Sign in with a username and password
    ///
    /// # Returns
    ///
    /// The issued token pair, or `Rejected` with the server's reason
    /// ("Invalid username or password", ...), falling back to
    /// "Login failed".
    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthTokens>;

    /// Create an account
    ///
    /// A successful registration signs the caller in: the server issues
    /// the same token pair as `login`.
    ///
    /// # Returns
    ///
    /// The issued token pair, or `Rejected` with the server's reason
    /// ("Username already exists", ...), falling back to
    /// "Registration failed".
    async fn register(&self, username: &str, password: &str) -> ApiResult<AuthTokens>;

    /// Fetch the newest posts
    ///
    /// # Arguments
    ///
    /// * `limit` - Page size; the server clamps it to 1..=50
    ///
    /// # Returns
    ///
    /// Posts newest first, or `ServerError` on any non-success response.
    async fn fetch_posts(&self, limit: u32) -> ApiResult<Vec<Post>>;

    /// Create a post with text, an image, or both
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer credential
    /// * `content` - Text body, already trimmed by the caller
    /// * `image` - Optional image attachment
    ///
    /// # Returns
    ///
    /// The created post, `Unauthorized` on a rejected credential, or
    /// `Rejected("Post upload failed")` otherwise.
    async fn create_post(
        &self,
        token: &str,
        content: Option<&str>,
        image: Option<ImageUpload>,
    ) -> ApiResult<Post>;

    /// Fetch the discussion under a post
    ///
    /// # Returns
    ///
    /// Root comments with children nested in creation order, or
    /// `ServerError` on any non-success response.
    async fn fetch_comments(&self, post_id: u64) -> ApiResult<Vec<CommentNode>>;

    /// Add a comment to a post
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer credential
    /// * `post_id` - Post the comment belongs to
    /// * `content` - Comment body, already trimmed by the caller
    /// * `parent_id` - Comment being replied to, `None` for top-level
    ///
    /// # Returns
    ///
    /// The created comment (children always empty), `Unauthorized` on a
    /// rejected credential, or `Rejected("Comment failed")` otherwise.
    async fn create_comment(
        &self,
        token: &str,
        post_id: u64,
        content: &str,
        parent_id: Option<u64>,
    ) -> ApiResult<CommentNode>;

    /// Toggle the caller's like on a post
    ///
    /// # Returns
    ///
    /// The toggle outcome with the fresh count, `Unauthorized` on a
    /// rejected credential, or `Rejected` with the server's reason,
    /// falling back to "Like failed".
    async fn toggle_like(&self, token: &str, post_id: u64) -> ApiResult<LikeOutcome>;

    /// Fetch the rolling leaderboard (public)
    async fn fetch_leaderboard(&self) -> ApiResult<Vec<LeaderboardRow>>;

    /// Fetch the caller's own leaderboard standing
    ///
    /// # Returns
    ///
    /// The standing (rank absent when the caller has no karma events in
    /// the window), or `Unauthorized` on a rejected credential.
    async fn fetch_my_standing(&self, token: &str) -> ApiResult<KarmaStanding>;
}
