//! Banter API data transfer objects
//!
//! These types mirror the wire shapes the server returns. They are kept
//! separate from application state so the client crate stays reusable.

use serde::{Deserialize, Serialize};

/// A feed post as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post id
    pub id: u64,

    /// Author's username (the wire field is `user`)
    pub user: String,

    /// Text body, empty when the post is image-only
    #[serde(default)]
    pub content: String,

    /// Server path of the attached image, if any
    #[serde(default)]
    pub image: Option<String>,

    /// Creation timestamp, preformatted by the server and rendered
    /// verbatim (never parsed client-side)
    pub created_at: String,

    /// Number of likes
    #[serde(default)]
    pub like_count: u64,

    /// Number of top-level comments
    #[serde(default)]
    pub comment_count: u64,
}

/// A comment as returned by the API
///
/// The server answers with the roots of each post's discussion, children
/// already nested in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    /// Comment id
    pub id: u64,

    /// Author's username
    pub author: String,

    /// Comment body
    pub content: String,

    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created_at: String,

    /// Id of the comment this replies to, `None` for top-level
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Replies, in server order
    #[serde(default)]
    pub children: Vec<CommentNode>,
}

/// Result of toggling a like on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeOutcome {
    /// Outcome text ("Post liked" / "Post unliked")
    pub message: String,

    /// Whether the caller likes the post after the toggle
    pub liked: bool,

    /// Fresh like count after the toggle
    pub like_count: u64,
}

/// One row of the rolling leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// Username (the wire field name is an artifact of the server's
    /// aggregation query)
    #[serde(rename = "user__username")]
    pub username: String,

    /// Engagement score over the window; unlikes can push it negative
    pub karma: i64,
}

/// The caller's own standing on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarmaStanding {
    /// Username of the caller
    pub username: String,

    /// Position in the window's ranking, absent without karma events
    #[serde(default)]
    pub rank: Option<u32>,

    /// Engagement score over the window
    pub karma: i64,
}

/// Credential material issued at sign-in
///
/// The response also carries the username and user id; only the token
/// pair is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Bearer credential attached to authenticated calls
    pub access: String,

    /// Refresh credential (persisted alongside, never sent back)
    pub refresh: String,
}

/// Image attachment for a new post
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    /// File name the server derives its storage path from
    pub file_name: String,

    /// Raw image bytes
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_from_wire_shape() {
        let json = r#"{
            "id": 3,
            "user": "alice",
            "content": "hello",
            "image": null,
            "created_at": "25 Aug 2026, 09:15 AM",
            "like_count": 2,
            "comment_count": 1
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 3);
        assert_eq!(post.user, "alice");
        assert_eq!(post.created_at, "25 Aug 2026, 09:15 AM");
        assert_eq!(post.like_count, 2);
        assert!(post.image.is_none());
    }

    #[test]
    fn test_comment_children_default_to_empty() {
        let json = r#"{"id": 1, "author": "bob", "content": "hi", "parent_id": null}"#;
        let comment: CommentNode = serde_json::from_str(json).unwrap();
        assert!(comment.children.is_empty());
        assert!(comment.parent_id.is_none());
    }

    #[test]
    fn test_comment_nested_children() {
        let json = r#"{
            "id": 1, "author": "bob", "content": "root", "parent_id": null,
            "children": [
                {"id": 2, "author": "eve", "content": "reply", "parent_id": 1, "children": []}
            ]
        }"#;
        let comment: CommentNode = serde_json::from_str(json).unwrap();
        assert_eq!(comment.children.len(), 1);
        assert_eq!(comment.children[0].parent_id, Some(1));
    }

    #[test]
    fn test_leaderboard_row_uses_aggregated_field_name() {
        let json = r#"{"user__username": "alice", "karma": -3}"#;
        let row: LeaderboardRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.username, "alice");
        assert_eq!(row.karma, -3);
    }

    #[test]
    fn test_standing_rank_may_be_absent() {
        let json = r#"{"username": "alice", "rank": null, "karma": 0}"#;
        let standing: KarmaStanding = serde_json::from_str(json).unwrap();
        assert!(standing.rank.is_none());
    }

    #[test]
    fn test_auth_tokens_ignore_extra_fields() {
        let json = r#"{"access": "a.b.c", "refresh": "d.e.f", "username": "alice", "id": 9}"#;
        let tokens: AuthTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access, "a.b.c");
        assert_eq!(tokens.refresh, "d.e.f");
    }
}
