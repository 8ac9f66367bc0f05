use std::path::PathBuf;

use banter_client::{
    ApiResult, AuthTokens, CommentNode, KarmaStanding, LeaderboardRow, LikeOutcome, Post,
};

use crate::state::StatusLine;

/// Actions that can be dispatched to the store
///
/// Intent actions (`Login`, `FetchFeed`, `SubmitComment`, ...) are picked
/// up by middleware, which runs the side effect and dispatches the
/// matching `*Resolved` / `*Loaded` action with the outcome. Reducers only
/// ever see plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No-op action (empty input line)
    None,
    /// Stop the event loop
    Quit,
    /// Show a one-line status message
    Status(StatusLine),

    // Session lifecycle
    /// Re-open a persisted session on startup, if one is stored
    RestoreSession,
    Login {
        username: String,
        password: String,
    },
    /// Outcome of a login call. Carries the username that was typed,
    /// since the token response does not echo it back.
    LoginResolved {
        username: String,
        result: ApiResult<AuthTokens>,
    },
    Register {
        username: String,
        password: String,
    },
    RegisterResolved {
        username: String,
        result: ApiResult<AuthTokens>,
    },
    /// Credentials were stored and a session is now active
    SessionStarted {
        subject: String,
        expires_at_ms: i64,
    },
    /// The stored credential reached its expiry time
    SessionExpired,
    Logout,

    // Feed
    FetchFeed,
    FeedLoaded(ApiResult<Vec<Post>>),
    SubmitPost {
        content: String,
        image: Option<PathBuf>,
    },
    PostResolved(ApiResult<Post>),
    ToggleLike(u64),
    LikeResolved(u64, ApiResult<LikeOutcome>),
    /// Flip the feed between everyone's posts and only the signed-in
    /// member's posts
    ToggleMineOnly,

    // Discussions
    FetchComments(u64),
    CommentsLoaded(u64, ApiResult<Vec<CommentNode>>),
    SubmitComment {
        post_id: u64,
        content: String,
    },
    CommentResolved(u64, ApiResult<CommentNode>),
    /// Aim the next comment on `post_id` at an existing comment
    SetReplyTarget {
        post_id: u64,
        comment_id: u64,
    },
    /// Back to top-level commenting for `post_id`
    ClearReplyTarget(u64),

    // Leaderboard
    FetchLeaderboard,
    LeaderboardLoaded(ApiResult<Vec<LeaderboardRow>>),
    FetchMyStanding,
    MyStandingLoaded(ApiResult<KarmaStanding>),
}
