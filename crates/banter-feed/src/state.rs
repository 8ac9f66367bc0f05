use std::collections::HashMap;

use banter_client::{KarmaStanding, LeaderboardRow, Post};

use crate::thread::CommentThread;

/// Loading state for async feed data
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line outcome of the latest operation, shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}

/// What the UI knows about the signed-in member.
///
/// Deliberately excludes the raw credential: every read of the token
/// itself goes through the session monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub subject: String,
    pub expires_at_ms: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current: Option<SessionView>,
}

impl SessionState {
    pub fn subject(&self) -> Option<&str> {
        self.current.as_ref().map(|view| view.subject.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Replaced wholesale on every successful fetch
    pub posts: Vec<Post>,
    pub loading: LoadingState,
    /// Show only the signed-in member's posts
    pub mine_only: bool,
}

/// Which comment a pending reply is aimed at, tracked per post.
///
/// One selection per post, last write wins. Selections on different
/// posts never affect each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyTargets {
    targets: HashMap<u64, u64>,
}

impl ReplyTargets {
    /// Aim the next comment on `post_id` at `comment_id`.
    pub fn set(&mut self, post_id: u64, comment_id: u64) {
        self.targets.insert(post_id, comment_id);
    }

    /// Drop the selection; the next comment on `post_id` is top-level.
    pub fn clear(&mut self, post_id: u64) {
        self.targets.remove(&post_id);
    }

    /// The comment the next submission on `post_id` will reply to.
    pub fn active(&self, post_id: u64) -> Option<u64> {
        self.targets.get(&post_id).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscussionState {
    /// Discussion tree per post, rebuilt wholesale on every fetch
    pub threads: HashMap<u64, CommentThread>,
    pub reply_targets: ReplyTargets,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub rows: Vec<LeaderboardRow>,
    /// Signed-in member's own standing, when it has been fetched
    pub my_standing: Option<KarmaStanding>,
}

/// Application state
///
/// Every field is plain data; reducers replace slices of it as actions
/// arrive. Mutation responses are never merged in, fresh fetches are.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub session: SessionState,
    pub feed: FeedState,
    pub discussions: DiscussionState,
    pub board: BoardState,
    pub status: Option<StatusLine>,
    pub running: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionState::default(),
            feed: FeedState::default(),
            discussions: DiscussionState::default(),
            board: BoardState::default(),
            status: None,
            running: true,
        }
    }
}

impl AppState {
    /// Posts visible under the current feed filter.
    ///
    /// The mine-only filter needs a signed-in subject to compare
    /// against; signed out it shows everything.
    pub fn visible_posts(&self) -> Vec<&Post> {
        match (self.feed.mine_only, self.session.subject()) {
            (true, Some(subject)) => self
                .feed
                .posts
                .iter()
                .filter(|post| post.user == subject)
                .collect(),
            _ => self.feed.posts.iter().collect(),
        }
    }
}
