//! Pure reducers: (state, action) -> new state
//!
//! Collections are replaced wholesale when a fresh fetch lands. Mutation
//! outcomes never patch the data they touched; the refetch that follows
//! carries the server's truth.

use banter_client::ApiError;

use crate::actions::Action;
use crate::state::{
    AppState, BoardState, DiscussionState, FeedState, LoadingState, SessionState, SessionView,
    StatusLine,
};
use crate::thread::CommentThread;

/// Root reducer, composed of one reducer per state slice
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    state.status = status_reducer(state.status, action);
    state.session = session_reducer(state.session, action);
    state.feed = feed_reducer(state.feed, action);
    state.discussions = discussion_reducer(state.discussions, action);
    state.board = board_reducer(state.board, action);

    if let Action::Quit = action {
        state.running = false;
    }
    state
}

fn status_reducer(current: Option<StatusLine>, action: &Action) -> Option<StatusLine> {
    match action {
        Action::Status(line) => Some(line.clone()),

        // A fresh operation clears the previous outcome
        Action::Login { .. }
        | Action::Register { .. }
        | Action::SubmitPost { .. }
        | Action::SubmitComment { .. }
        | Action::ToggleLike(_) => None,

        Action::LoginResolved {
            username,
            result: Ok(_),
        } => Some(StatusLine::info(format!("Logged in as {}", username))),
        Action::LoginResolved {
            result: Err(err), ..
        } => Some(StatusLine::error(err.to_string())),

        Action::RegisterResolved { result: Ok(_), .. } => {
            Some(StatusLine::info("Registered successfully"))
        }
        Action::RegisterResolved {
            result: Err(err), ..
        } => Some(StatusLine::error(err.to_string())),

        Action::SessionExpired => {
            Some(StatusLine::error("Session expired, please login again"))
        }
        Action::Logout => Some(StatusLine::info("Logged out")),

        Action::FeedLoaded(Err(err)) => Some(StatusLine::error(err.to_string())),

        Action::PostResolved(Ok(_)) => Some(StatusLine::info("Post uploaded")),
        Action::PostResolved(Err(err)) => Some(StatusLine::error(err.to_string())),

        Action::LikeResolved(_, Ok(outcome)) => Some(StatusLine::info(format!(
            "{} ({} likes)",
            outcome.message, outcome.like_count
        ))),
        Action::LikeResolved(_, Err(err)) => Some(StatusLine::error(err.to_string())),

        Action::CommentResolved(_, Ok(_)) => None,
        Action::CommentResolved(_, Err(err)) => Some(StatusLine::error(err.to_string())),
        Action::CommentsLoaded(_, Err(err)) => Some(StatusLine::error(err.to_string())),

        Action::LeaderboardLoaded(Err(_)) => {
            Some(StatusLine::error("Failed to load leaderboard"))
        }

        // Standing failures stay silent; the board is still useful
        _ => current,
    }
}

fn session_reducer(mut state: SessionState, action: &Action) -> SessionState {
    match action {
        Action::SessionStarted {
            subject,
            expires_at_ms,
        } => {
            state.current = Some(SessionView {
                subject: subject.clone(),
                expires_at_ms: *expires_at_ms,
            });
        }
        Action::Logout | Action::SessionExpired => {
            state.current = None;
        }
        // The server rejected a stored credential on a write
        Action::PostResolved(Err(ApiError::Unauthorized))
        | Action::LikeResolved(_, Err(ApiError::Unauthorized))
        | Action::CommentResolved(_, Err(ApiError::Unauthorized)) => {
            state.current = None;
        }
        _ => {}
    }
    state
}

fn feed_reducer(mut state: FeedState, action: &Action) -> FeedState {
    match action {
        Action::FetchFeed => {
            state.loading = LoadingState::Loading;
        }
        Action::FeedLoaded(Ok(posts)) => {
            state.posts = posts.clone();
            state.loading = LoadingState::Loaded;
        }
        Action::FeedLoaded(Err(err)) => {
            // Stale posts stay visible under the error
            state.loading = LoadingState::Error(err.to_string());
        }
        Action::ToggleMineOnly => {
            state.mine_only = !state.mine_only;
        }
        _ => {}
    }
    state
}

fn discussion_reducer(mut state: DiscussionState, action: &Action) -> DiscussionState {
    match action {
        Action::CommentsLoaded(post_id, Ok(nodes)) => {
            state
                .threads
                .insert(*post_id, CommentThread::build(nodes.clone()));
        }
        Action::SetReplyTarget {
            post_id,
            comment_id,
        } => {
            state.reply_targets.set(*post_id, *comment_id);
        }
        Action::ClearReplyTarget(post_id) => {
            state.reply_targets.clear(*post_id);
        }
        Action::CommentResolved(post_id, Ok(_)) => {
            // The submitted reply landed; the next one is top-level again
            state.reply_targets.clear(*post_id);
        }
        _ => {}
    }
    state
}

fn board_reducer(mut state: BoardState, action: &Action) -> BoardState {
    match action {
        Action::LeaderboardLoaded(Ok(rows)) => {
            state.rows = rows.clone();
        }
        Action::MyStandingLoaded(Ok(standing)) => {
            state.my_standing = Some(standing.clone());
        }
        Action::Logout
        | Action::SessionExpired
        | Action::PostResolved(Err(ApiError::Unauthorized))
        | Action::LikeResolved(_, Err(ApiError::Unauthorized))
        | Action::CommentResolved(_, Err(ApiError::Unauthorized)) => {
            state.my_standing = None;
        }
        _ => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use banter_client::{CommentNode, KarmaStanding, LikeOutcome, Post};

    use super::*;

    fn post(id: u64, like_count: u64) -> Post {
        Post {
            id,
            user: "alice".to_string(),
            content: format!("post {}", id),
            image: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            like_count,
            comment_count: 0,
        }
    }

    fn comment(id: u64, parent_id: Option<u64>) -> CommentNode {
        CommentNode {
            id,
            author: "bob".to_string(),
            content: format!("comment {}", id),
            created_at: String::new(),
            parent_id,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let state = reduce(AppState::default(), &Action::Quit);
        assert!(!state.running);
    }

    #[test]
    fn test_feed_is_replaced_wholesale() {
        let mut state = AppState::default();
        state.feed.posts = vec![post(1, 0), post(2, 0), post(3, 0)];

        let state = reduce(state, &Action::FeedLoaded(Ok(vec![post(9, 4)])));
        let ids: Vec<u64> = state.feed.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9]);
        assert_eq!(state.feed.loading, LoadingState::Loaded);
    }

    #[test]
    fn test_feed_error_keeps_stale_posts() {
        let mut state = AppState::default();
        state.feed.posts = vec![post(1, 0)];

        let state = reduce(state, &Action::FeedLoaded(Err(ApiError::ServerError)));
        assert_eq!(state.feed.posts.len(), 1);
        assert!(matches!(state.feed.loading, LoadingState::Error(_)));
        assert_eq!(state.status.unwrap().message, "Server error");
    }

    #[test]
    fn test_like_outcome_is_not_merged_into_posts() {
        let mut state = AppState::default();
        state.feed.posts = vec![post(1, 0)];

        let outcome = LikeOutcome {
            message: "Post liked".to_string(),
            liked: true,
            like_count: 5,
        };
        let state = reduce(state, &Action::LikeResolved(1, Ok(outcome)));

        // The count only changes when the refetch lands
        assert_eq!(state.feed.posts[0].like_count, 0);
        assert_eq!(state.status.unwrap().message, "Post liked (5 likes)");
    }

    #[test]
    fn test_comments_rebuild_the_thread() {
        let state = reduce(
            AppState::default(),
            &Action::CommentsLoaded(7, Ok(vec![comment(1, None), comment(2, Some(1))])),
        );
        let thread = state.discussions.threads.get(&7).unwrap();
        assert_eq!(thread.len(), 2);

        // A later fetch replaces the shape entirely
        let state = reduce(state, &Action::CommentsLoaded(7, Ok(vec![comment(1, None)])));
        assert_eq!(state.discussions.threads.get(&7).unwrap().len(), 1);
    }

    #[test]
    fn test_reply_target_follows_last_selection() {
        let state = reduce(
            AppState::default(),
            &Action::SetReplyTarget {
                post_id: 3,
                comment_id: 10,
            },
        );
        let state = reduce(
            state,
            &Action::SetReplyTarget {
                post_id: 3,
                comment_id: 11,
            },
        );
        assert_eq!(state.discussions.reply_targets.active(3), Some(11));
    }

    #[test]
    fn test_comment_success_clears_only_that_posts_target() {
        let mut state = AppState::default();
        state.discussions.reply_targets.set(3, 10);
        state.discussions.reply_targets.set(4, 20);

        let state = reduce(state, &Action::CommentResolved(3, Ok(comment(99, Some(10)))));
        assert_eq!(state.discussions.reply_targets.active(3), None);
        assert_eq!(state.discussions.reply_targets.active(4), Some(20));
    }

    #[test]
    fn test_session_started_sets_the_view() {
        let state = reduce(
            AppState::default(),
            &Action::SessionStarted {
                subject: "alice".to_string(),
                expires_at_ms: 1_000,
            },
        );
        assert_eq!(state.session.subject(), Some("alice"));
    }

    #[test]
    fn test_logout_clears_session_and_standing() {
        let mut state = AppState::default();
        state.session.current = Some(SessionView {
            subject: "alice".to_string(),
            expires_at_ms: 1_000,
        });
        state.board.my_standing = Some(KarmaStanding {
            username: "alice".to_string(),
            rank: Some(1),
            karma: 10,
        });

        let state = reduce(state, &Action::Logout);
        assert_eq!(state.session.current, None);
        assert_eq!(state.board.my_standing, None);
        assert_eq!(state.status.unwrap().message, "Logged out");
    }

    #[test]
    fn test_unauthorized_write_clears_the_session() {
        let mut state = AppState::default();
        state.session.current = Some(SessionView {
            subject: "alice".to_string(),
            expires_at_ms: 1_000,
        });

        let state = reduce(state, &Action::LikeResolved(1, Err(ApiError::Unauthorized)));
        assert_eq!(state.session.current, None);
        assert_eq!(
            state.status.unwrap().message,
            "Unauthorized: please login again"
        );
    }

    #[test]
    fn test_new_operation_clears_the_previous_status() {
        let mut state = AppState::default();
        state.status = Some(StatusLine::error("old news"));

        let state = reduce(state, &Action::ToggleLike(1));
        assert_eq!(state.status, None);
    }

    #[test]
    fn test_standing_failure_is_silent() {
        let mut state = AppState::default();
        state.status = Some(StatusLine::info("board below"));

        let state = reduce(state, &Action::MyStandingLoaded(Err(ApiError::ServerError)));
        assert_eq!(state.board.my_standing, None);
        assert_eq!(state.status.unwrap().message, "board below");
    }

    #[test]
    fn test_session_expiry_reports_and_clears() {
        let mut state = AppState::default();
        state.session.current = Some(SessionView {
            subject: "alice".to_string(),
            expires_at_ms: 1_000,
        });

        let state = reduce(state, &Action::SessionExpired);
        assert_eq!(state.session.current, None);
        assert_eq!(
            state.status.unwrap().message,
            "Session expired, please login again"
        );
    }
}
