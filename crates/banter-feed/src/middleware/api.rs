//! ApiMiddleware - talks to the banter API
//!
//! Every intent action is resolved here: the call runs on a spawned task
//! and its outcome comes back as a `*Resolved` / `*Loaded` action. Writes
//! follow the read-after-write rule: a successful mutation immediately
//! queues a fresh fetch of everything it touched, and the mutation
//! response itself is never merged into state.
//!
//! Gating happens per operation in a fixed order: input validation
//! first, then the credential check. The credential check is presence
//! only; an expired token that is still stored is sent as-is and the
//! server's 401 settles it.

use std::sync::Arc;

use banter_client::{ApiError, BanterClient, ImageUpload};
use banter_session::SessionMonitor;

use super::{BoxFuture, Dispatcher, Middleware};
use crate::actions::Action;
use crate::state::{AppState, StatusLine};

/// Page size requested from the feed; the server clamps to 1..=50
pub const FEED_PAGE_SIZE: u32 = 10;

pub struct ApiMiddleware {
    client: Arc<dyn BanterClient>,
    monitor: Arc<SessionMonitor>,
}

impl ApiMiddleware {
    pub fn new(client: Arc<dyn BanterClient>, monitor: Arc<SessionMonitor>) -> Self {
        Self { client, monitor }
    }

    /// Stored bearer credential, expired or not
    fn credential(&self) -> Option<String> {
        self.monitor.access_token()
    }
}

impl Middleware for ApiMiddleware {
    fn handle<'a>(
        &'a mut self,
        action: &'a Action,
        state: &'a AppState,
        dispatcher: &'a Dispatcher,
    ) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            match action {
                Action::Login { username, password } => {
                    log::debug!("ApiMiddleware: Handling Login");
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    let username = username.clone();
                    let password = password.clone();
                    tokio::spawn(async move {
                        let result = client.login(&username, &password).await;
                        dispatcher.dispatch(Action::LoginResolved { username, result });
                    });
                }

                Action::Register { username, password } => {
                    log::debug!("ApiMiddleware: Handling Register");
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    let username = username.clone();
                    let password = password.clone();
                    tokio::spawn(async move {
                        let result = client.register(&username, &password).await;
                        dispatcher.dispatch(Action::RegisterResolved { username, result });
                    });
                }

                Action::FetchFeed => {
                    log::debug!("ApiMiddleware: Handling FetchFeed");
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_posts(FEED_PAGE_SIZE).await;
                        dispatcher.dispatch(Action::FeedLoaded(result));
                    });
                }

                Action::SubmitPost { content, image } => {
                    log::debug!("ApiMiddleware: Handling SubmitPost");
                    let text = {
                        let trimmed = content.trim();
                        (!trimmed.is_empty()).then(|| trimmed.to_string())
                    };
                    if text.is_none() && image.is_none() {
                        dispatcher.dispatch(Action::PostResolved(Err(ApiError::Validation(
                            "Please add content or an image".to_string(),
                        ))));
                        return false;
                    }
                    let Some(token) = self.credential() else {
                        dispatcher.dispatch(Action::Status(StatusLine::error(
                            "Unauthorized: please login again",
                        )));
                        return false;
                    };

                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    let image = image.clone();
                    tokio::spawn(async move {
                        let upload = match image {
                            Some(path) => match tokio::fs::read(&path).await {
                                Ok(bytes) => {
                                    let file_name = path
                                        .file_name()
                                        .map(|name| name.to_string_lossy().into_owned())
                                        .unwrap_or_else(|| "upload".to_string());
                                    Some(ImageUpload { file_name, bytes })
                                }
                                Err(err) => {
                                    dispatcher.dispatch(Action::PostResolved(Err(
                                        ApiError::Validation(format!(
                                            "Could not read {}: {}",
                                            path.display(),
                                            err
                                        )),
                                    )));
                                    return;
                                }
                            },
                            None => None,
                        };
                        let result = client.create_post(&token, text.as_deref(), upload).await;
                        dispatcher.dispatch(Action::PostResolved(result));
                    });
                }

                Action::ToggleLike(post_id) => {
                    log::debug!("ApiMiddleware: Handling ToggleLike");
                    let Some(token) = self.credential() else {
                        dispatcher.dispatch(Action::Status(StatusLine::error(
                            "Please login to like posts",
                        )));
                        return false;
                    };

                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    let post_id = *post_id;
                    tokio::spawn(async move {
                        let result = client.toggle_like(&token, post_id).await;
                        dispatcher.dispatch(Action::LikeResolved(post_id, result));
                    });
                }

                Action::FetchComments(post_id) => {
                    log::debug!("ApiMiddleware: Handling FetchComments");
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    let post_id = *post_id;
                    tokio::spawn(async move {
                        let result = client.fetch_comments(post_id).await;
                        dispatcher.dispatch(Action::CommentsLoaded(post_id, result));
                    });
                }

                Action::SubmitComment { post_id, content } => {
                    log::debug!("ApiMiddleware: Handling SubmitComment");
                    let text = content.trim().to_string();
                    if text.is_empty() {
                        // Matches the form behavior: a blank draft is ignored
                        return false;
                    }
                    let Some(token) = self.credential() else {
                        dispatcher.dispatch(Action::Status(StatusLine::error(
                            "Unauthorized: please login again",
                        )));
                        return false;
                    };

                    let parent_id = state.discussions.reply_targets.active(*post_id);
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    let post_id = *post_id;
                    tokio::spawn(async move {
                        let result = client
                            .create_comment(&token, post_id, &text, parent_id)
                            .await;
                        dispatcher.dispatch(Action::CommentResolved(post_id, result));
                    });
                }

                Action::FetchLeaderboard => {
                    log::debug!("ApiMiddleware: Handling FetchLeaderboard");
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_leaderboard().await;
                        dispatcher.dispatch(Action::LeaderboardLoaded(result));
                    });
                }

                Action::FetchMyStanding => {
                    log::debug!("ApiMiddleware: Handling FetchMyStanding");
                    // Signed out there is no standing to fetch
                    let Some(token) = self.credential() else {
                        return false;
                    };
                    let client = self.client.clone();
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_my_standing(&token).await;
                        dispatcher.dispatch(Action::MyStandingLoaded(result));
                    });
                }

                // Read-after-write: reconcile by refetching, never by merging
                Action::PostResolved(Ok(_)) => {
                    dispatcher.dispatch(Action::FetchFeed);
                }
                Action::LikeResolved(_, Ok(_)) => {
                    dispatcher.dispatch(Action::FetchFeed);
                }
                Action::CommentResolved(post_id, Ok(_)) => {
                    // Fresh thread and fresh comment counts
                    dispatcher.dispatch(Action::FetchComments(*post_id));
                    dispatcher.dispatch(Action::FetchFeed);
                }

                Action::MyStandingLoaded(Err(err)) => {
                    log::warn!("Standing unavailable: {}", err);
                }

                _ => {}
            }
            true
        })
    }
}
