//! SessionMiddleware - session lifecycle
//!
//! Owns the session monitor and the single auto sign-out timer:
//! - stores credentials when a login or registration resolves
//! - restores a persisted session on startup
//! - re-arms the expiry timer on every token change, releasing the old
//!   timer first so at most one is ever armed
//! - tears the session down on expiry or explicit logout, and when the
//!   server rejects a stored credential on a write

use std::sync::Arc;

use banter_client::{ApiError, AuthTokens};
use banter_session::{ExpiryTimer, SessionMonitor};

use super::{BoxFuture, Dispatcher, Middleware};
use crate::actions::Action;
use crate::state::AppState;

pub struct SessionMiddleware {
    monitor: Arc<SessionMonitor>,
    timer: Option<ExpiryTimer>,
}

impl SessionMiddleware {
    pub fn new(monitor: Arc<SessionMonitor>) -> Self {
        Self {
            monitor,
            timer: None,
        }
    }

    /// Announce the stored session to the reducer, if it is live.
    ///
    /// An expired or unreadable credential is not announced; it stays in
    /// the store untouched, and the server decides its fate.
    fn announce_session(&self, dispatcher: &Dispatcher) {
        if !self.monitor.is_authenticated() {
            return;
        }
        if let Some(session) = self.monitor.current_session() {
            dispatcher.dispatch(Action::SessionStarted {
                subject: session.subject,
                expires_at_ms: session.expires_at_ms,
            });
        }
    }

    /// Release the armed timer, then arm one for the stored token.
    ///
    /// A token that is already past its expiry makes the monitor fire
    /// the callback inline, which queues `SessionExpired` right away.
    fn rearm_timer(&mut self, dispatcher: &Dispatcher) {
        self.timer.take();
        let dispatcher = dispatcher.clone();
        self.timer = self
            .monitor
            .schedule_auto_logout(move || dispatcher.dispatch(Action::SessionExpired));
    }

    fn begin_session(&mut self, username: &str, tokens: &AuthTokens, dispatcher: &Dispatcher) {
        self.monitor
            .store_login(username, &tokens.access, &tokens.refresh);
        self.announce_session(dispatcher);
        self.rearm_timer(dispatcher);
        dispatcher.dispatch(Action::FetchFeed);
    }

    fn end_session(&mut self) {
        self.timer.take();
        self.monitor.logout();
    }
}

impl Middleware for SessionMiddleware {
    fn handle<'a>(
        &'a mut self,
        action: &'a Action,
        _state: &'a AppState,
        dispatcher: &'a Dispatcher,
    ) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            match action {
                Action::RestoreSession => {
                    log::debug!("SessionMiddleware: Handling RestoreSession");
                    self.announce_session(dispatcher);
                    self.rearm_timer(dispatcher);
                }
                Action::LoginResolved {
                    username,
                    result: Ok(tokens),
                } => {
                    log::debug!("SessionMiddleware: Handling successful login");
                    self.begin_session(username, tokens, dispatcher);
                }
                Action::RegisterResolved {
                    username,
                    result: Ok(tokens),
                } => {
                    log::debug!("SessionMiddleware: Handling successful registration");
                    self.begin_session(username, tokens, dispatcher);
                }
                Action::Logout => {
                    log::debug!("SessionMiddleware: Handling Logout");
                    self.end_session();
                }
                Action::SessionExpired => {
                    log::debug!("SessionMiddleware: Handling SessionExpired");
                    self.end_session();
                }
                // A write came back Unauthorized: the stored credential is
                // dead, drop it. Reads are left alone.
                Action::PostResolved(Err(ApiError::Unauthorized))
                | Action::LikeResolved(_, Err(ApiError::Unauthorized))
                | Action::CommentResolved(_, Err(ApiError::Unauthorized)) => {
                    log::info!("Server rejected the stored credential, signing out");
                    self.end_session();
                }
                _ => {}
            }
            true
        })
    }
}
