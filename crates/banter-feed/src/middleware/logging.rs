use super::{BoxFuture, Dispatcher, Middleware};
use crate::actions::Action;
use crate::state::AppState;

/// Middleware that logs every dispatched action
///
/// `Action::None` (empty input) is skipped to keep the log readable.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn handle<'a>(
        &'a mut self,
        action: &'a Action,
        _state: &'a AppState,
        _dispatcher: &'a Dispatcher,
    ) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            if !matches!(action, Action::None) {
                log::debug!("Action: {:?}", action);
            }
            true
        })
    }
}
