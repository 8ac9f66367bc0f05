pub mod api;
pub mod dispatcher;
pub mod logging;
pub mod session;

pub use api::ApiMiddleware;
pub use dispatcher::Dispatcher;
pub use logging::LoggingMiddleware;
pub use session::SessionMiddleware;

use std::future::Future;
use std::pin::Pin;

use crate::actions::Action;
use crate::state::AppState;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Middleware trait for intercepting actions
///
/// Middleware can:
/// - Perform side effects (logging, API calls, timers)
/// - Dispatch new actions via the dispatcher
/// - Block an action from reaching the reducer (return false)
pub trait Middleware: Send + Sync {
    fn handle<'a>(
        &'a mut self,
        action: &'a Action,
        state: &'a AppState,
        dispatcher: &'a Dispatcher,
    ) -> BoxFuture<'a, bool>;
}
