use crate::actions::Action;
use crate::middleware::{Dispatcher, Middleware};
use crate::reducer::reduce;
use crate::state::AppState;

/// Store that holds application state and dispatches actions
///
/// - Actions describe everything that can happen
/// - Middleware runs side effects and may veto an action
/// - Pure reducers compute the next state
/// - State is replaced, never mutated in place
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            state: initial_state,
            middleware: Vec::new(),
        }
    }

    /// Append a middleware to the chain
    ///
    /// Middleware runs in the order it was added. Add everything before
    /// the event loop starts.
    pub fn add_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middleware.push(Box::new(middleware));
    }

    /// Immutable view of the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Dispatch an action through the middleware chain, then the reducer
    ///
    /// Any middleware returning false vetoes the action: later middleware
    /// and the reducer never see it.
    pub async fn dispatch_async(&mut self, action: Action, dispatcher: &Dispatcher) {
        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, dispatcher).await {
                return;
            }
        }
        self.state = reduce(self.state.clone(), &action);
    }

    /// Dispatch straight to the reducer, bypassing middleware
    ///
    /// For tests and setup paths where side effects must not run.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), &action);
    }

    /// Replace the entire state (initialization and tests)
    pub fn replace_state(&mut self, state: AppState) {
        self.state = state;
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
