use tokio::sync::mpsc::UnboundedSender;

use crate::actions::Action;

/// Dispatcher for sending actions to the store
///
/// Wraps the action channel sender so middleware (and tasks they spawn)
/// can feed new actions back into the event loop.
#[derive(Clone)]
pub struct Dispatcher {
    tx: UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new(tx: UnboundedSender<Action>) -> Self {
        Self { tx }
    }

    /// Send an action into the event loop
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.tx.send(action) {
            log::error!("Failed to dispatch action: {}", e);
        }
    }
}
