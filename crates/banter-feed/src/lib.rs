//! Application core for the banter client
//!
//! A small redux-style loop:
//! - [`actions::Action`] describes everything that can happen
//! - [`middleware`] runs side effects (API calls, session lifecycle) and
//!   feeds outcomes back in as new actions
//! - [`reducer::reduce`] folds actions into [`state::AppState`]
//! - [`store::Store`] wires the three together
//!
//! [`thread::CommentThread`] holds a post's discussion as an arena plus
//! a parent index, rebuilt wholesale on every fetch.

pub mod actions;
pub mod middleware;
pub mod reducer;
pub mod state;
pub mod store;
pub mod thread;

pub use actions::Action;
pub use state::AppState;
pub use store::Store;
