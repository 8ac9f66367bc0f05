//! Typed client for the banter HTTP API
//!
//! This crate provides a trait-based API client:
//! - `BanterClient` defines one method per route, so callers stay
//!   independent of the transport and tests can inject a mock
//! - `ReqwestClient` is the HTTP implementation
//! - `ApiError` is the shared failure taxonomy; callers branch on it
//!   (an `Unauthorized` tears the session down, everything else is a
//!   recoverable status message)

pub mod client;
pub mod error;
pub mod reqwest_client;
pub mod types;

pub use client::BanterClient;
pub use error::{ApiError, ApiResult};
pub use reqwest_client::{ReqwestClient, DEFAULT_API_URL};
pub use types::{
    AuthTokens, CommentNode, ImageUpload, KarmaStanding, LeaderboardRow, LikeOutcome, Post,
};
