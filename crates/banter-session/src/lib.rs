//! Session lifecycle for banter
//!
//! This crate provides:
//! - Bearer token payload decoding without signature verification (token)
//! - A key-value credential store with file and in-memory backends (store)
//! - The session monitor with its auto sign-out timer (monitor)

pub mod monitor;
pub mod paths;
pub mod store;
pub mod token;

pub use monitor::{
    is_token_expired, ExpiryTimer, Session, SessionMonitor, DEFAULT_EXPIRY_SKEW_MS, KEY_ACCESS,
    KEY_REFRESH, KEY_USER,
};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use token::{decode_payload, expiry_ms};
