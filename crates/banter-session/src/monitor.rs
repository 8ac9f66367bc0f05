//! Session monitor
//!
//! Single source of truth for "am I signed in". All credential reads and
//! writes route through [`SessionMonitor`] so the session state machine
//! (unauthenticated → authenticated → unauthenticated) lives in one
//! place. Expiry checks never fail loudly: an unreadable token simply
//! counts as expired.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::store::CredentialStore;
use crate::token;

/// Early-expiry margin so a request does not race a token that is about
/// to lapse server-side.
pub const DEFAULT_EXPIRY_SKEW_MS: i64 = 30_000;

/// Store key holding the subject identity.
pub const KEY_USER: &str = "user";
/// Store key holding the access credential.
pub const KEY_ACCESS: &str = "access";
/// Store key holding the refresh credential (persisted, never sent).
pub const KEY_REFRESH: &str = "refresh";

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn is_expired_at(token: &str, skew_ms: i64, now_ms: i64) -> bool {
    match token::expiry_ms(token) {
        Some(expiry) => now_ms + skew_ms >= expiry,
        None => true,
    }
}

/// True when the token is expired or will lapse within `skew_ms`. A
/// token with no readable expiry counts as expired.
///
/// The boundary counts as expired: `now + skew == expiry` is too late.
pub fn is_token_expired(token: &str, skew_ms: i64) -> bool {
    is_expired_at(token, skew_ms, now_ms())
}

/// Snapshot of the authenticated session, derived from the stored token.
///
/// Never cached: rebuilt from the raw token each time it is requested,
/// so the expiry always reflects the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Stored subject identity (the username used at sign-in).
    pub subject: String,
    /// Token expiry as epoch milliseconds.
    pub expires_at_ms: i64,
    /// The bearer credential exactly as issued.
    pub raw_token: String,
}

/// Armed auto sign-out timer.
///
/// At most one of these exists per session. Dropping the handle aborts
/// the pending callback, so replacing a timer means releasing the old
/// handle before storing the new one.
#[derive(Debug)]
pub struct ExpiryTimer {
    handle: JoinHandle<()>,
}

impl ExpiryTimer {
    /// Cancel the pending sign-out callback.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Wraps a credential store with the session state machine.
pub struct SessionMonitor {
    store: Box<dyn CredentialStore>,
}

impl SessionMonitor {
    pub fn new<S: CredentialStore + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Stored subject identity, if any.
    pub fn subject(&self) -> Option<String> {
        self.store.get(KEY_USER)
    }

    /// Stored access credential, if any. Presence only; callers that
    /// need validity go through [`Self::is_authenticated`].
    pub fn access_token(&self) -> Option<String> {
        self.store.get(KEY_ACCESS)
    }

    /// True iff a subject and an access credential are stored and the
    /// credential is not expired (within the default skew).
    pub fn is_authenticated(&self) -> bool {
        let has_subject = self.store.get(KEY_USER).is_some();
        match self.store.get(KEY_ACCESS) {
            Some(token) => has_subject && !is_token_expired(&token, DEFAULT_EXPIRY_SKEW_MS),
            None => false,
        }
    }

    /// Rebuild the session snapshot from stored credentials.
    ///
    /// `None` when either credential half is missing or the token
    /// carries no readable expiry.
    pub fn current_session(&self) -> Option<Session> {
        let subject = self.store.get(KEY_USER)?;
        let raw_token = self.store.get(KEY_ACCESS)?;
        let expires_at_ms = token::expiry_ms(&raw_token)?;
        Some(Session {
            subject,
            expires_at_ms,
            raw_token,
        })
    }

    /// Store the credential triple issued at sign-in.
    pub fn store_login(&self, subject: &str, access: &str, refresh: &str) {
        self.store.set(KEY_USER, subject);
        self.store.set(KEY_ACCESS, access);
        self.store.set(KEY_REFRESH, refresh);
        log::info!("Signed in as {}", subject);
    }

    /// Clear all stored credential material. Calling twice is safe.
    pub fn logout(&self) {
        self.store.remove(KEY_USER);
        self.store.remove(KEY_ACCESS);
        self.store.remove(KEY_REFRESH);
        log::info!("Session cleared");
    }

    /// Arm a one-shot timer that runs `on_expire` when the stored token
    /// lapses.
    ///
    /// No token or no readable expiry arms nothing and returns `None`.
    /// An already-lapsed token runs `on_expire` on the spot and returns
    /// `None` (there is nothing left to cancel). Otherwise the returned
    /// handle owns the pending callback; the caller keeps exactly one
    /// and releases it before arming a replacement.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule_auto_logout<F>(&self, on_expire: F) -> Option<ExpiryTimer>
    where
        F: FnOnce() + Send + 'static,
    {
        let token = self.store.get(KEY_ACCESS)?;
        let expiry = token::expiry_ms(&token)?;
        let delay_ms = expiry - now_ms();

        if delay_ms <= 0 {
            log::info!("Stored token already lapsed, signing out now");
            on_expire();
            return None;
        }

        log::debug!("Auto sign-out armed in {}ms", delay_ms);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms as u64)).await;
            log::info!("Token lapsed, running auto sign-out");
            on_expire();
        });

        Some(ExpiryTimer { handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCredentialStore;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn token_expiring_at(exp_secs: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp_secs}}}"#).as_bytes());
        format!("{header}.{body}.sig")
    }

    fn token_expiring_in(secs_from_now: i64) -> String {
        token_expiring_at(Utc::now().timestamp() + secs_from_now)
    }

    fn monitor_with(subject: Option<&str>, token: Option<&str>) -> SessionMonitor {
        let store = MemoryCredentialStore::default();
        if let Some(subject) = subject {
            store.set(KEY_USER, subject);
        }
        if let Some(token) = token {
            store.set(KEY_ACCESS, token);
        }
        SessionMonitor::new(store)
    }

    #[test]
    fn test_expiry_boundary_counts_as_expired() {
        // expiry = 1_000_000_000 ms
        let token = token_expiring_at(1_000_000);
        assert!(is_expired_at(&token, 30_000, 999_970_000)); // exactly on the boundary
        assert!(is_expired_at(&token, 30_000, 999_990_000));
        assert!(!is_expired_at(&token, 30_000, 999_969_999)); // one ms inside
    }

    #[test]
    fn test_unreadable_token_counts_as_expired() {
        assert!(is_token_expired("garbage", DEFAULT_EXPIRY_SKEW_MS));
        assert!(is_expired_at("a.b", 0, 0));
        assert!(is_expired_at("header.!!!.sig", 0, 0));
    }

    #[test]
    fn test_is_authenticated_needs_subject_and_fresh_token() {
        let fresh = token_expiring_in(3600);
        assert!(monitor_with(Some("alice"), Some(&fresh)).is_authenticated());
        assert!(!monitor_with(None, Some(&fresh)).is_authenticated());
        assert!(!monitor_with(Some("alice"), None).is_authenticated());

        let stale = token_expiring_in(-10);
        assert!(!monitor_with(Some("alice"), Some(&stale)).is_authenticated());

        // Lapsing inside the early-expiry margin counts as expired too
        let lapsing = token_expiring_in(10);
        assert!(!monitor_with(Some("alice"), Some(&lapsing)).is_authenticated());
    }

    #[test]
    fn test_current_session_derives_expiry_from_token() {
        let token = token_expiring_at(2_000_000_000);
        let monitor = monitor_with(Some("alice"), Some(&token));

        let session = monitor.current_session().unwrap();
        assert_eq!(session.subject, "alice");
        assert_eq!(session.expires_at_ms, 2_000_000_000_000);
        assert_eq!(session.raw_token, token);

        let unreadable = monitor_with(Some("alice"), Some("unreadable"));
        assert!(unreadable.current_session().is_none());
    }

    #[test]
    fn test_store_login_keeps_all_three_keys() {
        let store = Arc::new(MemoryCredentialStore::default());
        let monitor = SessionMonitor::new(store.clone());

        monitor.store_login("alice", "acc-token", "ref-token");
        assert_eq!(store.get(KEY_USER).as_deref(), Some("alice"));
        assert_eq!(store.get(KEY_ACCESS).as_deref(), Some("acc-token"));
        assert_eq!(store.get(KEY_REFRESH).as_deref(), Some("ref-token"));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let store = Arc::new(MemoryCredentialStore::default());
        let monitor = SessionMonitor::new(store.clone());
        monitor.store_login("alice", "acc", "ref");

        monitor.logout();
        assert!(store.get(KEY_USER).is_none());
        assert!(store.get(KEY_ACCESS).is_none());
        assert!(store.get(KEY_REFRESH).is_none());

        monitor.logout();
        assert!(monitor.subject().is_none());
    }

    #[test]
    fn test_schedule_without_token_arms_nothing() {
        let monitor = monitor_with(None, None);
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let timer = monitor.schedule_auto_logout(move || flag.store(true, Ordering::SeqCst));
        assert!(timer.is_none());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_schedule_on_lapsed_token_fires_inline() {
        let monitor = monitor_with(Some("alice"), Some(&token_expiring_in(-3600)));
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let timer = monitor.schedule_auto_logout(move || flag.store(true, Ordering::SeqCst));
        assert!(timer.is_none());
        assert!(called.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_fires_at_expiry() {
        let monitor = monitor_with(Some("alice"), Some(&token_expiring_in(3600)));
        let (tx, rx) = tokio::sync::oneshot::channel();

        let timer = monitor.schedule_auto_logout(move || {
            let _ = tx.send(());
        });
        assert!(timer.is_some());

        let armed_at = tokio::time::Instant::now();
        rx.await.unwrap();
        let waited = armed_at.elapsed();
        assert!(waited >= Duration::from_millis(3_590_000));
        assert!(waited <= Duration::from_millis(3_610_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_callback() {
        let monitor = monitor_with(Some("alice"), Some(&token_expiring_in(60)));
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let timer = monitor
            .schedule_auto_logout(move || flag.store(true, Ordering::SeqCst))
            .unwrap();
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_armed_timer() {
        let monitor = monitor_with(Some("alice"), Some(&token_expiring_in(60)));
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let timer = monitor
            .schedule_auto_logout(move || flag.store(true, Ordering::SeqCst))
            .unwrap();
        drop(timer);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!called.load(Ordering::SeqCst));
    }
}
