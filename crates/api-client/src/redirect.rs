//! Session-expiry signaling and redirect policy
//!
//! The original web client navigated straight to the login page from inside
//! the request helper when a 401 arrived. Here the client only *signals*
//! expiry; whether a surface navigates is the calling layer's decision,
//! taken through [`RedirectPolicy`]. Authentication and admin surfaces
//! present their own inline login and are exempt.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event emitted once per 401 response, after the session store is cleared
#[derive(Debug, Clone)]
pub struct SessionExpired {
    /// API path whose response signaled the expiry
    pub path: String,
    /// Localized or server-supplied expiry message
    pub message: String,
}

/// Subscription handle for session-expiry events
pub type SessionExpiredReceiver = broadcast::Receiver<SessionExpired>;

/// Decides whether a surface should navigate to the login page on expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectPolicy {
    /// Path of the login surface
    pub login_path: String,
    /// Surfaces whose path contains any of these substrings handle expiry
    /// inline and must not be redirected
    pub exempt: Vec<String>,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            exempt: vec!["/login".to_string(), "/admin".to_string()],
        }
    }
}

impl RedirectPolicy {
    /// Whether a surface at `current_path` should navigate to the login page
    #[must_use]
    pub fn should_redirect(&self, current_path: &str) -> bool {
        !self.exempt.iter().any(|e| current_path.contains(e))
    }

    /// Navigation target for surfaces that should redirect
    #[must_use]
    pub fn target(&self) -> &str {
        &self.login_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browsing_surfaces_redirect() {
        let policy = RedirectPolicy::default();
        assert!(policy.should_redirect("/places/42"));
        assert!(policy.should_redirect("/"));
        assert_eq!(policy.target(), "/login");
    }

    #[test]
    fn test_exempt_surfaces_do_not_redirect() {
        let policy = RedirectPolicy::default();
        assert!(!policy.should_redirect("/login"));
        assert!(!policy.should_redirect("/admin/bookings"));
    }

    #[test]
    fn test_custom_exemptions() {
        let policy = RedirectPolicy {
            login_path: "/signin".to_string(),
            exempt: vec!["/signin".to_string()],
        };
        assert!(policy.should_redirect("/admin"));
        assert!(!policy.should_redirect("/signin?next=/bookings"));
    }
}
