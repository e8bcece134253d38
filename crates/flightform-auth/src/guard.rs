#![forbid(unsafe_code)]

//! Route guarding for the flight form: signed-in visitors pass through,
//! everyone else is pointed at the login page with the requested path
//! preserved so sign-in can land them back where they were headed.

use crate::identity::{Identity, IdentityProvider};

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Path of the guarded flight form.
pub const FORM_PATH: &str = "/flight-form";

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the path to restore after sign-in.
pub const RETURN_URL_PARAM: &str = "returnUrl";

// ---------------------------------------------------------------------------
// RouteDecision
// ---------------------------------------------------------------------------

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The visitor is signed in; let the navigation proceed.
    Allow,
    /// Nobody is signed in; send the visitor to login, remembering where
    /// they were going.
    RedirectToLogin {
        /// The originally requested path, to restore after sign-in.
        return_url: String,
    },
}

impl RouteDecision {
    /// Whether the navigation may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allow)
    }

    /// The login URL to navigate to instead, when access was denied.
    ///
    /// The return path is embedded verbatim; callers that route through a
    /// real URL stack should percent-encode it first.
    #[must_use]
    pub fn login_url(&self) -> Option<String> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToLogin { return_url } => {
                Some(format!("{LOGIN_PATH}?{RETURN_URL_PARAM}={return_url}"))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Guarding
// ---------------------------------------------------------------------------

/// Decide whether a visitor may open `requested_path`.
#[must_use]
pub fn guard_form_access(identity: Option<&Identity>, requested_path: &str) -> RouteDecision {
    match identity {
        Some(identity) => {
            tracing::debug!("access to {requested_path} allowed for {}", identity.label());
            RouteDecision::Allow
        }
        None => {
            tracing::debug!("access to {requested_path} denied, redirecting to login");
            RouteDecision::RedirectToLogin {
                return_url: requested_path.to_string(),
            }
        }
    }
}

/// Like [`guard_form_access`], but waits for the sign-in state to resolve
/// first. This is the form the navigation layer calls at startup, when the
/// backend may not have answered yet.
pub async fn guard_form_access_first<P>(provider: &P, requested_path: &str) -> RouteDecision
where
    P: IdentityProvider + ?Sized,
{
    let identity = provider.await_first_identity().await;
    guard_form_access(identity.as_ref(), requested_path)
}

/// Where to land after a successful sign-in, given the raw query string of
/// the login page URL (with or without the leading `?`).
///
/// A missing or empty `returnUrl` falls back to the flight form.
#[must_use]
pub fn login_return_target(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == RETURN_URL_PARAM && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| FORM_PATH.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
