#![forbid(unsafe_code)]

//! Sign-in state, published by an authentication backend and observed by
//! anything that needs to know who (if anyone) is signed in.
//!
//! The state starts out *unknown*: the backend has not yet said whether a
//! session exists. It then resolves to either an [`Identity`] or to
//! signed-out, and may flip between those two for the rest of the process
//! lifetime. Code that must not act before the first resolution awaits
//! [`IdentityProvider::await_first_identity`].

use async_trait::async_trait;
use tokio::sync::watch;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
    email: Option<String>,
}

impl Identity {
    /// An identity known only by its backend id.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    /// Attach the account email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Stable backend identifier for the user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Account email, when the backend shared one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Short human-readable label for logs: the email when present, the
    /// user id otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

/// What the authentication backend has told us so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SignInState {
    /// No answer from the backend yet.
    #[default]
    Unknown,
    /// The backend answered: someone is signed in, or nobody is.
    Resolved(Option<Identity>),
}

// ---------------------------------------------------------------------------
// IdentityProvider
// ---------------------------------------------------------------------------

/// Read access to the current sign-in state.
///
/// `current_identity` answers immediately and treats a still-unknown state
/// as signed-out. `await_first_identity` waits until the backend has
/// actually answered once, which is what route guards need at startup.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Who is signed in right now, if anyone.
    fn current_identity(&self) -> Option<Identity>;

    /// Wait for the first resolution, then report who (if anyone) it named.
    ///
    /// Returns immediately once the state has resolved at least once; later
    /// sign-ins and sign-outs do not make it wait again.
    async fn await_first_identity(&self) -> Option<Identity>;
}

// ---------------------------------------------------------------------------
// Watch-backed provider
// ---------------------------------------------------------------------------

/// Publishing side of a watch-backed sign-in state.
///
/// Held by the code that talks to the authentication backend; every observer
/// sees the latest published state.
#[derive(Debug)]
pub struct IdentityHandle {
    tx: watch::Sender<SignInState>,
}

impl IdentityHandle {
    /// Publish a sign-in.
    pub fn sign_in(&self, identity: Identity) {
        tracing::info!("sign-in state resolved: {}", identity.label());
        self.tx.send_replace(SignInState::Resolved(Some(identity)));
    }

    /// Publish a sign-out (or an initial "nobody is signed in" answer).
    pub fn sign_out(&self) {
        tracing::info!("sign-in state resolved: signed out");
        self.tx.send_replace(SignInState::Resolved(None));
    }
}

/// Observer side of a watch-backed sign-in state.
///
/// Cheap to clone; every clone observes the same publisher.
#[derive(Debug, Clone)]
pub struct WatchIdentity {
    rx: watch::Receiver<SignInState>,
}

impl WatchIdentity {
    /// Whether the backend has answered at least once.
    #[must_use]
    pub fn has_resolved(&self) -> bool {
        !matches!(*self.rx.borrow(), SignInState::Unknown)
    }

    /// Whether someone is signed in right now. Unknown counts as no.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(*self.rx.borrow(), SignInState::Resolved(Some(_)))
    }
}

#[async_trait]
impl IdentityProvider for WatchIdentity {
    fn current_identity(&self) -> Option<Identity> {
        match &*self.rx.borrow() {
            SignInState::Resolved(identity) => identity.clone(),
            SignInState::Unknown => None,
        }
    }

    async fn await_first_identity(&self) -> Option<Identity> {
        let mut rx = self.rx.clone();
        let resolved = rx
            .wait_for(|state| !matches!(state, SignInState::Unknown))
            .await;
        match resolved {
            Ok(state) => match &*state {
                SignInState::Resolved(identity) => identity.clone(),
                SignInState::Unknown => None,
            },
            // Publisher dropped without ever answering: nobody signed in.
            Err(_) => None,
        }
    }
}

/// A fresh sign-in state in the unknown phase, as a publisher/observer pair.
#[must_use]
pub fn watch_identity() -> (IdentityHandle, WatchIdentity) {
    let (tx, rx) = watch::channel(SignInState::default());
    (IdentityHandle { tx }, WatchIdentity { rx })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
