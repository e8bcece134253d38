#![forbid(unsafe_code)]

//! Sign-in state and route guarding for the flight form.
//!
//! The authentication backend publishes through an [`IdentityHandle`];
//! observers hold a [`WatchIdentity`] and either read the current state or
//! await the first resolution. [`guard_form_access`] turns that state into
//! a navigation decision.
//!
//! ```
//! use flightform_auth::{Identity, guard_form_access};
//!
//! let decision = guard_form_access(None, "/flight-form");
//! assert_eq!(
//!     decision.login_url().as_deref(),
//!     Some("/login?returnUrl=/flight-form"),
//! );
//!
//! let identity = Identity::new("uid-1").with_email("crew@example.com");
//! assert!(guard_form_access(Some(&identity), "/flight-form").is_allowed());
//! ```

pub mod guard;
pub mod identity;

pub use guard::{
    FORM_PATH, LOGIN_PATH, RETURN_URL_PARAM, RouteDecision, guard_form_access,
    guard_form_access_first, login_return_target,
};
pub use identity::{Identity, IdentityHandle, IdentityProvider, WatchIdentity, watch_identity};
