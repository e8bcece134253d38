#![forbid(unsafe_code)]

//! Flight-arrival form public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! ```
//! use flightform::prelude::*;
//!
//! let mut session = FormSession::new();
//! session.apply(FormEvent::Edit {
//!     field: FieldId::FlightNumber,
//!     value: "dl 45".into(),
//! });
//! assert_eq!(session.values().flight_number, "DL45");
//! ```

// --- Engine re-exports -----------------------------------------------------

pub use flightform_engine::field::{
    DEFAULT_GUESTS, FLIGHT_NUMBER_MAX_CHARS, FieldId, FieldValues, normalize_flight_number,
};
pub use flightform_engine::rules::{
    AIRLINE_MIN_CHARS, ARRIVAL_YEARS_AHEAD, COMMENTS_MAX_CHARS, FieldError, FieldRules,
    MAX_GUESTS, MIN_GUESTS,
};
pub use flightform_engine::session::{Effect, FormEvent, FormSession, Notice, Phase};
pub use flightform_engine::sink::{SessionDriver, SinkError, SubmissionSink};
pub use flightform_engine::submission::FlightSubmission;
pub use flightform_engine::validate::{RuleOutcome, Validator, Violation};

// --- Auth re-exports -------------------------------------------------------

#[cfg(feature = "auth")]
pub use flightform_auth::{
    FORM_PATH, Identity, IdentityHandle, IdentityProvider, LOGIN_PATH, RETURN_URL_PARAM,
    RouteDecision, WatchIdentity, guard_form_access, guard_form_access_first,
    login_return_target, watch_identity,
};

// --- HTTP re-exports -------------------------------------------------------

#[cfg(feature = "http")]
pub use flightform_http::{DEFAULT_ENDPOINT, HttpSink, SinkConfig};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Effect, FieldId, FieldRules, FieldValues, FlightSubmission, FormEvent, FormSession,
        Notice, Phase, SessionDriver, SinkError, SubmissionSink,
    };

    #[cfg(feature = "auth")]
    pub use crate::{Identity, IdentityProvider, RouteDecision, WatchIdentity, guard_form_access};

    #[cfg(feature = "http")]
    pub use crate::{HttpSink, SinkConfig};

    pub use crate::engine;
}

pub use flightform_engine as engine;

#[cfg(feature = "auth")]
pub use flightform_auth as auth;

#[cfg(feature = "http")]
pub use flightform_http as http;
