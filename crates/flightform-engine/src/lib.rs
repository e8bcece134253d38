#![forbid(unsafe_code)]

//! Flight-details form validation engine.
//!
//! Validates the six arrival-form fields with pure, per-field rules, builds
//! the immutable [`FlightSubmission`] payload, and runs the submission
//! lifecycle as an explicit state machine: a single [`FormSession`] mutated
//! only through [`FormSession::apply`], with the asynchronous delivery
//! modeled as a one-shot effect whose outcome feeds back in as another
//! event.
//!
//! Delivery itself is abstracted behind [`SubmissionSink`];
//! [`SessionDriver`] pairs a session with a sink and guarantees at most one
//! request in flight.
//!
//! ```rust
//! use flightform_engine::{FieldId, FormEvent, FormSession, Phase};
//!
//! let mut session = FormSession::new();
//! session.apply(FormEvent::Edit {
//!     field: FieldId::FlightNumber,
//!     value: "dl 45".into(),
//! });
//! assert_eq!(session.values().flight_number, "DL45");
//! assert_eq!(session.phase(), Phase::Editing);
//! ```

pub mod field;
pub mod rules;
pub mod session;
pub mod sink;
pub mod submission;
pub mod validate;

pub use field::{
    DEFAULT_GUESTS, FLIGHT_NUMBER_MAX_CHARS, FieldId, FieldValues, normalize_flight_number,
};
pub use rules::{
    AIRLINE_MIN_CHARS, ARRIVAL_YEARS_AHEAD, COMMENTS_MAX_CHARS, FieldError, FieldRules,
    MAX_GUESTS, MIN_GUESTS,
};
pub use session::{Effect, FormEvent, FormSession, Notice, Phase};
pub use sink::{SessionDriver, SinkError, SubmissionSink};
pub use submission::FlightSubmission;
pub use validate::{RuleOutcome, Validator, Violation};
