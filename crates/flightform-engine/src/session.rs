#![forbid(unsafe_code)]

//! One form lifecycle: field values, touched flags, phase, and the single
//! transition function that moves between them.
//!
//! # Invariants
//!
//! - Phase graph: `Editing -> Submitting -> (Succeeded | Failed)`;
//!   `Failed -> Editing` on any edit; `Failed -> Submitting` on a passing
//!   resubmit; `Succeeded -> Editing` only through [`FormEvent::SubmitAnother`].
//! - At most one [`Effect::Submit`] is emitted per `Editing -> Submitting`
//!   transition; a `Submit` while already `Submitting` does nothing.
//! - `submitted()` is `Some` exactly from a sink success until the next
//!   reset.
//! - Field violations are computed on demand from the rules; the session
//!   stores no cached validity that could go stale.

use std::fmt;

use chrono::{Local, NaiveDate};

use crate::field::{FieldId, FieldValues};
use crate::rules::{FieldError, FieldRules};
use crate::submission::FlightSubmission;
use crate::validate::Violation;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of a form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The user is filling in fields.
    #[default]
    Editing,
    /// A submission is in flight; exactly one at a time.
    Submitting,
    /// The sink accepted the submission. Terminal except for
    /// [`FormEvent::SubmitAnother`].
    Succeeded,
    /// The sink rejected or never received the submission; the form is
    /// intact and may be edited or resubmitted.
    Failed,
}

impl Phase {
    /// Short lowercase label for logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Submitting => "submitting",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Session-level status banner, shown alongside any per-field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A submit attempt failed validation.
    FixForm,
    /// The submission was delivered.
    Submitted,
    /// The submission attempt failed; the cause is in the logs.
    SubmitFailed,
}

impl Notice {
    /// The user-facing text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::FixForm => "Please fill in all required fields correctly.",
            Notice::Submitted => {
                "Flight details submitted successfully! Your information has been recorded."
            }
            Notice::SubmitFailed => {
                "Submission failed. Please check your information and try again."
            }
        }
    }

    /// Whether the banner reports a problem.
    #[must_use]
    pub fn is_error(self) -> bool {
        !matches!(self, Notice::Submitted)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// One discrete event: a user action or a sink outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user changed a field's text.
    Edit {
        /// Which field.
        field: FieldId,
        /// The new raw text.
        value: String,
    },
    /// A field lost focus.
    Blur {
        /// Which field.
        field: FieldId,
    },
    /// The user pressed the submit button.
    Submit,
    /// The sink accepted the in-flight submission.
    SinkSucceeded,
    /// The sink reported failure; the cause is logged by the driver, not
    /// carried here.
    SinkFailed,
    /// The user chose to enter another flight after a success.
    SubmitAnother,
}

/// What the caller must do after applying an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Effect {
    /// Nothing.
    #[default]
    None,
    /// Hand the submission to the sink, then feed the outcome back as
    /// [`FormEvent::SinkSucceeded`] or [`FormEvent::SinkFailed`].
    Submit(FlightSubmission),
}

impl Effect {
    /// Returns `true` when there is nothing to do.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// The submission to deliver, if any.
    #[must_use]
    pub fn submission(&self) -> Option<&FlightSubmission> {
        match self {
            Effect::None => None,
            Effect::Submit(submission) => Some(submission),
        }
    }
}

// ---------------------------------------------------------------------------
// FormSession
// ---------------------------------------------------------------------------

fn system_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The mutable, single-owner state of one in-progress form lifecycle.
pub struct FormSession {
    values: FieldValues,
    touched: [bool; FieldId::ALL.len()],
    phase: Phase,
    notice: Option<Notice>,
    pending: Option<FlightSubmission>,
    submitted: Option<FlightSubmission>,
    rules: FieldRules,
    today: fn() -> NaiveDate,
}

impl FormSession {
    /// A fresh session in `Editing`, judging dates against the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_today(system_today)
    }

    /// A fresh session with an injected "today", for deterministic
    /// validation.
    #[must_use]
    pub fn with_today(today: fn() -> NaiveDate) -> Self {
        Self {
            values: FieldValues::new(),
            touched: [false; FieldId::ALL.len()],
            phase: Phase::Editing,
            notice: None,
            pending: None,
            submitted: None,
            rules: FieldRules::new(),
            today,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current raw field values.
    #[must_use]
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Current status banner, if any.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// The last delivered submission, retained for display after a success.
    #[must_use]
    pub fn submitted(&self) -> Option<&FlightSubmission> {
        self.submitted.as_ref()
    }

    /// Whether `field` has been touched (lost focus, or a submit was
    /// attempted).
    #[must_use]
    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched[field.index()]
    }

    /// The rule result for `field` as values stand now, regardless of
    /// touched state.
    #[must_use]
    pub fn field_error(&self, field: FieldId) -> Option<Violation> {
        self.rules
            .check(field, &self.values, (self.today)())
            .into_violation()
    }

    /// The rule result for `field`, surfaced only once the field is touched.
    #[must_use]
    pub fn visible_error(&self, field: FieldId) -> Option<Violation> {
        if self.is_touched(field) {
            self.field_error(field)
        } else {
            None
        }
    }

    /// Every current failure, touched or not.
    #[must_use]
    pub fn errors(&self) -> Vec<FieldError> {
        self.rules.check_all(&self.values, (self.today)())
    }

    /// `true` when every field rule passes as values stand now.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Apply one event and report what the caller must do next.
    ///
    /// This is the only way session state changes.
    pub fn apply(&mut self, event: FormEvent) -> Effect {
        match event {
            FormEvent::Edit { field, value } => {
                self.edit(field, value);
                Effect::None
            }
            FormEvent::Blur { field } => {
                if self.phase != Phase::Succeeded {
                    self.touched[field.index()] = true;
                }
                Effect::None
            }
            FormEvent::Submit => self.submit(),
            FormEvent::SinkSucceeded => {
                self.sink_succeeded();
                Effect::None
            }
            FormEvent::SinkFailed => {
                self.sink_failed();
                Effect::None
            }
            FormEvent::SubmitAnother => {
                self.submit_another();
                Effect::None
            }
        }
    }

    fn edit(&mut self, field: FieldId, value: String) {
        if self.phase == Phase::Succeeded {
            return;
        }
        self.values.set(field, value);
        // Any edit clears the banner and recovers from a failed attempt.
        self.notice = None;
        if self.phase == Phase::Failed {
            self.phase = Phase::Editing;
        }
    }

    fn submit(&mut self) -> Effect {
        match self.phase {
            Phase::Submitting => {
                tracing::debug!("submit ignored, a submission is already in flight");
                Effect::None
            }
            Phase::Succeeded => Effect::None,
            Phase::Editing | Phase::Failed => {
                match FlightSubmission::from_fields(&self.values, &self.rules, (self.today)()) {
                    Ok(submission) => {
                        self.phase = Phase::Submitting;
                        self.notice = None;
                        self.pending = Some(submission.clone());
                        tracing::info!(
                            "submission accepted for delivery, flight {}",
                            submission.flight_number()
                        );
                        Effect::Submit(submission)
                    }
                    Err(errors) => {
                        self.touched = [true; FieldId::ALL.len()];
                        self.phase = Phase::Editing;
                        self.notice = Some(Notice::FixForm);
                        tracing::debug!("submit rejected, {} field(s) failing", errors.len());
                        Effect::None
                    }
                }
            }
        }
    }

    fn sink_succeeded(&mut self) {
        if self.phase != Phase::Submitting {
            tracing::debug!("sink success ignored outside an active submission");
            return;
        }
        self.phase = Phase::Succeeded;
        self.notice = Some(Notice::Submitted);
        self.submitted = self.pending.take();
    }

    fn sink_failed(&mut self) {
        if self.phase != Phase::Submitting {
            tracing::debug!("sink failure ignored outside an active submission");
            return;
        }
        self.phase = Phase::Failed;
        self.notice = Some(Notice::SubmitFailed);
        self.pending = None;
    }

    fn submit_another(&mut self) {
        if self.phase != Phase::Succeeded {
            return;
        }
        self.values = FieldValues::new();
        self.touched = [false; FieldId::ALL.len()];
        self.phase = Phase::Editing;
        self.notice = None;
        self.pending = None;
        self.submitted = None;
        tracing::debug!("session reset for another entry");
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("phase", &self.phase)
            .field("values", &self.values)
            .field("touched", &self.touched)
            .field("notice", &self.notice)
            .field("submitted", &self.submitted.is_some())
            .finish_non_exhaustive()
    }
}
