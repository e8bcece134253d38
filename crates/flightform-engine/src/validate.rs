#![forbid(unsafe_code)]

//! Validation primitives the field rules are assembled from.
//!
//! A [`Validator`] judges one raw field value and answers with a
//! [`RuleOutcome`]: pass, or fail with a [`Violation`] carrying a stable code
//! plus the exact message shown to the user. Primitives here know nothing
//! about specific form fields; that wiring lives in [`crate::rules`].
//!
//! All primitives treat an empty (or whitespace-only) value as passing,
//! except [`NonBlank`] itself. Requiredness is always a separate rule so that
//! an empty field reports `required` rather than a pattern or range failure.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

// ---------------------------------------------------------------------------
// Violation codes
// ---------------------------------------------------------------------------

/// Violation code for missing required values.
pub const CODE_REQUIRED: &str = "required";
/// Violation code for values shorter than a minimum length.
pub const CODE_MIN_LENGTH: &str = "minLength";
/// Violation code for values longer than a maximum length.
pub const CODE_MAX_LENGTH: &str = "maxLength";
/// Violation code for text that does not match a required pattern.
pub const CODE_PATTERN: &str = "pattern";
/// Violation code for text that is not a whole number.
pub const CODE_NOT_INTEGER: &str = "notInteger";
/// Violation code for numbers below the allowed minimum.
pub const CODE_MIN: &str = "min";
/// Violation code for numbers above the allowed maximum.
pub const CODE_MAX: &str = "max";
/// Violation code for text that is not a calendar date.
pub const CODE_INVALID_DATE: &str = "invalidDate";
/// Violation code for dates before the allowed window.
pub const CODE_PAST_DATE: &str = "pastDate";
/// Violation code for dates beyond the allowed window.
pub const CODE_FAR_FUTURE_DATE: &str = "farFutureDate";

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// A failed rule: a stable code for programmatic handling plus the
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Stable identifier, e.g. [`CODE_REQUIRED`].
    pub code: &'static str,
    /// Exact message to surface to the user.
    pub message: String,
}

impl Violation {
    /// Create a violation with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Violation {}

// ---------------------------------------------------------------------------
// RuleOutcome
// ---------------------------------------------------------------------------

/// The verdict of applying one rule to one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleOutcome {
    /// The value passes.
    #[default]
    Pass,
    /// The value fails with the given violation.
    Fail(Violation),
}

impl RuleOutcome {
    /// Returns `true` if the outcome is `Pass`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` if the outcome is `Fail`.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Returns the violation if the outcome is `Fail`, otherwise `None`.
    #[must_use]
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Pass => None,
            Self::Fail(v) => Some(v),
        }
    }

    /// Consume the outcome, yielding the violation if any.
    #[must_use]
    pub fn into_violation(self) -> Option<Violation> {
        match self {
            Self::Pass => None,
            Self::Fail(v) => Some(v),
        }
    }

    /// Combine two outcomes; the first failure wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Pass => other,
            Self::Fail(_) => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Validator trait
// ---------------------------------------------------------------------------

/// A rule over values of type `T`.
///
/// Validators are pure: the outcome depends only on the value (and whatever
/// the validator was constructed with), never on hidden state.
///
/// # Implementing a custom validator
///
/// ```rust
/// use flightform_engine::validate::{RuleOutcome, Validator, Violation};
///
/// struct NoDigits;
///
/// impl Validator<str> for NoDigits {
///     fn validate(&self, value: &str) -> RuleOutcome {
///         if value.chars().any(|c| c.is_ascii_digit()) {
///             RuleOutcome::Fail(Violation::new("noDigits", "Digits are not allowed"))
///         } else {
///             RuleOutcome::Pass
///         }
///     }
/// }
///
/// assert!(NoDigits.validate("abc").is_pass());
/// assert!(NoDigits.validate("abc1").is_fail());
/// ```
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Judge the given value.
    fn validate(&self, value: &T) -> RuleOutcome;
}

// ---------------------------------------------------------------------------
// Built-in validators
// ---------------------------------------------------------------------------

/// Fails with [`CODE_REQUIRED`] when the value is empty or whitespace-only.
#[derive(Debug, Clone)]
pub struct NonBlank {
    message: String,
}

impl NonBlank {
    /// Create a `NonBlank` validator with the message shown on failure.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator<str> for NonBlank {
    fn validate(&self, value: &str) -> RuleOutcome {
        if value.trim().is_empty() {
            RuleOutcome::Fail(Violation::new(CODE_REQUIRED, self.message.clone()))
        } else {
            RuleOutcome::Pass
        }
    }
}

/// Fails with [`CODE_MIN_LENGTH`] when the trimmed value has fewer than
/// `min` characters. Empty values pass; pair with [`NonBlank`].
#[derive(Debug, Clone)]
pub struct TrimmedMinLength {
    min: usize,
    message: String,
}

impl TrimmedMinLength {
    /// Create a `TrimmedMinLength` validator.
    #[must_use]
    pub fn new(min: usize, message: impl Into<String>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

impl Validator<str> for TrimmedMinLength {
    fn validate(&self, value: &str) -> RuleOutcome {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return RuleOutcome::Pass;
        }
        if trimmed.chars().count() < self.min {
            RuleOutcome::Fail(Violation::new(CODE_MIN_LENGTH, self.message.clone()))
        } else {
            RuleOutcome::Pass
        }
    }
}

/// Fails with [`CODE_MAX_LENGTH`] when the value has more than `max`
/// characters. The value is counted as typed, untrimmed.
#[derive(Debug, Clone)]
pub struct MaxChars {
    max: usize,
    message: String,
}

impl MaxChars {
    /// Create a `MaxChars` validator.
    #[must_use]
    pub fn new(max: usize, message: impl Into<String>) -> Self {
        Self {
            max,
            message: message.into(),
        }
    }
}

impl Validator<str> for MaxChars {
    fn validate(&self, value: &str) -> RuleOutcome {
        if value.chars().count() > self.max {
            RuleOutcome::Fail(Violation::new(CODE_MAX_LENGTH, self.message.clone()))
        } else {
            RuleOutcome::Pass
        }
    }
}

/// Fails with the given code when the trimmed value does not match the
/// pattern. Empty values pass.
///
/// Takes a `&'static Regex` so the pattern is compiled once per process and
/// shared by every rule set.
#[derive(Debug, Clone)]
pub struct CharsetPattern {
    regex: &'static Regex,
    code: &'static str,
    message: String,
}

impl CharsetPattern {
    /// Create a `CharsetPattern` validator.
    #[must_use]
    pub fn new(regex: &'static Regex, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            regex,
            code,
            message: message.into(),
        }
    }
}

impl Validator<str> for CharsetPattern {
    fn validate(&self, value: &str) -> RuleOutcome {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return RuleOutcome::Pass;
        }
        if self.regex.is_match(trimmed) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Fail(Violation::new(self.code, self.message.clone()))
        }
    }
}

/// Parses the trimmed value as a whole number and checks it against a closed
/// range. Empty values pass.
///
/// Distinct failures: [`CODE_NOT_INTEGER`] for unparseable text,
/// [`CODE_MIN`] below the range, [`CODE_MAX`] above it.
#[derive(Debug, Clone)]
pub struct IntegerRange {
    min: i64,
    max: i64,
    not_integer: String,
    too_small: String,
    too_large: String,
}

impl IntegerRange {
    /// Create an `IntegerRange` over `[min, max]` with generic messages.
    #[must_use]
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            not_integer: "Must be a whole number".to_string(),
            too_small: format!("Must be at least {min}"),
            too_large: format!("Must be at most {max}"),
        }
    }

    /// Set the message for unparseable text.
    #[must_use]
    pub fn not_integer(mut self, message: impl Into<String>) -> Self {
        self.not_integer = message.into();
        self
    }

    /// Set the message for values below the minimum.
    #[must_use]
    pub fn too_small(mut self, message: impl Into<String>) -> Self {
        self.too_small = message.into();
        self
    }

    /// Set the message for values above the maximum.
    #[must_use]
    pub fn too_large(mut self, message: impl Into<String>) -> Self {
        self.too_large = message.into();
        self
    }
}

impl Validator<str> for IntegerRange {
    fn validate(&self, value: &str) -> RuleOutcome {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return RuleOutcome::Pass;
        }
        let Ok(n) = trimmed.parse::<i64>() else {
            return RuleOutcome::Fail(Violation::new(CODE_NOT_INTEGER, self.not_integer.clone()));
        };
        if n < self.min {
            RuleOutcome::Fail(Violation::new(CODE_MIN, self.too_small.clone()))
        } else if n > self.max {
            RuleOutcome::Fail(Violation::new(CODE_MAX, self.too_large.clone()))
        } else {
            RuleOutcome::Pass
        }
    }
}

/// Parses the trimmed value as a `YYYY-MM-DD` calendar date and checks that
/// it lies in `[today, today + years]`, judged at day granularity. Empty
/// values pass.
///
/// Distinct failures: [`CODE_INVALID_DATE`] for unparseable text,
/// [`CODE_PAST_DATE`] before today, [`CODE_FAR_FUTURE_DATE`] past the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    today: NaiveDate,
    years: i32,
    unparseable: String,
    past: String,
    far_future: String,
}

/// Wire and input format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl DayWindow {
    /// Create a `DayWindow` accepting `[today, today + years]`.
    #[must_use]
    pub fn new(today: NaiveDate, years: i32) -> Self {
        Self {
            today,
            years,
            unparseable: "Not a valid calendar date".to_string(),
            past: "Date cannot be in the past".to_string(),
            far_future: format!("Date cannot be more than {years} years in the future"),
        }
    }

    /// Set the message for unparseable text.
    #[must_use]
    pub fn unparseable(mut self, message: impl Into<String>) -> Self {
        self.unparseable = message.into();
        self
    }

    /// Set the message for dates before today.
    #[must_use]
    pub fn past(mut self, message: impl Into<String>) -> Self {
        self.past = message.into();
        self
    }

    /// Set the message for dates past the window.
    #[must_use]
    pub fn far_future(mut self, message: impl Into<String>) -> Self {
        self.far_future = message.into();
        self
    }

    /// The last acceptable day of the window.
    ///
    /// A Feb 29 start rolls forward to Mar 1 when the target year is not a
    /// leap year.
    #[must_use]
    pub fn latest(&self) -> NaiveDate {
        let year = self.today.year() + self.years;
        self.today
            .with_year(year)
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .unwrap_or(self.today)
    }
}

impl Validator<str> for DayWindow {
    fn validate(&self, value: &str) -> RuleOutcome {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return RuleOutcome::Pass;
        }
        let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) else {
            return RuleOutcome::Fail(Violation::new(CODE_INVALID_DATE, self.unparseable.clone()));
        };
        if date < self.today {
            RuleOutcome::Fail(Violation::new(CODE_PAST_DATE, self.past.clone()))
        } else if date > self.latest() {
            RuleOutcome::Fail(Violation::new(CODE_FAR_FUTURE_DATE, self.far_future.clone()))
        } else {
            RuleOutcome::Pass
        }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Applies validators in order; the first failure wins.
pub struct All<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> All<T> {
    /// Create an empty chain, which passes everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a validator to the chain.
    #[must_use]
    pub fn with(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

impl<T: ?Sized> Default for All<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Validator<T> for All<T> {
    fn validate(&self, value: &T) -> RuleOutcome {
        for validator in &self.validators {
            let outcome = validator.validate(value);
            if outcome.is_fail() {
                return outcome;
            }
        }
        RuleOutcome::Pass
    }
}
