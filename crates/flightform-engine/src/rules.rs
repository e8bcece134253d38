#![forbid(unsafe_code)]

//! The rule set guarding each form field, with the exact user-facing
//! messages.
//!
//! Rules are pure: the outcome depends only on the field's current text and
//! the supplied "today". They are re-evaluated on every edit; callers decide
//! when to *show* a failure (see touched handling in [`crate::session`]).

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::field::{FieldId, FieldValues};
use crate::validate::{
    All, CharsetPattern, DayWindow, IntegerRange, MaxChars, NonBlank, RuleOutcome,
    TrimmedMinLength, Validator, Violation,
};

// ---------------------------------------------------------------------------
// Limits and patterns
// ---------------------------------------------------------------------------

/// Shortest acceptable airline name, counted after trimming.
pub const AIRLINE_MIN_CHARS: usize = 2;
/// Fewest guests a submission may carry.
pub const MIN_GUESTS: i64 = 1;
/// Most guests a submission may carry.
pub const MAX_GUESTS: i64 = 20;
/// Longest acceptable comments text.
pub const COMMENTS_MAX_CHARS: usize = 500;
/// How far ahead an arrival date may lie, in calendar years.
pub const ARRIVAL_YEARS_AHEAD: i32 = 2;

/// Violation code for airline names with disallowed characters.
pub const CODE_INVALID_AIRLINE_NAME: &str = "invalidAirlineName";
/// Violation code for flight numbers that do not fit the airline format.
pub const CODE_INVALID_FLIGHT_NUMBER: &str = "invalidFlightNumber";

static AIRLINE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s&\-.]+$").expect("airline name pattern compiles"));

static FLIGHT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}[0-9]{1,4}$").expect("flight number pattern compiles"));

// ---------------------------------------------------------------------------
// FieldError
// ---------------------------------------------------------------------------

/// A violation attributed to the field that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The failing field.
    pub field: FieldId,
    /// What went wrong.
    pub violation: Violation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.violation)
    }
}

impl std::error::Error for FieldError {}

// ---------------------------------------------------------------------------
// Flight-number shape
// ---------------------------------------------------------------------------

/// Flight numbers: 2-3 letters then 1-4 digits, judged case-insensitively
/// after stripping all whitespace. Empty values pass.
///
/// Stripping happens inside the rule so the check holds for raw text that
/// never went through live normalization.
#[derive(Debug, Clone)]
struct FlightNumberShape {
    message: String,
}

impl FlightNumberShape {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator<str> for FlightNumberShape {
    fn validate(&self, value: &str) -> RuleOutcome {
        let stripped: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() {
            return RuleOutcome::Pass;
        }
        if FLIGHT_NUMBER_RE.is_match(&stripped) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Fail(Violation::new(
                CODE_INVALID_FLIGHT_NUMBER,
                self.message.clone(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// FieldRules
// ---------------------------------------------------------------------------

/// The full rule set for the flight-details form.
///
/// Construct once per session; the regexes behind it are compiled once per
/// process. The arrival-date window is rebuilt around `today` on every check
/// so a session that stays open across midnight keeps judging correctly.
pub struct FieldRules {
    airline: All<str>,
    flight_number: All<str>,
    arrival_time: NonBlank,
    date_required: NonBlank,
    guests: All<str>,
    comments: MaxChars,
}

impl FieldRules {
    /// Build the rule set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            airline: All::new()
                .with(NonBlank::new("Airline name is required"))
                .with(CharsetPattern::new(
                    &AIRLINE_NAME_RE,
                    CODE_INVALID_AIRLINE_NAME,
                    "Airline name should contain only letters, spaces, and common symbols (&, -, .)",
                ))
                .with(TrimmedMinLength::new(
                    AIRLINE_MIN_CHARS,
                    "Airline name must be at least 2 characters long",
                )),
            flight_number: All::new()
                .with(NonBlank::new("Flight number is required"))
                .with(FlightNumberShape::new(
                    "Flight number should be 2-3 letters followed by 1-4 numbers (e.g., AA123, UAL1234)",
                )),
            arrival_time: NonBlank::new("Arrival time is required"),
            date_required: NonBlank::new("Arrival date is required"),
            guests: All::new()
                .with(NonBlank::new("Number of guests is required"))
                .with(
                    IntegerRange::new(MIN_GUESTS, MAX_GUESTS)
                        .not_integer("Number of guests must be a whole number")
                        .too_small("Minimum 1 guest required")
                        .too_large("Maximum 20 guests allowed"),
                ),
            comments: MaxChars::new(COMMENTS_MAX_CHARS, "Comments cannot exceed 500 characters"),
        }
    }

    fn arrival_date_window(today: NaiveDate) -> DayWindow {
        DayWindow::new(today, ARRIVAL_YEARS_AHEAD)
            .unparseable("Arrival date is not a valid calendar date")
            .past("Arrival date cannot be in the past")
            .far_future("Arrival date cannot be more than 2 years in the future")
    }

    /// Judge one field against the values as they stand.
    #[must_use]
    pub fn check(&self, field: FieldId, values: &FieldValues, today: NaiveDate) -> RuleOutcome {
        let value = values.get(field);
        match field {
            FieldId::Airline => self.airline.validate(value),
            FieldId::ArrivalDate => self
                .date_required
                .validate(value)
                .and(Self::arrival_date_window(today).validate(value)),
            FieldId::ArrivalTime => self.arrival_time.validate(value),
            FieldId::FlightNumber => self.flight_number.validate(value),
            FieldId::Guests => self.guests.validate(value),
            FieldId::Comments => self.comments.validate(value),
        }
    }

    /// Judge every field; an empty vector means the form is submittable.
    #[must_use]
    pub fn check_all(&self, values: &FieldValues, today: NaiveDate) -> Vec<FieldError> {
        FieldId::ALL
            .iter()
            .filter_map(|&field| {
                self.check(field, values, today)
                    .into_violation()
                    .map(|violation| FieldError { field, violation })
            })
            .collect()
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{
        CODE_FAR_FUTURE_DATE, CODE_INVALID_DATE, CODE_MAX, CODE_MAX_LENGTH, CODE_MIN,
        CODE_MIN_LENGTH, CODE_NOT_INTEGER, CODE_PAST_DATE, CODE_REQUIRED,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn check(field: FieldId, value: &str) -> RuleOutcome {
        let mut values = FieldValues::new();
        values.set(field, value);
        FieldRules::new().check(field, &values, today())
    }

    fn code(field: FieldId, value: &str) -> Option<&'static str> {
        check(field, value).into_violation().map(|v| v.code)
    }

    // -- airline tests --

    #[test]
    fn airline_requires_non_blank() {
        assert_eq!(code(FieldId::Airline, ""), Some(CODE_REQUIRED));
        assert_eq!(code(FieldId::Airline, "   "), Some(CODE_REQUIRED));
    }

    #[test]
    fn airline_accepts_names_with_common_symbols() {
        assert!(check(FieldId::Airline, "Delta Air Lines").is_pass());
        assert!(check(FieldId::Airline, "K.L.M.").is_pass());
        assert!(check(FieldId::Airline, "PB Air & Co-op").is_pass());
    }

    #[test]
    fn airline_rejects_disallowed_characters() {
        assert_eq!(code(FieldId::Airline, "Delta 1"), Some(CODE_INVALID_AIRLINE_NAME));
        assert_eq!(code(FieldId::Airline, "Air!"), Some(CODE_INVALID_AIRLINE_NAME));
    }

    #[test]
    fn airline_rejects_single_character_names() {
        assert_eq!(code(FieldId::Airline, "A"), Some(CODE_MIN_LENGTH));
        assert_eq!(code(FieldId::Airline, " B "), Some(CODE_MIN_LENGTH));
        assert!(check(FieldId::Airline, "BA").is_pass());
    }

    #[test]
    fn airline_pattern_outranks_length() {
        // A one-character value with a bad character reports the pattern.
        assert_eq!(code(FieldId::Airline, "7"), Some(CODE_INVALID_AIRLINE_NAME));
    }

    // -- flight number tests --

    #[test]
    fn flight_number_requires_non_blank() {
        assert_eq!(code(FieldId::FlightNumber, ""), Some(CODE_REQUIRED));
    }

    #[test]
    fn flight_number_accepts_airline_format() {
        assert!(check(FieldId::FlightNumber, "AA123").is_pass());
        assert!(check(FieldId::FlightNumber, "UAL1234").is_pass());
        assert!(check(FieldId::FlightNumber, "dl45").is_pass());
    }

    #[test]
    fn flight_number_strips_whitespace_before_matching() {
        let mut values = FieldValues::new();
        // Bypass `set` so the raw text still holds a space.
        values.flight_number = "dl 45".to_string();
        let outcome = FieldRules::new().check(FieldId::FlightNumber, &values, today());
        assert!(outcome.is_pass());
    }

    #[test]
    fn flight_number_rejects_wrong_shapes() {
        assert_eq!(code(FieldId::FlightNumber, "A1"), Some(CODE_INVALID_FLIGHT_NUMBER));
        assert_eq!(code(FieldId::FlightNumber, "ABCD12"), Some(CODE_INVALID_FLIGHT_NUMBER));
        assert_eq!(code(FieldId::FlightNumber, "123"), Some(CODE_INVALID_FLIGHT_NUMBER));
    }

    #[test]
    fn flight_number_rejects_five_digits() {
        let mut values = FieldValues::new();
        values.flight_number = "UAL12345".to_string();
        let outcome = FieldRules::new().check(FieldId::FlightNumber, &values, today());
        assert_eq!(
            outcome.into_violation().map(|v| v.code),
            Some(CODE_INVALID_FLIGHT_NUMBER)
        );
    }

    // -- arrival date tests --

    #[test]
    fn arrival_date_requires_non_blank() {
        assert_eq!(code(FieldId::ArrivalDate, ""), Some(CODE_REQUIRED));
    }

    #[test]
    fn arrival_date_window_boundaries() {
        assert!(check(FieldId::ArrivalDate, "2025-06-15").is_pass());
        assert!(check(FieldId::ArrivalDate, "2027-06-15").is_pass());
        assert_eq!(code(FieldId::ArrivalDate, "2025-06-14"), Some(CODE_PAST_DATE));
        assert_eq!(code(FieldId::ArrivalDate, "2027-06-16"), Some(CODE_FAR_FUTURE_DATE));
    }

    #[test]
    fn arrival_date_rejects_garbage() {
        assert_eq!(code(FieldId::ArrivalDate, "tomorrow"), Some(CODE_INVALID_DATE));
    }

    // -- arrival time tests --

    #[test]
    fn arrival_time_is_presence_only() {
        assert_eq!(code(FieldId::ArrivalTime, ""), Some(CODE_REQUIRED));
        assert!(check(FieldId::ArrivalTime, "14:30").is_pass());
        assert!(check(FieldId::ArrivalTime, "whenever").is_pass());
    }

    // -- guests tests --

    #[test]
    fn guests_range_boundaries() {
        assert!(check(FieldId::Guests, "1").is_pass());
        assert!(check(FieldId::Guests, "20").is_pass());
        assert_eq!(code(FieldId::Guests, "0"), Some(CODE_MIN));
        assert_eq!(code(FieldId::Guests, "21"), Some(CODE_MAX));
    }

    #[test]
    fn guests_rejects_non_integers() {
        assert_eq!(code(FieldId::Guests, "2.5"), Some(CODE_NOT_INTEGER));
        assert_eq!(code(FieldId::Guests, "two"), Some(CODE_NOT_INTEGER));
    }

    #[test]
    fn guests_requires_non_blank() {
        assert_eq!(code(FieldId::Guests, ""), Some(CODE_REQUIRED));
    }

    #[test]
    fn guests_messages_match_the_form() {
        let violation = check(FieldId::Guests, "0").into_violation().unwrap();
        assert_eq!(violation.message, "Minimum 1 guest required");
        let violation = check(FieldId::Guests, "25").into_violation().unwrap();
        assert_eq!(violation.message, "Maximum 20 guests allowed");
    }

    // -- comments tests --

    #[test]
    fn comments_are_optional() {
        assert!(check(FieldId::Comments, "").is_pass());
        assert!(check(FieldId::Comments, "   ").is_pass());
    }

    #[test]
    fn comments_cap_at_five_hundred_chars() {
        assert!(check(FieldId::Comments, &"x".repeat(500)).is_pass());
        assert_eq!(
            code(FieldId::Comments, &"x".repeat(501)),
            Some(CODE_MAX_LENGTH)
        );
    }

    // -- check_all tests --

    #[test]
    fn check_all_passes_a_fully_valid_form() {
        let mut values = FieldValues::new();
        values.set(FieldId::Airline, "Delta Air Lines");
        values.set(FieldId::ArrivalDate, "2025-06-25");
        values.set(FieldId::ArrivalTime, "14:30");
        values.set(FieldId::FlightNumber, "dl 45");
        values.set(FieldId::Guests, "2");
        assert!(FieldRules::new().check_all(&values, today()).is_empty());
    }

    #[test]
    fn check_all_reports_every_failing_field() {
        let mut values = FieldValues::new();
        values.set(FieldId::Airline, "A");
        values.set(FieldId::ArrivalDate, "2025-06-25");
        values.set(FieldId::ArrivalTime, "14:30");
        values.set(FieldId::FlightNumber, "dl45");
        values.set(FieldId::Guests, "25");
        let errors = FieldRules::new().check_all(&values, today());
        let codes: Vec<_> = errors.iter().map(|e| (e.field, e.violation.code)).collect();
        assert_eq!(
            codes,
            vec![
                (FieldId::Airline, CODE_MIN_LENGTH),
                (FieldId::Guests, CODE_MAX),
            ]
        );
    }

    #[test]
    fn checking_twice_yields_the_same_outcome() {
        let rules = FieldRules::new();
        let mut values = FieldValues::new();
        values.set(FieldId::Guests, "21");
        assert_eq!(
            rules.check(FieldId::Guests, &values, today()),
            rules.check(FieldId::Guests, &values, today())
        );
    }

    #[test]
    fn field_error_display_names_the_field() {
        let error = FieldError {
            field: FieldId::Guests,
            violation: Violation::new(CODE_MAX, "Maximum 20 guests allowed"),
        };
        assert_eq!(error.to_string(), "guests: Maximum 20 guests allowed");
    }
}
