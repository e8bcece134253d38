#![forbid(unsafe_code)]

//! The immutable, fully-validated submission payload.

use chrono::NaiveDate;
use serde::Serialize;

use crate::field::{FieldValues, normalize_flight_number};
use crate::rules::{FieldError, FieldRules};
use crate::validate::DATE_FORMAT;

/// A validated flight-details submission.
///
/// Only [`FlightSubmission::from_fields`] can construct one, and it runs the
/// full rule set first; holding a value of this type is proof the form
/// passed. Partially valid data never becomes a submission.
///
/// Serializes to the wire shape the collection endpoint expects: camelCase
/// names (`airline`, `arrivalDate`, `arrivalTime`, `flightNumber`,
/// `numOfGuests`, `comments`), ISO dates, and `comments` omitted entirely
/// when absent. `Deserialize` is deliberately not derived; parsed data would
/// bypass the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSubmission {
    airline: String,
    arrival_date: NaiveDate,
    arrival_time: String,
    flight_number: String,
    num_of_guests: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
}

impl FlightSubmission {
    /// Build a submission from raw field values, running every rule.
    ///
    /// On failure the error carries every failing field, not only the first.
    /// On success the stored data is shaped for the wire: airline and
    /// comments trimmed, flight number normalized, blank comments dropped.
    pub fn from_fields(
        values: &FieldValues,
        rules: &FieldRules,
        today: NaiveDate,
    ) -> Result<Self, Vec<FieldError>> {
        let errors = rules.check_all(values, today);
        if !errors.is_empty() {
            return Err(errors);
        }

        // The parses below cannot fail once check_all has passed: the date
        // rule and the guest rule already parsed the same trimmed text.
        let arrival_date = NaiveDate::parse_from_str(values.arrival_date.trim(), DATE_FORMAT)
            .expect("arrival date should parse once the rules pass");
        let guests = values
            .guests
            .trim()
            .parse::<i64>()
            .expect("guest count should parse once the rules pass");
        let num_of_guests =
            u8::try_from(guests).expect("guest count should fit in u8 once the rules pass");

        let comments = match values.comments.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };

        Ok(Self {
            airline: values.airline.trim().to_string(),
            arrival_date,
            arrival_time: values.arrival_time.clone(),
            flight_number: normalize_flight_number(&values.flight_number),
            num_of_guests,
            comments,
        })
    }

    /// Airline name, trimmed.
    #[must_use]
    pub fn airline(&self) -> &str {
        &self.airline
    }

    /// Arrival date.
    #[must_use]
    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }

    /// Arrival time as entered.
    #[must_use]
    pub fn arrival_time(&self) -> &str {
        &self.arrival_time
    }

    /// Normalized flight number.
    #[must_use]
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Guest count.
    #[must_use]
    pub fn num_of_guests(&self) -> u8 {
        self.num_of_guests
    }

    /// Trimmed comments, absent when the field was blank.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldId;
    use crate::validate::{CODE_MAX, CODE_MIN_LENGTH};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn valid_values() -> FieldValues {
        let mut values = FieldValues::new();
        values.set(FieldId::Airline, "  Delta Air Lines  ");
        values.set(FieldId::ArrivalDate, "2025-06-25");
        values.set(FieldId::ArrivalTime, "14:30");
        values.set(FieldId::FlightNumber, "dl 45");
        values.set(FieldId::Guests, "2");
        values
    }

    // -- construction tests --

    #[test]
    fn builds_from_valid_fields() {
        let submission =
            FlightSubmission::from_fields(&valid_values(), &FieldRules::new(), today()).unwrap();
        assert_eq!(submission.airline(), "Delta Air Lines");
        assert_eq!(submission.flight_number(), "DL45");
        assert_eq!(submission.num_of_guests(), 2);
        assert_eq!(submission.arrival_time(), "14:30");
        assert_eq!(
            submission.arrival_date(),
            NaiveDate::from_ymd_opt(2025, 6, 25).unwrap()
        );
        assert_eq!(submission.comments(), None);
    }

    #[test]
    fn refuses_partially_valid_fields() {
        let mut values = valid_values();
        values.set(FieldId::Airline, "A");
        values.set(FieldId::Guests, "25");
        let errors =
            FlightSubmission::from_fields(&values, &FieldRules::new(), today()).unwrap_err();
        let codes: Vec<_> = errors.iter().map(|e| e.violation.code).collect();
        assert_eq!(codes, vec![CODE_MIN_LENGTH, CODE_MAX]);
    }

    #[test]
    fn trims_comments_for_the_wire() {
        let mut values = valid_values();
        values.set(FieldId::Comments, "  window seat  ");
        let submission =
            FlightSubmission::from_fields(&values, &FieldRules::new(), today()).unwrap();
        assert_eq!(submission.comments(), Some("window seat"));
    }

    #[test]
    fn drops_whitespace_only_comments() {
        let mut values = valid_values();
        values.set(FieldId::Comments, "   ");
        let submission =
            FlightSubmission::from_fields(&values, &FieldRules::new(), today()).unwrap();
        assert_eq!(submission.comments(), None);
    }

    #[test]
    fn normalizes_raw_flight_number_text() {
        let mut values = valid_values();
        // Bypass `set` to simulate values that never saw live normalization.
        values.flight_number = "ua 123".to_string();
        let submission =
            FlightSubmission::from_fields(&values, &FieldRules::new(), today()).unwrap();
        assert_eq!(submission.flight_number(), "UA123");
    }

    // -- wire shape tests --

    #[test]
    fn serializes_camel_case_with_iso_date() {
        let submission =
            FlightSubmission::from_fields(&valid_values(), &FieldRules::new(), today()).unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "airline": "Delta Air Lines",
                "arrivalDate": "2025-06-25",
                "arrivalTime": "14:30",
                "flightNumber": "DL45",
                "numOfGuests": 2,
            })
        );
    }

    #[test]
    fn serializes_comments_when_present() {
        let mut values = valid_values();
        values.set(FieldId::Comments, "  Two bags  ");
        let submission =
            FlightSubmission::from_fields(&values, &FieldRules::new(), today()).unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["comments"], "Two bags");
    }
}
