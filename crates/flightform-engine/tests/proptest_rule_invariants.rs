//! Property-based invariant tests for the field rules.
//!
//! These tests verify the rules' contracts for any input:
//!
//! 1. Flight numbers pass iff, after stripping whitespace, the value is 2-3
//!    letters followed by 1-4 digits.
//! 2. Conforming flight numbers always pass, however whitespace is sprinkled.
//! 3. Arrival dates pass iff they lie in [today, today + 2 years] at day
//!    granularity.
//! 4. Guest counts pass iff the text parses as an integer in [1, 20].
//! 5. Rules are pure: checking twice yields the same outcome.
//! 6. Live flight-number normalization never exceeds 7 characters and is
//!    idempotent.

use chrono::{Duration, NaiveDate};
use flightform_engine::validate::{CODE_FAR_FUTURE_DATE, CODE_PAST_DATE};
use flightform_engine::{FieldId, FieldRules, FieldValues, normalize_flight_number};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn check(field: FieldId, raw: &str) -> bool {
    let mut values = FieldValues::new();
    // Write the field directly so rules see the raw text, not the
    // live-normalized form.
    match field {
        FieldId::FlightNumber => values.flight_number = raw.to_string(),
        FieldId::ArrivalDate => values.arrival_date = raw.to_string(),
        FieldId::Guests => values.guests = raw.to_string(),
        _ => values.set(field, raw),
    }
    FieldRules::new().check(field, &values, today()).is_pass()
}

/// Independent oracle for the flight-number grammar: 2-3 ASCII letters then
/// 1-4 ASCII digits, judged on the whitespace-stripped value.
fn flight_number_oracle(raw: &str) -> bool {
    let stripped: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return false; // required
    }
    let letters = stripped.iter().take_while(|c| c.is_ascii_alphabetic()).count();
    if !(2..=3).contains(&letters) {
        return false;
    }
    let digits = stripped.len() - letters;
    (1..=4).contains(&digits) && stripped[letters..].iter().all(char::is_ascii_digit)
}

fn conforming_flight_number() -> impl Strategy<Value = String> {
    ("[A-Za-z]{2,3}", "[0-9]{1,4}").prop_map(|(letters, digits)| format!("{letters}{digits}"))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Flight numbers pass iff the stripped value fits the grammar
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flight_number_agrees_with_oracle(raw in "[A-Za-z0-9 ]{0,10}") {
        prop_assert_eq!(
            check(FieldId::FlightNumber, &raw),
            flight_number_oracle(&raw),
            "rule and oracle disagree on {:?}",
            raw
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Conforming flight numbers pass with any whitespace sprinkled in
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn conforming_flight_numbers_pass(
        number in conforming_flight_number(),
        split in 0usize..8,
        padding in " {0,3}",
    ) {
        let split = split.min(number.len());
        let spaced = format!("{}{} {}", padding, &number[..split], &number[split..]);
        prop_assert!(
            check(FieldId::FlightNumber, &spaced),
            "conforming number {:?} rejected as {:?}",
            number, spaced
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Arrival dates pass iff today <= D <= today + 2 years
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arrival_date_window(offset_days in -800i64..=1500) {
        let date = today() + Duration::days(offset_days);
        let text = date.format("%Y-%m-%d").to_string();
        let latest = NaiveDate::from_ymd_opt(2027, 6, 15).unwrap();
        let expected = date >= today() && date <= latest;
        prop_assert_eq!(
            check(FieldId::ArrivalDate, &text),
            expected,
            "window wrong for {} ({} days from today)",
            text, offset_days
        );
    }
}

proptest! {
    #[test]
    fn arrival_date_failures_name_the_right_side(offset_days in -800i64..=1500) {
        let date = today() + Duration::days(offset_days);
        let text = date.format("%Y-%m-%d").to_string();
        let mut values = FieldValues::new();
        values.arrival_date = text;
        let outcome = FieldRules::new().check(FieldId::ArrivalDate, &values, today());
        if let Some(violation) = outcome.violation() {
            let expected = if offset_days < 0 { CODE_PAST_DATE } else { CODE_FAR_FUTURE_DATE };
            prop_assert_eq!(violation.code, expected);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Guest counts pass iff integer in [1, 20]
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn guest_integers_pass_iff_in_range(n in -1000i64..=1000) {
        let expected = (1..=20).contains(&n);
        prop_assert_eq!(check(FieldId::Guests, &n.to_string()), expected);
    }
}

proptest! {
    #[test]
    fn guest_text_pass_iff_integer_in_range(raw in "[0-9a-z.\\-]{0,6}") {
        let expected = raw
            .trim()
            .parse::<i64>()
            .is_ok_and(|n| (1..=20).contains(&n))
            && !raw.trim().is_empty();
        prop_assert_eq!(check(FieldId::Guests, &raw), expected, "guests {:?}", raw);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rules are pure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn checking_twice_is_identical(raw in ".{0,24}", which in 0usize..6) {
        let field = FieldId::ALL[which];
        let mut values = FieldValues::new();
        values.set(field, raw);
        let rules = FieldRules::new();
        prop_assert_eq!(
            rules.check(field, &values, today()),
            rules.check(field, &values, today())
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Normalization caps at 7 chars and is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalization_caps_and_settles(raw in ".{0,24}") {
        let once = normalize_flight_number(&raw);
        prop_assert!(once.chars().count() <= 7, "{:?} normalized to {:?}", raw, once);
        prop_assert_eq!(normalize_flight_number(&once), once.clone());
        prop_assert!(!once.chars().any(char::is_whitespace));
    }
}
