#![forbid(unsafe_code)]

//! Form fields: identity, raw values as typed, and input normalization.

use std::fmt;

// ---------------------------------------------------------------------------
// FieldId
// ---------------------------------------------------------------------------

/// Identifies one field of the flight-details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Airline name.
    Airline,
    /// Arrival date (`YYYY-MM-DD`).
    ArrivalDate,
    /// Arrival time (`HH:MM`).
    ArrivalTime,
    /// Flight number, e.g. `DL45`.
    FlightNumber,
    /// Number of guests arriving.
    Guests,
    /// Optional free-text comments.
    Comments,
}

impl FieldId {
    /// Every field, in form order.
    pub const ALL: [FieldId; 6] = [
        FieldId::Airline,
        FieldId::ArrivalDate,
        FieldId::ArrivalTime,
        FieldId::FlightNumber,
        FieldId::Guests,
        FieldId::Comments,
    ];

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FieldId::Airline => "airline",
            FieldId::ArrivalDate => "arrival_date",
            FieldId::ArrivalTime => "arrival_time",
            FieldId::FlightNumber => "flight_number",
            FieldId::Guests => "guests",
            FieldId::Comments => "comments",
        }
    }

    /// Position in [`FieldId::ALL`], for per-field arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            FieldId::Airline => 0,
            FieldId::ArrivalDate => 1,
            FieldId::ArrivalTime => 2,
            FieldId::FlightNumber => 3,
            FieldId::Guests => 4,
            FieldId::Comments => 5,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Flight-number normalization
// ---------------------------------------------------------------------------

/// Longest flight number live normalization keeps: 3 letters plus 4 digits.
pub const FLIGHT_NUMBER_MAX_CHARS: usize = 7;

/// Normalization applied on every flight-number edit: whitespace stripped,
/// letters uppercased, capped at [`FLIGHT_NUMBER_MAX_CHARS`] characters.
///
/// This is eager input shaping, independent of validation; a value that
/// survives it may still fail the flight-number rule.
#[must_use]
pub fn normalize_flight_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .take(FLIGHT_NUMBER_MAX_CHARS)
        .collect()
}

// ---------------------------------------------------------------------------
// FieldValues
// ---------------------------------------------------------------------------

/// Default guest count for a fresh form.
pub const DEFAULT_GUESTS: &str = "1";

/// Raw text of every field, exactly as typed.
///
/// The one exception is `flight_number`, which [`FieldValues::set`] keeps
/// normalized; writing the field directly skips that shaping (validation and
/// submission building still normalize on their own).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    /// Airline name, trimmed only when the submission is built.
    pub airline: String,
    /// Arrival date text, `YYYY-MM-DD`.
    pub arrival_date: String,
    /// Arrival time text, `HH:MM`.
    pub arrival_time: String,
    /// Flight number, kept normalized by `set`.
    pub flight_number: String,
    /// Guest count text; defaults to [`DEFAULT_GUESTS`].
    pub guests: String,
    /// Optional comments.
    pub comments: String,
}

impl Default for FieldValues {
    fn default() -> Self {
        Self {
            airline: String::new(),
            arrival_date: String::new(),
            arrival_time: String::new(),
            flight_number: String::new(),
            guests: DEFAULT_GUESTS.to_string(),
            comments: String::new(),
        }
    }
}

impl FieldValues {
    /// Fresh defaults: every field blank, one guest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of `field`.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Airline => &self.airline,
            FieldId::ArrivalDate => &self.arrival_date,
            FieldId::ArrivalTime => &self.arrival_time,
            FieldId::FlightNumber => &self.flight_number,
            FieldId::Guests => &self.guests,
            FieldId::Comments => &self.comments,
        }
    }

    /// Store an edit. Flight-number edits pass through
    /// [`normalize_flight_number`] first.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldId::Airline => self.airline = value,
            FieldId::ArrivalDate => self.arrival_date = value,
            FieldId::ArrivalTime => self.arrival_time = value,
            FieldId::FlightNumber => self.flight_number = normalize_flight_number(&value),
            FieldId::Guests => self.guests = value,
            FieldId::Comments => self.comments = value,
        }
    }
}
