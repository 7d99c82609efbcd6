//! Input validators for tool arguments.
//!
//! A mismatch is a normal conversational outcome: callers hand the
//! [`InputKind::guidance`] text straight back to the customer.

use std::sync::OnceLock;

use regex::Regex;

/// The kinds of customer input a tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    PassengerName,
    FlightNumber,
    ConfirmationNumber,
    SeatNumber,
    AirportCode,
    AirlineCode,
}

impl InputKind {
    fn pattern(self) -> &'static Regex {
        static PASSENGER_NAME: OnceLock<Regex> = OnceLock::new();
        static FLIGHT_NUMBER: OnceLock<Regex> = OnceLock::new();
        static CONFIRMATION_NUMBER: OnceLock<Regex> = OnceLock::new();
        static SEAT_NUMBER: OnceLock<Regex> = OnceLock::new();
        static AIRPORT_CODE: OnceLock<Regex> = OnceLock::new();
        static AIRLINE_CODE: OnceLock<Regex> = OnceLock::new();

        let (cell, source) = match self {
            Self::PassengerName => (&PASSENGER_NAME, r"^[A-Za-z\s]{1,50}$"),
            Self::FlightNumber => (&FLIGHT_NUMBER, r"^[A-Za-z]{2}[0-9]{1,4}$"),
            Self::ConfirmationNumber => (&CONFIRMATION_NUMBER, r"^[A-Za-z0-9]{2,10}$"),
            Self::SeatNumber => (&SEAT_NUMBER, r"^[0-9]{1,3}[A-Za-z]$"),
            Self::AirportCode => (&AIRPORT_CODE, r"^[A-Za-z]{3}$"),
            Self::AirlineCode => (&AIRLINE_CODE, r"^[A-Za-z0-9]{2}$"),
        };
        cell.get_or_init(|| Regex::new(source).expect("validator pattern is a valid regex"))
    }

    /// Customer-facing text explaining the expected format.
    pub fn guidance(self) -> &'static str {
        match self {
            Self::PassengerName => {
                "Please provide a valid name (letters and spaces only, up to 50 characters). Example: John Smith"
            }
            Self::FlightNumber => "Please provide a valid IATA flight number (e.g., AA123 or UA456).",
            Self::ConfirmationNumber => {
                "Please provide a valid confirmation number (2-10 alphanumeric characters). Example: ABC123"
            }
            Self::SeatNumber => {
                "Please provide a valid seat number (e.g., 12A). Use the seat map tool to see available seats."
            }
            Self::AirportCode => "Please provide a valid IATA airport code (e.g., SFO).",
            Self::AirlineCode => "Please provide a valid IATA airline code (e.g., AA).",
        }
    }

    /// Whether `input` matches this kind's pattern exactly.
    pub fn matches(self, input: &str) -> bool {
        !input.is_empty() && self.pattern().is_match(input)
    }

    /// `Ok(())` when valid, otherwise the guidance text.
    pub fn check(self, input: &str) -> Result<(), &'static str> {
        if self.matches(input) {
            Ok(())
        } else {
            Err(self.guidance())
        }
    }
}

/// Trim and capitalise each word ("jOHN   smith " -> "John Smith").
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
