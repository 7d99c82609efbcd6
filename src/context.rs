//! Shared per-conversation context.
//!
//! One [`AirlineContext`] exists per conversation. Tools overwrite its fields
//! in place; nothing requires the fields to agree with each other (a seat can
//! be set for a flight number that was never looked up).

use serde::{Deserialize, Serialize};

/// Placeholder for snapshot fields the data API did not return.
pub const UNKNOWN: &str = "Unknown";

/// Known facts about the current customer and trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirlineContext {
    #[serde(default)]
    pub passenger_name: Option<String>,
    #[serde(default)]
    pub confirmation_number: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub seat_number: Option<String>,
    #[serde(default)]
    pub flight_status: Option<FlightStatus>,
    #[serde(default)]
    pub airport_info: Option<AirportInfo>,
    #[serde(default)]
    pub airline_info: Option<AirlineInfo>,
}

/// Last flight-status lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightStatus {
    pub flight_number: String,
    pub status: String,
    pub departure: String,
    pub arrival: String,
    pub scheduled_departure: String,
    /// Departure delay in minutes.
    pub delay: i64,
}

/// Last airport lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirportInfo {
    pub iata_code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub timezone: String,
}

/// Last airline lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirlineInfo {
    pub iata_code: String,
    pub name: String,
    pub country: String,
    pub fleet_size: String,
    pub founded: String,
}

impl AirlineContext {
    /// One line per known fact, used to prime the model's instructions.
    pub fn summary(&self) -> Option<String> {
        let mut lines = Vec::new();
        let mut push = |label: &str, value: &Option<String>| {
            if let Some(v) = value {
                lines.push(format!("- {label}: {v}"));
            }
        };
        push("Passenger name", &self.passenger_name);
        push("Confirmation number", &self.confirmation_number);
        push("Flight number", &self.flight_number);
        push("Seat number", &self.seat_number);

        if let Some(status) = &self.flight_status {
            lines.push(format!(
                "- Last flight status: {} is {} ({} to {})",
                status.flight_number, status.status, status.departure, status.arrival
            ));
        }
        if let Some(airport) = &self.airport_info {
            lines.push(format!("- Last airport looked up: {} ({})", airport.iata_code, airport.name));
        }
        if let Some(airline) = &self.airline_info {
            lines.push(format!("- Last airline looked up: {} ({})", airline.iata_code, airline.name));
        }

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}
