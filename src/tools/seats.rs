//! Seat map and seat change tools.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{AgentToolParameters, Tool, ToolArguments, ToolContext};
use crate::aviation::AviationClient;
use crate::error::SupportError;
use crate::validators::InputKind;

/// Flight used for the seat map when the context has no usable flight number.
pub const DEFAULT_FLIGHT: &str = "AA123";
const DEFAULT_AIRCRAFT: &str = "A320";

const A320_SEATS: &[&str] = &[
    "1A", "1B", "1C", "1D", "2A", "2B", "2C", "2D", "10A", "10F", "15A", "15F",
];
const B737_SEATS: &[&str] = &["5A", "5B", "5C", "5D", "6A", "6B", "6C", "6D", "20A", "20F"];
const A321_SEATS: &[&str] = &["12A", "12B", "12C", "12D", "15A", "15F", "25A", "25F"];
const GENERIC_SEATS: &[&str] = &["12A", "12B", "15C", "15D"];

fn seats_for_aircraft(aircraft: &str) -> &'static [&'static str] {
    match aircraft {
        "A320" => A320_SEATS,
        "B737" => B737_SEATS,
        "A321" => A321_SEATS,
        _ => GENERIC_SEATS,
    }
}

/// Available seats for one flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    pub flight_number: String,
    pub aircraft: String,
    pub seats: &'static [&'static str],
}

impl SeatMap {
    pub fn contains(&self, seat: &str) -> bool {
        self.seats.iter().any(|s| s.eq_ignore_ascii_case(seat))
    }

    pub fn seat_list(&self) -> String {
        self.seats.join(", ")
    }

    pub fn describe(&self) -> String {
        format!(
            "Available seats for flight {} ({}): {}",
            self.flight_number,
            self.aircraft,
            self.seat_list()
        )
    }
}

/// Outcome of resolving a flight's seat map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatMapLookup {
    InvalidFlight,
    NoData,
    Found(SeatMap),
}

/// Resolve the aircraft for `flight_number` and return its seat table.
pub async fn lookup_seat_map(aviation: &AviationClient, flight_number: &str) -> SeatMapLookup {
    if !InputKind::FlightNumber.matches(flight_number) {
        return SeatMapLookup::InvalidFlight;
    }
    let flight_number = flight_number.to_uppercase();
    let Some(first) = aviation
        .flights(&flight_number)
        .await
        .and_then(|records| records.into_iter().next())
    else {
        return SeatMapLookup::NoData;
    };

    let aircraft = first
        .aircraft
        .and_then(|a| a.iata)
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| DEFAULT_AIRCRAFT.to_string());
    let seats = seats_for_aircraft(&aircraft);
    SeatMapLookup::Found(SeatMap {
        flight_number,
        aircraft,
        seats,
    })
}

pub async fn get_seat_map(aviation: &AviationClient, flight_number: &str) -> String {
    match lookup_seat_map(aviation, flight_number).await {
        SeatMapLookup::InvalidFlight => InputKind::FlightNumber.guidance().to_string(),
        SeatMapLookup::NoData => format!(
            "No flight data found for {flight_number}. Please check the flight number (e.g., AA123)."
        ),
        SeatMapLookup::Found(map) => map.describe(),
    }
}

/// Change the passenger's seat. The context is only touched once the seat is
/// known to be available.
pub async fn update_seat(
    ctx: &mut ToolContext<'_>,
    confirmation_number: &str,
    new_seat: &str,
) -> Result<String, SupportError> {
    if let Err(guidance) = InputKind::ConfirmationNumber.check(confirmation_number) {
        return Ok(guidance.to_string());
    }
    if let Err(guidance) = InputKind::SeatNumber.check(new_seat) {
        return Ok(guidance.to_string());
    }

    let flight_number = match ctx.airline.flight_number.as_deref() {
        Some(flight) if InputKind::FlightNumber.matches(flight) => flight.to_string(),
        Some(placeholder) => {
            debug!(placeholder, "context flight is not an IATA flight number, using default seat map");
            DEFAULT_FLIGHT.to_string()
        }
        None => DEFAULT_FLIGHT.to_string(),
    };

    let map = match lookup_seat_map(ctx.aviation, &flight_number).await {
        SeatMapLookup::Found(map) => map,
        SeatMapLookup::InvalidFlight | SeatMapLookup::NoData => {
            return Ok(format!(
                "Unable to verify seat availability for flight {flight_number}. Please try again later."
            ));
        }
    };

    let seat = new_seat.to_uppercase();
    if !map.contains(&seat) {
        return Ok(format!(
            "Seat {seat} is not available. Available seats: {}",
            map.seat_list()
        ));
    }

    ctx.airline.confirmation_number = Some(confirmation_number.to_string());
    ctx.airline.seat_number = Some(seat.clone());
    let flight = ctx
        .airline
        .flight_number
        .get_or_insert_with(|| map.flight_number.clone())
        .clone();
    ctx.persist().await?;

    info!(conversation_id = ctx.conversation_id, seat = %seat, flight = %flight, "seat updated");
    Ok(format!(
        "Your seat has been updated to {seat} for confirmation number {confirmation_number} on flight {flight}."
    ))
}

pub struct GetSeatMapTool;

#[async_trait]
impl Tool for GetSeatMapTool {
    fn name(&self) -> &'static str {
        "get_seat_map"
    }

    fn description(&self) -> &'static str {
        "Show the available seats for a flight."
    }

    fn parameters(&self) -> AgentToolParameters {
        AgentToolParameters::object()
            .string("flight_number", "IATA flight number, e.g. AA123", true)
            .build()
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError> {
        Ok(get_seat_map(ctx.aviation, args.get_str("flight_number")?).await)
    }
}

pub struct UpdateSeatTool;

#[async_trait]
impl Tool for UpdateSeatTool {
    fn name(&self) -> &'static str {
        "update_seat"
    }

    fn description(&self) -> &'static str {
        "Update the seat for a given confirmation number."
    }

    fn parameters(&self) -> AgentToolParameters {
        AgentToolParameters::object()
            .string("confirmation_number", "The booking confirmation number", true)
            .string("new_seat", "The requested seat, e.g. 12A", true)
            .build()
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError> {
        update_seat(
            ctx,
            args.get_str("confirmation_number")?,
            args.get_str("new_seat")?,
        )
        .await
    }
}
