//! Live flight status.

use async_trait::async_trait;

use super::{AgentToolParameters, Tool, ToolArguments, ToolContext};
use crate::aviation::FlightRecord;
use crate::context::{FlightStatus, UNKNOWN};
use crate::error::SupportError;
use crate::validators::InputKind;

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

impl FlightStatus {
    fn from_record(flight_number: &str, record: FlightRecord) -> Self {
        let departure = record.departure.unwrap_or_default();
        let arrival = record.arrival.unwrap_or_default();
        Self {
            flight_number: flight_number.to_string(),
            status: or_unknown(record.flight_status),
            departure: or_unknown(departure.airport),
            arrival: or_unknown(arrival.airport),
            scheduled_departure: or_unknown(departure.scheduled),
            delay: departure.delay.unwrap_or(0),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Flight {}: Status - {}, Departure - {}, Arrival - {}, Scheduled - {}, Delay - {} minutes",
            self.flight_number,
            self.status,
            self.departure,
            self.arrival,
            self.scheduled_departure,
            self.delay
        )
    }
}

pub async fn get_flight_status(
    ctx: &mut ToolContext<'_>,
    flight_number: &str,
) -> Result<String, SupportError> {
    if let Err(guidance) = InputKind::FlightNumber.check(flight_number) {
        return Ok(guidance.to_string());
    }
    let flight_number = flight_number.to_uppercase();

    let Some(record) = ctx
        .aviation
        .flights(&flight_number)
        .await
        .and_then(|records| records.into_iter().next())
    else {
        return Ok(format!(
            "No information found for flight {flight_number}. Please check the flight number \
             (e.g., AA123) or try sites like FlightAware (flightaware.com)."
        ));
    };

    let status = FlightStatus::from_record(&flight_number, record);
    let reply = status.describe();
    ctx.airline.flight_status = Some(status);
    ctx.persist().await?;
    Ok(reply)
}

pub struct FlightStatusTool;

#[async_trait]
impl Tool for FlightStatusTool {
    fn name(&self) -> &'static str {
        "get_flight_status"
    }

    fn description(&self) -> &'static str {
        "Fetch real-time flight status for a given IATA flight number."
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
        get_flight_status(ctx, args.get_str("flight_number")?).await
    }
}
