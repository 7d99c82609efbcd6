//! Typed views of aviationstack result objects.
//!
//! Every field is optional: the API omits or nulls fields freely, and the
//! tools substitute their own defaults.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightRecord {
    #[serde(default)]
    pub flight_status: Option<String>,
    #[serde(default)]
    pub flight: Option<FlightIdent>,
    #[serde(default)]
    pub departure: Option<FlightEndpoint>,
    #[serde(default)]
    pub arrival: Option<FlightEndpoint>,
    #[serde(default)]
    pub aircraft: Option<AircraftInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightIdent {
    #[serde(default)]
    pub iata: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightEndpoint {
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub scheduled: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub delay: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AircraftInfo {
    #[serde(default)]
    pub iata: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirportRecord {
    #[serde(default)]
    pub airport_name: Option<String>,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub city_iata_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirlineRecord {
    #[serde(default)]
    pub airline_name: Option<String>,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fleet_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_founded: Option<String>,
}

/// Accepts `12`, `"12"` or `null`.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts strings and numbers, rendering numbers as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flight_record_tolerates_nulls_and_string_delay() {
        let record: FlightRecord = serde_json::from_value(json!({
            "flight_status": "active",
            "flight": {"iata": "AA123", "number": "123"},
            "departure": {"airport": "John F Kennedy International", "delay": "15"},
            "arrival": null,
            "aircraft": null
        }))
        .unwrap();

        assert_eq!(record.flight_status.as_deref(), Some("active"));
        assert_eq!(record.departure.unwrap().delay, Some(15));
        assert!(record.arrival.is_none());
        assert!(record.aircraft.is_none());
    }

    #[test]
    fn airline_fleet_size_accepts_numbers() {
        let record: AirlineRecord =
            serde_json::from_value(json!({"airline_name": "American Airlines", "fleet_size": 963}))
                .unwrap();

        assert_eq!(record.fleet_size.as_deref(), Some("963"));
        assert_eq!(record.date_founded, None);
    }
}
