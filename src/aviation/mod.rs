//! aviationstack client.
//!
//! Every lookup is bounded by the configured timeout and never fails loudly:
//! transport errors, non-2xx statuses, API error bodies and undecodable
//! payloads are logged and collapse to `None`.

pub mod records;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use strum::Display;
use tracing::{debug, error};

use crate::config::SupportConfig;
use crate::error::{Result, SupportError};
use crate::util::timeout::with_timeout;

pub use records::{AirlineRecord, AirportRecord, FlightRecord};

/// The read-only resources the router queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Flights,
    Airports,
    Airlines,
}

/// HTTP client for the flight/airport/airline data API.
#[derive(Debug, Clone)]
pub struct AviationClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AviationClient {
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            timeout,
        })
    }

    pub fn from_config(config: &SupportConfig) -> Result<Self> {
        Self::new(
            config.aviation_base_url.clone(),
            config.aviation_api_key.clone(),
            config.aviation_timeout,
        )
    }

    /// Flights matching an IATA flight number (e.g. `AA123`).
    pub async fn flights(&self, flight_iata: &str) -> Option<Vec<FlightRecord>> {
        self.fetch(Resource::Flights, &[("flight_iata", flight_iata)]).await
    }

    /// Airports matching a three-letter IATA code.
    pub async fn airports(&self, iata_code: &str) -> Option<Vec<AirportRecord>> {
        self.fetch(Resource::Airports, &[("iata_code", iata_code)]).await
    }

    /// Airlines matching a two-character IATA code.
    pub async fn airlines(&self, iata_code: &str) -> Option<Vec<AirlineRecord>> {
        self.fetch(Resource::Airlines, &[("iata_code", iata_code)]).await
    }

    /// Fetch a resource; `None` signals that nothing usable came back.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &[(&str, &str)],
    ) -> Option<Vec<T>> {
        match with_timeout(self.timeout, self.try_fetch(resource, params)).await {
            Ok(records) => {
                debug!(%resource, count = records.len(), "aviation fetch complete");
                Some(records)
            }
            Err(e) => {
                error!(%resource, error = %e, "Failed to fetch aviation data");
                None
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, resource);

        // without_url keeps the access key out of logged errors
        let resp = self
            .http
            .get(&url)
            .query(&[("access_key", self.access_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| SupportError::Network(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SupportError::api(status.as_u16(), body));
        }

        let envelope: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| SupportError::Network(e.without_url()))?;

        if let Some(err) = envelope.error {
            return Err(SupportError::api(
                status.as_u16(),
                format!(
                    "{}: {}",
                    err.code.unwrap_or_else(|| "unknown_error".into()),
                    err.message.unwrap_or_default()
                ),
            ));
        }

        Ok(envelope.data)
    }
}
