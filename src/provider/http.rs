//! HTTP client construction and error mapping for provider calls.

use std::time::Duration;

use crate::error::{Result, SupportError};

/// Model calls can take a while; tool fetches use their own shorter timeout.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(120);

pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Map a non-success status and body to an error.
pub fn status_to_error(status: u16, body: &str) -> SupportError {
    let message = error_message(body);
    match status {
        401 | 403 => SupportError::Authentication(message),
        429 => SupportError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => SupportError::api(status, message),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn extract_retry_after(body: &str) -> Option<u64> {
    // google.rpc.RetryInfo carries the delay as a duration string, e.g. "13s"
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    value
        .pointer("/error/details")?
        .as_array()?
        .iter()
        .find_map(|detail| detail.get("retryDelay").and_then(|d| d.as_str()))
        .and_then(|delay| delay.strip_suffix('s'))
        .and_then(|secs| secs.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
}
