//! Generation settings and related enums.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Settings controlling text generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_leaves_unset_fields_empty() {
        let settings = GenerationSettings::builder().temperature(0.2).build();
        assert_eq!(settings.temperature, Some(0.2));
        assert_eq!(settings.max_tokens, None);
    }

    #[test]
    fn finish_reason_round_trips_through_strum() {
        assert_eq!(FinishReason::ToolCalls.to_string(), "tool_calls");
        assert_eq!("content_filter".parse::<FinishReason>().unwrap(), FinishReason::ContentFilter);
    }
}
