//! Frequently asked questions.

use async_trait::async_trait;

use super::{AgentToolParameters, Tool, ToolArguments, ToolContext};
use crate::error::SupportError;

pub const FAQ_FALLBACK: &str =
    "Sorry, I don't have information on that topic. Can I assist with something else?";

/// Topic keyword and answer. Order matters: the first keyword found wins.
const FAQS: [(&str, &str); 4] = [
    (
        "wifi",
        "Most flights offer free Wi-Fi. Connect to the 'Airline-Wifi' network during your flight.",
    ),
    (
        "baggage",
        "Passengers are allowed one carry-on bag (up to 22 x 14 x 9 inches) and one checked bag \
         (up to 62 linear inches) free of charge. Additional bags may incur fees.",
    ),
    (
        "seats",
        "Our aircraft typically have 120-180 seats, including economy, premium economy, and \
         business class options.",
    ),
    (
        "check-in",
        "Online check-in is available 24 hours before departure via our website or mobile app.",
    ),
];

/// Answer a question from the fixed table.
pub fn faq_lookup(question: &str) -> &'static str {
    let question = question.trim().to_lowercase();
    FAQS.iter()
        .find(|(topic, _)| question.contains(topic))
        .map(|(_, answer)| *answer)
        .unwrap_or(FAQ_FALLBACK)
}

pub struct FaqLookupTool;

#[async_trait]
impl Tool for FaqLookupTool {
    fn name(&self) -> &'static str {
        "faq_lookup_tool"
    }

    fn description(&self) -> &'static str {
        "Lookup frequently asked questions about the airline."
    }

    fn parameters(&self) -> AgentToolParameters {
        AgentToolParameters::object()
            .string("question", "The customer's question", true)
            .build()
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        _ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError> {
        Ok(faq_lookup(args.get_str("question")?).to_string())
    }
}
