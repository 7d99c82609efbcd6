//! Handler routing table.
//!
//! Triage is the entry point and may hand off to any specialist; every
//! specialist may only hand back to triage. Handoffs are offered to the model
//! as zero-argument tools named `transfer_to_<handler>`.

mod instructions;

use strum::{Display, EnumIter, IntoEnumIterator};
use rand::Rng;
use tracing::info;

use crate::context::AirlineContext;
use crate::error::SupportError;
use crate::tools::{AgentToolParameters, ToolContext, ToolDefinition, ToolId};

const TRANSFER_PREFIX: &str = "transfer_to_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum HandlerId {
    #[strum(to_string = "Triage Agent")]
    Triage,
    #[strum(to_string = "FAQ Agent")]
    Faq,
    #[strum(to_string = "Seat Booking Agent")]
    SeatBooking,
    #[strum(to_string = "Flight Status Agent")]
    FlightStatus,
    #[strum(to_string = "Airport Info Agent")]
    AirportInfo,
    #[strum(to_string = "Airline Info Agent")]
    AirlineInfo,
}

/// Static configuration of one handler.
#[derive(Debug)]
pub struct HandlerSpec {
    pub id: HandlerId,
    pub handoff_description: &'static str,
    pub instructions: &'static str,
    pub tools: &'static [ToolId],
    pub handoffs: &'static [HandlerId],
}

const BACK_TO_TRIAGE: &[HandlerId] = &[HandlerId::Triage];

static HANDLERS: [HandlerSpec; 6] = [
    HandlerSpec {
        id: HandlerId::Triage,
        handoff_description: "Delegates customer requests to the appropriate agent.",
        instructions: instructions::TRIAGE,
        tools: &[ToolId::SetPassengerName],
        handoffs: &[
            HandlerId::Faq,
            HandlerId::SeatBooking,
            HandlerId::FlightStatus,
            HandlerId::AirportInfo,
            HandlerId::AirlineInfo,
        ],
    },
    HandlerSpec {
        id: HandlerId::Faq,
        handoff_description: "Answers common questions about the airline.",
        instructions: instructions::FAQ,
        tools: &[ToolId::FaqLookup],
        handoffs: BACK_TO_TRIAGE,
    },
    HandlerSpec {
        id: HandlerId::SeatBooking,
        handoff_description: "Helps customers update their seat assignments.",
        instructions: instructions::SEAT_BOOKING,
        tools: &[ToolId::UpdateSeat, ToolId::SeatMap],
        handoffs: BACK_TO_TRIAGE,
    },
    HandlerSpec {
        id: HandlerId::FlightStatus,
        handoff_description: "Retrieves real-time flight status.",
        instructions: instructions::FLIGHT_STATUS,
        tools: &[ToolId::FlightStatus],
        handoffs: BACK_TO_TRIAGE,
    },
    HandlerSpec {
        id: HandlerId::AirportInfo,
        handoff_description: "Provides information about airports.",
        instructions: instructions::AIRPORT_INFO,
        tools: &[ToolId::AirportInfo],
        handoffs: BACK_TO_TRIAGE,
    },
    HandlerSpec {
        id: HandlerId::AirlineInfo,
        handoff_description: "Provides information about airlines.",
        instructions: instructions::AIRLINE_INFO,
        tools: &[ToolId::AirlineInfo],
        handoffs: BACK_TO_TRIAGE,
    },
];

impl HandlerId {
    pub fn spec(self) -> &'static HandlerSpec {
        // table order matches declaration order
        &HANDLERS[self as usize]
    }

    pub fn snake_name(self) -> &'static str {
        match self {
            Self::Triage => "triage_agent",
            Self::Faq => "faq_agent",
            Self::SeatBooking => "seat_booking_agent",
            Self::FlightStatus => "flight_status_agent",
            Self::AirportInfo => "airport_info_agent",
            Self::AirlineInfo => "airline_info_agent",
        }
    }

    pub fn transfer_tool_name(self) -> String {
        format!("{TRANSFER_PREFIX}{}", self.snake_name())
    }

    /// Resolve a `transfer_to_*` tool name to its target handler.
    pub fn from_transfer_tool(name: &str) -> Option<Self> {
        let target = name.strip_prefix(TRANSFER_PREFIX)?;
        Self::iter().find(|id| id.snake_name() == target)
    }

    fn transfer_definition(self) -> ToolDefinition {
        let spec = self.spec();
        ToolDefinition {
            name: self.transfer_tool_name(),
            description: format!("Handoff to the {self}. {}", spec.handoff_description),
            parameters: AgentToolParameters::empty().schema,
        }
    }
}

impl HandlerSpec {
    pub fn allows_tool(&self, tool: ToolId) -> bool {
        self.tools.contains(&tool)
    }

    pub fn allows_handoff(&self, target: HandlerId) -> bool {
        self.handoffs.contains(&target)
    }

    /// Tools followed by transfer tools, as advertised to the model.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|id| id.tool().definition())
            .chain(self.handoffs.iter().map(|target| target.transfer_definition()))
            .collect()
    }

    /// Instructions plus whatever the conversation already knows.
    pub fn system_prompt(&self, context: &AirlineContext) -> String {
        match context.summary() {
            Some(summary) => format!(
                "{}\n\nKnown customer context:\n{summary}",
                self.instructions
            ),
            None => self.instructions.to_string(),
        }
    }
}

/// Entry hook run when control passes to `target`.
///
/// Seat booking assigns a placeholder `FLT-NNN` flight number when none is
/// known yet, and persists it.
pub async fn on_handoff(target: HandlerId, ctx: &mut ToolContext<'_>) -> Result<(), SupportError> {
    if target != HandlerId::SeatBooking || ctx.airline.flight_number.is_some() {
        return Ok(());
    }
    let placeholder = format!("FLT-{}", rand::rng().random_range(100..=999));
    info!(
        conversation_id = ctx.conversation_id,
        flight_number = %placeholder,
        "assigned placeholder flight number"
    );
    ctx.airline.flight_number = Some(placeholder);
    ctx.persist().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::Fixture;
    use regex::Regex;
    use wiremock::MockServer;

    #[test]
    fn table_is_indexed_by_id() {
        for id in HandlerId::iter() {
            assert_eq!(id.spec().id, id);
        }
    }

    #[test]
    fn specialists_only_return_to_triage() {
        for id in HandlerId::iter().filter(|id| *id != HandlerId::Triage) {
            assert_eq!(id.spec().handoffs, &[HandlerId::Triage]);
            assert!(HandlerId::Triage.spec().allows_handoff(id));
        }
        assert!(!HandlerId::Faq.spec().allows_handoff(HandlerId::SeatBooking));
    }

    #[test]
    fn transfer_tool_names_resolve() {
        assert_eq!(
            HandlerId::SeatBooking.transfer_tool_name(),
            "transfer_to_seat_booking_agent"
        );
        for id in HandlerId::iter() {
            assert_eq!(HandlerId::from_transfer_tool(&id.transfer_tool_name()), Some(id));
        }
        assert_eq!(HandlerId::from_transfer_tool("transfer_to_billing_agent"), None);
        assert_eq!(HandlerId::from_transfer_tool("update_seat"), None);
    }

    #[test]
    fn seat_booking_advertises_its_tools_and_the_way_back() {
        let names: Vec<_> = HandlerId::SeatBooking
            .spec()
            .tool_definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["update_seat", "get_seat_map", "transfer_to_triage_agent"]);
    }

    #[test]
    fn system_prompt_carries_known_context() {
        let spec = HandlerId::Triage.spec();
        assert_eq!(spec.system_prompt(&AirlineContext::default()), spec.instructions);

        let context = AirlineContext {
            passenger_name: Some("Jane Doe".into()),
            ..Default::default()
        };
        assert!(spec.system_prompt(&context).ends_with("- Passenger name: Jane Doe"));
    }

    #[tokio::test]
    async fn seat_booking_entry_assigns_placeholder_flight() {
        let server = MockServer::start().await;
        let mut fx = Fixture::new(&server);

        on_handoff(HandlerId::SeatBooking, &mut fx.ctx()).await.unwrap();

        let flight = fx.airline.flight_number.clone().unwrap();
        assert!(Regex::new(r"^FLT-[1-9][0-9]{2}$").unwrap().is_match(&flight), "{flight}");
        assert_eq!(fx.stored_context().await.unwrap().flight_number, Some(flight));
    }

    #[tokio::test]
    async fn placeholder_flight_numbers_stay_in_range() {
        let server = MockServer::start().await;
        for _ in 0..50 {
            let mut fx = Fixture::new(&server);
            on_handoff(HandlerId::SeatBooking, &mut fx.ctx()).await.unwrap();

            let flight = fx.airline.flight_number.unwrap();
            let n: u32 = flight.trim_start_matches("FLT-").parse().unwrap();
            assert!((100..=999).contains(&n), "{flight}");
        }
    }

    #[tokio::test]
    async fn seat_booking_entry_keeps_existing_flight() {
        let server = MockServer::start().await;
        let mut fx = Fixture::new(&server);
        fx.airline.flight_number = Some("UA456".into());

        on_handoff(HandlerId::SeatBooking, &mut fx.ctx()).await.unwrap();
        on_handoff(HandlerId::FlightStatus, &mut fx.ctx()).await.unwrap();

        assert_eq!(fx.airline.flight_number.as_deref(), Some("UA456"));
        assert!(fx.stored_context().await.is_none());
    }
}
