//! Tool system for function calling.

pub mod airlines;
pub mod airports;
pub mod arguments;
pub mod faq;
pub mod flights;
pub mod passenger;
pub mod seats;
pub mod tool;
pub mod types;
pub mod validation;

use strum::{EnumIter, IntoEnumIterator};

pub use arguments::ToolArguments;
pub use tool::{Tool, ToolContext};
pub use types::{AgentToolParameters, ToolDefinition};
pub use validation::validate_arguments;

/// Every tool a handler can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ToolId {
    SetPassengerName,
    FaqLookup,
    SeatMap,
    UpdateSeat,
    FlightStatus,
    AirportInfo,
    AirlineInfo,
}

impl ToolId {
    pub fn tool(self) -> &'static dyn Tool {
        match self {
            Self::SetPassengerName => &passenger::SetPassengerNameTool,
            Self::FaqLookup => &faq::FaqLookupTool,
            Self::SeatMap => &seats::GetSeatMapTool,
            Self::UpdateSeat => &seats::UpdateSeatTool,
            Self::FlightStatus => &flights::FlightStatusTool,
            Self::AirportInfo => &airports::AirportInfoTool,
            Self::AirlineInfo => &airlines::AirlineInfoTool,
        }
    }

    pub fn name(self) -> &'static str {
        self.tool().name()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|id| id.name() == name)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_registry() {
        for id in ToolId::iter() {
            assert_eq!(ToolId::from_name(id.name()), Some(id));
        }
        assert_eq!(ToolId::from_name("book_flight"), None);
    }

    #[test]
    fn every_tool_declares_an_object_schema() {
        for id in ToolId::iter() {
            let def = id.tool().definition();
            assert_eq!(def.parameters["type"], "object", "{}", def.name);
            assert!(!def.description.is_empty());
        }
    }
}
