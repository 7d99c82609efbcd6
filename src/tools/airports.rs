//! Airport details by IATA code.

use async_trait::async_trait;

use super::{AgentToolParameters, Tool, ToolArguments, ToolContext};
use crate::aviation::AirportRecord;
use crate::context::{AirportInfo, UNKNOWN};
use crate::error::SupportError;
use crate::validators::InputKind;

impl AirportInfo {
    fn from_record(iata_code: &str, record: AirportRecord) -> Self {
        let field = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN.into());
        Self {
            iata_code: iata_code.to_string(),
            name: field(record.airport_name),
            city: field(record.city_iata_code),
            country: field(record.country_name),
            timezone: field(record.timezone),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Airport {}: {}, Location: {} ({}), Timezone: {}",
            self.iata_code, self.name, self.city, self.country, self.timezone
        )
    }
}

pub async fn get_airport_info(
    ctx: &mut ToolContext<'_>,
    iata_code: &str,
) -> Result<String, SupportError> {
    if let Err(guidance) = InputKind::AirportCode.check(iata_code) {
        return Ok(guidance.to_string());
    }
    let iata_code = iata_code.to_uppercase();

    let Some(record) = ctx
        .aviation
        .airports(&iata_code)
        .await
        .and_then(|records| records.into_iter().next())
    else {
        return Ok(format!(
            "No information found for airport {iata_code}. Please check the IATA code (e.g., SFO)."
        ));
    };

    let info = AirportInfo::from_record(&iata_code, record);
    let reply = info.describe();
    ctx.airline.airport_info = Some(info);
    ctx.persist().await?;
    Ok(reply)
}

pub struct AirportInfoTool;

#[async_trait]
impl Tool for AirportInfoTool {
    fn name(&self) -> &'static str {
        "get_airport_info"
    }

    fn description(&self) -> &'static str {
        "Fetch details about an airport by its IATA code."
    }

    fn parameters(&self) -> AgentToolParameters {
        AgentToolParameters::object()
            .string("iata_code", "Three-letter IATA airport code, e.g. SFO", true)
            .build()
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError> {
        get_airport_info(ctx, args.get_str("iata_code")?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::Fixture;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn airport_details_are_reported_and_stored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/airports"))
            .and(query_param("iata_code", "SFO"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "airport_name": "San Francisco International",
                    "iata_code": "SFO",
                    "city_iata_code": "SFO",
                    "country_name": "United States",
                    "timezone": "America/Los_Angeles"
                }]
            })))
            .mount(&server)
            .await;
        let mut fx = Fixture::new(&server);

        let reply = get_airport_info(&mut fx.ctx(), "sfo").await.unwrap();

        assert_eq!(
            reply,
            "Airport SFO: San Francisco International, Location: SFO (United States), Timezone: America/Los_Angeles"
        );
        let stored = fx.stored_context().await.unwrap();
        assert_eq!(stored.airport_info.unwrap().name, "San Francisco International");
    }

    #[tokio::test]
    async fn empty_result_reports_no_information() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/airports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;
        let mut fx = Fixture::new(&server);

        let reply = get_airport_info(&mut fx.ctx(), "XQZ").await.unwrap();

        assert!(reply.starts_with("No information found for airport XQZ."));
        assert!(fx.airline.airport_info.is_none());
    }

    #[tokio::test]
    async fn city_names_are_not_codes() {
        let server = MockServer::start().await;
        let mut fx = Fixture::new(&server);

        let reply = get_airport_info(&mut fx.ctx(), "San Francisco").await.unwrap();

        assert_eq!(reply, InputKind::AirportCode.guidance());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
