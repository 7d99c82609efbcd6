use async_trait::async_trait;

use super::{AgentToolParameters, Tool, ToolArguments, ToolContext};
use crate::aviation::AirlineRecord;
use crate::context::{AirlineInfo, UNKNOWN};
use crate::error::SupportError;
use crate::validators::InputKind;

impl AirlineInfo {
    fn from_record(iata_code: &str, record: AirlineRecord) -> Self {
        let field = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN.into());
        Self {
            iata_code: iata_code.to_string(),
            name: field(record.airline_name),
            country: field(record.country_name),
            fleet_size: field(record.fleet_size),
            founded: field(record.date_founded),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Airline {}: {}, Country: {}, Fleet Size: {}, Founded: {}",
            self.iata_code, self.name, self.country, self.fleet_size, self.founded
        )
    }
}

pub async fn get_airline_info(
    ctx: &mut ToolContext<'_>,
    iata_code: &str,
) -> Result<String, SupportError> {
    if let Err(guidance) = InputKind::AirlineCode.check(iata_code) {
        return Ok(guidance.to_string());
    }
    let iata_code = iata_code.to_uppercase();

    let Some(record) = ctx
        .aviation
        .airlines(&iata_code)
        .await
        .and_then(|records| records.into_iter().next())
    else {
        return Ok(format!(
            "No information found for airline {iata_code}. Please check the IATA code (e.g., AA)."
        ));
    };

    let info = AirlineInfo::from_record(&iata_code, record);
    let reply = info.describe();
    ctx.airline.airline_info = Some(info);
    ctx.persist().await?;
    Ok(reply)
}

pub struct AirlineInfoTool;

#[async_trait]
impl Tool for AirlineInfoTool {
    fn name(&self) -> &'static str {
        "get_airline_info"
    }

    fn description(&self) -> &'static str {
        "Fetch details about an airline by its IATA code."
    }

    fn parameters(&self) -> AgentToolParameters {
        AgentToolParameters::object()
            .string("iata_code", "Two-character IATA airline code, e.g. AA", true)
            .build()
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError> {
        get_airline_info(ctx, args.get_str("iata_code")?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::Fixture;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn airline_details_are_reported_and_stored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/airlines"))
            .and(query_param("iata_code", "AA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "airline_name": "American Airlines",
                    "iata_code": "AA",
                    "country_name": "United States",
                    "fleet_size": 963,
                    "date_founded": "1934"
                }]
            })))
            .mount(&server)
            .await;
        let mut fx = Fixture::new(&server);

        let reply = get_airline_info(&mut fx.ctx(), "aa").await.unwrap();

        assert_eq!(
            reply,
            "Airline AA: American Airlines, Country: United States, Fleet Size: 963, Founded: 1934"
        );
        assert_eq!(fx.airline.airline_info.as_ref().unwrap().fleet_size, "963");
        assert!(fx.stored_context().await.unwrap().airline_info.is_some());
    }

    #[tokio::test]
    async fn api_failure_reports_no_information() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/airlines"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let mut fx = Fixture::new(&server);

        let reply = get_airline_info(&mut fx.ctx(), "B6").await.unwrap();

        assert_eq!(
            reply,
            "No information found for airline B6. Please check the IATA code (e.g., AA)."
        );
    }

    #[tokio::test]
    async fn three_letter_codes_are_rejected() {
        let server = MockServer::start().await;
        let mut fx = Fixture::new(&server);

        let reply = get_airline_info(&mut fx.ctx(), "AAL").await.unwrap();

        assert_eq!(reply, InputKind::AirlineCode.guidance());
        assert!(fx.airline.airline_info.is_none());
    }
}
