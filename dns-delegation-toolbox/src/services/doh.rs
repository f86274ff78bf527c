//! DNS-over-HTTPS (JSON API) NS lookups.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ToolboxError, ToolboxResult};

/// NS record type code.
const TYPE_NS: u16 = 2;

#[derive(Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: u32,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Deserialize)]
struct DohAnswer {
    #[serde(rename = "type")]
    record_type: u16,
    data: String,
}

/// Extract NS host names from a `application/dns-json` response body.
///
/// A non-zero `Status` is an error, as is a response with no NS answers.
pub fn parse_doh_response(body: &str, domain: &str) -> ToolboxResult<Vec<String>> {
    let response: DohResponse = serde_json::from_str(body)
        .map_err(|e| ToolboxError::ParseError(format!("Invalid DoH response: {e}")))?;

    if response.status != 0 {
        return Err(ToolboxError::NetworkError(format!(
            "DoH query for {domain} returned status {}",
            response.status
        )));
    }

    let nameservers: Vec<String> = response
        .answer
        .into_iter()
        .filter(|a| a.record_type == TYPE_NS)
        .map(|a| a.data.trim_end_matches('.').to_string())
        .collect();

    if nameservers.is_empty() {
        return Err(ToolboxError::NoAnswer(domain.to_string()));
    }
    Ok(nameservers)
}

/// Query `endpoint` for the NS records of `domain`, bounded by `timeout`.
pub(crate) async fn doh_ns_lookup(
    client: &reqwest::Client,
    endpoint: &str,
    timeout: Duration,
    domain: &str,
) -> ToolboxResult<Vec<String>> {
    let body = client
        .get(endpoint)
        .timeout(timeout)
        .query(&[("name", domain), ("type", "NS")])
        .header(reqwest::header::ACCEPT, "application/dns-json")
        .send()
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("DoH request failed: {e}")))?
        .error_for_status()
        .map_err(|e| ToolboxError::NetworkError(format!("DoH request failed: {e}")))?
        .text()
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("Failed to read DoH response: {e}")))?;

    parse_doh_response(&body, domain)
}
