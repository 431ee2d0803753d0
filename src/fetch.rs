//! Fetch the cosmetics catalog from the API
//!
//! A single blocking GET, no retries. The body is decoded only as far as the
//! envelope; the records themselves stay untyped until they are transformed.

use crate::error::{DumpError, Result};
use crate::types::DumpConfig;
use reqwest::blocking::{Client, Request};
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::{debug, info};

/// Status value the API reports for a successful query
pub const STATUS_OK: i64 = 200;

/// Envelope of every API response.
///
/// `data` stays untyped so that a failed status is reported as such even
/// when the payload next to it has some other shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CosmeticsResponse {
    pub status: Number,
    #[serde(default)]
    pub data: Option<Value>,
}

impl CosmeticsResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| DumpError::FetchFailure(format!("invalid response body: {}", e)))
    }

    /// Unwrap the raw cosmetic records, rejecting any non-200 status
    pub fn into_items(self) -> Result<Vec<Value>> {
        if self.status.as_i64() != Some(STATUS_OK) {
            return Err(DumpError::UnexpectedStatus(self.status));
        }

        let reason = match self.data {
            Some(Value::Array(items)) => return Ok(items),
            Some(_) => "`data` is not a list",
            None => "response has no `data` field",
        };
        Err(DumpError::FetchFailure(reason.to_string()))
    }
}

pub struct CosmeticsFetcher {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl CosmeticsFetcher {
    pub fn new(config: &DumpConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(CosmeticsFetcher {
            client,
            endpoint: config.endpoint.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Issue the request and decode the envelope.
    ///
    /// The HTTP status line is not checked here: the API reports failures
    /// through the `status` field of the body, which `into_items` inspects.
    pub fn fetch(&self) -> Result<CosmeticsResponse> {
        info!(endpoint = %self.endpoint, "querying cosmetics api");

        let response = self.client.execute(self.request()?)?;
        debug!(http_status = %response.status(), "received response");

        let body = response.bytes()?;
        debug!(bytes = body.len(), "read response body");

        CosmeticsResponse::from_slice(&body)
    }

    fn request(&self) -> Result<Request> {
        let request = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, &self.user_agent)
            .build()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFUSED_ENDPOINT: &str = "http://127.0.0.1:9/cosmetics";

    fn status_of(result: Result<Vec<Value>>) -> Option<i64> {
        match result {
            Err(DumpError::UnexpectedStatus(status)) => status.as_i64(),
            _ => None,
        }
    }

    #[test]
    fn test_ok_response_yields_items() {
        let body = br#"{"status":200,"data":[{"id":"a"},{"id":"b"}]}"#;
        let response = CosmeticsResponse::from_slice(body).unwrap();
        let items = response.into_items().unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], "b");
    }

    #[test]
    fn test_error_status_is_rejected() {
        let body = br#"{"status":404,"error":"not found"}"#;
        let response = CosmeticsResponse::from_slice(body).unwrap();

        assert_eq!(status_of(response.into_items()), Some(404));
    }

    #[test]
    fn test_error_status_wins_over_odd_data() {
        let body = br#"{"status":503,"data":"service unavailable"}"#;
        let response = CosmeticsResponse::from_slice(body).unwrap();

        assert_eq!(status_of(response.into_items()), Some(503));
    }

    #[test]
    fn test_fractional_status_is_rejected() {
        let body = br#"{"status":404.0,"data":[]}"#;
        let response = CosmeticsResponse::from_slice(body).unwrap();
        let result = response.into_items();

        match result {
            Err(DumpError::UnexpectedStatus(status)) => assert_eq!(status.as_f64(), Some(404.0)),
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_body_is_fetch_failure() {
        let body = b"<html>bad gateway</html>";
        let result = CosmeticsResponse::from_slice(body);

        assert!(matches!(result, Err(DumpError::FetchFailure(_))));
    }

    #[test]
    fn test_missing_status_is_fetch_failure() {
        let body = br#"{"data":[]}"#;
        let result = CosmeticsResponse::from_slice(body);

        assert!(matches!(result, Err(DumpError::FetchFailure(_))));
    }

    #[test]
    fn test_ok_status_without_data_is_fetch_failure() {
        let body = br#"{"status":200}"#;
        let result = CosmeticsResponse::from_slice(body).unwrap().into_items();

        assert!(matches!(result, Err(DumpError::FetchFailure(_))));
    }

    #[test]
    fn test_ok_status_with_non_list_data_is_fetch_failure() {
        let body = br#"{"status":200,"data":{"id":"a"}}"#;
        let result = CosmeticsResponse::from_slice(body).unwrap().into_items();

        assert!(matches!(result, Err(DumpError::FetchFailure(_))));
    }

    #[test]
    fn test_request_carries_endpoint_and_user_agent() {
        let config = DumpConfig {
            endpoint: String::from("http://localhost:9/cosmetics?responseOptions=ignore_null"),
            user_agent: String::from("cosmetics-dump/test"),
            ..DumpConfig::default()
        };
        let fetcher = CosmeticsFetcher::new(&config).unwrap();
        let request = fetcher.request().unwrap();

        assert_eq!(request.url().as_str(), config.endpoint);
        assert_eq!(request.headers()[USER_AGENT], "cosmetics-dump/test");
    }

    #[test]
    fn test_refused_connection_is_fetch_failure() {
        let config = DumpConfig {
            endpoint: String::from(REFUSED_ENDPOINT),
            ..DumpConfig::default()
        };
        let fetcher = CosmeticsFetcher::new(&config).unwrap();

        assert!(matches!(fetcher.fetch(), Err(DumpError::FetchFailure(_))));
    }
}
