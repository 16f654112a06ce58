use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use crate::config::credentials::redact_credentials;
use crate::errors::ProspectorError;
use super::provider::PlacesApi;
use super::types::{DetailsResponse, NearbySearch, NearbySearchResponse, SearchPage};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: &str, base_url: Option<&str>, timeout: Duration) -> Result<Self, ProspectorError> {
        if api_key.trim().is_empty() {
            return Err(ProspectorError::Config("Places API key is empty".into()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProspectorError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
        })
    }

    /// Strip the API key out of anything we are about to log or return.
    fn redact(&self, message: String) -> String {
        redact_credentials(&message, &[self.api_key.as_str()])
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProspectorError> {
        let resp = self.client
            .get(format!("{}/{}/json", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProspectorError::Network(self.redact(format!("{} request failed: {}", endpoint, e))))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProspectorError::PlacesApi(format!("{} returned HTTP {}", endpoint, status)));
        }

        resp.json::<T>().await
            .map_err(|e| ProspectorError::PlacesApi(self.redact(format!("Failed to parse {} response: {}", endpoint, e))))
    }
}

/// Turn a non-OK API status into an error, carrying the API's own message.
fn check_status(endpoint: &str, status: &str, error_message: Option<&str>) -> Result<(), ProspectorError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => {
            let status = if other.is_empty() { "UNKNOWN_STATUS" } else { other };
            let detail = error_message.map(|m| format!(": {}", m)).unwrap_or_default();
            Err(ProspectorError::PlacesApi(format!("{} failed with {}{}", endpoint, status, detail)))
        }
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn nearby_search(
        &self,
        search: &NearbySearch,
        page_token: Option<&str>,
    ) -> Result<SearchPage, ProspectorError> {
        let location = search.location();
        let radius = search.radius_meters.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("keyword", search.keyword.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let data: NearbySearchResponse = self.get_json("nearbysearch", &params).await?;
        check_status("nearbysearch", &data.status, data.error_message.as_deref())?;

        debug!(
            keyword = %search.keyword,
            results = data.results.len(),
            has_next = data.next_page_token.is_some(),
            "Nearby search page"
        );

        Ok(SearchPage {
            results: data.results,
            next_page_token: data.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, ProspectorError> {
        let params = [("place_id", place_id), ("fields", "formatted_phone_number")];
        let data: DetailsResponse = self.get_json("details", &params).await?;
        check_status("details", &data.status, data.error_message.as_deref())?;

        Ok(data.result
            .and_then(|r| r.formatted_phone_number)
            .filter(|p| !p.trim().is_empty()))
    }

    fn backend_name(&self) -> &str { "google" }
}
