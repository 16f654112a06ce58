use async_trait::async_trait;
use crate::errors::ProspectorError;
use super::types::{NearbySearch, SearchPage};

#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Fetch one page of nearby results. `page_token` selects a continuation page.
    async fn nearby_search(
        &self,
        search: &NearbySearch,
        page_token: Option<&str>,
    ) -> Result<SearchPage, ProspectorError>;

    /// Look up the formatted phone number of a place, if it has one.
    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, ProspectorError>;

    /// Backend name for logging
    fn backend_name(&self) -> &str;
}
