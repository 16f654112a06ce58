//! Lead harvesting: paginate a nearby search, enrich each result with a
//! phone number, and upsert everything into the lead store.
//!
//! A failed search page stops pagination but whatever was already collected
//! is still stored. A failed phone lookup only costs that lead its phone.

use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;
use crate::config::PlacesConfig;
use crate::db::Database;
use crate::errors::ProspectorError;
use crate::models::ScannedLead;
use crate::places::types::LatLng;
use crate::places::{NearbySearch, PlaceResult, PlacesApi};
use tracing::{debug, info, warn};

/// Largest radius the nearby search endpoint accepts.
pub const MAX_RADIUS_METERS: u32 = 50_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanSummary {
    pub keyword: String,
    /// Results written to the store, rediscovered places included.
    pub processed: usize,
    pub pages: u32,
    /// Results dropped because they carried no place_id or no coordinates.
    pub skipped: usize,
    pub phones_found: usize,
    /// Why pagination stopped early, if it did.
    pub search_error: Option<String>,
}

pub struct Harvester {
    db: Database,
    places: Arc<dyn PlacesApi>,
    page_token_delay: Duration,
    max_pages: u32,
}

impl Harvester {
    pub fn new(db: Database, places: Arc<dyn PlacesApi>, config: &PlacesConfig) -> Self {
        Self {
            db,
            places,
            page_token_delay: config.page_token_delay(),
            max_pages: config.max_pages.max(1),
        }
    }

    pub async fn scan(&self, search: &NearbySearch) -> Result<ScanSummary, ProspectorError> {
        self.scan_with_progress(search, |_, _, _| {}).await
    }

    /// Run one scan. `progress` is called before each result is processed
    /// with its 1-based index, the total, and the business name.
    pub async fn scan_with_progress<F>(
        &self,
        search: &NearbySearch,
        mut progress: F,
    ) -> Result<ScanSummary, ProspectorError>
    where
        F: FnMut(usize, usize, &str) + Send,
    {
        validate_search(search)?;
        info!(
            keyword = %search.keyword,
            lat = search.latitude,
            lng = search.longitude,
            radius = search.radius_meters,
            backend = self.places.backend_name(),
            "Starting scan"
        );

        let mut summary = ScanSummary { keyword: search.keyword.clone(), ..Default::default() };
        let results = self.collect_pages(search, &mut summary).await;

        let total = results.len();
        for (index, place) in results.into_iter().enumerate() {
            let name = place.name.clone().unwrap_or_default();
            progress(index + 1, total, &name);

            let Some(place_id) = place.place_id.clone().filter(|id| !id.is_empty()) else {
                warn!(name = %name, "Skipping result without place_id");
                summary.skipped += 1;
                continue;
            };
            let Some(location) = place.coordinates() else {
                warn!(place_id = %place_id, name = %name, "Skipping result without coordinates");
                summary.skipped += 1;
                continue;
            };

            let phone = match self.places.phone_number(&place_id).await {
                Ok(phone) => phone,
                Err(e) => {
                    debug!(place_id = %place_id, error = %e, "Phone lookup failed");
                    None
                }
            };
            if phone.is_some() {
                summary.phones_found += 1;
            }

            self.db.upsert_from_scan(&to_scanned_lead(place_id, place, location, phone, &search.keyword))?;
            summary.processed += 1;
        }

        info!(
            keyword = %summary.keyword,
            processed = summary.processed,
            pages = summary.pages,
            phones = summary.phones_found,
            partial = summary.search_error.is_some(),
            "Scan complete"
        );
        Ok(summary)
    }

    async fn collect_pages(&self, search: &NearbySearch, summary: &mut ScanSummary) -> Vec<PlaceResult> {
        let mut results = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            if page_token.is_some() {
                // Continuation tokens are rejected until the API has had time to activate them.
                tokio::time::sleep(self.page_token_delay).await;
            }

            match self.places.nearby_search(search, page_token.as_deref()).await {
                Ok(page) => {
                    summary.pages += 1;
                    debug!(page = summary.pages, results = page.results.len(), "Collected page");
                    results.extend(page.results);

                    match page.next_page_token {
                        Some(token) if summary.pages < self.max_pages => page_token = Some(token),
                        Some(_) => {
                            info!(max_pages = self.max_pages, "Page limit reached");
                            break;
                        }
                        None => break,
                    }
                }
                Err(e) => {
                    warn!(page = summary.pages + 1, error = %e, "Search failed, keeping results collected so far");
                    summary.search_error = Some(e.to_string());
                    break;
                }
            }
        }

        results
    }
}

fn to_scanned_lead(
    place_id: String,
    place: PlaceResult,
    location: LatLng,
    phone: Option<String>,
    keyword: &str,
) -> ScannedLead {
    ScannedLead {
        place_id,
        name: place.name.unwrap_or_default(),
        address: place.vicinity.unwrap_or_default(),
        phone,
        rating: place.rating.unwrap_or(0.0),
        latitude: location.lat,
        longitude: location.lng,
        source_keyword: keyword.to_string(),
    }
}

pub fn validate_search(search: &NearbySearch) -> Result<(), ProspectorError> {
    if !(-90.0..=90.0).contains(&search.latitude) {
        return Err(ProspectorError::InvalidInput(format!("Latitude {} is out of range", search.latitude)));
    }
    if !(-180.0..=180.0).contains(&search.longitude) {
        return Err(ProspectorError::InvalidInput(format!("Longitude {} is out of range", search.longitude)));
    }
    if search.radius_meters == 0 || search.radius_meters > MAX_RADIUS_METERS {
        return Err(ProspectorError::InvalidInput(format!(
            "Radius must be between 1 and {} meters",
            MAX_RADIUS_METERS
        )));
    }
    if search.keyword.trim().is_empty() {
        return Err(ProspectorError::InvalidInput("Keyword must not be empty".into()));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::fake::{page, place, FakePlaces};
    use crate::models::LeadStatus;

    fn config() -> PlacesConfig {
        PlacesConfig { page_token_delay_ms: 0, ..Default::default() }
    }

    fn search(keyword: &str) -> NearbySearch {
        NearbySearch {
            latitude: 32.52044,
            longitude: -117.01972,
            radius_meters: 1000,
            keyword: keyword.to_string(),
        }
    }

    fn harvester(db: &Database, fake: Arc<FakePlaces>, config: &PlacesConfig) -> Harvester {
        Harvester::new(db.clone(), fake, config)
    }

    #[tokio::test]
    async fn test_two_pages_taqueria() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![
            Ok(page("first", 20, Some("tok-2"))),
            Ok(page("second", 7, None)),
        ]));

        let summary = harvester(&db, fake.clone(), &config()).scan(&search("TAQUERIA")).await.unwrap();
        assert_eq!(summary.processed, 27);
        assert_eq!(summary.pages, 2);
        assert!(summary.search_error.is_none());

        let leads = db.list_leads(None).unwrap();
        assert_eq!(leads.len(), 27);
        assert!(leads.iter().all(|l| l.source_keyword == "TAQUERIA"));
        assert!(leads.iter().all(|l| l.status == LeadStatus::New));

        let tokens = fake.tokens_seen.lock().unwrap().clone();
        assert_eq!(tokens, vec![None, Some("tok-2".to_string())]);
    }

    #[tokio::test]
    async fn test_search_failure_keeps_collected_results() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![
            Ok(page("first", 20, Some("tok-2"))),
            Err("INVALID_REQUEST".to_string()),
        ]));

        let summary = harvester(&db, fake, &config()).scan(&search("FONDA")).await.unwrap();
        assert_eq!(summary.processed, 20);
        assert_eq!(summary.pages, 1);
        assert!(summary.search_error.unwrap().contains("INVALID_REQUEST"));
        assert_eq!(db.list_leads(None).unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_first_page_failure_processes_nothing() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![Err("REQUEST_DENIED".to_string())]));

        let summary = harvester(&db, fake, &config()).scan(&search("FONDA")).await.unwrap();
        assert_eq!(summary.processed, 0);
        assert!(summary.search_error.is_some());
    }

    #[tokio::test]
    async fn test_phone_failure_does_not_abort_batch() {
        let db = Database::in_memory().unwrap();
        let mut fake = FakePlaces::with_pages(vec![Ok(page("p", 3, None))]);
        fake.failing_phones.insert("p-0".to_string());
        let fake = Arc::new(fake);

        let summary = harvester(&db, fake.clone(), &config()).scan(&search("CAFETERIA")).await.unwrap();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.phones_found, 2);
        assert_eq!(fake.lookups.lock().unwrap().len(), 3);

        assert!(db.get_lead("p-0").unwrap().unwrap().phone.is_none());
        assert_eq!(db.get_lead("p-1").unwrap().unwrap().phone.as_deref(), Some("664-p-1"));
        assert_eq!(db.get_lead("p-2").unwrap().unwrap().phone.as_deref(), Some("664-p-2"));
    }

    #[tokio::test]
    async fn test_max_pages_bounds_loop() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![
            Ok(page("a", 2, Some("t1"))),
            Ok(page("b", 2, Some("t2"))),
            Ok(page("c", 2, Some("t3"))),
            Ok(page("d", 2, Some("t4"))),
        ]));

        let summary = harvester(&db, fake.clone(), &config()).scan(&search("FONDA")).await.unwrap();
        assert_eq!(summary.pages, 3);
        assert_eq!(summary.processed, 6);
        assert_eq!(fake.tokens_seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rescan_counts_conflicts_and_keeps_status() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![Ok(page("x", 2, None))]));
        harvester(&db, fake, &config()).scan(&search("TAQUERIA")).await.unwrap();
        db.set_status("x-0", LeadStatus::Contacted, Some("Left a flyer")).unwrap();

        let fake = Arc::new(FakePlaces::with_pages(vec![Ok(page("x", 2, None))]));
        let summary = harvester(&db, fake, &config()).scan(&search("RESTAURANTE")).await.unwrap();
        assert_eq!(summary.processed, 2);

        let lead = db.get_lead("x-0").unwrap().unwrap();
        assert_eq!(lead.source_keyword, "RESTAURANTE");
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.notes.as_deref(), Some("Left a flyer"));
        assert_eq!(db.list_leads(None).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_results_without_place_id_are_skipped() {
        let db = Database::in_memory().unwrap();
        let mut nameless = place("ignored", "No Id Diner");
        nameless.place_id = None;
        let fake = Arc::new(FakePlaces::with_pages(vec![Ok(crate::places::SearchPage {
            results: vec![place("ok-1", "Fonda Uno"), nameless],
            next_page_token: None,
        })]));

        let summary = harvester(&db, fake, &config()).scan(&search("FONDA")).await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn test_results_without_coordinates_are_skipped() {
        let db = Database::in_memory().unwrap();
        let mut nowhere = place("nowhere-1", "Lost Lonches");
        nowhere.geometry = None;
        let mut empty_geometry = place("nowhere-2", "Fonda Fantasma");
        empty_geometry.geometry = Some(crate::places::types::Geometry { location: None });
        let fake = Arc::new(FakePlaces::with_pages(vec![Ok(crate::places::SearchPage {
            results: vec![place("ok-1", "Fonda Uno"), nowhere, empty_geometry],
            next_page_token: None,
        })]));

        let summary = harvester(&db, fake.clone(), &config()).scan(&search("FONDA")).await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 2);
        assert!(db.get_lead("nowhere-1").unwrap().is_none());
        assert!(db.get_lead("nowhere-2").unwrap().is_none());
        assert_eq!(*fake.lookups.lock().unwrap(), vec!["ok-1".to_string()]);
    }

    #[tokio::test]
    async fn test_waits_before_using_token() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![
            Ok(page("a", 1, Some("t1"))),
            Ok(page("b", 1, None)),
        ]));
        let config = PlacesConfig { page_token_delay_ms: 50, ..Default::default() };

        let start = std::time::Instant::now();
        harvester(&db, fake, &config).scan(&search("FONDA")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_progress_reports_each_item() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::with_pages(vec![Ok(page("p", 3, None))]));
        let mut seen = Vec::new();

        harvester(&db, fake, &config())
            .scan_with_progress(&search("FONDA"), |i, total, name| seen.push((i, total, name.to_string())))
            .await
            .unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (1, 3, "p 0".to_string()));
        assert_eq!(seen[2].0, 3);
    }

    #[tokio::test]
    async fn test_invalid_search_rejected_before_calls() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakePlaces::default());
        let mut bad = search("FONDA");
        bad.radius_meters = 0;

        let result = harvester(&db, fake.clone(), &config()).scan(&bad).await;
        assert!(matches!(result, Err(ProspectorError::InvalidInput(_))));
        assert!(fake.tokens_seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_validate_search_bounds() {
        assert!(validate_search(&search("FONDA")).is_ok());
        let mut s = search("FONDA");
        s.latitude = -91.0;
        assert!(validate_search(&s).is_err());
        let mut s = search("FONDA");
        s.longitude = 181.0;
        assert!(validate_search(&s).is_err());
        let mut s = search("  ");
        assert!(validate_search(&s).is_err());
        s.keyword = "FONDA".into();
        s.radius_meters = MAX_RADIUS_METERS + 1;
        assert!(validate_search(&s).is_err());
    }
}
