use serde::Deserialize;

/// Parameters of one nearby search. Pagination reuses them unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: u32,
    pub keyword: String,
}

impl NearbySearch {
    pub fn location(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// One page of nearby search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub results: Vec<PlaceResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    /// Short street address as returned by nearby search.
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub geometry: Option<Geometry>,
}

impl PlaceResult {
    /// Coordinates of the place, if the API returned any.
    pub fn coordinates(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Raw nearby search body.
#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub status: String,
    pub error_message: Option<String>,
}

/// Raw place details body, restricted to the fields we request.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub result: Option<DetailsResult>,
    #[serde(default)]
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResult {
    pub formatted_phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_response_parses_google_shape() {
        let body = serde_json::json!({
            "html_attributions": [],
            "next_page_token": "tok-2",
            "results": [{
                "place_id": "ChIJ123",
                "name": "Tacos Kokopelli",
                "vicinity": "Calle Estado 10, Tijuana",
                "rating": 4.8,
                "geometry": {"location": {"lat": 32.52, "lng": -117.03}},
                "types": ["restaurant", "food"]
            }],
            "status": "OK"
        });
        let parsed: NearbySearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.next_page_token.as_deref(), Some("tok-2"));
        let place = &parsed.results[0];
        assert_eq!(place.place_id.as_deref(), Some("ChIJ123"));
        assert_eq!(place.coordinates(), Some(LatLng { lat: 32.52, lng: -117.03 }));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let body = serde_json::json!({"results": [{"place_id": "x"}], "status": "OK"});
        let parsed: NearbySearchResponse = serde_json::from_value(body).unwrap();
        let place = &parsed.results[0];
        assert!(place.rating.is_none());
        assert!(place.coordinates().is_none());
        assert!(parsed.next_page_token.is_none());
    }

    #[test]
    fn test_location_param() {
        let search = NearbySearch {
            latitude: 32.52044,
            longitude: -117.01972,
            radius_meters: 1000,
            keyword: "TAQUERIA".into(),
        };
        assert_eq!(search.location(), "32.52044,-117.01972");
    }
}
