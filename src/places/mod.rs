pub mod google;
pub mod provider;
pub mod types;

pub use google::GooglePlacesClient;
pub use provider::PlacesApi;
pub use types::{NearbySearch, PlaceResult, SearchPage};
