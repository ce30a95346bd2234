//! Projection of Place Details into the flat output row.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::PlaceDetails;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=Google&query_place_id=";

/// One output row. Field order is the column order of the CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRow {
    pub google_place_url: String,
    pub business_name: Option<String>,
    pub business_website: Option<String>,
    pub business_phone: Option<String>,
    pub intl_phone: Option<String>,
    /// Reserved classification column. Always empty.
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub sub_types: String,
    pub full_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub google_id: String,
}

impl PlaceRow {
    /// Builds a row from a details payload. `requested_id` stands in for a
    /// missing `place_id`.
    #[must_use]
    pub fn from_details(details: &PlaceDetails, requested_id: &str) -> Self {
        let google_id = details
            .place_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(requested_id)
            .to_owned();

        let google_place_url = match details.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => maps_link_for(&google_id),
        };

        let (latitude, longitude) = lat_lng(details.geometry.as_ref());

        Self {
            google_place_url,
            business_name: details.name.clone(),
            business_website: details.website.clone(),
            business_phone: details.formatted_phone_number.clone(),
            intl_phone: details.international_phone_number.clone(),
            category: None,
            sub_types: join_types(details.types.as_ref()),
            full_address: details.formatted_address.clone(),
            latitude,
            longitude,
            rating: details.rating.as_ref().and_then(Value::as_f64),
            user_ratings_total: details.user_ratings_total.as_ref().and_then(Value::as_u64),
            google_id,
        }
    }
}

/// Google Maps search link that resolves to a single place.
#[must_use]
pub fn maps_link_for(place_id: &str) -> String {
    format!("{MAPS_SEARCH_URL}{place_id}")
}

fn join_types(types: Option<&Value>) -> String {
    let Some(Value::Array(items)) = types else {
        return String::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn lat_lng(geometry: Option<&Value>) -> (Option<f64>, Option<f64>) {
    let location = geometry.and_then(|g| g.get("location"));
    let coord = |key: &str| location.and_then(|l| l.get(key)).and_then(Value::as_f64);
    (coord("lat"), coord("lng"))
}
