//! Search request and record types

use crate::types::{JsonValue, OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};

// ============================================================================
// Location
// ============================================================================

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Location {
    /// Create a new location
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Render as the `lat,lng` form used in query strings
    pub fn to_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

// ============================================================================
// Search Area
// ============================================================================

/// How the service should bound and order results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchArea {
    /// Results within a radius in meters
    Radius(u32),
    /// Results ordered by distance from the center
    RankByDistance,
}

// ============================================================================
// Search Request
// ============================================================================

/// Immutable description of one nearby search
///
/// Build it once with the constructors and `with_*` methods, then hand a
/// reference to the paginator. Nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    location: Location,
    area: SearchArea,
    types: Vec<String>,
    keyword: Option<String>,
}

impl SearchRequest {
    /// Search within `radius_m` meters of `location`
    pub fn within_radius(location: Location, radius_m: u32) -> Self {
        Self {
            location,
            area: SearchArea::Radius(radius_m),
            types: Vec::new(),
            keyword: None,
        }
    }

    /// Search around `location`, ordered by distance
    pub fn by_distance(location: Location) -> Self {
        Self {
            location,
            area: SearchArea::RankByDistance,
            types: Vec::new(),
            keyword: None,
        }
    }

    /// Add a single place type filter
    #[must_use]
    pub fn with_type(mut self, place_type: impl Into<String>) -> Self {
        if let Some(t) = place_type.into().trim().to_string().none_if_empty() {
            self.types.push(t);
        }
        self
    }

    /// Add several place type filters
    #[must_use]
    pub fn with_types<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        types.into_iter().fold(self, |request, t| request.with_type(t))
    }

    /// Add type filters from a comma-separated list, e.g. `hospital,pharmacy`
    #[must_use]
    pub fn with_types_csv(self, csv: &str) -> Self {
        self.with_types(csv.split(','))
    }

    /// Set a keyword filter
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into().none_if_empty();
        self
    }

    /// Center of the search
    pub fn location(&self) -> Location {
        self.location
    }

    /// Search area mode
    pub fn area(&self) -> SearchArea {
        self.area
    }

    /// Type filters in the order they were added
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Keyword filter
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Query parameters for the initial request (credentials excluded)
    pub fn query_params(&self) -> StringMap {
        let mut params = StringMap::new();
        params.insert("location".to_string(), self.location.to_param());

        match self.area {
            SearchArea::Radius(meters) => {
                params.insert("radius".to_string(), meters.to_string());
            }
            SearchArea::RankByDistance => {
                params.insert("rankby".to_string(), "distance".to_string());
            }
        }

        if !self.types.is_empty() {
            params.insert("type".to_string(), self.types.join("|"));
        }

        if let Some(keyword) = &self.keyword {
            params.insert("keyword".to_string(), keyword.clone());
        }

        params
    }
}

// ============================================================================
// Place Record
// ============================================================================

/// One result entry, passed through exactly as the service sent it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceRecord(JsonValue);

impl PlaceRecord {
    /// Raw field lookup; `None` for missing fields and non-object entries
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Display name
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(JsonValue::as_str)
    }

    /// Stable place identifier
    pub fn place_id(&self) -> Option<&str> {
        self.get("place_id").and_then(JsonValue::as_str)
    }

    /// Average user rating
    pub fn rating(&self) -> Option<f64> {
        self.get("rating").and_then(JsonValue::as_f64)
    }

    /// Coordinates from `geometry.location`
    pub fn location(&self) -> Option<Location> {
        let loc = self.get("geometry")?.get("location")?;
        Some(Location::new(
            loc.get("lat")?.as_f64()?,
            loc.get("lng")?.as_f64()?,
        ))
    }
}

impl From<JsonValue> for PlaceRecord {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}
