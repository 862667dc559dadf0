use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Dense numeric identifier for a location (its index in the network).
pub type LocationId = usize;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Number of suggestions attached to an unknown location error.
const MAX_SUGGESTIONS: usize = 3;

/// A named point that fares are priced between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Fixed set of locations for the lifetime of a process.
#[derive(Debug, Clone, Default)]
pub struct Network {
    locations: Vec<Location>,
    name_to_id: HashMap<String, LocationId>,
}

static BUILTIN: Lazy<Network> = Lazy::new(|| {
    let locations = BUILTIN_AIRPORTS
        .iter()
        .enumerate()
        .map(|(id, (name, latitude, longitude))| Location {
            id,
            name: (*name).to_string(),
            latitude: *latitude,
            longitude: *longitude,
        })
        .collect();
    Network::new(locations).expect("built-in airport catalogue is well formed")
});

const BUILTIN_AIRPORTS: [(&str, f64, f64); 20] = [
    ("Mumbai", 19.0760, 72.8777),
    ("Delhi", 28.6139, 77.2090),
    ("Bengaluru", 12.9716, 77.5946),
    ("Chennai", 13.0827, 80.2707),
    ("Kolkata", 22.5726, 88.3639),
    ("Hyderabad", 17.3850, 78.4867),
    ("Pune", 18.5204, 73.8567),
    ("Ahmedabad", 23.0225, 72.5714),
    ("Surat", 21.1702, 72.8311),
    ("Jaipur", 26.9124, 75.7873),
    ("Lucknow", 26.8467, 80.9462),
    ("Nagpur", 21.1458, 79.0882),
    ("Indore", 22.7196, 75.8577),
    ("Bhopal", 23.2599, 77.4126),
    ("Patna", 25.5941, 85.1376),
    ("Vadodara", 22.3072, 73.1812),
    ("Guwahati", 26.1445, 91.7362),
    ("Srinagar", 34.0837, 74.7973),
    ("Thiruvananthapuram", 8.5241, 76.9366),
    ("Coimbatore", 11.0168, 76.9558),
];

impl Network {
    /// Build a network, checking that ids are dense and names are unique.
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        let mut name_to_id = HashMap::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            if location.id != index {
                return Err(Error::InvalidNetwork {
                    message: format!(
                        "location '{}' has id {} but sits at position {}",
                        location.name, location.id, index
                    ),
                });
            }
            if name_to_id.insert(location.name.clone(), location.id).is_some() {
                return Err(Error::InvalidNetwork {
                    message: format!("duplicate location name '{}'", location.name),
                });
            }
        }

        Ok(Self {
            locations,
            name_to_id,
        })
    }

    /// The built-in catalogue of twenty Indian airports.
    pub fn builtin() -> &'static Network {
        &BUILTIN
    }

    /// Load a network from a JSON array of locations.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let locations: Vec<Location> = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), count = locations.len(), "loaded location network");
        Self::new(locations)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Lookup a location name by identifier.
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|location| location.name.as_str())
    }

    /// Lookup a location identifier by its case-sensitive name.
    pub fn id_by_name(&self, name: &str) -> Option<LocationId> {
        self.name_to_id.get(name).copied()
    }

    /// Great-circle distance between two locations, if both exist.
    pub fn distance_km(&self, from: LocationId, to: LocationId) -> Option<f64> {
        let a = self.location(from)?.coordinates();
        let b = self.location(to)?.coordinates();
        Some(a.distance_to(&b))
    }

    /// Resolve user input to a location id.
    ///
    /// Accepts a numeric id, an exact name, or a case-insensitive name. Unknown
    /// names carry fuzzy suggestions in the returned error.
    pub fn resolve(&self, input: &str) -> Result<LocationId> {
        let input = input.trim();

        if let Ok(id) = input.parse::<LocationId>() {
            return if id < self.len() {
                Ok(id)
            } else {
                Err(Error::UnknownLocationId { id })
            };
        }

        if let Some(id) = self.id_by_name(input) {
            return Ok(id);
        }

        if let Some(location) = self
            .locations
            .iter()
            .find(|location| location.name.eq_ignore_ascii_case(input))
        {
            return Ok(location.id);
        }

        Err(Error::UnknownLocation {
            name: input.to_string(),
            suggestions: self.fuzzy_matches(input, MAX_SUGGESTIONS),
        })
    }

    /// Names similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
                (score, location.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
