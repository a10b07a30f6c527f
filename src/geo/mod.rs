// src/geo/mod.rs

mod provinces;

use serde::Deserialize;

/// Latitude/longitude pair. `(0, 0)` means the location was not resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinatePair {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinatePair {
    pub const UNRESOLVED: CoordinatePair = CoordinatePair {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_resolved(&self) -> bool {
        *self != Self::UNRESOLVED
    }
}

/// One gazetteer entry as it appears in a YAML config file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GazetteerEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Ordered region-name → coordinate table.
///
/// Lookup walks the entries in insertion order and stops at the first key
/// contained in the location, so a generic key listed before a more
/// specific one shadows it (e.g. `RIAU` before `KEP. RIAU`).
#[derive(Debug, Clone, PartialEq)]
pub struct Gazetteer {
    entries: Vec<(String, CoordinatePair)>,
}

impl Gazetteer {
    /// Build from `(name, coords)` pairs. Names are uppercased once here.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CoordinatePair)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, coords)| (name.as_ref().trim().to_uppercase(), coords))
                .collect(),
        }
    }

    /// The 34 Indonesian provinces tracked by the price portal.
    pub fn indonesia() -> Self {
        Self::new(
            provinces::PROVINCES
                .iter()
                .map(|&(name, lat, lon)| (name, CoordinatePair::new(lat, lon))),
        )
    }

    pub fn from_entries(entries: &[GazetteerEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|e| (e.name.as_str(), CoordinatePair::new(e.latitude, e.longitude))),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CoordinatePair)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Coordinates of the first key that appears (case-insensitively) in
    /// `location`, or [`CoordinatePair::UNRESOLVED`].
    pub fn resolve(&self, location: &str) -> CoordinatePair {
        let haystack = location.to_uppercase();
        self.entries
            .iter()
            .find(|(key, _)| !key.is_empty() && haystack.contains(key.as_str()))
            .map(|(_, coords)| *coords)
            .unwrap_or(CoordinatePair::UNRESOLVED)
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::indonesia()
    }
}
