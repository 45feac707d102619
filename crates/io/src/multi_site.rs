//! Multi-site observed data with grid metadata.

use std::collections::BTreeMap;

use crate::error::IoError;
use crate::observed::ObservedData;

// ---------------------------------------------------------------------------
// GridMetadata
// ---------------------------------------------------------------------------

/// Spatial metadata describing a collection of observation sites.
///
/// Stores per-cell longitude and latitude arrays whose lengths must be equal.
/// Construction fails with [`IoError::DimensionMismatch`] when the coordinate
/// arrays differ in length.
#[derive(Debug, Clone)]
pub struct GridMetadata {
    lons: Vec<f64>,
    lats: Vec<f64>,
}

impl GridMetadata {
    /// Create a new `GridMetadata` after validating coordinate array lengths.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `lons.len() != lats.len()`.
    pub fn new(lons: Vec<f64>, lats: Vec<f64>) -> Result<Self, IoError> {
        if lons.len() != lats.len() {
            return Err(IoError::DimensionMismatch {
                name: "latitude".into(),
                expected: lons.len(),
                got: lats.len(),
            });
        }

        Ok(Self { lons, lats })
    }

    /// Per-cell longitude values.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Per-cell latitude values.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Total number of grid cells.
    pub fn n_cells(&self) -> usize {
        self.lons.len()
    }
}

// ---------------------------------------------------------------------------
// MultiSiteData
// ---------------------------------------------------------------------------

/// Collection of observed data across multiple grid cells, with spatial metadata.
///
/// Each entry in the `sites` map corresponds to one grid cell. Construction
/// validates that the number of sites equals `grid.n_cells()` and that every
/// site has the same number of time steps.
#[derive(Debug, Clone)]
pub struct MultiSiteData {
    sites: BTreeMap<String, ObservedData>,
    grid: GridMetadata,
}

impl MultiSiteData {
    /// Create a new `MultiSiteData` after validating site count and timestep uniformity.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `sites.len() != grid.n_cells()`.
    ///
    /// Returns [`IoError::Validation`] if not all sites share the same number
    /// of time steps.
    pub fn new(sites: BTreeMap<String, ObservedData>, grid: GridMetadata) -> Result<Self, IoError> {
        // Check site count matches grid cell count.
        if sites.len() != grid.n_cells() {
            return Err(IoError::DimensionMismatch {
                name: "sites".into(),
                expected: grid.n_cells(),
                got: sites.len(),
            });
        }

        // Check that all sites have the same number of time steps.
        if let Some((first_key, first_obs)) = sites.iter().next() {
            let expected_len = first_obs.len();
            let mut mismatches = Vec::new();

            for (key, obs) in &sites {
                if key == first_key {
                    continue;
                }
                if obs.len() != expected_len {
                    mismatches.push(format!(
                        "site '{}' has {} timesteps (expected {} from '{}')",
                        key,
                        obs.len(),
                        expected_len,
                        first_key,
                    ));
                }
            }

            if !mismatches.is_empty() {
                return Err(IoError::Validation {
                    count: mismatches.len(),
                    details: mismatches.join("; "),
                });
            }
        }

        Ok(Self { sites, grid })
    }

    /// Look up a single site by key.
    pub fn get(&self, key: &str) -> Option<&ObservedData> {
        self.sites.get(key)
    }

    /// Reference to the full site map.
    pub fn sites(&self) -> &BTreeMap<String, ObservedData> {
        &self.sites
    }

    /// Reference to the grid metadata.
    pub fn grid(&self) -> &GridMetadata {
        &self.grid
    }

    /// Number of sites in the collection.
    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    /// Number of time steps shared by all sites.
    ///
    /// Returns 0 when the collection is empty.
    pub fn n_timesteps(&self) -> usize {
        self.sites.values().next().map_or(0, |obs| obs.len())
    }

    /// Iterator over site keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.sites.keys()
    }

    /// Iterator over `(key, observed_data)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ObservedData)> {
        self.sites.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
