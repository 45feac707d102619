//! Multi-site synthetic data wrapper.

use crate::error::EvaluateError;
use std::collections::BTreeMap;
use zeus_io::SyntheticWeather;

/// Multi-site synthetic weather wrapper with validation.
#[derive(Debug)]
pub struct MultiSiteSynthetic<'a> {
    sites: BTreeMap<String, Vec<SyntheticWeather<'a>>>,
}

impl<'a> MultiSiteSynthetic<'a> {
    /// Create a new multi-site synthetic wrapper.
    ///
    /// # Validation
    ///
    /// - At least one site with at least one realisation
    /// - All sites must have the same number of realisations
    /// - All realisations at a site must have the same length
    pub fn new(sites: BTreeMap<String, Vec<SyntheticWeather<'a>>>) -> Result<Self, EvaluateError> {
        let mut errors = Vec::new();

        // Check non-empty
        if sites.is_empty() {
            errors.push("no sites provided".to_string());
        } else {
            // Check at least one realisation per site
            for (site, realisations) in &sites {
                if realisations.is_empty() {
                    errors.push(format!("site '{}' has no realisations", site));
                }
            }

            // Check all sites have same number of realisations
            if let Some((_, first_realisations)) = sites.iter().next() {
                let expected_count = first_realisations.len();
                for (site, realisations) in &sites {
                    if realisations.len() != expected_count {
                        errors.push(format!(
                            "site '{}' has {} realisations, expected {}",
                            site,
                            realisations.len(),
                            expected_count
                        ));
                    }
                }
            }

            // Check all realisations at each site have same length
            for (site, realisations) in &sites {
                if let Some(first) = realisations.first() {
                    let expected_len = first.len();
                    for (idx, realisation) in realisations.iter().enumerate() {
                        if realisation.len() != expected_len {
                            errors.push(format!(
                                "site '{}' realisation {} has length {}, expected {}",
                                site,
                                idx,
                                realisation.len(),
                                expected_len
                            ));
                        }
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(EvaluateError::Validation {
                count: errors.len(),
                details: errors.join("; "),
            });
        }

        Ok(Self { sites })
    }

    /// Returns a reference to all sites.
    pub fn sites(&self) -> &BTreeMap<String, Vec<SyntheticWeather<'a>>> {
        &self.sites
    }

    /// Get realisations for a specific site.
    pub fn get(&self, key: &str) -> Option<&Vec<SyntheticWeather<'a>>> {
        self.sites.get(key)
    }

    /// Returns the number of sites.
    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    /// Returns the number of realisations (same for all sites).
    pub fn n_realisations(&self) -> usize {
        self.sites.values().next().map(|v| v.len()).unwrap_or(0)
    }

    /// Returns an iterator over site names.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.sites.keys()
    }

    /// Returns an iterator over (site name, realisations) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<SyntheticWeather<'a>>)> {
        self.sites.iter()
    }
}
