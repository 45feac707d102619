//! Annual KNN year selection.

use crate::config::ResampleConfig;
use crate::error::ResampleError;
use crate::obs_data::ObsData;
use zeus_knn::{KnnConfig, knn_sample};

/// Selects historical years by annual KNN on observed annual precipitation.
///
/// Returns indices into `obs.unique_water_years()` / `obs.annual_precip()`.
/// May contain duplicates (with-replacement sampling).
#[tracing::instrument(skip(obs, config, rng), fields(target = sim_precip))]
#[allow(dead_code)]
pub(crate) fn select_annual_years(
    sim_precip: f64,
    obs: &ObsData,
    config: &ResampleConfig,
    rng: &mut impl rand::Rng,
) -> Result<Vec<usize>, ResampleError> {
    let n_years = obs.n_obs_years();
    let k = ((n_years as f64).sqrt().ceil() as usize).max(1);
    let knn_config = KnnConfig::new(k)
        .with_n(config.annual_knn_n())
        .with_sampling(config.sampling().clone())
        .with_epsilon(config.epsilon());

    let result = knn_sample(
        obs.annual_precip(),
        1,
        &[sim_precip],
        &[1.0],
        &knn_config,
        rng,
    )?;

    Ok(result.indices().to_vec())
}
