//! Orchestration functions that chain annual, year-subset, and daily stages.

use crate::config::ResampleConfig;
use crate::error::ResampleError;
use crate::obs_data::ObsData;
use crate::result::ResampleResult;
use tracing::debug_span;
use zeus_markov::{MarkovConfig, PrecipState};

/// Resamples a single simulated year (365 daily observation indices).
///
/// Chains: annual KNN -> year subset -> daily loop.
///
/// # Arguments
/// - `sim_annual_precip` — total annual precipitation for this simulated year
/// - `obs` — observed daily data with precomputed lookups
/// - `markov_config` — Markov chain configuration
/// - `initial_state` — precipitation state of the previous day (use `PrecipState::Dry` for year 1)
/// - `prev_obs_idx` — observation index of the previous day (None for year 1)
/// - `config` — resampler configuration
/// - `rng` — random number generator
#[tracing::instrument(skip_all, fields(sim_annual_precip, initial_state = ?initial_state, prev_obs_idx))]
#[allow(clippy::too_many_arguments)]
pub fn resample_year(
    sim_annual_precip: f64,
    obs: &ObsData,
    markov_config: &MarkovConfig,
    initial_state: PrecipState,
    prev_obs_idx: Option<usize>,
    config: &ResampleConfig,
    rng: &mut impl rand::Rng,
) -> Result<ResampleResult, ResampleError> {
    config.validate()?;

    let n = obs.n_obs_years();
    if n < 2 {
        return Err(ResampleError::InsufficientData { n, min: 2 });
    }

    // Derive simulated months and days from the calendar.
    let start = zeus_calendar::NoLeapDate::new(2000, config.year_start_month(), 1)?;
    let dates = zeus_calendar::noleap_sequence(start, 365);
    let sim_months: Vec<u8> = dates.iter().map(|d| d.month()).collect();
    let sim_days: Vec<u8> = dates.iter().map(|d| d.day()).collect();

    // Annual KNN year selection.
    let year_indices = crate::annual::select_annual_years(sim_annual_precip, obs, config, rng)?;

    // Build year subset with statistics and Markov model.
    let subset = crate::year_subset::YearSubset::build(&year_indices, obs, config, markov_config)?;

    // Daily resampling loop.
    crate::daily::resample_days(
        &subset,
        obs,
        &sim_months,
        &sim_days,
        initial_state,
        prev_obs_idx,
        config,
        rng,
    )
}

/// Resamples multiple years of daily observation indices.
///
/// Calls `resample_year` for each element in `sim_annual_precip`,
/// chaining Markov state and observation index across years.
///
/// Returns a flat `Vec<usize>` of length `sim_annual_precip.len() * 365`.
#[tracing::instrument(skip_all, fields(n_years = sim_annual_precip.len()))]
pub fn resample_dates(
    sim_annual_precip: &[f64],
    obs: &ObsData,
    markov_config: &MarkovConfig,
    config: &ResampleConfig,
    rng: &mut impl rand::Rng,
) -> Result<Vec<usize>, ResampleError> {
    config.validate()?;

    if sim_annual_precip.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(idx) = sim_annual_precip.iter().position(|v| !v.is_finite()) {
        return Err(ResampleError::NonFiniteInput {
            field: "sim_annual_precip",
            first_bad_index: Some(idx),
        });
    }

    let mut state = PrecipState::Dry;
    let mut prev_obs_idx: Option<usize> = None;
    let mut all_indices = Vec::with_capacity(sim_annual_precip.len() * 365);

    for (year_idx, &sim_precip) in sim_annual_precip.iter().enumerate() {
        let _yr = debug_span!("year", idx = year_idx, target_precip = sim_precip).entered();
        let result = resample_year(
            sim_precip,
            obs,
            markov_config,
            state,
            prev_obs_idx,
            config,
            rng,
        )
        .map_err(|e| match e {
            ResampleError::NoCandidates { day, month, .. } => ResampleError::NoCandidates {
                day,
                month,
                year: Some(year_idx),
            },
            other => other,
        })?;
        all_indices.extend_from_slice(result.indices());
        state = result.final_state();
        prev_obs_idx = Some(result.last_obs_idx());
    }

    Ok(all_indices)
}
