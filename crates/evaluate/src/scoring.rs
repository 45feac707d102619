//! MAE-based scoring and ranking of realisations.

use crate::output::RealisationScore;
use crate::timeseries::TimeseriesStats;

/// Flatten timeseries stats into a vector of comparable values.
///
/// Produces: [mean, sd, skewness_or_0, wet_days, dry_days, mean_wet_spell, mean_dry_spell]
pub fn flatten_stats(stats: &TimeseriesStats) -> Vec<f64> {
    vec![
        stats.mean,
        stats.sd,
        stats.skewness.unwrap_or(0.0),
        stats.wet_days as f64,
        stats.dry_days as f64,
        stats.mean_wet_spell,
        stats.mean_dry_spell,
    ]
}

/// Compute per-realisation MAE scores from observed and simulated timeseries stats.
///
/// `obs_values` and `sim_values[r]` are parallel vectors of stat values
/// (one f64 per (site, month, variable, stat_name) cell).
/// `sim_values` has one entry per realisation.
pub fn score_realisations(
    obs_values: &[f64],
    sim_values: &[Vec<f64>],
    realisation_ids: &[u32],
) -> Vec<RealisationScore> {
    assert_eq!(sim_values.len(), realisation_ids.len());

    // Compute raw MAE for each realisation
    let raw_maes: Vec<(u32, f64)> = realisation_ids
        .iter()
        .zip(sim_values.iter())
        .map(|(&id, sim)| {
            assert_eq!(obs_values.len(), sim.len());
            let mae: f64 = obs_values
                .iter()
                .zip(sim.iter())
                .map(|(o, s)| (o - s).abs())
                .sum::<f64>()
                / obs_values.len() as f64;
            (id, mae)
        })
        .collect();

    // Find min and max for normalization
    let min_mae = raw_maes
        .iter()
        .map(|(_, mae)| mae)
        .copied()
        .fold(f64::INFINITY, f64::min);
    let max_mae = raw_maes
        .iter()
        .map(|(_, mae)| mae)
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    // Normalize
    let range = max_mae - min_mae;
    let normalized: Vec<(u32, f64, f64)> = raw_maes
        .iter()
        .map(|&(id, raw)| {
            let norm = if range.abs() < 1e-10 {
                0.0
            } else {
                (raw - min_mae) / range
            };
            (id, raw, norm)
        })
        .collect();

    // Sort by raw MAE ascending for ranking
    let mut sorted = normalized;
    sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

    // Assign ranks (handle ties)
    let mut scores: Vec<RealisationScore> = Vec::with_capacity(sorted.len());
    let mut current_rank = 1;
    for i in 0..sorted.len() {
        // Check if this is a tie with the previous entry
        if i > 0 && (sorted[i].1 - sorted[i - 1].1).abs() < 1e-10 {
            // Same MAE, same rank
            let prev_rank = scores[i - 1].rank;
            scores.push(RealisationScore {
                realisation: sorted[i].0,
                raw_mae: sorted[i].1,
                normalized_score: sorted[i].2,
                rank: prev_rank,
            });
        } else {
            scores.push(RealisationScore {
                realisation: sorted[i].0,
                raw_mae: sorted[i].1,
                normalized_score: sorted[i].2,
                rank: current_rank,
            });
        }
        current_rank += 1;
    }

    scores
}
