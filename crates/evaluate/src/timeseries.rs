//! Per-(site, month, variable) summary statistics.

#![allow(dead_code)]

/// Summary statistics for a single (site, month, variable) cell.
#[derive(Debug, Clone)]
pub struct TimeseriesStats {
    pub mean: f64,
    pub sd: f64,
    pub skewness: Option<f64>,
    pub wet_days: usize,
    pub dry_days: usize,
    pub mean_wet_spell: f64,
    pub mean_dry_spell: f64,
}

/// Extract values for a specific month from a time series.
pub fn extract_monthly(data: &[f64], months: &[u8], target_month: u8) -> Vec<f64> {
    data.iter()
        .zip(months.iter())
        .filter(|&(_, m)| *m == target_month)
        .map(|(&v, _)| v)
        .collect()
}

/// Compute summary statistics for a single variable/month slice.
pub fn compute_timeseries_stats(
    data: &[f64],
    months: &[u8],
    month: u8,
    threshold: f64,
) -> TimeseriesStats {
    // Extract monthly values
    let monthly_data = extract_monthly(data, months, month);

    // Compute basic statistics
    let mean = zeus_stats::mean(&monthly_data);
    let sd = zeus_stats::sd(&monthly_data);
    let skewness = zeus_stats::skewness(&monthly_data);

    // Classify wet/dry days
    let wet_mask: Vec<bool> = monthly_data.iter().map(|&v| v >= threshold).collect();
    let wet_days = wet_mask.iter().filter(|&&w| w).count();
    let dry_days = wet_mask.iter().filter(|&&w| !w).count();

    // Compute spell lengths
    let (wet_spells, dry_spells) = zeus_stats::spell_lengths(&wet_mask);

    // Compute mean spell lengths
    let mean_wet_spell = if wet_spells.is_empty() {
        0.0
    } else {
        wet_spells.iter().sum::<usize>() as f64 / wet_spells.len() as f64
    };

    let mean_dry_spell = if dry_spells.is_empty() {
        0.0
    } else {
        dry_spells.iter().sum::<usize>() as f64 / dry_spells.len() as f64
    };

    TimeseriesStats {
        mean,
        sd,
        skewness,
        wet_days,
        dry_days,
        mean_wet_spell,
        mean_dry_spell,
    }
}
