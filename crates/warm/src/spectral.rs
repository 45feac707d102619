//! Spectral peak identification and matching for the WARM filter.

/// A significant spectral peak identified in the global wavelet spectrum.
#[derive(Clone, Debug)]
pub(crate) struct Peak {
    /// Index into the GWS/periods arrays.
    #[allow(dead_code)]
    pub index: usize,
    /// Period at this peak.
    pub period: f64,
    /// Power at this peak.
    pub power: f64,
    /// Signal-to-noise ratio (power / significance threshold).
    pub snr: f64,
}

/// Spectral quality metrics for a simulated series.
#[derive(Clone, Debug)]
pub(crate) struct SpectralMetrics {
    /// Pearson correlation of log-GWS (None if insufficient data).
    pub spectral_cor: Option<f64>,
    /// Fraction of observed peaks matched in the simulation.
    pub peak_match_frac: f64,
}

/// Identify significant peaks in the global wavelet spectrum.
///
/// Finds local maxima that exceed the significance threshold, ranks them by
/// signal-to-noise ratio, and returns the top `n_max` peaks.
pub(crate) fn identify_significant_peaks(
    gws: &[f64],
    signif: &[f64],
    periods: &[f64],
    n_max: usize,
) -> Vec<Peak> {
    let len = gws.len();
    if len < 3 {
        return Vec::new();
    }

    // 1. Find local maxima that exceed significance.
    let mut candidates: Vec<Peak> = Vec::new();
    for i in 1..len - 1 {
        if gws[i] > gws[i - 1] && gws[i] > gws[i + 1] && gws[i] > signif[i] {
            let snr = gws[i] / signif[i].max(1e-12);
            candidates.push(Peak {
                index: i,
                period: periods[i],
                power: gws[i],
                snr,
            });
        }
    }

    // 2. Sort by SNR descending, then by power descending as tiebreaker.
    candidates.sort_by(|a, b| {
        b.snr
            .partial_cmp(&a.snr)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.power
                    .partial_cmp(&a.power)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    // 3. Take top n_max.
    candidates.truncate(n_max);
    candidates
}

/// Pearson correlation of log-transformed GWS vectors.
///
/// Returns `None` if the vectors differ in length, fewer than 3 finite pairs
/// remain after log-transformation, or the denominator is zero (constant
/// values).
pub(crate) fn spectral_correlation(gws_obs: &[f64], gws_sim: &[f64], eps: f64) -> Option<f64> {
    if gws_obs.len() != gws_sim.len() {
        return None;
    }

    // Log-transform with floor at eps.
    let log_obs: Vec<f64> = gws_obs.iter().map(|&v| v.max(eps).ln()).collect();
    let log_sim: Vec<f64> = gws_sim.iter().map(|&v| v.max(eps).ln()).collect();

    // Filter to finite pairs.
    let pairs: Vec<(f64, f64)> = log_obs
        .iter()
        .zip(log_sim.iter())
        .filter(|&(&a, &b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    // Inline Pearson correlation.
    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom: f64 = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

/// Fraction of observed peaks matched in a simulated GWS.
///
/// A peak is considered matched if there exists an index `j` in the simulated
/// spectrum whose period is within `period_tol` (on the log2 scale) and whose
/// log-power difference is within `mag_tol_log`.
///
/// Returns 1.0 if the peak list is empty.
pub(crate) fn peak_match_fraction(
    gws_sim: &[f64],
    periods: &[f64],
    peaks: &[Peak],
    period_tol: f64,
    mag_tol_log: f64,
    eps: f64,
) -> f64 {
    if peaks.is_empty() {
        return 1.0;
    }

    let mut matched = 0usize;

    for peak in peaks {
        let log2_peak_period = peak.period.log2();

        // Find the candidate with the highest simulated power within the
        // period tolerance window.
        let best = periods
            .iter()
            .enumerate()
            .filter(|&(j, &pj)| {
                j < gws_sim.len() && (pj.log2() - log2_peak_period).abs() <= period_tol
            })
            .max_by(|&(a_idx, _), &(b_idx, _)| {
                gws_sim[a_idx]
                    .partial_cmp(&gws_sim[b_idx])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some((j, _)) = best {
            let log_diff = ((gws_sim[j] + eps).ln() - (peak.power + eps).ln()).abs();
            if log_diff <= mag_tol_log {
                matched += 1;
            }
        }
    }

    matched as f64 / peaks.len() as f64
}
