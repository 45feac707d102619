//! Markov chain state simulation.

use crate::error::MarkovError;
use crate::state::PrecipState;
use crate::transition::MonthlyTransitions;

/// Simulates a sequence of precipitation states.
///
/// # Arguments
///
/// * `transitions` - Monthly transition matrices.
/// * `sim_months` - 1-indexed month for each simulated day.
/// * `initial` - The state of the day before the first simulated day.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// A vector of [`PrecipState`] values with the same length as `sim_months`.
pub fn simulate_states(
    transitions: &MonthlyTransitions,
    sim_months: &[u8],
    initial: PrecipState,
    rng: &mut impl rand::Rng,
) -> Vec<PrecipState> {
    let mut out = vec![PrecipState::Dry; sim_months.len()];
    // Delegate to _into; unwrap is safe because we sized the buffer correctly.
    simulate_states_into(transitions, sim_months, initial, rng, &mut out)
        .expect("buffer length matches sim_months length");
    out
}

/// Simulates precipitation states into a pre-allocated buffer.
///
/// # Arguments
///
/// * `transitions` - Monthly transition matrices.
/// * `sim_months` - 1-indexed month for each simulated day.
/// * `initial` - The state of the day before the first simulated day.
/// * `rng` - Random number generator.
/// * `out` - Pre-allocated output buffer; must have the same length as `sim_months`.
///
/// # Errors
///
/// Returns [`MarkovError::BufferLengthMismatch`] if `out.len() != sim_months.len()`.
pub fn simulate_states_into(
    transitions: &MonthlyTransitions,
    sim_months: &[u8],
    initial: PrecipState,
    rng: &mut impl rand::Rng,
    out: &mut [PrecipState],
) -> Result<(), MarkovError> {
    if out.len() != sim_months.len() {
        return Err(MarkovError::BufferLengthMismatch {
            expected: sim_months.len(),
            got: out.len(),
        });
    }
    let mut prev = initial;
    for (i, &m) in sim_months.iter().enumerate() {
        let next = transitions.for_month(m).sample(prev, rng);
        out[i] = next;
        prev = next;
    }
    Ok(())
}
