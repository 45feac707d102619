//! Compiled probability distributions over destination states.

use rand::Rng;

/// A discrete probability distribution over destination states.
///
/// Entries keep the order in which destinations were first observed during
/// training, so sampling under a seeded RNG is reproducible. Each
/// probability is in (0, 1] and the entries sum to 1.0 within
/// floating-point tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<S> {
    entries: Vec<(S, f64)>,
}

impl<S> Distribution<S> {
    /// Constructs a distribution directly from `(destination, probability)`
    /// pairs in enumeration order.
    pub(crate) fn from_entries(entries: Vec<(S, f64)>) -> Self {
        Self { entries }
    }

    /// Returns the number of distinct destinations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no destinations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(destination, probability)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.entries.iter().map(|(state, p)| (state, *p))
    }

    /// Returns the sum of all destination probabilities.
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Samples a destination by inverse-CDF over the enumeration order.
    ///
    /// Draws a uniform value in [0, 1) and returns the first destination
    /// whose cumulative probability strictly exceeds the draw. Falls back
    /// to the last destination if floating-point rounding leaves the total
    /// mass short of the draw.
    ///
    /// Returns `None` only when the distribution is empty.
    pub fn sample(&self, rng: &mut impl Rng) -> Option<&S> {
        let u: f64 = rng.random();
        let mut cumulative = 0.0;
        for (state, p) in &self.entries {
            cumulative += p;
            if cumulative > u {
                return Some(state);
            }
        }
        self.entries.last().map(|(state, _)| state)
    }
}

impl<S: PartialEq> Distribution<S> {
    /// Returns the probability of transitioning to `destination`, if
    /// recorded.
    pub fn probability(&self, destination: &S) -> Option<f64> {
        self.entries
            .iter()
            .find(|(state, _)| state == destination)
            .map(|(_, p)| *p)
    }
}
