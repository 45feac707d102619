//! Training and probability compilation for the first-order chain.

use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

use crate::distribution::Distribution;
use crate::error::ChainError;
use crate::state::State;
use crate::walk::Walk;

/// A first-order Markov chain over tokens of type `T`.
///
/// The chain keeps two representations of its training data:
///
/// - the **observation multiset**: for every source state, the ordered list
///   of every destination ever recorded, duplicates retained;
/// - the **probability table**: for every source state, a [`Distribution`]
///   mapping each distinct destination to `count / total`, compiled
///   wholesale from the multiset.
///
/// Recompiling after every observation would cost O(observations) per call,
/// so the representations are allowed to drift apart inside a batch window:
/// [`begin_training`](Chain::begin_training) clears the primed flag,
/// [`remember`](Chain::remember) then records without recompiling, and
/// [`prime`](Chain::prime) recompiles once at the end. Outside a batch
/// window every mutation keeps the table in sync eagerly.
///
/// Traversal requires a primed chain; see [`walk`](Chain::walk).
#[derive(Debug, Clone)]
pub struct Chain<T> {
    /// Raw observations per source, in recording order.
    observed: HashMap<State<T>, Vec<State<T>>>,
    /// Compiled probabilities; in sync with `observed` whenever `primed`.
    table: HashMap<State<T>, Distribution<State<T>>>,
    /// Sync flag between the two representations.
    primed: bool,
}

impl<T: Eq + Hash + Clone> Chain<T> {
    /// Creates an empty chain.
    ///
    /// An empty chain is primed: both representations are trivially in
    /// sync.
    pub fn new() -> Self {
        Self {
            observed: HashMap::new(),
            table: HashMap::new(),
            primed: true,
        }
    }

    /// Records one observed transition.
    ///
    /// Appends `destination` to the multiset bucket for `source`, creating
    /// the bucket if absent. When the chain is primed on entry the table is
    /// recompiled immediately afterwards, so ad-hoc calls always leave the
    /// chain consistent; inside a batch window the recompilation is
    /// deferred to [`prime`](Chain::prime).
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EndAsSource`] when `source` is the `End`
    /// sentinel and [`ChainError::BeginAsDestination`] when `destination`
    /// is the `Begin` sentinel; neither transition can occur in a trained
    /// sequence.
    pub fn remember(
        &mut self,
        source: State<T>,
        destination: State<T>,
    ) -> Result<(), ChainError> {
        if source.is_end() {
            return Err(ChainError::EndAsSource);
        }
        if destination.is_begin() {
            return Err(ChainError::BeginAsDestination);
        }
        self.record(source, destination);
        Ok(())
    }

    /// Appends one observation without sentinel checks; callers uphold the
    /// boundary rules.
    fn record(&mut self, source: State<T>, destination: State<T>) {
        let recompile = self.primed;
        self.observed.entry(source).or_default().push(destination);
        if recompile {
            self.prime();
        }
    }

    /// Opens a batch-training window.
    ///
    /// Subsequent [`remember`](Chain::remember) calls skip the eager
    /// recompilation until [`prime`](Chain::prime) closes the window.
    /// Idempotent.
    pub fn begin_training(&mut self) {
        self.primed = false;
    }

    /// Recompiles the probability table from the observation multiset and
    /// marks the chain primed.
    ///
    /// The table is rebuilt wholesale: for each source,
    /// `probability(destination) = count / bucket length`, with
    /// destinations enumerated in first-observation order. Priming an
    /// already primed chain recomputes identical values.
    pub fn prime(&mut self) {
        self.table.clear();
        for (source, bucket) in &self.observed {
            self.table.insert(source.clone(), compile_bucket(bucket));
        }
        self.primed = true;
    }

    /// Trains on one complete token sequence.
    ///
    /// Opens a batch window, brackets the tokens with the `Begin` and `End`
    /// sentinels, records every adjacent pair, then primes. This is the
    /// standard ingestion path; the bracketing cannot violate the sentinel
    /// rules, so it is infallible. An empty sequence records the single
    /// transition `Begin -> End`.
    pub fn train_sequence(&mut self, tokens: impl IntoIterator<Item = T>) {
        self.begin_training();
        let mut previous = State::Begin;
        for token in tokens {
            let next = State::Token(token);
            self.record(previous, next.clone());
            previous = next;
        }
        self.record(previous, State::End);
        self.prime();
    }

    /// Returns true when the probability table reflects every observation.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Returns the compiled distribution for `source`, if any.
    ///
    /// Inside a batch window this is the pre-batch table; observations
    /// recorded since [`begin_training`](Chain::begin_training) become
    /// visible only after [`prime`](Chain::prime).
    pub fn distribution(&self, source: &State<T>) -> Option<&Distribution<State<T>>> {
        self.table.get(source)
    }

    /// Returns the compiled probability of `source -> destination`, if
    /// recorded.
    pub fn probability(&self, source: &State<T>, destination: &State<T>) -> Option<f64> {
        self.table.get(source)?.probability(destination)
    }

    /// Returns the raw observation bucket for `source`: every recorded
    /// destination in recording order, duplicates retained.
    pub fn observations(&self, source: &State<T>) -> Option<&[State<T>]> {
        self.observed.get(source).map(Vec::as_slice)
    }

    /// Iterates over every source state with at least one observation.
    pub fn sources(&self) -> impl Iterator<Item = &State<T>> {
        self.observed.keys()
    }

    /// Returns the number of distinct source states.
    pub fn n_sources(&self) -> usize {
        self.observed.len()
    }

    /// Returns the total number of recorded transitions.
    pub fn n_observations(&self) -> usize {
        self.observed.values().map(Vec::len).sum()
    }

    /// Returns true when nothing has been trained.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Starts a traversal run at the `Begin` sentinel.
    ///
    /// Each run owns its cursor and RNG, so any number of walks can
    /// traverse the same chain independently.
    ///
    /// # Errors
    ///
    /// Fails with [`ChainError::NotPrimed`] when a batch window is still
    /// open: a stale table must never be sampled. While the returned walk
    /// borrows the chain, the training methods are unreachable (they take
    /// `&mut self`), so a run can never observe staleness mid-flight.
    pub fn walk<R: Rng>(&self, rng: R) -> Result<Walk<'_, T, R>, ChainError> {
        if !self.primed {
            return Err(ChainError::NotPrimed);
        }
        Ok(Walk::new(self, rng))
    }

    /// Generates one sequence with a fresh walk.
    ///
    /// Equivalent to `walk(rng)?.generate(max_tokens)`; see
    /// [`Walk::generate`] for the termination rules.
    ///
    /// # Errors
    ///
    /// Fails with [`ChainError::NotPrimed`] when a batch window is still
    /// open.
    pub fn generate<R: Rng>(
        &self,
        max_tokens: Option<usize>,
        rng: R,
    ) -> Result<Vec<T>, ChainError> {
        Ok(self.walk(rng)?.generate(max_tokens))
    }
}

impl<T: Eq + Hash + Clone> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles one multiset bucket into a normalized distribution.
///
/// Destinations keep first-observation order; each probability is the
/// destination's occurrence count divided by the bucket length.
fn compile_bucket<S: Eq + Hash + Clone>(bucket: &[S]) -> Distribution<S> {
    let total = bucket.len() as f64;
    let mut entries: Vec<(S, f64)> = Vec::new();
    let mut index: HashMap<&S, usize> = HashMap::new();
    for destination in bucket {
        match index.get(destination) {
            Some(&i) => entries[i].1 += 1.0,
            None => {
                index.insert(destination, entries.len());
                entries.push((destination.clone(), 1.0));
            }
        }
    }
    for (_, count) in &mut entries {
        *count /= total;
    }
    Distribution::from_entries(entries)
}
