//! Stochastic traversal over a primed chain.

use std::hash::Hash;

use rand::Rng;

use crate::chain::Chain;
use crate::state::State;

/// One traversal run over a primed [`Chain`].
///
/// A walk owns its cursor and RNG but only borrows the chain, so any number
/// of runs can traverse the same trained model independently. The cursor
/// starts at `Begin`, advances on every [`step`](Walk::step), and absorbs
/// at `End` until [`reset`](Walk::reset).
#[derive(Debug)]
pub struct Walk<'c, T, R> {
    chain: &'c Chain<T>,
    cursor: State<T>,
    rng: R,
}

impl<'c, T: Eq + Hash + Clone, R: Rng> Walk<'c, T, R> {
    pub(crate) fn new(chain: &'c Chain<T>, rng: R) -> Self {
        Self {
            chain,
            cursor: State::Begin,
            rng,
        }
    }

    /// Advances the cursor by one sampled transition.
    ///
    /// Draws from the cursor's compiled distribution by inverse-CDF. A
    /// cursor with no recorded outgoing transitions is an implicit end and
    /// forces the transition to `End`. Returns the produced token, or
    /// `None` once the cursor reaches `End`; the walk then stays exhausted
    /// until [`reset`](Walk::reset).
    pub fn step(&mut self) -> Option<T> {
        if self.cursor.is_end() {
            return None;
        }
        let next = match self.chain.distribution(&self.cursor) {
            Some(dist) => dist.sample(&mut self.rng).cloned().unwrap_or(State::End),
            None => State::End,
        };
        self.cursor = next;
        match &self.cursor {
            State::Token(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Returns the cursor to the `Begin` sentinel.
    ///
    /// Training data and the compiled table are untouched; the next
    /// [`step`](Walk::step) starts a fresh run.
    pub fn reset(&mut self) {
        self.cursor = State::Begin;
    }

    /// Returns the current cursor state.
    pub fn cursor(&self) -> &State<T> {
        &self.cursor
    }

    /// Collects stepped tokens until exhaustion or `max_tokens`.
    ///
    /// `None` removes the length bound: the walk runs until it reaches
    /// `End`, which on a chain whose cycles never reach `End` may be
    /// forever. The cursor is not reset first; a walk that already reached
    /// `End` yields an empty sequence.
    pub fn generate(&mut self, max_tokens: Option<usize>) -> Vec<T> {
        let mut sequence = Vec::new();
        while max_tokens.is_none_or(|limit| sequence.len() < limit) {
            match self.step() {
                Some(token) => sequence.push(token),
                None => break,
            }
        }
        sequence
    }
}

impl<T: Eq + Hash + Clone, R: Rng> Iterator for Walk<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.step()
    }
}
