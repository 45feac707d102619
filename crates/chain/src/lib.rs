//! First-order Markov chain over arbitrary token types.
//!
//! This crate trains a chain from observed token sequences and generates
//! new, statistically plausible sequences by stochastic traversal.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │   remember    │────▶│     prime      │────▶│      walk        │
//!  │  (observe)    │     │  (compile P)   │     │  (draw tokens)   │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use calliope_chain::Chain;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut chain = Chain::new();
//! chain.train_sequence(["the", "cat", "sat"].map(str::to_owned));
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let sequence = chain.generate(Some(10), &mut rng).unwrap();
//! assert_eq!(sequence, ["the", "cat", "sat"]);
//! ```

pub mod chain;
pub mod distribution;
pub mod error;
pub mod state;
pub mod walk;

pub use chain::Chain;
pub use distribution::Distribution;
pub use error::ChainError;
pub use state::State;
pub use walk::Walk;
