//! Markov-chain tweet generation library.
//!
//! This crate builds a first-order word Markov chain from a text corpus and
//! generates bounded-length sentences ("tweets") by weighted random walk:
//! - Deduplicated word registry with arena-owned nodes
//! - Weighted transitions accumulated from consecutive words
//! - Bounded start-word selection and weighted next-word sampling
//! - Reproducible generation from a single seed
//!
//! The chain lives in memory only and is rebuilt on every run.

/// Chain, walks and generation.
pub mod model;

/// Run parameters.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (corpus loading).
///
/// Not exposed
pub(crate) mod io;

pub use config::{DEFAULT_MAX_LENGTH, GenerationConfig};
pub use error::ChainError;
pub use model::chain::{ChainStats, MarkovChain};
pub use model::generator::{Tweet, TweetGenerator};
pub use model::node::{Node, NodeId, Successor};
pub use model::registry::Registry;
