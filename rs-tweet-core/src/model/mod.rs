//! Word-level Markov chain and tweet generation.
//!
//! This module provides:
//! - The deduplicated word registry owning every node (`Registry`)
//! - Nodes with weighted successor lists (`Node`)
//! - The chain built from a corpus (`MarkovChain`)
//! - Lazy random walks over the chain (`Walk`)
//! - A high-level, seeded tweet generator (`TweetGenerator`)

/// High-level generator producing tweets from a built chain.
///
/// Owns the seeded random generator of the run and reports degenerate
/// corpora per tweet.
pub mod generator;

/// The Markov chain: ingestion of token pairs, start-word selection and
/// walk creation.
pub mod chain;

/// Corpus tokenization and bounded ingestion.
pub mod ingest;

/// A single word with its weighted outgoing transitions.
pub mod node;

/// Arena owning every node, indexed by word text.
pub mod registry;

/// Lazy iterator emitting the words of a random walk.
pub mod walk;
