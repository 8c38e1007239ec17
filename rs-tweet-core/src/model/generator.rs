use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::error::ChainError;
use crate::model::chain::MarkovChain;
use crate::model::node::is_terminal_word;

/// One generated sequence of words.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tweet {
	pub words: Vec<String>,
}

impl Tweet {
	/// Number of words.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` if the tweet has no words.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Returns `true` if the last word ends a sentence.
	pub fn is_complete(&self) -> bool {
		self.words.last().is_some_and(|w| is_terminal_word(w))
	}
}

impl fmt::Display for Tweet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.words.join(" "))
	}
}

/// High-level tweet generator.
///
/// # Responsibilities
/// - Own a fully built `MarkovChain` (read-only from now on)
/// - Own the single random generator of the run, seeded once
/// - Turn walks into `Tweet`s and report degenerate corpora
#[derive(Debug)]
pub struct TweetGenerator {
	chain: MarkovChain,
	rng: StdRng,
	tweet_count: usize,
	max_length: usize,
}

impl TweetGenerator {
	/// Creates a generator over `chain` using the run parameters of `config`.
	pub fn new(chain: MarkovChain, config: &GenerationConfig) -> Self {
		let stats = chain.stats();
		debug!(
			words = stats.words,
			terminal_words = stats.terminal_words,
			edges = stats.edges,
			transitions = stats.transitions,
			seed = config.seed,
			"generator ready"
		);
		Self {
			chain,
			rng: StdRng::seed_from_u64(config.seed),
			tweet_count: config.tweet_count,
			max_length: config.max_length,
		}
	}

	/// Reads the corpus at `filepath` and builds a generator from it.
	///
	/// # Errors
	/// Returns the fatal errors of `MarkovChain::from_file`.
	pub fn from_file<P: AsRef<std::path::Path>>(filepath: P, config: &GenerationConfig) -> Result<Self, ChainError> {
		let chain = MarkovChain::from_file(filepath, config.words_to_read)?;
		Ok(Self::new(chain, config))
	}

	/// Returns the chain tweets are generated from.
	pub fn chain(&self) -> &MarkovChain {
		&self.chain
	}

	/// Generates one tweet.
	///
	/// # Errors
	/// - `ChainError::EmptyCorpus` if the chain has no words
	/// - `ChainError::NoStartNode` if no non-terminal start word was drawn
	pub fn tweet(&mut self) -> Result<Tweet, ChainError> {
		let registry_len = self.chain.registry().len();
		if registry_len == 0 {
			return Err(ChainError::EmptyCorpus);
		}

		let start = self
			.chain
			.pick_start_node(&mut self.rng)
			.ok_or(ChainError::NoStartNode { attempts: registry_len })?;

		let words = self
			.chain
			.generate(Some(start), self.max_length, &mut self.rng)
			.map(str::to_owned)
			.collect();
		Ok(Tweet { words })
	}

	/// Generates the configured number of tweets, in order.
	///
	/// A degenerate corpus produces one error per requested tweet; it never
	/// stops the sequence early.
	pub fn tweets(&mut self) -> Vec<Result<Tweet, ChainError>> {
		(0..self.tweet_count)
			.map(|i| {
				let tweet = self.tweet();
				if let Err(e) = &tweet {
					warn!(tweet = i + 1, error = %e, "no tweet generated");
				}
				tweet
			})
			.collect()
	}
}
