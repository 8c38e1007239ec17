use std::path::Path;

use rand::Rng;
use tracing::{debug, debug_span};

use super::ingest::fill_chain;
use super::node::{NodeId, is_terminal_word};
use super::registry::Registry;
use super::walk::Walk;
use crate::error::ChainError;
use crate::io::read_file;

/// Summary of a built chain, mostly for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainStats {
	/// Distinct words.
	pub words: usize,
	/// Distinct words ending a sentence.
	pub terminal_words: usize,
	/// Distinct `from -> to` pairs.
	pub edges: usize,
	/// Observed transitions (sum of all edge weights).
	pub transitions: usize,
}

/// A first-order word Markov chain.
///
/// The chain is built once from a corpus, then only read while generating.
/// It is never persisted: every run rebuilds it from scratch.
#[derive(Clone, Debug, Default)]
pub struct MarkovChain {
	registry: Registry,
}

impl MarkovChain {
	/// Creates an empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a chain from a corpus file.
	///
	/// # Errors
	/// - `ChainError::Io` if the file cannot be read
	/// - `ChainError::Allocation` if the chain cannot grow; the partial
	///   chain is dropped before returning
	pub fn from_file<P: AsRef<Path>>(filepath: P, words_to_read: Option<usize>) -> Result<Self, ChainError> {
		let path = filepath.as_ref();
		let _span = debug_span!("from_file", path = %path.display()).entered();

		let lines = read_file(path).map_err(|source| ChainError::Io { path: path.to_owned(), source })?;
		let mut chain = Self::new();
		fill_chain(&mut chain, &lines, words_to_read)?;
		Ok(chain)
	}

	/// Builds a chain from in-memory lines.
	pub fn from_lines<I, S>(lines: I, words_to_read: Option<usize>) -> Result<Self, ChainError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut chain = Self::new();
		fill_chain(&mut chain, lines, words_to_read)?;
		Ok(chain)
	}

	/// Returns the vocabulary of the chain.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Ingests one `(current, next)` token pair.
	///
	/// `current` is always registered. When it does not end a sentence and a
	/// follower exists, the follower is registered too and the transition
	/// between them is recorded.
	///
	/// Returns the handle of `current`.
	pub fn add_pair(&mut self, current: &str, next: Option<&str>) -> Result<NodeId, ChainError> {
		let from = self.registry.get_or_create(current)?;
		if is_terminal_word(current) {
			return Ok(from);
		}
		if let Some(next) = next {
			let to = self.registry.get_or_create(next)?;
			self.registry.record_transition(from, to)?;
		}
		Ok(from)
	}

	/// Picks a random non-terminal word to start a walk from.
	///
	/// Words are drawn uniformly and independently over insertion order until
	/// a non-terminal one comes up. After `len()` unsuccessful draws the
	/// search gives up and returns `None`, so a corpus made only of terminal
	/// words cannot hang. Draws may repeat, so a valid word can be missed.
	pub fn pick_start_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeId> {
		let size = self.registry.len();
		if size == 0 {
			return None;
		}

		let mut attempts = 0;
		loop {
			let position = rng.random_range(0..size);
			if let Some((id, node)) = self.registry.node_at(position) {
				if !node.is_terminal() {
					return Some(id);
				}
			}
			attempts += 1;
			if attempts >= size {
				debug!(attempts, "no start word found");
				return None;
			}
		}
	}

	/// Starts a lazy walk of at most `max_length` words from `start`.
	///
	/// A `None` start yields an empty walk.
	pub fn generate<'a, 'r, R: Rng + ?Sized>(
		&'a self,
		start: Option<NodeId>,
		max_length: usize,
		rng: &'r mut R,
	) -> Walk<'a, 'r, R> {
		Walk::new(&self.registry, start, max_length, rng)
	}

	/// Counts words, terminal words, edges and transitions.
	pub fn stats(&self) -> ChainStats {
		self.registry.iter().fold(ChainStats::default(), |mut stats, (_, node)| {
			stats.words += 1;
			stats.terminal_words += usize::from(node.is_terminal());
			stats.edges += node.successors().len();
			stats.transitions += node.total_weight();
			stats
		})
	}
}
