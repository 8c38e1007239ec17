use std::collections::TryReserveError;
use std::fmt;

use rand::Rng;

/// Character marking the end of a sentence.
pub const TERMINAL_CHAR: char = '.';

/// Non-owning handle to a `Node` stored in a `Registry`.
///
/// Handles are only meaningful for the registry that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the node in the registry's insertion order.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One outgoing edge of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Successor {
	/// Word that followed.
	pub target: NodeId,
	/// How many times this transition was observed. Always >= 1.
	pub weight: usize,
}

/// Returns `true` if `word` ends a sentence.
pub fn is_terminal_word(word: &str) -> bool {
	word.ends_with(TERMINAL_CHAR)
}

/// A distinct word of the corpus and its weighted outgoing transitions.
///
/// Conceptually, this is a state of the Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Each target appears at most once in `successors`
/// - Each weight is strictly positive
/// - A terminal node never gets successors
#[derive(Clone, Debug)]
pub struct Node {
	/// Owned copy of the word.
	text: String,
	/// Outgoing transitions, in the order they were first observed.
	successors: Vec<Successor>,
}

impl Node {
	pub(crate) fn new(text: &str) -> Self {
		Self {
			text: text.to_owned(),
			successors: Vec::new(),
		}
	}

	/// Returns the word this node stands for.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Terminal-ness is derived from the text, never stored.
	pub fn is_terminal(&self) -> bool {
		is_terminal_word(&self.text)
	}

	/// Returns the outgoing transitions, in first-observed order.
	pub fn successors(&self) -> &[Successor] {
		&self.successors
	}

	/// Sum of all successor weights, i.e. the number of observed transitions
	/// leaving this node.
	pub fn total_weight(&self) -> usize {
		self.successors.iter().map(|s| s.weight).sum()
	}

	/// Records one occurrence of a transition toward `target`.
	///
	/// - If the transition already exists, its weight is increased.
	/// - Otherwise, a new successor is appended with a weight of 1.
	///
	/// The scan is O(k) in the out-degree of the node.
	pub(crate) fn add_transition(&mut self, target: NodeId) -> Result<(), TryReserveError> {
		if let Some(existing) = self.successors.iter_mut().find(|s| s.target == target) {
			existing.weight += 1;
			return Ok(());
		}
		self.successors.try_reserve(1)?;
		self.successors.push(Successor { target, weight: 1 });
		Ok(())
	}

	/// Picks the next node using weighted random sampling.
	///
	/// A value is drawn uniformly in `[0, total_weight)` and the successor
	/// list is walked in order, subtracting each weight until the draw falls
	/// inside an entry. Ties are therefore broken by insertion order and the
	/// result is reproducible for a given random sequence.
	///
	/// Returns `None` if the node has no successors.
	pub fn pick_next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeId> {
		let total = self.total_weight();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);

		let mut fallback = None;
		for successor in &self.successors {
			if r < successor.weight {
				return Some(successor.target);
			}
			r -= successor.weight;
			fallback = Some(successor.target);
		}

		// Unreachable while weights sum to `total`
		fallback
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn node_with(text: &str, edges: &[(usize, usize)]) -> Node {
		let mut node = Node::new(text);
		for &(target, times) in edges {
			for _ in 0..times {
				node.add_transition(NodeId(target)).unwrap();
			}
		}
		node
	}

	#[test]
	fn terminal_is_derived_from_last_char() {
		assert!(Node::new("end.").is_terminal());
		assert!(Node::new(".").is_terminal());
		assert!(!Node::new("end").is_terminal());
		assert!(!Node::new("e.g").is_terminal());
	}

	#[test]
	fn repeated_transition_accumulates_weight() {
		let node = node_with("the", &[(1, 3), (2, 1)]);
		assert_eq!(
			node.successors(),
			&[
				Successor { target: NodeId(1), weight: 3 },
				Successor { target: NodeId(2), weight: 1 },
			]
		);
		assert_eq!(node.total_weight(), 4);
	}

	#[test]
	fn pick_next_on_empty_node_is_none() {
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(Node::new("alone").pick_next(&mut rng), None);
	}

	#[test]
	fn pick_next_with_single_successor_always_returns_it() {
		let node = node_with("a", &[(5, 2)]);
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..50 {
			assert_eq!(node.pick_next(&mut rng), Some(NodeId(5)));
		}
	}

	#[test]
	fn pick_next_is_reproducible_for_a_seed() {
		let node = node_with("a", &[(1, 1), (2, 5), (3, 2)]);
		let mut first = StdRng::seed_from_u64(99);
		let mut second = StdRng::seed_from_u64(99);
		let a: Vec<_> = (0..32).map(|_| node.pick_next(&mut first)).collect();
		let b: Vec<_> = (0..32).map(|_| node.pick_next(&mut second)).collect();
		assert_eq!(a, b);
	}

	#[test]
	fn pick_next_follows_weights() {
		let node = node_with("a", &[(1, 1), (2, 9)]);
		let mut rng = StdRng::seed_from_u64(2024);
		let heavy = (0..10_000)
			.filter(|_| node.pick_next(&mut rng) == Some(NodeId(2)))
			.count();
		// Expected 9000
		assert!((8_600..=9_400).contains(&heavy), "heavy = {heavy}");
	}
}
