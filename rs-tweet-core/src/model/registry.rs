use std::collections::HashMap;
use std::ops::Index;

use tracing::warn;

use super::node::{Node, NodeId};
use crate::error::ChainError;

/// Deduplicated vocabulary of a chain.
///
/// The `Registry` is the only owner and the only factory of `Node`s. Nodes
/// live in an insertion-ordered arena and are referred to by `NodeId`, so
/// successor lists never own anything and dropping the registry releases the
/// whole chain at once.
///
/// # Invariants
/// - Each distinct text maps to exactly one node
/// - `index` and `nodes` always describe the same set of words
/// - Every `NodeId` stored in a successor list points into `nodes`
#[derive(Clone, Debug, Default)]
pub struct Registry {
	/// Nodes in insertion order.
	nodes: Vec<Node>,
	/// Text to position in `nodes`.
	index: HashMap<String, NodeId>,
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the node for `text`, creating it if it does not exist yet.
	///
	/// Never returns two different handles for equal text.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the arena or the index cannot grow.
	pub fn get_or_create(&mut self, text: &str) -> Result<NodeId, ChainError> {
		if let Some(id) = self.find(text) {
			return Ok(id);
		}

		self.nodes.try_reserve(1)?;
		self.index.try_reserve(1)?;

		let id = NodeId(self.nodes.len());
		self.nodes.push(Node::new(text));
		self.index.insert(text.to_owned(), id);
		Ok(id)
	}

	/// Read-only lookup by exact text.
	pub fn find(&self, text: &str) -> Option<NodeId> {
		self.index.get(text).copied()
	}

	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns `true` if no word was registered yet.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Returns the node behind `id`, or `None` for a foreign handle.
	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	/// Returns the node at `position` in insertion order.
	pub fn node_at(&self, position: usize) -> Option<(NodeId, &Node)> {
		self.nodes.get(position).map(|node| (NodeId(position), node))
	}

	/// Iterates over all nodes in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
		self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
	}

	/// Records one observed transition `from -> to`.
	///
	/// Terminal words end the chain, so a transition leaving a terminal
	/// node is dropped (and logged) instead of being stored.
	///
	/// # Errors
	/// - `ChainError::ForeignNode` if either handle was not produced by this
	///   registry; nothing is recorded
	/// - `ChainError::Allocation` if the successor list cannot grow
	pub fn record_transition(&mut self, from: NodeId, to: NodeId) -> Result<(), ChainError> {
		if to.0 >= self.nodes.len() {
			return Err(ChainError::ForeignNode(to));
		}
		let node = self.nodes.get_mut(from.0).ok_or(ChainError::ForeignNode(from))?;
		if node.is_terminal() {
			warn!(from = node.text(), "ignoring transition leaving a terminal word");
			return Ok(());
		}
		node.add_transition(to)?;
		Ok(())
	}
}

/// # Panics
/// Panics if `id` was not produced by this registry; use `Registry::get`
/// for a checked lookup.
impl Index<NodeId> for Registry {
	type Output = Node;

	fn index(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_text_yields_same_node() {
		let mut registry = Registry::new();
		let a = registry.get_or_create("cat").unwrap();
		let b = registry.get_or_create("dog").unwrap();
		let c = registry.get_or_create("cat").unwrap();
		assert_eq!(a, c);
		assert_ne!(a, b);
		assert_eq!(registry.len(), 2);
	}

	#[test]
	fn text_comparison_is_exact() {
		let mut registry = Registry::new();
		registry.get_or_create("The").unwrap();
		registry.get_or_create("the").unwrap();
		registry.get_or_create("the.").unwrap();
		assert_eq!(registry.len(), 3);
	}

	#[test]
	fn find_does_not_create() {
		let mut registry = Registry::new();
		assert_eq!(registry.find("ghost"), None);
		assert!(registry.is_empty());
		let id = registry.get_or_create("ghost").unwrap();
		assert_eq!(registry.find("ghost"), Some(id));
	}

	#[test]
	fn iteration_follows_insertion_order() {
		let mut registry = Registry::new();
		for word in ["b", "a", "c", "a"] {
			registry.get_or_create(word).unwrap();
		}
		let words: Vec<&str> = registry.iter().map(|(_, n)| n.text()).collect();
		assert_eq!(words, ["b", "a", "c"]);
		assert_eq!(registry.node_at(1).map(|(_, n)| n.text()), Some("a"));
		assert!(registry.node_at(3).is_none());
	}

	#[test]
	fn record_transition_accumulates() {
		let mut registry = Registry::new();
		let the = registry.get_or_create("the").unwrap();
		let cat = registry.get_or_create("cat").unwrap();
		registry.record_transition(the, cat).unwrap();
		registry.record_transition(the, cat).unwrap();
		assert_eq!(registry[the].successors().len(), 1);
		assert_eq!(registry[the].total_weight(), 2);
	}

	#[test]
	fn transition_from_terminal_is_ignored() {
		let mut registry = Registry::new();
		let end = registry.get_or_create("end.").unwrap();
		let next = registry.get_or_create("next").unwrap();
		registry.record_transition(end, next).unwrap();
		assert!(registry[end].successors().is_empty());
	}

	#[test]
	fn transition_with_foreign_handle_is_rejected() {
		let mut registry = Registry::new();
		let word = registry.get_or_create("word").unwrap();
		let foreign = NodeId(7);

		let err = registry.record_transition(word, foreign).unwrap_err();
		assert!(matches!(err, ChainError::ForeignNode(id) if id == foreign));
		let err = registry.record_transition(foreign, word).unwrap_err();
		assert!(matches!(err, ChainError::ForeignNode(id) if id == foreign));

		assert!(registry[word].successors().is_empty());
		assert!(registry.get(foreign).is_none());
	}
}
