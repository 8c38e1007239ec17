use std::iter::FusedIterator;

use rand::Rng;

use super::node::NodeId;
use super::registry::Registry;

/// Lazy random walk over a chain.
///
/// Each call to `next` emits the current word, then moves to a weighted
/// random successor. The walk ends:
/// - right after a terminal word
/// - after `max_length` words
/// - at a non-terminal word that has no successors
///
/// The walk only reads the registry. Emitted words borrow the registry,
/// not the random generator, so they outlive the walk itself.
pub struct Walk<'a, 'r, R: Rng + ?Sized> {
	registry: &'a Registry,
	rng: &'r mut R,
	current: Option<NodeId>,
	remaining: usize,
}

impl<'a, 'r, R: Rng + ?Sized> Walk<'a, 'r, R> {
	pub(crate) fn new(registry: &'a Registry, start: Option<NodeId>, max_length: usize, rng: &'r mut R) -> Self {
		// A foreign start handle yields an empty walk
		let current = start.filter(|&id| registry.get(id).is_some());
		Self { registry, rng, current, remaining: max_length }
	}
}

impl<'a, R: Rng + ?Sized> Iterator for Walk<'a, '_, R> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			self.current = None;
			return None;
		}
		let id = self.current.take()?;
		let registry: &'a Registry = self.registry;
		let node = registry.get(id)?;
		self.remaining -= 1;

		if !node.is_terminal() && self.remaining > 0 {
			self.current = node.pick_next(&mut *self.rng);
		}
		Some(node.text())
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self.current {
			Some(_) if self.remaining > 0 => (1, Some(self.remaining)),
			_ => (0, Some(0)),
		}
	}
}

impl<R: Rng + ?Sized> FusedIterator for Walk<'_, '_, R> {}
