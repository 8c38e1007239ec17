use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::node::NodeId;

/// Errors raised while building a chain or generating from it.
///
/// Two classes coexist here:
/// - fatal errors (`Allocation`, `ForeignNode`, `Io`) abort the build; the
///   caller simply drops whatever was built so far
/// - degenerate-corpus errors (`EmptyCorpus`, `NoStartNode`) only mean that
///   a single tweet could not be produced
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChainError {
	#[error("out of memory while growing the chain: {0}")]
	Allocation(#[from] TryReserveError),

	#[error("the chain holds no words")]
	EmptyCorpus,

	#[error("no non-terminal start word found after {attempts} draws")]
	NoStartNode { attempts: usize },

	#[error("node {0} does not belong to this registry")]
	ForeignNode(NodeId),

	#[error("failed to read corpus {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl ChainError {
	/// Returns `true` when the error must abort the whole run.
	pub fn is_fatal(&self) -> bool {
		matches!(self, ChainError::Allocation(_) | ChainError::ForeignNode(_) | ChainError::Io { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn degenerate_corpus_errors_are_not_fatal() {
		assert!(!ChainError::EmptyCorpus.is_fatal());
		assert!(!ChainError::NoStartNode { attempts: 3 }.is_fatal());
	}

	#[test]
	fn io_error_is_fatal_and_names_the_path() {
		let err = ChainError::Io {
			path: PathBuf::from("missing.txt"),
			source: io::Error::new(io::ErrorKind::NotFound, "nope"),
		};
		assert!(err.is_fatal());
		assert!(err.to_string().contains("missing.txt"));
	}

	#[test]
	fn foreign_node_is_fatal_and_names_the_handle() {
		let err = ChainError::ForeignNode(NodeId(12));
		assert!(err.is_fatal());
		assert!(err.to_string().contains("#12"));
	}

	#[test]
	fn allocation_error_is_fatal() {
		let mut v: Vec<u8> = Vec::new();
		let reserve = v.try_reserve(usize::MAX).unwrap_err();
		assert!(ChainError::from(reserve).is_fatal());
	}
}
