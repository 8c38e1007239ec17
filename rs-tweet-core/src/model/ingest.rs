use tracing::debug;

use super::chain::MarkovChain;
use crate::error::ChainError;

/// Characters separating words in a corpus line.
pub const DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Splits a line into its non-empty tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
	line.split(DELIMITERS).filter(|token| !token.is_empty())
}

/// Pairs every token of a line with the token that follows it.
///
/// The last token of the line is paired with `None`; pairs never cross
/// line boundaries.
///
/// ```
/// use rs_tweet_core::model::ingest::token_pairs;
///
/// let pairs: Vec<_> = token_pairs("the cat sat.").collect();
/// assert_eq!(pairs, [("the", Some("cat")), ("cat", Some("sat.")), ("sat.", None)]);
/// ```
pub fn token_pairs(line: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
	let mut tokens = tokenize(line).peekable();
	std::iter::from_fn(move || {
		let current = tokens.next()?;
		Some((current, tokens.peek().copied()))
	})
}

/// Feeds corpus lines into `chain`.
///
/// `words_to_read` bounds the number of tokens consumed across all lines;
/// `None` means the whole input is read. A consumed token still registers
/// its follower (and the edge to it) even if the budget runs out right after.
///
/// Returns the number of tokens consumed.
///
/// # Errors
/// Propagates `ChainError::Allocation` as soon as it happens; the chain is
/// left partially built and should be dropped by the caller.
pub fn fill_chain<I, S>(chain: &mut MarkovChain, lines: I, words_to_read: Option<usize>) -> Result<usize, ChainError>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut budget = words_to_read;
	let mut consumed = 0;

	'lines: for line in lines {
		for (current, next) in token_pairs(line.as_ref()) {
			if budget == Some(0) {
				break 'lines;
			}
			chain.add_pair(current, next)?;
			consumed += 1;
			if let Some(remaining) = budget.as_mut() {
				*remaining -= 1;
			}
		}
	}

	debug!(consumed, words = chain.registry().len(), "corpus ingested");
	Ok(consumed)
}
