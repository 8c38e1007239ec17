/// Default maximum number of words in a generated tweet.
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Parameters of one generation run.
///
/// The values usually come from the command line; the chain itself only
/// consumes them as plain numbers.
///
/// # Fields
/// - `seed`: seeds the single random generator of the run
/// - `words_to_read`: bound on corpus tokens ingested, `None` for the whole corpus
/// - `tweet_count`: number of tweets to generate
/// - `max_length`: maximum number of words per tweet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
	pub seed: u64,
	pub words_to_read: Option<usize>,
	pub tweet_count: usize,
	pub max_length: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			seed: 0,
			words_to_read: None,
			tweet_count: 1,
			max_length: DEFAULT_MAX_LENGTH,
		}
	}
}
