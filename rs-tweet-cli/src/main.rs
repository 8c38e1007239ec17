use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rs_tweet_core::{ChainError, DEFAULT_MAX_LENGTH, GenerationConfig, Tweet, TweetGenerator};

/// Command line of the tweet generator.
#[derive(Parser, Debug)]
#[command(name = "rs-tweet", about = "Generate tweets from a text corpus with a word Markov chain")]
struct Cli {
	/// Seed of the random generator
	seed: u64,
	/// Number of tweets to generate
	tweets: usize,
	/// Path to the corpus text file
	corpus: PathBuf,
	/// Maximum number of words to read from the corpus (optional, whole file by default)
	words_to_read: Option<usize>,
	/// Maximum number of words per tweet
	#[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
	max_length: usize,
	/// Output one JSON object per tweet instead of text
	#[arg(long)]
	json: bool,
}

impl Cli {
	fn config(&self) -> GenerationConfig {
		GenerationConfig {
			seed: self.seed,
			words_to_read: self.words_to_read,
			tweet_count: self.tweets,
			max_length: self.max_length,
		}
	}
}

/// Line printed in `--json` mode.
#[derive(Serialize)]
struct TweetRecord<'a> {
	index: usize,
	text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	tweet: Option<&'a Tweet>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}

impl<'a> TweetRecord<'a> {
	fn new(index: usize, result: &'a Result<Tweet, ChainError>) -> Self {
		match result {
			Ok(tweet) => Self { index, text: Some(tweet.to_string()), tweet: Some(tweet), error: None },
			Err(e) => Self { index, text: None, tweet: None, error: Some(e.to_string()) },
		}
	}
}

/// Installs a stderr subscriber so that stdout only carries tweets.
fn init_tracing() {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "rs_tweet=info,rs_tweet_core=info".into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
	let config = cli.config();
	info!(corpus = %cli.corpus.display(), ?config, "building chain");

	let mut generator = TweetGenerator::from_file(&cli.corpus, &config)?;
	let stats = generator.chain().stats();
	info!(words = stats.words, edges = stats.edges, "chain built");

	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());
	for (i, result) in generator.tweets().into_iter().enumerate() {
		let index = i + 1;
		if cli.json {
			serde_json::to_writer(&mut out, &TweetRecord::new(index, &result))?;
			writeln!(out)?;
		} else {
			match &result {
				Ok(tweet) => writeln!(out, "Tweet {index}: {tweet}")?,
				Err(_) => writeln!(out, "Tweet {index}: <no tweet generated>")?,
			}
		}
	}
	out.flush()?;
	Ok(())
}

/// Main entry point.
///
/// Parses the arguments, builds the chain from the corpus and prints the
/// requested number of tweets. Fatal errors (unreadable corpus, allocation
/// failure) exit with a failure code; a corpus without a usable start word
/// only marks the affected tweets.
fn main() -> ExitCode {
	init_tracing();
	let cli = Cli::parse();

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!(error = %e, "generation failed");
			eprintln!("Error: {e}");
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn positional_arguments_map_to_config() {
		let cli = Cli::try_parse_from(["rs-tweet", "42", "3", "corpus.txt", "100"]).unwrap();
		assert_eq!(
			cli.config(),
			GenerationConfig { seed: 42, words_to_read: Some(100), tweet_count: 3, max_length: DEFAULT_MAX_LENGTH }
		);
		assert!(!cli.json);
	}

	#[test]
	fn word_budget_is_optional() {
		let cli = Cli::try_parse_from(["rs-tweet", "1", "2", "corpus.txt", "--max-length", "5"]).unwrap();
		let config = cli.config();
		assert_eq!(config.words_to_read, None);
		assert_eq!(config.max_length, 5);
	}

	#[test]
	fn json_record_embeds_the_tweet() {
		let result = Ok(Tweet { words: vec!["hello".into(), "world.".into()] });
		let json = serde_json::to_value(TweetRecord::new(3, &result)).unwrap();
		assert_eq!(
			json,
			serde_json::json!({ "index": 3, "text": "hello world.", "tweet": { "words": ["hello", "world."] } })
		);
	}

	#[test]
	fn json_record_reports_missing_tweet() {
		let result = Err(ChainError::EmptyCorpus);
		let json = serde_json::to_value(TweetRecord::new(1, &result)).unwrap();
		assert_eq!(json["text"], serde_json::Value::Null);
		assert_eq!(json["error"], "the chain holds no words");
		assert!(json.get("tweet").is_none());
	}

	#[test]
	fn missing_corpus_argument_is_rejected() {
		assert!(Cli::try_parse_from(["rs-tweet", "1", "2"]).is_err());
	}
}
