use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_tweet_core::model::ingest::token_pairs;
use rs_tweet_core::{GenerationConfig, MarkovChain, TweetGenerator};

const CORPUS: &[&str] = &[
    "the cat sat on the mat.",
    "the dog sat on the cat.",
    "a bird sang on the roof and the dog barked.",
    "the cat chased the bird.",
    "nobody knows.",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build the chain pair by pair, the way the line ingestion does it
    let mut chain = MarkovChain::new();
    for line in CORPUS {
        for (current, next) in token_pairs(line) {
            chain.add_pair(current, next)?;
        }
    }

    // Same chain, built in one call
    let same = MarkovChain::from_lines(CORPUS, None)?;
    assert_eq!(chain.stats(), same.stats());

    let stats = chain.stats();
    println!(
        "{} words ({} terminal), {} edges, {} transitions",
        stats.words, stats.terminal_words, stats.edges, stats.transitions
    );

    // Successors of a word, with their weights
    let registry = chain.registry();
    if let Some(the) = registry.find("the") {
        for successor in registry[the].successors() {
            println!("the -> {} (x{})", registry[successor.target].text(), successor.weight);
        }
    }

    // Low-level walk: pick a start word, then iterate lazily
    let mut rng = StdRng::seed_from_u64(7);
    let start = chain.pick_start_node(&mut rng);
    let words: Vec<&str> = chain.generate(start, 8, &mut rng).collect();
    println!("Walk: {}", words.join(" "));

    // A corpus made only of terminal words has no start word
    let degenerate = MarkovChain::from_lines(["end."], None)?;
    match degenerate.pick_start_node(&mut rng) {
        Some(_) => println!("Should not happen"),
        None => println!("No valid start word in a corpus of terminal words"),
    }

    // High-level generation, reproducible for a given seed
    let config = GenerationConfig { seed: 42, tweet_count: 5, ..GenerationConfig::default() };
    let mut generator = TweetGenerator::new(chain, &config);
    for (i, tweet) in generator.tweets().into_iter().enumerate() {
        match tweet {
            Ok(tweet) => println!("Tweet {}: {}", i + 1, tweet),
            Err(e) => println!("Tweet {}: {}", i + 1, e),
        }
    }

    Ok(())
}
