use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use calliope_chain::Chain;
use calliope_text::read_corpus;

use crate::cli::GenerateArgs;
use crate::config;

/// Run the `generate` subcommand.
pub fn run(args: GenerateArgs) -> Result<()> {
    // Step 1: Load config and apply CLI overrides
    let mut cfg = config::load(&args.config)?;
    if let Some(corpus) = args.corpus {
        cfg.corpus.path = corpus;
    }
    if let Some(max_tokens) = args.max_tokens {
        cfg.generate.max_tokens = max_tokens;
    }
    if let Some(count) = args.count {
        cfg.generate.count = count;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    // Step 2: Read and normalize the corpus
    info!(path = %cfg.corpus.path.display(), "reading corpus");
    let tokens = read_corpus(&cfg.corpus.path)
        .with_context(|| format!("failed to read corpus: {}", cfg.corpus.path.display()))?;
    if tokens.is_empty() {
        bail!("corpus produced no tokens: {}", cfg.corpus.path.display());
    }
    info!(n_tokens = tokens.len(), "corpus normalized");

    // Step 3: Train the chain on the full token stream
    let mut chain = Chain::new();
    chain.train_sequence(tokens);
    info!(
        n_sources = chain.n_sources(),
        n_observations = chain.n_observations(),
        "chain trained"
    );

    // Step 4: Create seeded RNG
    let mut rng = match cfg.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // Step 5: Generate and print
    for _ in 0..cfg.generate.count {
        let sequence = chain
            .generate(Some(cfg.generate.max_tokens), &mut rng)
            .context("chain generation failed")?;
        println!("{}", sequence.join(" "));
    }

    Ok(())
}
