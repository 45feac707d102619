use anyhow::{Context, Result};
use tracing::info;

use calliope_text::read_corpus;

use crate::cli::TokensArgs;

/// Run the `tokens` subcommand.
pub fn run(args: TokensArgs) -> Result<()> {
    let tokens = read_corpus(&args.corpus)
        .with_context(|| format!("failed to read corpus: {}", args.corpus.display()))?;
    info!(n_tokens = tokens.len(), "corpus normalized");

    for token in &tokens {
        println!("{token}");
    }

    Ok(())
}
