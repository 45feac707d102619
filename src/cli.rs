use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Calliope Markov chain text generator.
#[derive(Parser)]
#[command(
    name = "calliope",
    version,
    about = "Markov chain text generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Train a chain on a corpus and print generated sequences.
    Generate(GenerateArgs),
    /// Print the normalized token stream of a corpus.
    Tokens(TokensArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "calliope.toml")]
    pub config: PathBuf,

    /// Override corpus path from config.
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Override maximum tokens per generated sequence from config.
    #[arg(short, long)]
    pub max_tokens: Option<usize>,

    /// Override number of generated sequences from config.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `tokens` subcommand.
#[derive(clap::Args)]
pub struct TokensArgs {
    /// Path to the corpus file.
    pub corpus: PathBuf,
}
