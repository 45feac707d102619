use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level calliope configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CalliopeConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Corpus settings.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Generation settings.
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Settings for the `[corpus]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Path of the training corpus.
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

/// Settings for the `[generate]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Maximum tokens per generated sequence.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Number of sequences to generate.
    #[serde(default = "default_count")]
    pub count: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            count: default_count(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("corpus/belling_the_cat.txt")
}
fn default_max_tokens() -> usize {
    100
}
fn default_count() -> usize {
    1
}

/// Loads configuration from a TOML file.
///
/// A missing file yields the defaults; a present but malformed file is an
/// error.
pub fn load(path: &Path) -> Result<CalliopeConfig> {
    if !path.exists() {
        return Ok(CalliopeConfig::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: CalliopeConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config: CalliopeConfig = toml::from_str("").unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.corpus.path, default_corpus_path());
        assert_eq!(config.generate.max_tokens, 100);
        assert_eq!(config.generate.count, 1);
    }

    #[test]
    fn full_config_parses() {
        let text = r#"
            seed = 42

            [corpus]
            path = "texts/fable.txt"

            [generate]
            max_tokens = 25
            count = 3
        "#;
        let config: CalliopeConfig = toml::from_str(text).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.corpus.path, PathBuf::from("texts/fable.txt"));
        assert_eq!(config.generate.max_tokens, 25);
        assert_eq!(config.generate.count, 3);
    }

    #[test]
    fn unknown_fields_rejected() {
        let text = r#"
            [generate]
            max_words = 25
        "#;
        assert!(toml::from_str::<CalliopeConfig>(text).is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = load(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.generate.max_tokens, 100);
    }
}
