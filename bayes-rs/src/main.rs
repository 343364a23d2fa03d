//! Command line front end for the Bayesian filter
//!
//! # Usage
//!
//! ```bash
//! # Print the token multiset of a text
//! bayes-rs tokenize message.txt
//!
//! # Train on reference texts, then rate a message read from stdin
//! bayes-rs classify --ham ham1.txt --ham ham2.txt --spam spam1.txt < message.txt
//!
//! # Use custom classifier and lexer settings
//! bayes-rs --config bayes.toml classify --ham ham.txt --spam spam.txt message.txt
//! ```

use anyhow::Context;
use bayes_rs::lexer::tokenize_bytes;
use bayes_rs::{BayesConfig, BayesFilter, Category, LexError, MemoryStore};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bayes-rs")]
#[command(about = "Bayesian spam/ham text classifier", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a text as JSON
    Tokenize {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Learn reference texts and rate a text
    Classify {
        /// Ham reference text, may be repeated
        #[arg(long)]
        ham: Vec<PathBuf>,
        /// Spam reference text, may be repeated
        #[arg(long)]
        spam: Vec<PathBuf>,
        /// Text to rate (stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bayes_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            BayesConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => BayesConfig::default(),
    };

    match cli.command {
        Commands::Tokenize { file } => {
            let bytes = read_input(file.as_deref())?;
            let tokens = tokenize_bytes(&bytes, &config.lexer)?;
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        Commands::Classify { ham, spam, file } => {
            let filter = BayesFilter::new(config, Arc::new(MemoryStore::new()))?;

            train(&filter, &ham, Category::Ham)?;
            train(&filter, &spam, Category::Spam)?;

            let text = read_text(file.as_deref())?;
            let tokens = filter.tokenize(&text)?;
            let rating = filter.classify_tokens(&tokens)?;
            let totals = filter.store().snapshot()?.totals;

            let output = json!({
                "rating": rating,
                "tokens": tokens.len(),
                "texts_ham": totals.texts_ham,
                "texts_spam": totals.texts_spam,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn train(filter: &BayesFilter<MemoryStore>, files: &[PathBuf], category: Category) -> anyhow::Result<()> {
    for path in files {
        let text = read_text(Some(path))?;
        match filter.learn(&text, category) {
            Ok(()) => info!("Learned {} as {}", path.display(), category),
            Err(bayes_rs::BayesError::Lex(e)) => {
                warn!("Skipping {}: {}", path.display(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            Ok(bytes)
        }
    }
}

fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    let bytes = read_input(path)?;
    String::from_utf8(bytes).map_err(|_| LexError::NotAString.into())
}
