use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inspect::{corrections_report, top_terms_report};
use shopsearch_core::catalog::load_catalog;
use shopsearch_core::tokenizer::normalize;
use shopsearch_core::{build_index, SynonymTable};
use std::fs::File;
use std::io::{self, BufWriter};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "inspect")]
#[command(about = "Inspect the vocabulary of a product catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the most frequent non-stopword terms, one `term count` pair per line
    TopTerms {
        /// Catalog path (.json, .jsonl, or a directory of them)
        #[arg(long)]
        input: String,
        /// Number of terms to report
        #[arg(long, default_value_t = 20)]
        top: usize,
        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Show how query words would be corrected against the catalog vocabulary
    Correct {
        /// Catalog path (.json, .jsonl, or a directory of them)
        #[arg(long)]
        input: String,
        /// JSON synonyms file; a built-in table is used otherwise
        #[arg(long)]
        synonyms: Option<String>,
        /// Minimum similarity for a correction
        #[arg(long, default_value_t = shopsearch_core::config::DEFAULT_FUZZY_CUTOFF)]
        cutoff: f64,
        /// Candidates to list per word
        #[arg(long, default_value_t = 3)]
        suggestions: usize,
        /// Words to check
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::TopTerms { input, top, output } => {
            let products = load_catalog(&input)?;
            let (_, index) = build_index(products);
            match output {
                Some(path) => {
                    let f = File::create(&path).with_context(|| format!("creating report {path}"))?;
                    top_terms_report(index.documents(), top, BufWriter::new(f))?;
                    tracing::info!(output = %path, "report written");
                }
                None => top_terms_report(index.documents(), top, io::stdout().lock())?,
            }
        }
        Commands::Correct { input, synonyms, cutoff, suggestions, words } => {
            anyhow::ensure!((0.0..=1.0).contains(&cutoff), "cutoff must be within [0, 1], got {cutoff}");
            let synonyms = match synonyms {
                Some(path) => SynonymTable::from_json_file(path)?,
                None => SynonymTable::builtin(),
            };
            let (vocabulary, _) = build_index(load_catalog(&input)?);
            let vocabulary = vocabulary.with_cutoff(cutoff);
            let words: Vec<String> = words.iter().flat_map(|w| normalize(w)).collect();
            corrections_report(&vocabulary, &synonyms, &words, suggestions, io::stdout().lock())?;
        }
    }
    Ok(())
}
