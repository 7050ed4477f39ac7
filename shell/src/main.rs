use anyhow::{Context, Result};
use clap::Parser;
use shell::{parse_brand, parse_max_price, render, Shell};
use shopsearch_core::catalog::load_catalog;
use shopsearch_core::{Filters, SearchConfig, SearchEngine, SynonymTable};
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "shell")]
#[command(about = "Search a product catalog interactively", long_about = None)]
struct Args {
    /// Catalog path (.json, .jsonl, or a directory of them)
    #[arg(long, default_value = "./products.json")]
    catalog: String,
    /// JSON file mapping terms to synonym lists; a built-in table is used otherwise
    #[arg(long)]
    synonyms: Option<String>,
    /// Minimum similarity for fuzzy corrections
    #[arg(long, default_value_t = shopsearch_core::config::DEFAULT_FUZZY_CUTOFF)]
    cutoff: f64,
    /// Number of results to show
    #[arg(long, default_value_t = shopsearch_core::config::DEFAULT_TOP_K)]
    top_k: usize,
    /// Run a single query and exit instead of prompting
    #[arg(long)]
    query: Option<String>,
    /// Price ceiling for --query
    #[arg(long, requires = "query")]
    max_price: Option<String>,
    /// Brand for --query
    #[arg(long, requires = "query")]
    brand: Option<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let products = load_catalog(&args.catalog).with_context(|| format!("loading catalog {}", args.catalog))?;
    let synonyms = match &args.synonyms {
        Some(path) => SynonymTable::from_json_file(path)?,
        None => SynonymTable::builtin(),
    };
    let config = SearchConfig { fuzzy_cutoff: args.cutoff, top_k: args.top_k };
    let engine = SearchEngine::build(products, synonyms, config)?;

    let stdout = io::stdout();
    match args.query {
        Some(query) => {
            let mut out = stdout.lock();
            if query.trim().is_empty() {
                anyhow::bail!("--query must not be blank");
            }
            let (max_price, warning) = parse_max_price(args.max_price.as_deref().unwrap_or(""));
            if let Some(warning) = warning {
                eprintln!("{warning}");
            }
            let filters = Filters { max_price, brand: args.brand.as_deref().and_then(parse_brand) };
            let plan = engine.analyze(&query);
            let hits = engine.search_plan(&plan, &filters, config.top_k);
            render(&mut out, &plan, &hits)?;
            out.flush()?;
        }
        None => {
            let stdin = io::stdin();
            Shell::new(&engine, stdin.lock(), stdout.lock()).run()?;
        }
    }
    Ok(())
}
