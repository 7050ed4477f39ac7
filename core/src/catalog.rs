use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One catalog record as it arrives from the source file. Every field is optional;
/// absent text fields read as empty, an absent or non-numeric price as no price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<f64>,
}

impl Product {
    pub fn name(&self) -> &str { self.name.as_deref().unwrap_or("") }
    pub fn brand(&self) -> &str { self.brand.as_deref().unwrap_or("") }
}

/// Parse a user- or file-supplied price. Surrounding whitespace is ignored; NaN is rejected.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| !p.is_nan())
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => parse_price(&s),
        _ => None,
    })
}

/// Load products from a `.json` file (array or single object), a `.jsonl` file
/// (one object per line), or a directory holding such files. Directory entries
/// are read in sorted path order so catalog positions are reproducible.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Product>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("reading catalog directory {}", path.display()))?;
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut products = Vec::new();
    for file in files {
        let before = products.len();
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut products)?;
        } else {
            read_json(&file, &mut products)?;
        }
        tracing::debug!(file = %file.display(), count = products.len() - before, "read catalog file");
    }
    tracing::info!(path = %path.display(), num_products = products.len(), "catalog loaded");
    Ok(products)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn read_jsonl(file: &Path, out: &mut Vec<Product>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening catalog {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let product: Product = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid product record", file.display(), lineno + 1))?;
        out.push(product);
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<Product>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening catalog {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing catalog {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.into_iter().enumerate() {
                let product: Product = serde_json::from_value(v)
                    .with_context(|| format!("{}: invalid product record at index {i}", file.display()))?;
                out.push(product);
            }
        }
        serde_json::Value::Object(_) => {
            let product: Product = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid product record", file.display()))?;
            out.push(product);
        }
        other => anyhow::bail!("{}: expected an array or object of products, found {other}", file.display()),
    }
    Ok(())
}
