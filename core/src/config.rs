use anyhow::{ensure, Result};

pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.7;
pub const DEFAULT_TOP_K: usize = 5;

/// Query-time tunables. Binaries fill this from their command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Minimum similarity ratio for a fuzzy correction candidate.
    pub fuzzy_cutoff: f64,
    /// Results returned when the caller does not ask for a specific count.
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF, top_k: DEFAULT_TOP_K }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.fuzzy_cutoff),
            "fuzzy cutoff must be within [0, 1], got {}",
            self.fuzzy_cutoff
        );
        ensure!(self.top_k > 0, "top_k must be at least 1");
        Ok(())
    }
}
