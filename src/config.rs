// Tue Jan 13 2026 - Alex

use crate::string::DEFAULT_APPEND_COUNT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub append_count: usize,
    pub sweep_counts: Vec<usize>,
    pub threshold_limit: usize,
    pub output_format: OutputFormat,
    pub compact_json: bool,
    pub use_color: bool,
    pub show_banner: bool,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            append_count: DEFAULT_APPEND_COUNT,
            sweep_counts: Vec::new(),
            threshold_limit: 256,
            output_format: OutputFormat::Text,
            compact_json: false,
            use_color: true,
            show_banner: true,
            verbosity: 0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_append_count(mut self, count: usize) -> Self {
        self.append_count = count;
        self
    }

    pub fn with_sweep_counts(mut self, counts: Vec<usize>) -> Self {
        self.sweep_counts = counts;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_threshold_limit(mut self, limit: usize) -> Self {
        self.threshold_limit = limit;
        self
    }

    pub fn with_compact_json(mut self, compact: bool) -> Self {
        self.compact_json = compact;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_banner(mut self, show_banner: bool) -> Self {
        self.show_banner = show_banner;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.append_count == 0 {
            return Err("append_count must be greater than 0".to_string());
        }
        if self.threshold_limit == 0 {
            return Err("threshold_limit must be greater than 0".to_string());
        }
        if self.sweep_counts.iter().any(|&n| n == 0) {
            return Err("sweep counts must be greater than 0".to_string());
        }
        Ok(())
    }
}
