//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::debug;

use qnav_algos::QnavConfig;

/// Rows shown before a distribution is truncated.
const MAX_ROWS: usize = 16;

/// How a command reports its record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub show_circuit: bool,
}

impl Output {
    /// Print `record` as pretty JSON if requested.
    ///
    /// Returns `true` when the record was printed and the caller should
    /// skip its human-readable summary.
    pub fn emit_json<T: Serialize>(self, record: &T) -> Result<bool> {
        if !self.json {
            return Ok(false);
        }
        let text =
            serde_json::to_string_pretty(record).context("Failed to serialize result record")?;
        println!("{text}");
        Ok(true)
    }

    /// Print the circuit listing if requested.
    pub fn print_circuit(self, circuit: &str) {
        if self.show_circuit {
            println!("\n{} Circuit:", style("✓").green().bold());
            for line in circuit.lines() {
                println!("  {}", style(line).dim());
            }
        }
    }
}

/// Load configuration from `path` (or defaults), environment overrides,
/// then command-line overrides.
pub fn load_config(path: Option<&Path>, seed: Option<u64>, shots: Option<u32>) -> Result<QnavConfig> {
    let mut config = QnavConfig::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load configuration from {}", p.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(shots) = shots {
        config.shots = shots;
    }
    debug!(
        shots = config.shots,
        seed = ?config.seed,
        "Loaded configuration"
    );
    Ok(config)
}

/// Print the command banner.
pub fn print_header(title: &str, detail: &str) {
    println!(
        "{} {} {}",
        style("→").cyan().bold(),
        style(title).bold(),
        style(detail).dim()
    );
}

/// Print a labelled value.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<18} {}", format!("{label}:"), style(value).yellow());
}

/// Print a label-to-probability map as a bar chart, most likely first.
pub fn print_distribution(title: &str, distribution: &BTreeMap<String, f64>) {
    println!("\n{} {}:", style("✓").green().bold(), title);

    let mut sorted: Vec<(&String, &f64)> = distribution.iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (label, p) in sorted.iter().take(MAX_ROWS) {
        let percent = **p * 100.0;
        let bar = "█".repeat(bar_length(percent));
        println!(
            "  {}: {:>6.2}% {}",
            style(label).cyan(),
            percent,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}

/// One block per two percentage points.
fn bar_length(percent: f64) -> usize {
    (percent / 2.0).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(100.0), 50);
        assert_eq!(bar_length(25.0), 13);
        assert_eq!(bar_length(0.4), 0);
    }

    #[test]
    fn test_overrides_win() {
        let config = load_config(None, Some(5), Some(64)).unwrap();
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.shots, 64);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/qnav.yaml")), None, None).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load configuration"));
    }
}
