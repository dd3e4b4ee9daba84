//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use qvec_ir::{CircuitProgram, ProgramFile};
use qvec_sim::SimulationReport;

/// Outcomes shown before the table is truncated.
const MAX_ROWS: usize = 16;

/// Load a program from a JSON file.
pub fn load_program(path: &Path) -> Result<CircuitProgram> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if matches!(ext.to_lowercase().as_str(), "qasm" | "qasm3") {
        anyhow::bail!(
            "OpenQASM input is not supported: {}. Use a JSON program file",
            path.display()
        );
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    ProgramFile::parse(&source).with_context(|| format!("Failed to load program: {}", path.display()))
}

/// Print a one-line summary of a program.
pub fn print_program_summary(program: &CircuitProgram) {
    println!(
        "  Loaded: {} ({} qubits, {} clbits, {} gates)",
        style(program.name()).green(),
        program.num_qubits(),
        program.num_clbits(),
        program.num_gates()
    );
}

/// Print simulation results in a table format.
pub fn print_results(report: &SimulationReport) {
    println!(
        "\n{} Results ({} shots, seed {}):",
        style("✓").green().bold(),
        report.shots,
        report.seed
    );

    let sorted = report.counts.sorted();
    let total = report.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = **count as f64 / total * 100.0;
        print_row(bitstring, &count.to_string(), prob);
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }

    println!(
        "\n  Execution time: {} ms",
        style(report.elapsed.as_millis()).yellow()
    );
}

/// Print an exact outcome distribution in a table format.
pub fn print_distribution(distribution: &[(String, f64)]) {
    println!("\n{} Exact distribution:", style("✓").green().bold());

    let mut sorted: Vec<_> = distribution.iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    for (bitstring, p) in sorted.iter().take(MAX_ROWS) {
        print_row(bitstring, &format!("{p:.6}"), p * 100.0);
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}

fn print_row(bitstring: &str, value: &str, percent: f64) {
    let bar_len = (percent / 2.0).round() as usize;
    let bar: String = "█".repeat(bar_len);

    println!(
        "  {}: {:>8} ({:>6.2}%) {}",
        style(bitstring).cyan(),
        value,
        percent,
        style(bar).green()
    );
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}
