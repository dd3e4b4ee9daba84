//! Run command implementation.
//!
//! Each input file is simulated on its own blocking task, so several
//! programs run concurrently. Reports are printed in input order.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qvec_sim::Simulator;

use super::common::{
    load_program, print_distribution, print_json, print_program_summary, print_results,
};
use crate::OutputFormat;
use crate::config::Config;

/// Execute the run command.
pub async fn execute(
    inputs: &[PathBuf],
    shots: i64,
    seed: Option<u64>,
    format: OutputFormat,
    exact: bool,
    config: &Config,
) -> Result<()> {
    let mut sim_config = config.simulator.clone();
    if seed.is_some() {
        sim_config.seed = seed;
    }
    let simulator = Arc::new(Simulator::with_config(sim_config)?);

    let programs = inputs
        .iter()
        .map(|path| load_program(path))
        .collect::<Result<Vec<_>>>()?;

    if exact {
        let mut distributions = BTreeMap::new();
        for (path, program) in inputs.iter().zip(&programs) {
            let distribution = simulator
                .distribution(program)
                .with_context(|| format!("Failed to simulate {}", path.display()))?;

            match format {
                OutputFormat::Json => {
                    distributions.insert(
                        path.display().to_string(),
                        distribution.into_iter().collect::<BTreeMap<_, _>>(),
                    );
                }
                OutputFormat::Table => {
                    println!(
                        "{} Evolving {}",
                        style("→").cyan().bold(),
                        style(path.display()).green()
                    );
                    print_program_summary(program);
                    print_distribution(&distribution);
                }
            }
        }
        if format == OutputFormat::Json {
            print_json(&distributions)?;
        }
        return Ok(());
    }

    let handles: Vec<_> = programs
        .into_iter()
        .map(|program| {
            let simulator = Arc::clone(&simulator);
            tokio::task::spawn_blocking(move || {
                let report = simulator.run_detailed(&program, shots);
                (program, report)
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (path, handle) in inputs.iter().zip(handles) {
        let (program, report) = handle.await.context("Simulation task failed")?;
        let report = report.with_context(|| format!("Failed to simulate {}", path.display()))?;
        info!(
            "{}: {} outcomes in {:?}",
            path.display(),
            report.counts.len(),
            report.elapsed
        );

        if format == OutputFormat::Table {
            println!(
                "{} Running {} ({} shots)",
                style("→").cyan().bold(),
                style(path.display()).green(),
                report.shots
            );
            print_program_summary(&program);
            print_results(&report);
            println!();
        }
        reports.push(report);
    }

    if format == OutputFormat::Json {
        print_json(&reports)?;
    }

    Ok(())
}
