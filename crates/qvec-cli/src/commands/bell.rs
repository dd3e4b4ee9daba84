//! Bell command implementation.

use anyhow::Result;
use console::style;

use qvec_ir::CircuitProgram;
use qvec_sim::Simulator;

use super::common::{print_json, print_results};
use crate::OutputFormat;
use crate::config::Config;

/// Execute the bell command.
pub fn execute(shots: i64, seed: Option<u64>, format: OutputFormat, config: &Config) -> Result<()> {
    let mut sim_config = config.simulator.clone();
    if seed.is_some() {
        sim_config.seed = seed;
    }
    let simulator = Simulator::with_config(sim_config)?;

    let program = CircuitProgram::bell()?;
    let report = simulator.run_detailed(&program, shots)?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!(
                "{} Bell pair (|00⟩ + |11⟩)/√2",
                style("→").cyan().bold()
            );
            print!("{program}");
            print_results(&report);
        }
    }

    Ok(())
}
