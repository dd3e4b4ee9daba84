//! Gates command implementation.

use console::style;

use qvec_ir::GateKind;

/// Execute the gates command.
pub fn execute() {
    println!("{} Supported gates:\n", style("qvec").cyan().bold());

    for arity in [1, 2] {
        let names: Vec<&str> = GateKind::ALL
            .iter()
            .filter(|g| g.num_qubits() == arity)
            .map(|g| g.name())
            .collect();
        println!(
            "  {} {}",
            style(format!("{arity}-qubit:")).bold(),
            names.join(", ")
        );
    }

    println!();
    println!("  Two-qubit gates take the control first, e.g. cx q0, q1.");
}
