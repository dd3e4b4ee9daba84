//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - dense statevector simulation",
        style("qvec").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qvec-ir   Circuit programs and gate library");
    println!("  qvec-sim  Statevector simulator and shot sampler");
    println!("  qvec-cli  Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
