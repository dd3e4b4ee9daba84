//! qvec Dense Statevector Simulator
//!
//! Exact simulation of [`qvec_ir::CircuitProgram`]s on a full `2^n`
//! amplitude vector, followed by shot sampling of the declared
//! measurements. Memory grows as `16 · 2^n` bytes, so the simulator is
//! capped at [`SimulatorConfig::max_qubits`] (24 by default).
//!
//! # Pipeline
//!
//! ```text
//!   CircuitProgram ──→ apply_gate (mutates StateVector) ──→ MeasurementSampler ──→ Counts
//! ```
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use qvec_ir::CircuitProgram;
//! use qvec_sim::simulate;
//!
//! let program = CircuitProgram::bell().unwrap();
//! let counts = simulate(&program, 1024, Some(42)).unwrap();
//!
//! // Expect ~50% |00⟩ and ~50% |11⟩
//! assert_eq!(counts.get("00") + counts.get("11"), 1024);
//! assert_eq!(counts.get("01") + counts.get("10"), 0);
//! ```

pub mod apply;
pub mod config;
pub mod counts;
pub mod error;
pub mod sampler;
pub mod simulator;
pub mod statevector;

pub use apply::apply_gate;
pub use config::{MAX_SUPPORTED_QUBITS, SimulatorConfig};
pub use counts::Counts;
pub use error::{SimError, SimResult};
pub use sampler::{MeasurementSampler, SamplingPlan};
pub use simulator::{RunPhase, SimulationReport, Simulator, simulate};
pub use statevector::{NORM_TOLERANCE, StateVector};
