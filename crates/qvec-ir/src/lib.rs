//! qvec Circuit Programs
//!
//! This crate holds the data side of qvec: the closed gate library and the
//! append-only circuit program builder consumed by the `qvec-sim`
//! statevector simulator.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`GateKind`] and its constant [`Unitary`] matrices
//! - **Operations**: [`GateApplication`] and [`Measurement`], wrapped in [`Operation`]
//! - **Programs**: [`ProgramBuilder`] (validated at append time) and the
//!   frozen [`CircuitProgram`]
//! - **Files**: [`ProgramFile`] JSON encoding
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qvec_ir::{ClbitId, QubitId, build_circuit};
//!
//! // 2 qubits, 2 classical bits
//! let mut builder = build_circuit(2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! builder.h(QubitId(0)).unwrap();
//! builder.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! builder.measure(QubitId(0), ClbitId(0)).unwrap();
//! builder.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! let program = builder.finish();
//! assert_eq!(program.num_gates(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod program;
pub mod qubit;

pub use circuit::{CircuitProgram, ProgramBuilder, build_circuit};
pub use error::{IrError, IrResult};
pub use gate::{GateKind, Matrix2, Matrix4, Unitary};
pub use operation::{GateApplication, Measurement, Operation};
pub use program::{OperationEntry, ProgramFile};
pub use qubit::{ClbitId, QubitId};
