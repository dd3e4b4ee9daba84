//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors raised while building or loading a circuit program.
///
/// All of these surface at build time; a finished [`crate::CircuitProgram`]
/// is well-formed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate name is not part of the gate library.
    #[error("Unsupported gate '{0}'")]
    UnsupportedGate(String),

    /// Qubit index outside `[0, num_qubits)`.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit program{}", format_gate_context(.gate_name))]
    InvalidQubitIndex {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits declared by the program.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate received the wrong number of qubits, or a repeated qubit.
    #[error("Gate '{gate_name}' requires {expected} distinct qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of distinct qubits.
        expected: u32,
        /// Number of distinct qubits actually provided.
        got: u32,
    },

    /// Classical bit index outside `[0, num_clbits)`.
    #[error("Classical bit {clbit} out of range for a program with {num_clbits} classical bits")]
    InvalidBitIndex {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits declared by the program.
        num_clbits: u32,
    },

    /// A qubit is measured twice, or two qubits write the same classical bit.
    #[error("Measurement conflict: {0}")]
    MeasurementConflict(String),

    /// Program file could not be decoded.
    #[error("Invalid program: {0}")]
    InvalidProgram(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

impl From<serde_json::Error> for IrError {
    fn from(err: serde_json::Error) -> Self {
        IrError::InvalidProgram(err.to_string())
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
