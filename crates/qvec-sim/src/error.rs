//! Error types for the sim crate.

use qvec_ir::IrError;
use thiserror::Error;

/// Errors produced while simulating a program.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Shot count must be at least 1.
    #[error("Invalid shot count {0}: at least one shot is required")]
    InvalidShotCount(i64),

    /// A qubit is measured twice, or two qubits write the same classical bit.
    #[error("Measurement conflict: {0}")]
    MeasurementConflict(String),

    /// Total probability drifted away from 1 after a gate.
    ///
    /// This indicates a defect in gate application, never bad input.
    #[error("Normalization invariant violated{}: total probability {norm}", format_gate_position(.gate_index))]
    NormalizationInvariantViolated {
        /// Squared norm of the state after the offending gate.
        norm: f64,
        /// Position of the gate among the program's gates, if a gate was
        /// being checked.
        gate_index: Option<usize>,
    },

    /// Program is wider than the configured simulator limit.
    #[error("Program has {num_qubits} qubits but the simulator is limited to {max_qubits}")]
    CircuitTooLarge {
        /// Qubits declared by the program.
        num_qubits: u32,
        /// Configured limit.
        max_qubits: u32,
    },

    /// Simulator configuration is invalid.
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    /// Program failed IR validation.
    #[error("Circuit IR error: {0}")]
    Ir(IrError),
}

#[allow(clippy::ref_option)]
fn format_gate_position(gate_index: &Option<usize>) -> String {
    match gate_index {
        Some(index) => format!(" after gate {index}"),
        None => " in the sampling distribution".to_string(),
    }
}

impl From<IrError> for SimError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::MeasurementConflict(msg) => SimError::MeasurementConflict(msg),
            other => SimError::Ir(other),
        }
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
