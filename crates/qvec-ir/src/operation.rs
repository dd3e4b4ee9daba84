//! Program operations: gate applications and measurement declarations.

use std::fmt;

use crate::gate::GateKind;
use crate::qubit::{ClbitId, QubitId};

/// A gate applied to specific qubits.
///
/// Gate applications are plain values; their only identity is their position
/// in the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateApplication {
    /// A single-qubit gate.
    Single {
        /// The gate.
        kind: GateKind,
        /// The qubit it acts on.
        qubit: QubitId,
    },
    /// A two-qubit gate. For controlled gates `first` is the control and
    /// `second` the target.
    Two {
        /// The gate.
        kind: GateKind,
        /// First operand (control).
        first: QubitId,
        /// Second operand (target).
        second: QubitId,
    },
}

impl GateApplication {
    /// Get the gate kind.
    #[inline]
    pub fn kind(&self) -> GateKind {
        match self {
            GateApplication::Single { kind, .. } | GateApplication::Two { kind, .. } => *kind,
        }
    }

    /// Get the operand qubits in application order.
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            GateApplication::Single { qubit, .. } => vec![qubit],
            GateApplication::Two { first, second, .. } => vec![first, second],
        }
    }
}

impl fmt::Display for GateApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateApplication::Single { kind, qubit } => write!(f, "{kind} {qubit}"),
            GateApplication::Two {
                kind,
                first,
                second,
            } => write!(f, "{kind} {first}, {second}"),
        }
    }
}

/// A declared measurement: the outcome of `qubit` is written to `clbit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Measurement {
    /// Measured qubit.
    pub qubit: QubitId,
    /// Classical bit receiving the outcome.
    pub clbit: ClbitId,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "measure {} -> {}", self.qubit, self.clbit)
    }
}

/// One entry of a circuit program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A unitary gate.
    Gate(GateApplication),
    /// A measurement declaration.
    Measure(Measurement),
}

impl Operation {
    /// Check if this is a gate.
    pub fn is_gate(&self) -> bool {
        matches!(self, Operation::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Operation::Measure(_))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(g) => g.fmt(f),
            Operation::Measure(m) => m.fmt(f),
        }
    }
}

impl From<GateApplication> for Operation {
    fn from(gate: GateApplication) -> Self {
        Operation::Gate(gate)
    }
}

impl From<Measurement> for Operation {
    fn from(measurement: Measurement) -> Self {
        Operation::Measure(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_application_accessors() {
        let cx = GateApplication::Two {
            kind: GateKind::CX,
            first: QubitId(0),
            second: QubitId(1),
        };
        assert_eq!(cx.kind(), GateKind::CX);
        assert_eq!(cx.qubits(), vec![QubitId(0), QubitId(1)]);
        assert_eq!(cx.to_string(), "cx q0, q1");
    }

    #[test]
    fn test_operation_display() {
        let op: Operation = Measurement {
            qubit: QubitId(1),
            clbit: ClbitId(0),
        }
        .into();
        assert!(op.is_measure());
        assert!(!op.is_gate());
        assert_eq!(op.to_string(), "measure q1 -> c0");
    }
}
