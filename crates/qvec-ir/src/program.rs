//! JSON program file format.
//!
//! A program file is decoded into [`ProgramFile`] and then replayed through
//! [`ProgramBuilder`], so a loaded program is validated exactly like one
//! built in code.
//!
//! ```json
//! {
//!   "name": "bell",
//!   "num_qubits": 2,
//!   "num_clbits": 2,
//!   "operations": [
//!     { "op": "gate", "name": "h", "qubits": [0] },
//!     { "op": "gate", "name": "cx", "qubits": [0, 1] },
//!     { "op": "measure", "qubit": 0, "clbit": 0 },
//!     { "op": "measure", "qubit": 1, "clbit": 1 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::circuit::{CircuitProgram, ProgramBuilder};
use crate::error::IrResult;
use crate::gate::GateKind;
use crate::operation::Operation;
use crate::qubit::{ClbitId, QubitId};

/// Serialized form of a [`CircuitProgram`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramFile {
    /// Program name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Declared number of qubits.
    pub num_qubits: u32,
    /// Declared number of classical bits.
    #[serde(default)]
    pub num_clbits: u32,
    /// Operations in program order.
    #[serde(default)]
    pub operations: Vec<OperationEntry>,
}

fn default_name() -> String {
    "circuit".into()
}

/// One serialized operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OperationEntry {
    /// A gate, named as in [`GateKind::name`].
    Gate {
        /// Gate name.
        name: String,
        /// Operand qubits (control first for controlled gates).
        qubits: Vec<QubitId>,
    },
    /// A measurement.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Receiving classical bit.
        clbit: ClbitId,
    },
}

impl ProgramFile {
    /// Decode JSON and build the program it describes.
    pub fn parse(source: &str) -> IrResult<CircuitProgram> {
        let file: ProgramFile = serde_json::from_str(source)?;
        file.into_program()
    }

    /// Replay the entries through a [`ProgramBuilder`].
    pub fn into_program(self) -> IrResult<CircuitProgram> {
        let mut builder =
            ProgramBuilder::new(self.num_qubits, self.num_clbits).with_name(self.name);

        for entry in self.operations {
            match entry {
                OperationEntry::Gate { name, qubits } => {
                    let kind: GateKind = name.parse()?;
                    builder.append_gate(kind, &qubits)?;
                }
                OperationEntry::Measure { qubit, clbit } => {
                    builder.append_measurement(qubit, clbit)?;
                }
            }
        }

        Ok(builder.finish())
    }

    /// Describe an existing program.
    pub fn from_program(program: &CircuitProgram) -> Self {
        let operations = program
            .operations()
            .iter()
            .map(|op| match op {
                Operation::Gate(gate) => OperationEntry::Gate {
                    name: gate.kind().name().to_string(),
                    qubits: gate.qubits(),
                },
                Operation::Measure(m) => OperationEntry::Measure {
                    qubit: m.qubit,
                    clbit: m.clbit,
                },
            })
            .collect();

        Self {
            name: program.name().to_string(),
            num_qubits: program.num_qubits(),
            num_clbits: program.num_clbits(),
            operations,
        }
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;

    const BELL: &str = r#"{
        "name": "bell",
        "num_qubits": 2,
        "num_clbits": 2,
        "operations": [
            { "op": "gate", "name": "h", "qubits": [0] },
            { "op": "gate", "name": "cx", "qubits": [0, 1] },
            { "op": "measure", "qubit": 0, "clbit": 0 },
            { "op": "measure", "qubit": 1, "clbit": 1 }
        ]
    }"#;

    #[test]
    fn test_parse_bell() {
        let program = ProgramFile::parse(BELL).unwrap();
        assert_eq!(program, CircuitProgram::bell().unwrap());
    }

    #[test]
    fn test_emit_and_reparse() {
        let program = CircuitProgram::ghz(3).unwrap();
        let json = ProgramFile::from_program(&program).to_json().unwrap();
        assert_eq!(ProgramFile::parse(&json).unwrap(), program);
    }

    #[test]
    fn test_unknown_gate() {
        let source = r#"{ "num_qubits": 1, "operations": [
            { "op": "gate", "name": "rx", "qubits": [0] }
        ] }"#;
        assert_eq!(
            ProgramFile::parse(source),
            Err(IrError::UnsupportedGate("rx".into()))
        );
    }

    #[test]
    fn test_builder_validation_applies() {
        let source = r#"{ "num_qubits": 2, "num_clbits": 1, "operations": [
            { "op": "measure", "qubit": 0, "clbit": 0 },
            { "op": "measure", "qubit": 1, "clbit": 0 }
        ] }"#;
        assert!(matches!(
            ProgramFile::parse(source),
            Err(IrError::MeasurementConflict(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ProgramFile::parse("{ not json"),
            Err(IrError::InvalidProgram(_))
        ));
    }
}
