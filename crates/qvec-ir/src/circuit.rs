//! Circuit program builder.
//!
//! A [`ProgramBuilder`] is append-only: every gate and measurement is
//! validated when it is appended, so [`ProgramBuilder::finish`] always yields
//! a well-formed [`CircuitProgram`].

use std::fmt;

use rustc_hash::FxHashSet;

use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::operation::{GateApplication, Measurement, Operation};
use crate::qubit::{ClbitId, QubitId};

/// Start building a program with `num_qubits` qubits and `num_clbits`
/// classical bits.
pub fn build_circuit(num_qubits: u32, num_clbits: u32) -> ProgramBuilder {
    ProgramBuilder::new(num_qubits, num_clbits)
}

/// Append-only builder for a [`CircuitProgram`].
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    /// Name of the program.
    name: String,
    /// Declared number of qubits.
    num_qubits: u32,
    /// Declared number of classical bits.
    num_clbits: u32,
    /// Operations in program order.
    operations: Vec<Operation>,
    /// Qubits that already carry a measurement.
    measured_qubits: FxHashSet<QubitId>,
    /// Classical bits that already receive a measurement.
    written_clbits: FxHashSet<ClbitId>,
}

impl ProgramBuilder {
    /// Create an empty builder.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: "circuit".into(),
            num_qubits,
            num_clbits,
            operations: vec![],
            measured_qubits: FxHashSet::default(),
            written_clbits: FxHashSet::default(),
        }
    }

    /// Set the program name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a gate acting on `qubits`.
    ///
    /// Fails with [`IrError::ArityMismatch`] when the number of distinct
    /// qubits does not match the gate, [`IrError::InvalidQubitIndex`] when a
    /// qubit is out of range, and [`IrError::MeasurementConflict`] when a
    /// qubit has already been measured.
    pub fn append_gate(&mut self, kind: GateKind, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let expected = kind.num_qubits();
        if qubits.len() != expected as usize {
            return Err(IrError::ArityMismatch {
                gate_name: kind.name().to_string(),
                expected,
                got: qubits.len() as u32,
            });
        }

        for &qubit in qubits {
            self.check_qubit(qubit, Some(kind))?;
        }

        let gate = match *qubits {
            [qubit] => GateApplication::Single { kind, qubit },
            [first, second] if first == second => {
                return Err(IrError::ArityMismatch {
                    gate_name: kind.name().to_string(),
                    expected,
                    got: 1,
                });
            }
            [first, second] => GateApplication::Two {
                kind,
                first,
                second,
            },
            _ => {
                return Err(IrError::ArityMismatch {
                    gate_name: kind.name().to_string(),
                    expected,
                    got: qubits.len() as u32,
                });
            }
        };

        // Outcomes are sampled from the final state, so a gate may not act on
        // a qubit after its measurement.
        if let Some(&qubit) = qubits.iter().find(|q| self.measured_qubits.contains(*q)) {
            return Err(IrError::MeasurementConflict(format!(
                "gate '{kind}' acts on {qubit} after it was measured"
            )));
        }

        self.operations.push(Operation::Gate(gate));
        Ok(self)
    }

    /// Append a measurement of `qubit` into `clbit`.
    pub fn append_measurement(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, None)?;
        if clbit.0 >= self.num_clbits {
            return Err(IrError::InvalidBitIndex {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        if self.measured_qubits.contains(&qubit) {
            return Err(IrError::MeasurementConflict(format!(
                "{qubit} is measured more than once"
            )));
        }
        if self.written_clbits.contains(&clbit) {
            return Err(IrError::MeasurementConflict(format!(
                "{clbit} receives more than one measurement"
            )));
        }

        self.measured_qubits.insert(qubit);
        self.written_clbits.insert(clbit);
        self.operations
            .push(Operation::Measure(Measurement { qubit, clbit }));
        Ok(self)
    }

    /// Append an already-constructed operation, with full validation.
    pub fn append(&mut self, operation: Operation) -> IrResult<&mut Self> {
        match operation {
            Operation::Gate(gate) => self.append_gate(gate.kind(), &gate.qubits()),
            Operation::Measure(m) => self.append_measurement(m.qubit, m.clbit),
        }
    }

    fn check_qubit(&self, qubit: QubitId, gate: Option<GateKind>) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::InvalidQubitIndex {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: gate.map(|g| g.name().to_string()),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::H, &[qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::X, &[qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::Y, &[qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::Z, &[qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::S, &[qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::Sdg, &[qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::T, &[qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::Tdg, &[qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::CX, &[control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::CZ, &[control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append_gate(GateKind::Swap, &[q1, q2])
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.append_measurement(qubit, clbit)
    }

    /// Measure qubit `i` into classical bit `i` for every `i` both registers have.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for i in 0..self.num_qubits.min(self.num_clbits) {
            self.append_measurement(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the declared number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the declared number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get the operations appended so far.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Freeze the builder into an immutable program.
    pub fn finish(self) -> CircuitProgram {
        CircuitProgram {
            name: self.name,
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            operations: self.operations,
        }
    }
}

/// A finished, immutable circuit program.
///
/// Executing a program has no side effects on it, so the same program can be
/// simulated repeatedly and shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitProgram {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    operations: Vec<Operation>,
}

impl CircuitProgram {
    /// Get the program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get all operations in program order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate over gate applications in program order.
    pub fn gates(&self) -> impl Iterator<Item = &GateApplication> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Gate(g) => Some(g),
            Operation::Measure(_) => None,
        })
    }

    /// Iterate over declared measurements in program order.
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Measure(m) => Some(m),
            Operation::Gate(_) => None,
        })
    }

    /// Get the number of gate applications.
    pub fn num_gates(&self) -> usize {
        self.gates().count()
    }

    /// Re-check every build-time invariant.
    pub fn validate(&self) -> IrResult<()> {
        let mut builder = ProgramBuilder::new(self.num_qubits, self.num_clbits);
        for op in &self.operations {
            builder.append(*op)?;
        }
        Ok(())
    }

    // =========================================================================
    // Pre-built programs
    // =========================================================================

    /// Create a Bell state program: `h(0)`, `cx(0, 1)`, measure both.
    pub fn bell() -> IrResult<Self> {
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        let mut builder = build_circuit(2, 2).with_name("bell");
        builder
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(builder.finish())
    }

    /// Create an `n`-qubit GHZ state program with every qubit measured.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut builder = build_circuit(n, n).with_name("ghz");
        if n == 0 {
            return Ok(builder.finish());
        }

        builder.h(QubitId(0))?;
        for i in 0..n - 1 {
            builder.cx(QubitId(i), QubitId(i + 1))?;
        }
        builder.measure_all()?;

        Ok(builder.finish())
    }
}

impl fmt::Display for CircuitProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} qubits, {} clbits)",
            self.name, self.num_qubits, self.num_clbits
        )?;
        for op in &self.operations {
            writeln!(f, "  {op}")?;
        }
        Ok(())
    }
}
