//! Gate library: the closed set of supported gates and their unitaries.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::IrError;

/// 2×2 complex matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// 4×4 complex matrix, row-major.
///
/// Rows and columns are indexed by the local basis `2·b(first) + b(second)`,
/// where `first` is the first qubit listed in the gate application (the
/// control for controlled gates).
pub type Matrix4 = [[Complex64; 4]; 4];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Supported gates.
///
/// The set is closed: every variant has a constant unitary, so a gate kind
/// held in memory is always simulable. Unknown gates can only appear through
/// name lookup ([`GateKind::from_str`]), which rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GateKind {
    // Single-qubit gates
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl GateKind {
    /// Every supported gate, single-qubit gates first.
    pub const ALL: [GateKind; 11] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::Sdg,
        GateKind::T,
        GateKind::Tdg,
        GateKind::CX,
        GateKind::CZ,
        GateKind::Swap,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::CX => "cx",
            GateKind::CZ => "cz",
            GateKind::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::H
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg => 1,

            GateKind::CX | GateKind::CZ | GateKind::Swap => 2,
        }
    }

    /// Get the unitary matrix of this gate.
    pub fn unitary(&self) -> Unitary {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let t_phase = Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4);

        match self {
            GateKind::H => Unitary::Single([[h, h], [h, -h]]),
            GateKind::X => Unitary::Single([[ZERO, ONE], [ONE, ZERO]]),
            GateKind::Y => Unitary::Single([[ZERO, -I], [I, ZERO]]),
            GateKind::Z => Unitary::Single([[ONE, ZERO], [ZERO, -ONE]]),
            GateKind::S => Unitary::Single([[ONE, ZERO], [ZERO, I]]),
            GateKind::Sdg => Unitary::Single([[ONE, ZERO], [ZERO, -I]]),
            GateKind::T => Unitary::Single([[ONE, ZERO], [ZERO, t_phase]]),
            GateKind::Tdg => Unitary::Single([[ONE, ZERO], [ZERO, t_phase.conj()]]),

            GateKind::CX => Unitary::Two([
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
                [ZERO, ZERO, ONE, ZERO],
            ]),
            GateKind::CZ => Unitary::Two([
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ZERO, ZERO, -ONE],
            ]),
            GateKind::Swap => Unitary::Two([
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
            ]),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    /// Look up a gate by name, case-insensitively. `cnot` is accepted as an
    /// alias for `cx`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "s" => Ok(GateKind::S),
            "sdg" => Ok(GateKind::Sdg),
            "t" => Ok(GateKind::T),
            "tdg" => Ok(GateKind::Tdg),
            "cx" | "cnot" => Ok(GateKind::CX),
            "cz" => Ok(GateKind::CZ),
            "swap" => Ok(GateKind::Swap),
            _ => Err(IrError::UnsupportedGate(s.to_string())),
        }
    }
}

impl From<GateKind> for String {
    fn from(kind: GateKind) -> Self {
        kind.name().to_string()
    }
}

impl TryFrom<String> for GateKind {
    type Error = IrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The unitary matrix of a gate, sized by arity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unitary {
    /// Matrix of a single-qubit gate.
    Single(Matrix2),
    /// Matrix of a two-qubit gate.
    Two(Matrix4),
}

impl Unitary {
    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            Unitary::Single(_) => 1,
            Unitary::Two(_) => 2,
        }
    }

    /// Check `U · U† = I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        match self {
            Unitary::Single(m) => is_unitary_rows(m, tolerance),
            Unitary::Two(m) => is_unitary_rows(m, tolerance),
        }
    }
}

fn is_unitary_rows<const N: usize>(m: &[[Complex64; N]; N], tolerance: f64) -> bool {
    for r in 0..N {
        for c in 0..N {
            let dot: Complex64 = (0..N).map(|k| m[r][k] * m[c][k].conj()).sum();
            let expected = if r == c { ONE } else { ZERO };
            if (dot - expected).norm() > tolerance {
                return false;
            }
        }
    }
    true
}
