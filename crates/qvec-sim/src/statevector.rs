//! Statevector storage.

use num_complex::Complex64;
use qvec_ir::GateApplication;

use crate::apply::apply_gate;
use crate::error::SimResult;

/// Tolerance for the total-probability check after each gate.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// A statevector representing a quantum state.
///
/// Bit `i` of an amplitude's index is the basis value of qubit `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn initial(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of amplitudes, `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Apply a gate in place.
    pub fn apply(&mut self, gate: &GateApplication) -> SimResult<()> {
        apply_gate(self, gate)
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Total probability, the sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Check that total probability is 1 within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() <= tolerance
    }

    /// Largest amplitude-wise distance to `other`, or `None` if the widths differ.
    pub fn max_distance(&self, other: &StateVector) -> Option<f64> {
        if self.num_qubits != other.num_qubits {
            return None;
        }
        Some(
            self.amplitudes
                .iter()
                .zip(&other.amplitudes)
                .map(|(a, b)| (a - b).norm())
                .fold(0.0, f64::max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = StateVector::initial(2);
        assert_eq!(sv.dim(), 4);
        assert_eq!(sv.num_qubits(), 2);
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[3], Complex64::new(0.0, 0.0)));
        assert!(sv.is_normalized(NORM_TOLERANCE));
    }

    #[test]
    fn test_zero_qubits() {
        let sv = StateVector::initial(0);
        assert_eq!(sv.dim(), 1);
        assert_eq!(sv.probabilities(), vec![1.0]);
    }

    #[test]
    fn test_max_distance() {
        let a = StateVector::initial(1);
        let b = StateVector::initial(2);
        assert_eq!(a.max_distance(&a), Some(0.0));
        assert_eq!(a.max_distance(&b), None);
    }
}
