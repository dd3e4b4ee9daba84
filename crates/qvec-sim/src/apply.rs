//! Gate application on a dense statevector.
//!
//! A k-qubit unitary touches the full `2^n` state without ever building the
//! `2^n × 2^n` operator: basis indices are grouped by the bits outside the
//! gate's qubits, and each group of `2^k` amplitudes is left-multiplied by
//! the gate matrix.

use num_complex::Complex64;
use qvec_ir::{GateApplication, IrError, Matrix2, Matrix4, Unitary};

use crate::error::SimResult;
use crate::statevector::StateVector;

/// Apply `gate` to `state` in place.
///
/// Fails with [`IrError::InvalidQubitIndex`] when an operand is outside the
/// state, and with [`IrError::ArityMismatch`] when the operands do not fit
/// the gate's matrix or a two-qubit gate repeats a qubit. A
/// [`qvec_ir::ProgramBuilder`] never produces either. The state is left
/// untouched on error.
pub fn apply_gate(state: &mut StateVector, gate: &GateApplication) -> SimResult<()> {
    let kind = gate.kind();
    for qubit in gate.qubits() {
        if qubit.index() >= state.num_qubits() {
            return Err(IrError::InvalidQubitIndex {
                qubit,
                num_qubits: state.num_qubits() as u32,
                gate_name: Some(kind.name().to_string()),
            }
            .into());
        }
    }
    if let GateApplication::Two { first, second, .. } = *gate {
        if first == second {
            return Err(IrError::ArityMismatch {
                gate_name: kind.name().to_string(),
                expected: 2,
                got: 1,
            }
            .into());
        }
    }

    match (*gate, gate.kind().unitary()) {
        (GateApplication::Single { qubit, .. }, Unitary::Single(matrix)) => {
            apply_single(state.amplitudes_mut(), qubit.index(), &matrix);
        }
        (GateApplication::Two { first, second, .. }, Unitary::Two(matrix)) => {
            apply_two(
                state.amplitudes_mut(),
                first.index(),
                second.index(),
                &matrix,
            );
        }
        (_, unitary) => {
            return Err(IrError::ArityMismatch {
                gate_name: gate.kind().name().to_string(),
                expected: unitary.num_qubits(),
                got: gate.qubits().len() as u32,
            }
            .into());
        }
    }
    Ok(())
}

/// Insert a zero bit at position `bit`, shifting higher bits up by one.
#[inline]
fn insert_zero_bit(value: usize, bit: usize) -> usize {
    let low = value & ((1 << bit) - 1);
    let high = (value >> bit) << (bit + 1);
    high | low
}

/// Apply a 2×2 matrix to `target`.
///
/// Each index with the target bit cleared is paired with its partner that
/// has the bit set.
pub(crate) fn apply_single(amplitudes: &mut [Complex64], target: usize, matrix: &Matrix2) {
    let mask = 1 << target;
    for k in 0..amplitudes.len() >> 1 {
        let i0 = insert_zero_bit(k, target);
        let i1 = i0 | mask;
        let a0 = amplitudes[i0];
        let a1 = amplitudes[i1];
        amplitudes[i0] = matrix[0][0] * a0 + matrix[0][1] * a1;
        amplitudes[i1] = matrix[1][0] * a0 + matrix[1][1] * a1;
    }
}

/// Apply a 4×4 matrix to the ordered pair (`first`, `second`).
///
/// The quadruple for each group is ordered by the local basis
/// `2·b(first) + b(second)`, matching [`Matrix4`].
pub(crate) fn apply_two(
    amplitudes: &mut [Complex64],
    first: usize,
    second: usize,
    matrix: &Matrix4,
) {
    let first_mask = 1 << first;
    let second_mask = 1 << second;
    let (low, high) = if first < second {
        (first, second)
    } else {
        (second, first)
    };

    for k in 0..amplitudes.len() >> 2 {
        let base = insert_zero_bit(insert_zero_bit(k, low), high);
        let indices = [
            base,
            base | second_mask,
            base | first_mask,
            base | first_mask | second_mask,
        ];
        let v = indices.map(|i| amplitudes[i]);

        for (row, &index) in matrix.iter().zip(&indices) {
            amplitudes[index] = row[0] * v[0] + row[1] * v[1] + row[2] * v[2] + row[3] * v[3];
        }
    }
}
