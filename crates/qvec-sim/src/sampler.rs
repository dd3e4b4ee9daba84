//! Shot sampling from a final statevector.
//!
//! The sampler projects every basis state onto the measured qubits and sums
//! the probabilities of basis states sharing a projection, so unmeasured
//! qubits never show up in the outcome. Shots are then drawn from that
//! marginal distribution.
//!
//! Shots are split into fixed-size chunks, each with its own [`StdRng`]
//! seeded from a master generator. The chunk plan depends only on the shot
//! count, the chunk size and the seed, so the sequential and the rayon path
//! produce identical counts.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use qvec_ir::{IrError, Measurement};

use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::statevector::StateVector;

/// How shots are split and scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    /// Shots per chunk.
    pub chunk_size: u64,
    /// Shot count from which chunks run on the rayon pool.
    pub parallel_threshold: u64,
}

impl Default for SamplingPlan {
    fn default() -> Self {
        Self {
            chunk_size: 16_384,
            parallel_threshold: 65_536,
        }
    }
}

/// Marginal outcome distribution over the measured qubits.
#[derive(Debug, Clone)]
pub struct MeasurementSampler {
    /// Basis indices masked to the measured qubits, ascending.
    outcomes: Vec<usize>,
    /// Probability of each entry of `outcomes`.
    weights: Vec<f64>,
    /// Declared measurements.
    measurements: Vec<Measurement>,
    /// Width of reported bitstrings.
    num_clbits: usize,
}

impl MeasurementSampler {
    /// Build the marginal distribution of `state` for `measurements`.
    ///
    /// Fails with [`SimError::MeasurementConflict`] when a qubit is measured
    /// twice or two qubits write the same classical bit.
    pub fn new(
        state: &StateVector,
        measurements: &[Measurement],
        num_clbits: u32,
    ) -> SimResult<Self> {
        let mut seen_qubits = FxHashSet::default();
        let mut seen_clbits = FxHashSet::default();
        let mut mask = 0usize;

        for m in measurements {
            if m.qubit.index() >= state.num_qubits() {
                return Err(IrError::InvalidQubitIndex {
                    qubit: m.qubit,
                    num_qubits: state.num_qubits() as u32,
                    gate_name: None,
                }
                .into());
            }
            if m.clbit.0 >= num_clbits {
                return Err(IrError::InvalidBitIndex {
                    clbit: m.clbit,
                    num_clbits,
                }
                .into());
            }
            if !seen_qubits.insert(m.qubit) {
                return Err(SimError::MeasurementConflict(format!(
                    "{} is measured more than once",
                    m.qubit
                )));
            }
            if !seen_clbits.insert(m.clbit) {
                return Err(SimError::MeasurementConflict(format!(
                    "{} receives more than one measurement",
                    m.clbit
                )));
            }
            mask |= 1 << m.qubit.index();
        }

        let mut marginal: FxHashMap<usize, f64> = FxHashMap::default();
        for (index, amp) in state.amplitudes().iter().enumerate() {
            let p = amp.norm_sqr();
            if p > 0.0 {
                *marginal.entry(index & mask).or_insert(0.0) += p;
            }
        }

        let mut entries: Vec<_> = marginal.into_iter().collect();
        entries.sort_unstable_by_key(|&(outcome, _)| outcome);
        let (outcomes, weights) = entries.into_iter().unzip();

        Ok(Self {
            outcomes,
            weights,
            measurements: measurements.to_vec(),
            num_clbits: num_clbits as usize,
        })
    }

    /// Exact probability of each classical bitstring with nonzero weight.
    pub fn distribution(&self) -> Vec<(String, f64)> {
        self.outcomes
            .iter()
            .zip(&self.weights)
            .map(|(&outcome, &p)| (self.bitstring(outcome), p))
            .collect()
    }

    /// Draw `shots` samples with the generator seeded by `seed`.
    pub fn sample(&self, shots: i64, seed: u64, plan: SamplingPlan) -> SimResult<Counts> {
        let shots = validate_shots(shots)?;
        if plan.chunk_size == 0 {
            return Err(SimError::InvalidConfig("chunk_size must be > 0".into()));
        }

        let dist = WeightedIndex::new(&self.weights).map_err(|_| {
            SimError::NormalizationInvariantViolated {
                norm: self.weights.iter().sum(),
                gate_index: None,
            }
        })?;

        let mut master = StdRng::seed_from_u64(seed);
        let mut chunks = Vec::new();
        let mut remaining = shots;
        while remaining > 0 {
            let size = remaining.min(plan.chunk_size);
            chunks.push((size, master.next_u64()));
            remaining -= size;
        }

        let parallel = shots >= plan.parallel_threshold && chunks.len() > 1;
        debug!(
            "Sampling {} shots in {} chunks ({})",
            shots,
            chunks.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        let num_outcomes = self.outcomes.len();
        let sample_chunk = |&(size, chunk_seed): &(u64, u64)| {
            let mut rng = StdRng::seed_from_u64(chunk_seed);
            let mut histogram = vec![0u64; num_outcomes];
            for _ in 0..size {
                histogram[dist.sample(&mut rng)] += 1;
            }
            histogram
        };
        let merge = |mut a: Vec<u64>, b: Vec<u64>| {
            for (x, y) in a.iter_mut().zip(b) {
                *x += y;
            }
            a
        };

        let histogram = if parallel {
            chunks
                .par_iter()
                .map(sample_chunk)
                .reduce(|| vec![0; num_outcomes], merge)
        } else {
            chunks
                .iter()
                .map(sample_chunk)
                .fold(vec![0; num_outcomes], merge)
        };

        Ok(self
            .outcomes
            .iter()
            .zip(histogram)
            .filter(|&(_, count)| count > 0)
            .map(|(&outcome, count)| (self.bitstring(outcome), count))
            .collect())
    }

    /// Render a masked basis index as a classical bitstring.
    fn bitstring(&self, outcome: usize) -> String {
        let mut bits = vec![b'0'; self.num_clbits];
        for m in &self.measurements {
            if (outcome >> m.qubit.index()) & 1 == 1 {
                bits[self.num_clbits - 1 - m.clbit.index()] = b'1';
            }
        }
        bits.into_iter().map(char::from).collect()
    }
}

/// Reject non-positive shot counts.
pub fn validate_shots(shots: i64) -> SimResult<u64> {
    u64::try_from(shots)
        .ok()
        .filter(|&s| s > 0)
        .ok_or(SimError::InvalidShotCount(shots))
}
