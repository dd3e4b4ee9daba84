//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Hard ceiling on `max_qubits`: 2^30 amplitudes already take 16 GiB.
pub const MAX_SUPPORTED_QUBITS: u32 = 30;

/// Settings for a [`crate::Simulator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seed for shot sampling. `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    /// Widest program accepted.
    pub max_qubits: u32,

    /// Shot count from which chunks are sampled on the rayon pool.
    pub parallel_threshold: u64,

    /// Shots per sampling chunk. Each chunk has its own generator, so the
    /// result for a given seed does not depend on the thread count.
    pub chunk_size: u64,

    /// Check that total probability stays 1 after every gate.
    pub check_normalization: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: 24,
            parallel_threshold: 65_536,
            chunk_size: 16_384,
            check_normalization: true,
        }
    }
}

impl SimulatorConfig {
    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the widest accepted program.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the shot count from which sampling goes parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: u64) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the number of shots per sampling chunk.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits == 0 {
            return Err(SimError::InvalidConfig("max_qubits must be > 0".into()));
        }
        if self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(SimError::InvalidConfig(format!(
                "max_qubits must be <= {MAX_SUPPORTED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if self.chunk_size == 0 {
            return Err(SimError::InvalidConfig("chunk_size must be > 0".into()));
        }
        Ok(())
    }
}
