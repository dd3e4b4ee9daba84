//! Simulator orchestration.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use qvec_ir::{CircuitProgram, Measurement};

use crate::apply::apply_gate;
use crate::config::SimulatorConfig;
use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::sampler::{MeasurementSampler, SamplingPlan, validate_shots};
use crate::statevector::{NORM_TOLERANCE, StateVector};

/// Phase of a single simulation run.
///
/// ```text
///   Initialized ──→ GatesApplied ──→ Sampled ──→ Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Fresh |0…0⟩ state allocated.
    Initialized,
    /// Every gate applied in program order.
    GatesApplied,
    /// Shots drawn from the final distribution.
    Sampled,
    /// Counts handed back to the caller.
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Initialized => write!(f, "Initialized"),
            RunPhase::GatesApplied => write!(f, "GatesApplied"),
            RunPhase::Sampled => write!(f, "Sampled"),
            RunPhase::Done => write!(f, "Done"),
        }
    }
}

/// Result of a simulation run with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Program name.
    pub program: String,
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots drawn.
    pub shots: u64,
    /// Seed the sampler used; rerunning with it reproduces `counts`.
    pub seed: u64,
    /// Wall-clock time of the run.
    #[serde(rename = "execution_time_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Dense statevector simulator.
///
/// A simulator holds only its configuration; every run allocates its own
/// state, so one instance can serve concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator from a validated configuration.
    pub fn with_config(config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run `program` for `shots` shots and return the counts.
    pub fn run(&self, program: &CircuitProgram, shots: i64) -> SimResult<Counts> {
        Ok(self.run_detailed(program, shots)?.counts)
    }

    /// Run `program` and report counts, seed and timing.
    #[instrument(skip(self, program), fields(program = program.name()))]
    pub fn run_detailed(&self, program: &CircuitProgram, shots: i64) -> SimResult<SimulationReport> {
        let start = Instant::now();
        let requested = shots;
        let shots = validate_shots(requested)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        debug!(
            "Starting simulation: {} qubits, {} gates, {} shots, seed {}",
            program.num_qubits(),
            program.num_gates(),
            shots,
            seed
        );

        let state = self.evolve(program)?;

        let measurements: Vec<Measurement> = program.measurements().copied().collect();
        let sampler = MeasurementSampler::new(&state, &measurements, program.num_clbits())?;
        drop(state);

        let plan = SamplingPlan {
            chunk_size: self.config.chunk_size,
            parallel_threshold: self.config.parallel_threshold,
        };
        let counts = sampler.sample(requested, seed, plan)?;
        debug!(phase = %RunPhase::Sampled, "{} distinct outcomes", counts.len());

        let elapsed = start.elapsed();
        debug!(phase = %RunPhase::Done, "Simulation completed in {:?}", elapsed);

        Ok(SimulationReport {
            program: program.name().to_string(),
            counts,
            shots,
            seed,
            elapsed,
        })
    }

    /// Apply every gate of `program` and return the final state.
    pub fn statevector(&self, program: &CircuitProgram) -> SimResult<StateVector> {
        self.evolve(program)
    }

    /// Exact outcome distribution of `program` over its classical bits.
    pub fn distribution(&self, program: &CircuitProgram) -> SimResult<Vec<(String, f64)>> {
        let state = self.evolve(program)?;
        let measurements: Vec<Measurement> = program.measurements().copied().collect();
        let sampler = MeasurementSampler::new(&state, &measurements, program.num_clbits())?;
        Ok(sampler.distribution())
    }

    fn evolve(&self, program: &CircuitProgram) -> SimResult<StateVector> {
        program.validate()?;

        if program.num_qubits() > self.config.max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits: program.num_qubits(),
                max_qubits: self.config.max_qubits,
            });
        }

        let mut state = StateVector::initial(program.num_qubits() as usize);
        debug!(phase = %RunPhase::Initialized, "Allocated {} amplitudes", state.dim());

        for (gate_index, gate) in program.gates().enumerate() {
            apply_gate(&mut state, gate)?;
            trace!("Applied {}", gate);

            if self.config.check_normalization {
                check_normalization(&state, gate_index)?;
            }
        }

        debug!(phase = %RunPhase::GatesApplied, "Applied {} gates", program.num_gates());
        Ok(state)
    }
}

/// Fail if total probability has drifted from 1 after gate `gate_index`.
fn check_normalization(state: &StateVector, gate_index: usize) -> SimResult<()> {
    let norm = state.norm_sqr();
    if (norm - 1.0).abs() > NORM_TOLERANCE {
        return Err(SimError::NormalizationInvariantViolated {
            norm,
            gate_index: Some(gate_index),
        });
    }
    Ok(())
}

/// Simulate `program` with default settings.
///
/// With `seed = Some(s)` the result is a pure function of
/// (`program`, `shots`, `s`).
pub fn simulate(program: &CircuitProgram, shots: i64, seed: Option<u64>) -> SimResult<Counts> {
    let config = SimulatorConfig {
        seed,
        ..SimulatorConfig::default()
    };
    Simulator::with_config(config)?.run(program, shots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::apply_single;
    use num_complex::Complex64;
    use qvec_ir::{ClbitId, QubitId, build_circuit};

    #[test]
    fn test_simulator_bell_state() {
        let program = CircuitProgram::bell().unwrap();
        let counts = simulate(&program, 1000, Some(7)).unwrap();

        // Bell state should produce only 00 and 11
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[test]
    fn test_simulator_ghz_state() {
        let program = CircuitProgram::ghz(3).unwrap();
        let counts = simulate(&program, 1000, Some(11)).unwrap();

        // GHZ state should produce only 000 and 111
        assert_eq!(counts.get("000") + counts.get("111"), 1000);
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let sim = Simulator::with_config(SimulatorConfig::default().with_max_qubits(5)).unwrap();
        let program = build_circuit(10, 0).finish();

        assert!(matches!(
            sim.run(&program, 100),
            Err(SimError::CircuitTooLarge {
                num_qubits: 10,
                max_qubits: 5
            })
        ));
    }

    #[test]
    fn test_report_carries_seed() {
        let sim = Simulator::with_config(SimulatorConfig::default().with_seed(42)).unwrap();
        let program = CircuitProgram::bell().unwrap();
        let report = sim.run_detailed(&program, 64).unwrap();
        assert_eq!(report.seed, 42);
        assert_eq!(report.shots, 64);
        assert_eq!(report.program, "bell");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("execution_time_ms").is_some());
        assert_eq!(json["shots"], 64);
    }

    #[test]
    fn test_unseeded_report_is_reproducible() {
        let program = CircuitProgram::bell().unwrap();
        let report = Simulator::new().run_detailed(&program, 256).unwrap();
        let replay = simulate(&program, 256, Some(report.seed)).unwrap();
        assert_eq!(report.counts, replay);
    }

    #[test]
    fn test_statevector_without_sampling() {
        let mut builder = build_circuit(1, 1);
        builder.x(QubitId(0)).unwrap();
        builder.measure(QubitId(0), ClbitId(0)).unwrap();
        let program = builder.finish();

        let state = Simulator::new().statevector(&program).unwrap();
        assert_eq!(state.probabilities(), vec![0.0, 1.0]);

        let dist = Simulator::new().distribution(&program).unwrap();
        assert_eq!(dist, vec![("1".to_string(), 1.0)]);
    }

    #[test]
    fn test_invalid_shots_rejected_before_work() {
        let program = CircuitProgram::bell().unwrap();
        assert_eq!(
            simulate(&program, 0, Some(1)),
            Err(SimError::InvalidShotCount(0))
        );
        assert_eq!(
            simulate(&program, -3, None),
            Err(SimError::InvalidShotCount(-3))
        );
    }

    #[test]
    fn test_norm_drift_is_reported() {
        let mut state = StateVector::initial(2);
        check_normalization(&state, 0).unwrap();

        // Doubling the |0⟩ amplitude is not unitary: total probability becomes 4
        let zero = Complex64::new(0.0, 0.0);
        let scale = [[Complex64::new(2.0, 0.0), zero], [zero, Complex64::new(2.0, 0.0)]];
        apply_single(state.amplitudes_mut(), 1, &scale);

        let err = check_normalization(&state, 3).unwrap_err();
        assert_eq!(
            err,
            SimError::NormalizationInvariantViolated {
                norm: 4.0,
                gate_index: Some(3),
            }
        );
        assert!(err.to_string().contains("after gate 3"));
    }
}
