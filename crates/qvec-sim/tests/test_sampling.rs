//! Tests for measurement projection and shot aggregation.

use qvec_ir::{CircuitProgram, ClbitId, IrError, QubitId, build_circuit};
use qvec_sim::{SimError, Simulator, SimulatorConfig, simulate};

#[test]
fn subset_measurement_key_width_and_total() {
    // Three qubits in superposition, only qubits 0 and 2 measured
    let mut builder = build_circuit(3, 2);
    for q in 0..3 {
        builder.h(QubitId(q)).unwrap();
    }
    builder.measure(QubitId(0), ClbitId(0)).unwrap();
    builder.measure(QubitId(2), ClbitId(1)).unwrap();
    let program = builder.finish();

    let counts = simulate(&program, 2000, Some(5)).unwrap();
    assert_eq!(counts.total_shots(), 2000);
    assert!(counts.iter().all(|(k, _)| k.len() == 2));
    assert_eq!(counts.len(), 4);
}

#[test]
fn measured_qubit_lands_on_its_classical_bit() {
    // X on qubit 1, measured into clbit 0; qubit 0 (|0⟩) into clbit 1
    let mut builder = build_circuit(2, 2);
    builder.x(QubitId(1)).unwrap();
    builder.measure(QubitId(1), ClbitId(0)).unwrap();
    builder.measure(QubitId(0), ClbitId(1)).unwrap();
    let program = builder.finish();

    let counts = simulate(&program, 50, Some(1)).unwrap();
    assert_eq!(counts.get("01"), 50);
}

#[test]
fn unmeasured_classical_bits_read_zero() {
    let mut builder = build_circuit(1, 3);
    builder.x(QubitId(0)).unwrap();
    builder.measure(QubitId(0), ClbitId(1)).unwrap();
    let program = builder.finish();

    let counts = simulate(&program, 10, Some(1)).unwrap();
    assert_eq!(counts.get("010"), 10);
}

#[test]
fn shared_classical_bit_is_a_conflict() {
    let mut builder = build_circuit(2, 2);
    builder.measure(QubitId(0), ClbitId(0)).unwrap();
    let err = builder.measure(QubitId(1), ClbitId(0)).unwrap_err();
    assert!(matches!(err, IrError::MeasurementConflict(_)));

    // The same condition maps to the simulator's conflict error
    assert!(matches!(
        SimError::from(err),
        SimError::MeasurementConflict(_)
    ));
}

#[test]
fn parallel_sampling_is_thread_count_independent() {
    let program = CircuitProgram::ghz(4).unwrap();
    let sequential = Simulator::with_config(
        SimulatorConfig::default()
            .with_seed(77)
            .with_chunk_size(1_000)
            .with_parallel_threshold(u64::MAX),
    )
    .unwrap();
    let parallel = Simulator::with_config(
        SimulatorConfig::default()
            .with_seed(77)
            .with_chunk_size(1_000)
            .with_parallel_threshold(1),
    )
    .unwrap();

    let a = sequential.run(&program, 20_000).unwrap();
    let b = parallel.run(&program, 20_000).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.get("0000") + a.get("1111"), 20_000);
}

#[test]
fn independent_runs_in_parallel() {
    let programs = [
        CircuitProgram::bell().unwrap(),
        CircuitProgram::ghz(3).unwrap(),
        CircuitProgram::ghz(5).unwrap(),
    ];
    let sim = Simulator::with_config(SimulatorConfig::default().with_seed(3)).unwrap();
    let sim = &sim;

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = programs
            .iter()
            .map(|p| s.spawn(move || sim.run(p, 500).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (program, counts) in programs.iter().zip(&results) {
        assert_eq!(counts, &sim.run(program, 500).unwrap());
    }
}
