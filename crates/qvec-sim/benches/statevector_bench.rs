//! Benchmarks for gate application and shot sampling
//!
//! Run with: cargo bench -p qvec-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qvec_ir::{CircuitProgram, QubitId, build_circuit};
use qvec_sim::{Simulator, SimulatorConfig};

/// Benchmark a layer of H followed by a CX chain
fn bench_gate_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_layers");
    let sim = Simulator::new();

    for num_qubits in &[4_u32, 10, 16, 20] {
        let mut builder = build_circuit(*num_qubits, 0);
        for q in 0..*num_qubits {
            builder.h(QubitId(q)).unwrap();
        }
        for q in 0..num_qubits - 1 {
            builder.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
        let program = builder.finish();

        group.bench_with_input(
            BenchmarkId::new("h_cx", num_qubits),
            &program,
            |b, program| {
                b.iter(|| sim.statevector(black_box(program)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark sampling, sequential versus rayon
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let program = CircuitProgram::ghz(12).unwrap();

    for (label, threshold) in [("sequential", u64::MAX), ("parallel", 1)] {
        let sim = Simulator::with_config(
            SimulatorConfig::default()
                .with_seed(1)
                .with_parallel_threshold(threshold),
        )
        .unwrap();

        group.bench_function(BenchmarkId::new(label, 1_000_000), |b| {
            b.iter(|| sim.run(black_box(&program), 1_000_000).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gate_layers, bench_sampling);
criterion_main!(benches);
