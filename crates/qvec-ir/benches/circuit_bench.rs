//! Benchmarks for program construction
//!
//! Run with: cargo bench -p qvec-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qvec_ir::{CircuitProgram, ProgramFile, QubitId, build_circuit};

/// Benchmark appending gates to a builder
fn bench_gate_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_append");

    for num_qubits in &[2_u32, 10, 20] {
        group.bench_with_input(
            BenchmarkId::new("h_cx_layer", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| {
                    let mut builder = build_circuit(black_box(n), 0);
                    for q in 0..n {
                        builder.h(QubitId(q)).unwrap();
                    }
                    for q in 0..n - 1 {
                        builder.cx(QubitId(q), QubitId(q + 1)).unwrap();
                    }
                    builder.finish()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark loading a program from JSON
fn bench_program_parse(c: &mut Criterion) {
    let program = CircuitProgram::ghz(20).unwrap();
    let json = ProgramFile::from_program(&program).to_json().unwrap();

    c.bench_function("parse_ghz_20", |b| {
        b.iter(|| ProgramFile::parse(black_box(&json)).unwrap());
    });
}

criterion_group!(benches, bench_gate_append, bench_program_parse);
criterion_main!(benches);
