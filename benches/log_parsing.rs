//! Log and result-table parsing benchmarks (Criterion)

use coremark_pro_plugin::parser::{parse_results_table, LogFormat};
use coremark_pro_plugin::Workload;
use std::hint::black_box;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// A run log with `runs` repetitions of the per-workload median block.
fn sample_log(runs: usize) -> String {
    let mut log = String::from("#UID Suite Name Ctx Wrk Fails t(s) Iter Iter/s Codesize Datasize\n");
    for run in 0..runs {
        log.push_str(&format!("#Results for performance runs started at run {run}\n"));
        for (i, workload) in Workload::ALL.iter().enumerate() {
            log.push_str(&format!(
                "236138746 MLT {} 1 1 0 {:.3} {} 10.00 10000 20000\n",
                workload,
                0.1 * (i + 1) as f64,
                i + 1
            ));
            log.push_str(&format!(
                "median single {} 1 1 0 {:.3} {} 10.00 10000 20000\n",
                workload,
                0.1 * (i + 1) as f64,
                i + 1
            ));
        }
    }
    log
}

fn sample_output() -> String {
    let mut output = String::from(
        "WORKLOAD RESULTS TABLE\n\nWorkload Name (iter/s) (iter/s) Scaling\n---------- ---------- ----------\n",
    );
    for workload in Workload::ALL {
        output.push_str(&format!("{workload} 178.57 178.57 1.00\n"));
    }
    output.push_str("\nMARK RESULTS TABLE\n\nMark Name MultiCore SingleCore Scaling\n");
    output.push_str("CoreMark-PRO 4512.34 4512.34 1.00\n");
    output
}

fn benchmark_log_passes(c: &mut Criterion) {
    let format = LogFormat::default();
    let mut group = c.benchmark_group("log_parsing");

    for runs in [1, 10, 100].iter() {
        let log = sample_log(*runs);

        group.bench_with_input(BenchmarkId::new("median_times", runs), &log, |b, log| {
            b.iter(|| format.median_times(black_box(log)))
        });
        group.bench_with_input(BenchmarkId::new("iteration_counts", runs), &log, |b, log| {
            b.iter(|| format.iteration_counts(black_box(log)))
        });
    }

    group.finish();
}

fn benchmark_results_table(c: &mut Criterion) {
    let output = sample_output();
    c.bench_function("results_table", |b| {
        b.iter(|| parse_results_table(black_box(&output)))
    });
}

criterion_group!(benches, benchmark_log_passes, benchmark_results_table);
criterion_main!(benches);
