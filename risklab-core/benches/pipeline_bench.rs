//! Throughput of a full pipeline run over synthetic daily history.

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use risklab_core::catalog::variables;
use risklab_core::{RiskPipeline, TimeSeries, TimeSeriesTable};

fn synthetic_table(n: usize) -> TimeSeriesTable {
    let base = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
    let columns = variables()
        .iter()
        .enumerate()
        .map(|(salt, def)| {
            let dates: Vec<NaiveDate> =
                (0..n).map(|i| base + Duration::days(i as i64)).collect();
            let values = (0..n)
                .map(|i| {
                    let wobble = ((i * (salt + 3)) % 97) as f64 / 97.0;
                    50.0 + (i as f64 * 0.013).sin() * 10.0 + wobble * 3.0
                })
                .collect();
            TimeSeries::new(def.code, dates, values).unwrap()
        })
        .collect();
    TimeSeriesTable::from_columns(columns).unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = RiskPipeline::default();

    let mut group = c.benchmark_group("pipeline");
    for &days in &[500usize, 2_000, 5_000] {
        let table = synthetic_table(days);
        group.bench_function(format!("full_run/{days}_days"), |b| {
            b.iter_batched(
                || table.clone(),
                |table| pipeline.run(&table, None).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
