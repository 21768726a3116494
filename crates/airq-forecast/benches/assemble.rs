use airq_forecast::{
    EnvironmentSnapshot, ForecastAssembler, Granularity, IndexMapper, TreeEnsembleClassifier,
};
use chrono::{DateTime, FixedOffset, Local};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn bench_assemble(c: &mut Criterion) {
    let model =
        TreeEnsembleClassifier::from_json(include_str!("../../../models/forecast_classifier_v1.json"))
            .expect("bundled model");
    let assembler = ForecastAssembler::new(Arc::new(model));
    let snapshot = EnvironmentSnapshot::default();
    let now: DateTime<FixedOffset> = Local::now().into();

    for granularity in [Granularity::Hourly, Granularity::Extended] {
        c.bench_function(&format!("assemble_{}", granularity), |b| {
            let mut mapper = IndexMapper::seeded(17);
            b.iter(|| {
                assembler
                    .assemble_at(black_box(&snapshot), granularity, now, &mut mapper)
                    .expect("assembly")
            })
        });
    }
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
