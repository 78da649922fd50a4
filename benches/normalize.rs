use criterion::{black_box, criterion_group, criterion_main, Criterion};
use onacc_forecast::{
    normalize_response, to_csv_bytes, CoordinatePair, CoordinateList, ForecastMode, LocalityIndex,
    RawResponse, VariableSelection,
};

const LOCATIONS: usize = 20;
const DAYS: usize = 180;

fn seasonal_payload() -> (CoordinateList, RawResponse) {
    let coordinates: CoordinateList = (0..LOCATIONS)
        .map(|i| CoordinatePair::new(format!("{}.5", i), format!("{}.25", i + 5)))
        .collect();

    let time: Vec<String> = (0..DAYS)
        .map(|d| {
            let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                + chrono::Duration::days(d as i64);
            format!("\"{}\"", date.format("%Y-%m-%d"))
        })
        .collect();
    let series = |base: f64| {
        (0..DAYS)
            .map(|d| format!("{:.1}", base + (d % 7) as f64))
            .collect::<Vec<_>>()
            .join(",")
    };
    let location = format!(
        r#"{{"daily":{{"time":[{}],"temperature_2m_max_mean":[{}],"temperature_2m_min_mean":[{}],"precipitation_sum_mean":[{}]}}}}"#,
        time.join(","),
        series(28.0),
        series(18.0),
        series(0.0),
    );
    let body = format!("[{}]", vec![location; LOCATIONS].join(","));
    (coordinates, RawResponse::ok(body))
}

fn bench_normalize(c: &mut Criterion) {
    let (coordinates, raw) = seasonal_payload();
    let index = LocalityIndex::new();

    c.bench_function("normalize_seasonal", |b| {
        b.iter(|| {
            normalize_response(
                black_box(&raw),
                &coordinates,
                &index,
                ForecastMode::Seasonal,
                VariableSelection::default(),
            )
        })
    });

    let table = normalize_response(
        &raw,
        &coordinates,
        &index,
        ForecastMode::Seasonal,
        VariableSelection::default(),
    )
    .unwrap();
    c.bench_function("export_csv", |b| b.iter(|| to_csv_bytes(black_box(&table))));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
