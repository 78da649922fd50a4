use onacc_forecast::{
    CoordinatePair, ExportFormat, ForecastChart, ForecastDays, ForecastPipeline, LocalityIndex,
    ModeParameters, RawResponse, VariableSelection, WeatherPeriod,
};
use std::env;
use std::error::Error;

// Stand-in for what Open-Meteo returns for the two coordinates below.
const RESPONSE: &str = r#"[
    {"latitude": 3.848, "longitude": 11.5021, "daily": {
        "time": ["2025-03-01", "2025-03-02", "2025-03-03"],
        "temperature_2m_max": [29.4, 30.1, 28.7],
        "temperature_2m_min": [19.2, 19.8, 20.1],
        "precipitation_sum": [1.5, 0.0, 7.2]}},
    {"latitude": 4.0511, "longitude": 9.7679, "daily": {
        "time": ["2025-03-01", "2025-03-02", "2025-03-03"],
        "temperature_2m_max": [31.0, 31.4, 30.2],
        "temperature_2m_min": [23.9, 24.1, 23.5],
        "precipitation_sum": [8.0, 12.3, 3.1]}}
]"#;

fn main() -> Result<(), Box<dyn Error>> {
    configure_polars_display();
    let pipeline = ForecastPipeline::builder().build()?;

    let prepared = pipeline.prepare(
        "3.848,11.5021, 4.0511,9.7679",
        ModeParameters::Weather(WeatherPeriod::Days(ForecastDays::Three)),
        VariableSelection::default(),
    )?;
    println!("GET {}", prepared.query.to_url()?);

    let mut index = LocalityIndex::new();
    index.insert(CoordinatePair::new("3.848", "11.5021"), "Yaoundé");
    index.insert(CoordinatePair::new("4.0511", "9.7679"), "Douala");

    let table = pipeline.complete(&prepared, &RawResponse::ok(RESPONSE), &index)?;
    println!("{}", table.frame);

    let chart = ForecastChart::build(&table, prepared.request.mode())?;
    println!("chart: {} traces", chart.data.len());

    let csv = ExportFormat::Csv.encode(&table)?;
    print!("{}", String::from_utf8(csv)?);

    let xlsx = ExportFormat::Xlsx.encode(&table)?;
    let path = env::temp_dir().join(ExportFormat::Xlsx.file_name());
    std::fs::write(&path, xlsx)?;
    println!("wrote {}", path.display());

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
}
