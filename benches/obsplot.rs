use criterion::{black_box, criterion_group, criterion_main, Criterion};
use obsplot::{DailyObservations, WeatherChart};

const DIRECTIONS: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "Calm",
];

fn synthetic_csv(days: u32) -> String {
    let mut csv = String::from(
        "Date,Minimum temperature (°C),Maximum temperature (°C),Rainfall (mm),Speed of maximum wind gust (km/h),9am relative humidity (%),9am wind direction,9am wind speed (km/h),9am MSL pressure (hPa),3pm relative humidity (%),3pm wind speed (km/h),3pm MSL pressure (hPa)\n",
    );
    let start = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    for i in 0..days {
        let date = start + chrono::Duration::days(i as i64);
        let direction = DIRECTIONS[i as usize % DIRECTIONS.len()];
        let speed = if direction == "Calm" { "Calm".to_string() } else { (i % 40).to_string() };
        csv.push_str(&format!(
            "{},{:.1},{:.1},{:.1},{},{},{},{},{:.1},{},{},{:.1}\n",
            date,
            5.0 + (i % 10) as f64,
            20.0 + (i % 15) as f64,
            (i % 7) as f64 * 0.4,
            30 + i % 30,
            50 + i % 40,
            direction,
            speed,
            1005.0 + (i % 20) as f64,
            30 + i % 50,
            i % 35,
            1003.0 + (i % 20) as f64,
        ));
    }
    csv
}

fn bench_obsplot(c: &mut Criterion) {
    let month = synthetic_csv(31);
    let decade = synthetic_csv(3653);

    c.bench_function("clean_month", |b| {
        b.iter(|| DailyObservations::from_csv_bytes(black_box(month.as_bytes()), "bench"))
    });
    c.bench_function("clean_decade", |b| {
        b.iter(|| DailyObservations::from_csv_bytes(black_box(decade.as_bytes()), "bench"))
    });

    let observations = DailyObservations::from_csv_bytes(month.as_bytes(), "bench").unwrap();
    let chart = WeatherChart::builder().title("bench").build();
    c.bench_function("render_month", |b| b.iter(|| chart.to_json(black_box(&observations))));
}

criterion_group!(benches, bench_obsplot);
criterion_main!(benches);
