use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Timelike};
use clap::Parser;

/// Write a synthetic hourly air-quality dataset in the dashboard's CSV layout.
#[derive(Parser, Debug)]
struct Args {
    /// Output CSV path
    #[arg(default_value = "all_data.csv")]
    output: PathBuf,

    /// Number of days to generate, starting 2013-03-01
    #[arg(long, default_value_t = 365)]
    days: u32,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const STATIONS: [&str; 2] = ["Aotizhongxin", "Changping"];
const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const MISSING_RATE: f64 = 0.01;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }

    /// Format a reading, occasionally dropping it as `NA`.
    fn reading(&mut self, value: f64) -> String {
        if self.next_f64() < MISSING_RATE {
            "NA".to_string()
        } else {
            format!("{value:.1}")
        }
    }
}

fn air_quality_label(pm25: f64) -> &'static str {
    if pm25 > 75.0 {
        "Poor"
    } else if pm25 > 35.0 {
        "Moderate"
    } else {
        "Good"
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let start = NaiveDate::from_ymd_opt(2013, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("building start timestamp")?;
    let hours = args.days as i64 * 24;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "No", "year", "month", "day", "hour", "PM2.5", "PM10", "SO2", "NO2", "CO", "O3", "TEMP",
        "PRES", "DEWP", "RAIN", "wd", "WSPM", "station", "Air Quality",
    ])?;

    let mut row_no = 0u64;
    for (s, station) in STATIONS.iter().enumerate() {
        let station_bias = 1.0 + 0.15 * s as f64;
        for h in 0..hours {
            let ts = start + Duration::hours(h);
            let day_of_year = ts.ordinal() as f64;
            let hour = ts.hour() as f64;

            // Winter is colder and dirtier; evenings peak.
            let season = (2.0 * PI * (day_of_year - 15.0) / 365.0).cos();
            let diurnal = (2.0 * PI * (hour - 20.0) / 24.0).cos();

            let temp = 13.0 - 15.0 * season + 4.0 * (2.0 * PI * (hour - 14.0) / 24.0).cos()
                + rng.gauss(0.0, 1.5);
            let pres = 1012.0 + 12.0 * season + rng.gauss(0.0, 2.0);
            let dewp = temp - 8.0 - 6.0 * rng.next_f64();
            let wspm = (2.0 + rng.gauss(0.0, 1.2)).max(0.0);
            let rain = if rng.next_f64() < 0.05 { rng.next_f64() * 4.0 } else { 0.0 };

            let stagnation = (3.5 - wspm).max(0.2);
            let pm25 = ((60.0 + 35.0 * season + 20.0 * diurnal) * station_bias * stagnation / 2.0
                + rng.gauss(0.0, 8.0))
            .max(3.0);
            let pm10 = pm25 * 1.3 + rng.gauss(10.0, 6.0).max(0.0);
            let so2 = (12.0 + 10.0 * season + rng.gauss(0.0, 3.0)).max(2.0);
            let no2 = (45.0 + 15.0 * diurnal + rng.gauss(0.0, 6.0)).max(2.0);
            let co = (900.0 + 500.0 * season + 200.0 * diurnal + rng.gauss(0.0, 80.0)).max(100.0);
            let o3 = (55.0 - 30.0 * season - 15.0 * diurnal + rng.gauss(0.0, 8.0)).max(2.0);

            row_no += 1;
            let wd = WIND_DIRECTIONS[(rng.next_u64() % WIND_DIRECTIONS.len() as u64) as usize];
            writer.write_record([
                row_no.to_string(),
                ts.year().to_string(),
                ts.month().to_string(),
                ts.day().to_string(),
                ts.hour().to_string(),
                rng.reading(pm25),
                rng.reading(pm10),
                rng.reading(so2),
                rng.reading(no2),
                rng.reading(co),
                rng.reading(o3),
                rng.reading(temp),
                rng.reading(pres),
                rng.reading(dewp),
                format!("{rain:.1}"),
                wd.to_string(),
                rng.reading(wspm),
                station.to_string(),
                air_quality_label(pm25).to_string(),
            ])?;
        }
    }
    writer.flush()?;

    log::info!("Wrote {row_no} observations to {}", args.output.display());
    println!("Wrote {row_no} observations to {}", args.output.display());
    Ok(())
}
