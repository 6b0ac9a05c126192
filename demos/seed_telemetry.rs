// Fill a database with two months of synthetic telemetry for one device.
//
// Connectivity flips every 1-3 hours. Event records (value 0 or 1) arrive every 1-60 minutes
// during the first half of each UTC day.
//
// Usage: cargo run --example seed_telemetry -- [DB_PATH]
//   DB_PATH  default: ./data/telemetry.db

use std::env;

use chrono::NaiveDate;
use rand::Rng;
use telemetry_reports::models::{ConnectivityState, EventRecord, StateSample};
use telemetry_reports::telemetry_repo::TelemetryRepo;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/telemetry.db".to_string());

    let start = utc_midnight(2024, 6, 1)?;
    let end = utc_midnight(2024, 8, 1)?;

    let mut rng = rand::thread_rng();
    let mut events = Vec::new();
    let mut samples = Vec::new();

    let mut day_start = start;
    while day_start < end {
        let day_end = day_start + MS_PER_DAY;

        let mut connected = false;
        let mut t = day_start;
        while t < day_end {
            connected = !connected;
            let state = if connected {
                ConnectivityState::Connected
            } else {
                ConnectivityState::Disconnected
            };
            samples.push(StateSample::new(t, state));
            t += rng.gen_range(1..=3i64) * MS_PER_HOUR;
        }

        let mut t = day_start;
        while day_end - t > 12 * MS_PER_HOUR {
            events.push(EventRecord::new(t, f64::from(rng.gen_range(0..=1u8))));
            t += rng.gen_range(1..=60i64) * MS_PER_MINUTE;
        }

        day_start = day_end;
    }

    let repo = TelemetryRepo::connect(&path, 1).await?;
    repo.init().await?;
    repo.save_events(&events).await?;
    repo.save_samples(&samples).await?;

    println!(
        "seeded {} event records and {} state samples into {}",
        events.len(),
        samples.len(),
        path
    );
    Ok(())
}

fn utc_midnight(year: i32, month: u32, day: u32) -> anyhow::Result<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid date {}-{}-{}", year, month, day))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis())
}
