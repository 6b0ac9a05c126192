// Dump the raw connectivity interval listing as JSON.
//
// Usage: cargo run --example dump_intervals -- [DB_PATH] [LIMIT]
//   DB_PATH  default: ./data/telemetry.db
//   LIMIT    default: 20 (newest entries)

use std::collections::VecDeque;
use std::env;
use std::sync::Arc;

use futures_util::StreamExt;
use telemetry_reports::reports::{ReportService, ReportSettings};
use telemetry_reports::telemetry_repo::TelemetryRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("./data/telemetry.db");
    let limit: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(20)
        .max(1);

    let repo = TelemetryRepo::connect(path, 1).await?;
    repo.init().await?;
    let service = ReportService::new(Arc::new(repo), ReportSettings::default());

    let mut entries = service.interval_listing().await?;
    let mut newest = VecDeque::with_capacity(limit);
    while let Some(entry) = entries.next().await {
        if newest.len() == limit {
            newest.pop_front();
        }
        newest.push_back(entry?);
    }
    println!("{}", serde_json::to_string_pretty(&newest)?);
    Ok(())
}
