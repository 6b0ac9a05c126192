// TelemetryRepo tests: connect, init, save, bounds, range reads, ordering

mod common;

use common::*;
use futures_util::{StreamExt, TryStreamExt};
use telemetry_reports::models::{ConnectivityState, DataBounds, EventRecord};
use telemetry_reports::telemetry_repo::{TelemetryRepo, TelemetrySource};
use tempfile::TempDir;

async fn open_repo(dir: &TempDir) -> TelemetryRepo {
    let path = dir.path().join("telemetry.db");
    let repo = TelemetryRepo::connect(path.to_str().unwrap(), 2)
        .await
        .unwrap();
    repo.init().await.unwrap();
    repo
}

#[tokio::test]
async fn telemetry_repo_connect_and_init() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;
    // Second init is no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
}

#[tokio::test]
async fn telemetry_repo_empty_store_has_no_bounds() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;
    assert_eq!(repo.event_bounds().await.unwrap(), None);
    assert_eq!(repo.sample_bounds().await.unwrap(), None);
    assert!(repo.sample_stream().next().await.is_none());
}

#[tokio::test]
async fn telemetry_repo_save_events_and_read_range_inclusive() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;

    let t = at(2024, 6, 1, 0, 0);
    repo.save_events(&[
        EventRecord::new(t + 2 * HOUR, 1.0),
        EventRecord::new(t, 0.0),
        EventRecord::new(t + HOUR, 1.5),
        EventRecord::new(t + 3 * HOUR, 1.0),
    ])
    .await
    .unwrap();

    assert_eq!(
        repo.event_bounds().await.unwrap(),
        Some(DataBounds {
            min: t,
            max: t + 3 * HOUR,
        })
    );

    let in_range = repo.events_in_range(t + HOUR, t + 2 * HOUR).await.unwrap();
    assert_eq!(
        in_range,
        vec![
            EventRecord::new(t + HOUR, 1.5),
            EventRecord::new(t + 2 * HOUR, 1.0),
        ]
    );
}

#[tokio::test]
async fn telemetry_repo_samples_roundtrip_state_labels_in_order() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;

    let t = at(2024, 6, 1, 0, 0);
    repo.save_samples(&[disconnected(t + HOUR), connected(t), connected(t + 5 * HOUR)])
        .await
        .unwrap();

    let all: Vec<_> = repo.sample_stream().try_collect().await.unwrap();
    assert_eq!(
        all,
        vec![connected(t), disconnected(t + HOUR), connected(t + 5 * HOUR)]
    );

    let ranged = repo.samples_in_range(t + 1, t + 5 * HOUR).await.unwrap();
    assert_eq!(ranged.len(), 2);
    assert_eq!(ranged[0].state, ConnectivityState::Disconnected);

    assert_eq!(
        repo.sample_bounds().await.unwrap(),
        Some(DataBounds {
            min: t,
            max: t + 5 * HOUR,
        })
    );
}

#[tokio::test]
async fn telemetry_repo_save_empty_no_op() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;
    repo.save_events(&[]).await.unwrap();
    repo.save_samples(&[]).await.unwrap();
    assert_eq!(repo.event_bounds().await.unwrap(), None);
}
