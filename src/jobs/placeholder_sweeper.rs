//! Placeholder Sweeper Background Job
//!
//! A placeholder row can outlive its request if the process dies between
//! creating the row and transitioning it. This job periodically fails
//! placeholders stuck in `pending` past the configured age, so clients never
//! depend on rows whose audio will never arrive.

use std::time::{Duration, Instant};

use sqlx::PgPool;
use tokio::time::sleep;

use crate::db::comment_repo;

pub async fn start_placeholder_sweeper(db: PgPool, interval: Duration, max_age: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        max_age_secs = max_age.as_secs(),
        "Starting placeholder sweeper background job"
    );

    loop {
        sleep(interval).await;

        let cycle_start = Instant::now();
        match sweep_once(&db, max_age).await {
            Ok(failed) => {
                if failed > 0 {
                    tracing::info!(
                        failed,
                        duration_ms = cycle_start.elapsed().as_millis(),
                        "Swept stale placeholders"
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Placeholder sweep failed");
            }
        }
    }
}

/// One sweep cycle; separated from the loop so tests can drive it directly.
pub async fn sweep_once(db: &PgPool, max_age: Duration) -> Result<u64, sqlx::Error> {
    comment_repo::fail_stale_placeholders(db, max_age.as_secs() as i64).await
}
