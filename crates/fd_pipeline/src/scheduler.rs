use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use tokio::sync::RwLock;
use tracing::{error, info};

use fd_core::UserConfig;

use crate::coordinator::{Pipeline, RunOutcome};

/// Tick period; several ticks fall inside any wall-clock minute so a
/// matching minute is never skipped.
const TICK: Duration = Duration::from_secs(20);

/// Daily trigger for the pipeline.
///
/// The send hour is re-read from the shared config on every tick, so a
/// config change takes effect for the next trigger without re-registration.
pub struct Scheduler {
    pipeline: Arc<Pipeline>,
    config: Arc<RwLock<UserConfig>>,
}

impl Scheduler {
    pub fn new(pipeline: Arc<Pipeline>, config: Arc<RwLock<UserConfig>>) -> Self {
        Self { pipeline, config }
    }

    /// Runs forever, firing at minute 0 of the configured hour and at most
    /// once per (date, hour) slot. No backoff, no catch-up for missed days.
    pub async fn run(self) {
        let mut last_fired: Option<(NaiveDate, u32)> = None;

        loop {
            tokio::time::sleep(TICK).await;

            let hour = self.config.read().await.hour;
            let now = Local::now().naive_local();
            if !due(now, hour, last_fired) {
                continue;
            }
            last_fired = Some((now.date(), hour));

            info!("running scheduled digest for {}h", hour);
            match self.pipeline.run().await {
                RunOutcome::Delivered => info!("scheduled digest dispatched"),
                RunOutcome::NoData => error!("scheduled digest produced no data"),
            }
        }
    }
}

/// True when `now` is minute 0 of `hour` and that (date, hour) slot has not
/// fired yet.
fn due(now: NaiveDateTime, hour: u32, last_fired: Option<(NaiveDate, u32)>) -> bool {
    now.minute() == 0 && now.hour() == hour && last_fired != Some((now.date(), hour))
}
