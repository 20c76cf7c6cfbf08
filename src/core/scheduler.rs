//! Periodic publishing of due scheduled content.

use crate::core::publishing::SchedulerReport;
use crate::core::traits::PublishingService;
use di::Ref;
use log::{debug, error, info};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Runs one tick every `period` until `cancel` fires.
///
/// Ticks run back to back on this task, so they never overlap. A tick that overruns its slot
/// makes the loop skip the missed ticks instead of bursting.
pub async fn run(
    publisher: Ref<dyn PublishingService>,
    period: Duration,
    cancel: CancellationToken,
) {
    info!(
        "scheduler initialized, checking for scheduled content every {}s",
        period.as_secs()
    );

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                tick(publisher.as_ref()).await;
            }
        }
    }
}

/// A single scheduler pass. Errors are logged; the next tick simply tries again.
pub async fn tick(publisher: &dyn PublishingService) -> Option<SchedulerReport> {
    match publisher.run_due().await {
        Ok(report) => {
            if report.published > 0 || report.failed > 0 {
                info!(
                    "scheduler tick: {} published, {} relayed, {} relay failure(s), {} failed",
                    report.published, report.notified, report.notification_failures, report.failed
                );
            } else {
                debug!("scheduler tick: nothing due");
            }
            Some(report)
        }
        Err(e) => {
            error!("scheduler error: {e}");
            None
        }
    }
}
