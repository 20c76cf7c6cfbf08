//! Admin dashboard endpoints: content counters and the manual scheduler trigger.

use crate::api::error::AppResult;
use crate::core::traits::{ContentService, PublishingService};
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use log::info;

pub fn router() -> Router {
    Router::new()
        .route("/stats", get(stats))
        .route("/scheduler/check", post(check_scheduler))
}

async fn stats(
    Inject(content_service): Inject<dyn ContentService>,
) -> AppResult<Json<schemas::Stats>> {
    Ok(Json(content_service.stats().await?.into()))
}

/// Runs one scheduler tick now. It may overlap a background tick.
async fn check_scheduler(
    Inject(publisher): Inject<dyn PublishingService>,
) -> AppResult<Json<schemas::SchedulerCheck>> {
    info!("manual scheduler check requested");
    Ok(Json(publisher.run_due().await?.into()))
}

pub mod schemas {
    use crate::core::publishing::SchedulerReport;
    use crate::infrastructure::entities::ContentStats;
    use serde::Serialize;

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Stats {
        pub total_content: i64,
        pub published_content: i64,
        pub scheduled_content: i64,
        pub draft_content: i64,
    }

    impl From<ContentStats> for Stats {
        fn from(stats: ContentStats) -> Self {
            Stats {
                total_content: stats.total,
                published_content: stats.published,
                scheduled_content: stats.scheduled,
                draft_content: stats.draft,
            }
        }
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct SchedulerCheck {
        pub published: usize,
        pub notified: usize,
        pub notification_failures: usize,
        pub failed: usize,
    }

    impl From<SchedulerReport> for SchedulerCheck {
        fn from(report: SchedulerReport) -> Self {
            SchedulerCheck {
                published: report.published,
                notified: report.notified,
                notification_failures: report.notification_failures,
                failed: report.failed,
            }
        }
    }
}
