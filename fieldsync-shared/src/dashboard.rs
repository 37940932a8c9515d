/// Aggregate reporting over stored form submissions
///
/// The dashboard summary is computed by scanning every submission and
/// folding five figures out of well-known payload keys:
///
/// - `students`: distinct non-empty `studentName` string values
/// - `teachers`: distinct `submitted_by` emails
/// - `attendance`: percentage of "present" among submissions that carry an
///   `attendance` key at all (one decimal)
/// - `alerts`: submissions whose `healthStatus` is "poor" or
///   "needs_attention"
/// - `growth`: percentage change of submission volume, last 30 days versus
///   the 30 days before that (one decimal, 0 when the prior window is empty)
///
/// Payloads are otherwise opaque; a submission missing a key simply does not
/// contribute to that figure.
///
/// The summary must never break: [`summarize`] swallows storage errors into
/// the all-zero default so the dashboard always renders.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::warn;

use crate::models::form::FormSubmission;

/// Health statuses that count as alerts
const ALERT_STATUSES: &[&str] = &["poor", "needs_attention"];

/// Dashboard summary figures
///
/// `Default` is the all-zero summary returned when aggregation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Distinct non-empty studentName values
    pub students: usize,

    /// Distinct submitting users
    pub teachers: usize,

    /// Present-rate percentage, one decimal
    pub attendance: f64,

    /// Submissions flagged poor or needs_attention
    pub alerts: usize,

    /// 30-day submission growth percentage, one decimal
    pub growth: f64,
}

/// Loads all submissions and computes the summary
///
/// Any storage failure degrades to [`DashboardSummary::default`] (all
/// zeros) after logging; the dashboard route cannot fail.
pub async fn summarize(pool: &PgPool) -> DashboardSummary {
    match FormSubmission::list_all(pool).await {
        Ok(submissions) => compute_summary(&submissions, Utc::now()),
        Err(e) => {
            warn!("dashboard aggregation failed, returning zeroed summary: {}", e);
            DashboardSummary::default()
        }
    }
}

/// Computes the summary from submissions already in memory
///
/// `now` anchors the growth windows: recent is `[now - 30d, now]`, prior is
/// `[now - 60d, now - 30d)`. Ratios with an empty denominator are 0, never
/// NaN.
pub fn compute_summary(submissions: &[FormSubmission], now: DateTime<Utc>) -> DashboardSummary {
    let mut students: HashSet<&str> = HashSet::new();
    let mut teachers: HashSet<&str> = HashSet::new();
    let mut attendance_total = 0usize;
    let mut attendance_present = 0usize;
    let mut alerts = 0usize;
    let mut recent = 0usize;
    let mut previous = 0usize;

    let recent_cutoff = now - Duration::days(30);
    let previous_cutoff = now - Duration::days(60);

    for submission in submissions {
        if let Some(name) = submission.data.get("studentName").and_then(JsonValue::as_str) {
            if !name.is_empty() {
                students.insert(name);
            }
        }

        teachers.insert(submission.submitted_by.as_str());

        if let Some(value) = submission.data.get("attendance") {
            attendance_total += 1;
            if value.as_str() == Some("present") {
                attendance_present += 1;
            }
        }

        if let Some(status) = submission.data.get("healthStatus").and_then(JsonValue::as_str) {
            if ALERT_STATUSES.contains(&status) {
                alerts += 1;
            }
        }

        if submission.created_at >= recent_cutoff {
            recent += 1;
        } else if submission.created_at >= previous_cutoff {
            previous += 1;
        }
    }

    let attendance = if attendance_total > 0 {
        round_one_decimal(attendance_present as f64 / attendance_total as f64 * 100.0)
    } else {
        0.0
    };

    let growth = if previous > 0 {
        round_one_decimal((recent as f64 - previous as f64) / previous as f64 * 100.0)
    } else {
        0.0
    };

    DashboardSummary {
        students: students.len(),
        teachers: teachers.len(),
        attendance,
        alerts,
        growth,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
