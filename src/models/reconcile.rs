use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileStatus {
    Done,
    Failed,
}

/// A draw the feed could only describe by id and date; its numbers require
/// manual entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MissingDraw {
    pub draw_number: i64,
    /// DD/MM/YYYY as reported by the feed catalog, when known
    pub draw_date: Option<String>,
}

/// Structured outcome of one reconciliation run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReconcileOutcome {
    pub status: ReconcileStatus,
    pub latest_in_db: i64,
    pub latest_online: Option<i64>,
    /// Draw numbers newly written to the ledger this run
    pub imported: Vec<i64>,
    /// Draw numbers skipped as duplicates
    pub skipped: Vec<i64>,
    /// Draws in the gap the feed cannot supply numbers for
    pub still_missing: Vec<MissingDraw>,
    /// Draw numbers rejected by ledger validation
    pub failed: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// Response of the manual trigger endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TriggerReconcileResponse {
    /// True when another run held the gate and this trigger was a no-op
    pub already_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ReconcileOutcome>,
}

/// Gap report computed without importing anything.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MissingCheckResponse {
    pub latest_in_db: i64,
    pub latest_online: i64,
    pub missing_draws: Vec<i64>,
    pub count: usize,
}
