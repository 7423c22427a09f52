//! Reconciliation between the ledger and the source feed.
//!
//! One run: read the ledger tip, fetch the feed's newest draw, compute the
//! missing range, import what the feed can actually supply. The feed only
//! exposes full numbers for its single newest draw, so any older draws in
//! the gap are reported as still missing and require manual entry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::external::LottoFeed;
use crate::models::{
    MissingCheckResponse, MissingDraw, NewDraw, ReconcileOutcome, ReconcileStatus,
};
use crate::services::{InsertOutcome, LedgerService};

/// Result of a trigger: either a completed run or a report that another run
/// already held the gate.
#[derive(Debug, Clone)]
pub enum ReconcileRun {
    Completed(ReconcileOutcome),
    AlreadyRunning,
}

/// Non-blocking single-run gate. Acquisition fails immediately instead of
/// queueing; the guard releases on drop so every exit path of a run frees
/// the gate.
#[derive(Clone, Default)]
struct RunGate {
    active: Arc<AtomicBool>,
}

struct RunGuard {
    active: Arc<AtomicBool>,
}

impl RunGate {
    fn try_acquire(&self) -> Option<RunGuard> {
        self.active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunGuard {
                active: Arc::clone(&self.active),
            })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct ReconcileService {
    ledger: LedgerService,
    feed: LottoFeed,
    gate: RunGate,
    last_outcome: Arc<RwLock<Option<ReconcileOutcome>>>,
}

impl ReconcileService {
    pub fn new(ledger: LedgerService, feed: LottoFeed) -> Self {
        Self {
            ledger,
            feed,
            gate: RunGate::default(),
            last_outcome: Arc::new(RwLock::new(None)),
        }
    }

    /// The single idempotent check-and-import operation, shared by the
    /// scheduler tick and the manual trigger. Serialized through the gate:
    /// a concurrent trigger reports `AlreadyRunning` without blocking.
    pub async fn check_and_import(&self) -> AppResult<ReconcileRun> {
        let Some(_guard) = self.gate.try_acquire() else {
            log::info!("Reconciliation already running, trigger skipped");
            return Ok(ReconcileRun::AlreadyRunning);
        };

        match self.run_once().await {
            Ok(outcome) => {
                *self.last_outcome.write().await = Some(outcome.clone());
                Ok(ReconcileRun::Completed(outcome))
            }
            Err(e) => {
                // record the failed run for the status surface, best effort
                let latest_in_db = self
                    .ledger
                    .latest_draw_number()
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or(0);
                *self.last_outcome.write().await = Some(ReconcileOutcome {
                    status: ReconcileStatus::Failed,
                    latest_in_db,
                    latest_online: None,
                    imported: Vec::new(),
                    skipped: Vec::new(),
                    still_missing: Vec::new(),
                    failed: Vec::new(),
                    error: Some(e.to_string()),
                    checked_at: Utc::now(),
                });
                Err(e)
            }
        }
    }

    async fn run_once(&self) -> AppResult<ReconcileOutcome> {
        let latest_in_db = self.ledger.latest_draw_number().await?.unwrap_or(0);
        let latest = self.feed.fetch_latest().await?;

        log::info!(
            "Reconciling: ledger tip {latest_in_db}, feed tip {}",
            latest.draw_number
        );

        let mut outcome = ReconcileOutcome {
            status: ReconcileStatus::Done,
            latest_in_db,
            latest_online: Some(latest.draw_number),
            imported: Vec::new(),
            skipped: Vec::new(),
            still_missing: Vec::new(),
            failed: Vec::new(),
            error: None,
            checked_at: Utc::now(),
        };

        let missing = missing_range(latest_in_db, latest.draw_number);
        let (backfill_ids, importable) = split_gap(&missing);
        let Some(importable) = importable else {
            log::info!("Ledger is up to date");
            return Ok(outcome);
        };
        debug_assert_eq!(importable, latest.draw_number);

        // the feed cannot supply numbers for anything but its newest draw;
        // annotate the rest of the gap with catalog dates where available
        if !backfill_ids.is_empty() {
            let catalog = match self
                .feed
                .fetch_range(backfill_ids[0], backfill_ids[backfill_ids.len() - 1])
                .await
            {
                Ok(catalog) => catalog,
                Err(e) => {
                    log::warn!("Backfill catalog fetch failed: {e}");
                    Vec::new()
                }
            };
            outcome.still_missing = backfill_ids
                .iter()
                .map(|&draw_number| MissingDraw {
                    draw_number,
                    draw_date: catalog
                        .iter()
                        .find(|entry| entry.draw_number == draw_number)
                        .map(|entry| entry.draw_date.clone()),
                })
                .collect();
            log::warn!(
                "{} draw(s) in the gap require manual entry: {backfill_ids:?}",
                backfill_ids.len()
            );
        }

        let new_draw = NewDraw {
            draw_number: latest.draw_number,
            draw_date: latest.draw_date.clone(),
            numbers: latest.numbers.to_vec(),
            strong_number: latest.strong_number,
        };
        match self.ledger.insert(new_draw).await {
            Ok(InsertOutcome::Inserted) => {
                log::info!("Imported draw {}", latest.draw_number);
                outcome.imported.push(latest.draw_number);
            }
            Ok(InsertOutcome::Duplicate) => {
                outcome.skipped.push(latest.draw_number);
            }
            Err(AppError::ValidationError(msg)) => {
                log::error!("Feed draw {} rejected: {msg}", latest.draw_number);
                outcome.failed.push(latest.draw_number);
            }
            Err(e) => return Err(e),
        }

        Ok(outcome)
    }

    /// Gap report without importing anything. Does not take the gate: it
    /// writes nothing.
    pub async fn check_missing(&self) -> AppResult<MissingCheckResponse> {
        let latest_in_db = self.ledger.latest_draw_number().await?.unwrap_or(0);
        let latest = self.feed.fetch_latest().await?;

        let missing = missing_range(latest_in_db, latest.draw_number);
        Ok(MissingCheckResponse {
            latest_in_db,
            latest_online: latest.draw_number,
            count: missing.len(),
            missing_draws: missing,
        })
    }

    /// The last completed (or failed) run, immediately and without blocking
    /// on an active run.
    pub async fn last_outcome(&self) -> Option<ReconcileOutcome> {
        self.last_outcome.read().await.clone()
    }
}

/// Draw numbers the ledger is missing relative to the feed tip, ascending.
fn missing_range(latest_in_db: i64, latest_online: i64) -> Vec<i64> {
    (latest_in_db + 1..=latest_online).collect()
}

/// Split the missing range into (metadata-only backfill ids, the one
/// importable newest id).
fn split_gap(missing: &[i64]) -> (Vec<i64>, Option<i64>) {
    match missing.split_last() {
        Some((&newest, older)) => (older.to_vec(), Some(newest)),
        None => (Vec::new(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_range() {
        assert_eq!(missing_range(3875, 3878), vec![3876, 3877, 3878]);
        assert_eq!(missing_range(3878, 3878), Vec::<i64>::new());
        assert_eq!(missing_range(3880, 3878), Vec::<i64>::new());
        // empty ledger backfills from the feed tip only
        assert_eq!(missing_range(0, 2), vec![1, 2]);
    }

    #[test]
    fn test_split_gap() {
        let (older, newest) = split_gap(&[3876, 3877, 3878]);
        assert_eq!(older, vec![3876, 3877]);
        assert_eq!(newest, Some(3878));

        let (older, newest) = split_gap(&[3878]);
        assert!(older.is_empty());
        assert_eq!(newest, Some(3878));

        let (older, newest) = split_gap(&[]);
        assert!(older.is_empty());
        assert_eq!(newest, None);
    }

    #[test]
    fn test_run_gate_is_exclusive_and_releases_on_drop() {
        let gate = RunGate::default();

        let guard = gate.try_acquire();
        assert!(guard.is_some());
        assert!(gate.try_acquire().is_none());

        drop(guard);
        assert!(gate.try_acquire().is_some());
    }
}
