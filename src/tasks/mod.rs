//! Background scheduled tasks for the application.
//!
//! The only recurring job is the reconciliation tick: check the source feed
//! for a newer draw and import it. Call `spawn_all` once during startup.

use crate::services::{ReconcileRun, ReconcileService};

/// Spawn all background tasks.
///
/// Notes
/// - The reconciliation run itself is serialized by the service's gate, so
///   a scheduled tick overlapping a manual trigger is skipped, not queued.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
///   The first check runs immediately at startup.
pub fn spawn_all(reconcile_service: ReconcileService, interval_secs: u64) {
    tokio::spawn(async move {
        loop {
            log::debug!("Starting scheduled reconciliation");
            match reconcile_service.check_and_import().await {
                Ok(ReconcileRun::Completed(outcome)) => {
                    if !outcome.imported.is_empty() {
                        log::info!("Reconciliation imported draws: {:?}", outcome.imported);
                    }
                    if !outcome.still_missing.is_empty() {
                        let ids: Vec<i64> = outcome
                            .still_missing
                            .iter()
                            .map(|m| m.draw_number)
                            .collect();
                        log::warn!("Draws requiring manual entry: {ids:?}");
                    }
                }
                Ok(ReconcileRun::AlreadyRunning) => {
                    log::debug!("Reconciliation already running, scheduled tick skipped");
                }
                Err(e) => log::error!("Scheduled reconciliation failed: {e:?}"),
            }
            tokio::time::sleep(std::time::Duration::from_secs(interval_secs)).await;
        }
    });
}
