use crate::models::{MissingCheckResponse, ReconcileOutcome, TriggerReconcileResponse};
use crate::services::{ReconcileRun, ReconcileService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/reconcile",
    tag = "reconcile",
    responses(
        (status = 200, description = "Run completed (or another run already active)", body = TriggerReconcileResponse),
        (status = 502, description = "Source feed unavailable; run recorded as failed")
    )
)]
/// Trigger a check-and-import run. Runs are serialized: if one is already
/// active this returns immediately with already_running = true.
pub async fn trigger_reconcile(service: web::Data<ReconcileService>) -> Result<HttpResponse> {
    match service.check_and_import().await {
        Ok(ReconcileRun::Completed(outcome)) => {
            let data = TriggerReconcileResponse {
                already_running: false,
                outcome: Some(outcome),
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Ok(ReconcileRun::AlreadyRunning) => {
            let data = TriggerReconcileResponse {
                already_running: true,
                outcome: None,
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/reconcile/status",
    tag = "reconcile",
    responses(
        (status = 200, description = "Last completed or failed run, null before the first run", body = ReconcileOutcome)
    )
)]
/// Non-blocking read of the last run's outcome. Never triggers a run.
pub async fn get_status(service: web::Data<ReconcileService>) -> Result<HttpResponse> {
    let outcome = service.last_outcome().await;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": outcome })))
}

#[utoipa::path(
    get,
    path = "/reconcile/missing",
    tag = "reconcile",
    responses(
        (status = 200, description = "Gap between ledger tip and feed tip", body = MissingCheckResponse),
        (status = 502, description = "Source feed unavailable")
    )
)]
/// Report the missing draw range without importing anything.
pub async fn get_missing(service: web::Data<ReconcileService>) -> Result<HttpResponse> {
    match service.check_missing().await {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": report }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn reconcile_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reconcile")
            .route("", web::post().to(trigger_reconcile))
            .route("/status", web::get().to(get_status))
            .route("/missing", web::get().to(get_missing)),
    );
}
