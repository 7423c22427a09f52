use crate::config::AdminConfig;
use crate::error::AppError;
use crate::models::*;
use crate::services::{InsertOutcome, LedgerService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/draws",
    tag = "draws",
    params(
        ("page" = Option<u32>, Query, description = "Page (default 1)"),
        ("per_page" = Option<u32>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Paginated draw history, newest first", body = DrawPageResponse)
    )
)]
/// Full draw history, paginated, newest first. Includes legacy-game records.
pub async fn get_history(
    service: web::Data<LedgerService>,
    query: web::Query<DrawHistoryQuery>,
) -> Result<HttpResponse> {
    match service.history(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws/latest",
    tag = "draws",
    params(
        ("limit" = Option<u64>, Query, description = "Number of draws (default 10, max 100)")
    ),
    responses(
        (status = 200, description = "The most recent draws", body = [DrawResponse])
    )
)]
/// The most recent draws, newest first.
pub async fn get_latest(
    service: web::Data<LedgerService>,
    query: web::Query<LatestDrawsQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(10);
    match service.latest_draws(limit).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draws",
    tag = "draws",
    request_body = AddDrawRequest,
    responses(
        (status = 200, description = "Draw inserted or already present", body = AddDrawResponse),
        (status = 400, description = "Validation failure (field named in message)"),
        (status = 401, description = "Incorrect admin password")
    )
)]
/// Manually insert one draw (admin). Duplicate draw numbers are an
/// idempotent no-op, reported as "duplicate".
pub async fn add_draw(
    service: web::Data<LedgerService>,
    admin: web::Data<AdminConfig>,
    body: web::Json<AddDrawRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    if request.password != admin.password {
        return Ok(AppError::AuthError("Incorrect password".to_string()).error_response());
    }

    let draw_number = request.draw_number;
    match service.insert(request.into()).await {
        Ok(outcome) => {
            let data = AddDrawResponse {
                draw_number,
                outcome: match outcome {
                    InsertOutcome::Inserted => "inserted".to_string(),
                    InsertOutcome::Duplicate => "duplicate".to_string(),
                },
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn draws_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draws")
            .route("", web::get().to(get_history))
            .route("", web::post().to(add_draw))
            .route("/latest", web::get().to(get_latest)),
    );
}
