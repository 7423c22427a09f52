use crate::models::StatisticsResponse;
use crate::services::StatsService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/statistics",
    tag = "statistics",
    responses(
        (status = 200, description = "Statistics over the eligible view", body = StatisticsResponse)
    )
)]
/// Frequency, hot/cold and overdue aggregates over the eligible view
/// (rolling 4-year window, current game shape only).
pub async fn get_statistics(service: web::Data<StatsService>) -> Result<HttpResponse> {
    match service.snapshot().await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": snapshot }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn statistics_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/statistics", web::get().to(get_statistics));
}
