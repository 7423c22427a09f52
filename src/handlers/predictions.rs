use crate::models::{PredictionQuery, PredictionResponse};
use crate::services::PredictionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/predictions",
    tag = "predictions",
    params(
        ("num" = Option<usize>, Query, description = "Number of predictions (default 5, max 10)"),
        ("variety" = Option<u8>, Query, description = "0 = deterministic .. 100 = fully random (default 0)")
    ),
    responses(
        (status = 200, description = "Generated predictions", body = [PredictionResponse])
    )
)]
/// Generate candidate draws from the strategy roster. With variety 0 the
/// output is identical on every call until new draws enter the ledger.
pub async fn get_predictions(
    service: web::Data<PredictionService>,
    query: web::Query<PredictionQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let num = query.num.unwrap_or(5);
    let variety = query.variety.unwrap_or(0);

    match service.generate(num, variety).await {
        Ok(predictions) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": predictions })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn predictions_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/predictions", web::get().to(get_predictions));
}
