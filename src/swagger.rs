use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::draws::get_history,
        handlers::draws::get_latest,
        handlers::draws::add_draw,
        handlers::statistics::get_statistics,
        handlers::predictions::get_predictions,
        handlers::reconcile::trigger_reconcile,
        handlers::reconcile::get_status,
        handlers::reconcile::get_missing,
    ),
    components(
        schemas(
            AddDrawRequest,
            AddDrawResponse,
            DrawResponse,
            DrawHistoryQuery,
            LatestDrawsQuery,
            DrawPageResponse,
            PredictionQuery,
            PredictionResponse,
            NumberCount,
            StatisticsResponse,
            ReconcileStatus,
            MissingDraw,
            ReconcileOutcome,
            TriggerReconcileResponse,
            MissingCheckResponse,
            ApiError,
        )
    ),
    tags(
        (name = "draws", description = "Draw ledger API"),
        (name = "statistics", description = "Statistics API"),
        (name = "predictions", description = "Prediction API"),
        (name = "reconcile", description = "Reconciliation API"),
    ),
    info(
        title = "Lotto Backend API",
        version = "1.0.0",
        description = "Draw ledger, statistics and prediction REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
