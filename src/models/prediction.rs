use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prediction generation query parameters
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PredictionQuery {
    /// Number of predictions (default 5, capped at 10)
    pub num: Option<usize>,
    /// 0 = deterministic, 100 = fully random (default 0)
    pub variety: Option<u8>,
}

/// One generated candidate draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub prediction_number: usize,
    pub strategy: String,
    /// 6 distinct numbers in [1,37], ascending
    pub numbers: Vec<i32>,
    /// In [1,7]
    pub strong_number: i32,
}
