use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_entity;

/// Current game shape: 6 distinct main numbers in [1,37] and one strong
/// number in [1,7]. Older records outside these ranges stay in the ledger
/// but are excluded from statistics by the rule filter.
pub const DRAW_SIZE: usize = 6;
pub const MAIN_NUMBER_MIN: i32 = 1;
pub const MAIN_NUMBER_MAX: i32 = 37;
pub const STRONG_NUMBER_MIN: i32 = 1;
pub const STRONG_NUMBER_MAX: i32 = 7;

/// A draw as submitted for insertion (before validation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDraw {
    pub draw_number: i64,
    /// Accepts DD/MM/YYYY or canonical YYYY-MM-DD
    pub draw_date: String,
    pub numbers: Vec<i32>,
    pub strong_number: i32,
}

/// Manual insert request (admin surface).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddDrawRequest {
    pub password: String,
    pub draw_number: i64,
    /// DD/MM/YYYY or YYYY-MM-DD
    pub draw_date: String,
    /// Exactly 6 distinct numbers in [1,37]
    pub numbers: Vec<i32>,
    /// In [1,7]
    pub strong_number: i32,
}

impl From<AddDrawRequest> for NewDraw {
    fn from(req: AddDrawRequest) -> Self {
        NewDraw {
            draw_number: req.draw_number,
            draw_date: req.draw_date,
            numbers: req.numbers,
            strong_number: req.strong_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddDrawResponse {
    pub draw_number: i64,
    /// "inserted" or "duplicate"
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub draw_number: i64,
    /// Canonical YYYY-MM-DD (verbatim when the stored value is unparseable)
    pub draw_date: String,
    pub numbers: Vec<i32>,
    pub strong_number: i32,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl From<draw_entity::Model> for DrawResponse {
    fn from(m: draw_entity::Model) -> Self {
        DrawResponse {
            draw_number: m.draw_number,
            draw_date: m.draw_date.clone(),
            numbers: m.numbers().to_vec(),
            strong_number: m.strong_number,
            recorded_at: m.created_at,
        }
    }
}

/// History listing query parameters
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawHistoryQuery {
    /// Page (default 1)
    pub page: Option<u32>,
    /// Page size (default 20, max 100)
    pub per_page: Option<u32>,
}

/// Latest-draws query parameters
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LatestDrawsQuery {
    /// Number of draws to return (default 10, max 100)
    pub limit: Option<u64>,
}
