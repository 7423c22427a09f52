use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A number together with its occurrence count. `(0, 0)` is the sentinel
/// returned when the eligible view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct NumberCount {
    pub number: i32,
    pub count: u32,
}

impl NumberCount {
    pub const NONE: NumberCount = NumberCount {
        number: 0,
        count: 0,
    };
}

/// Aggregated statistics over the eligible view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatisticsResponse {
    /// Draws inside the eligibility window (recency + rule filter)
    pub total_draws: usize,
    /// Main-number occurrence counts over the full eligible view
    #[schema(value_type = Object)]
    pub frequency: BTreeMap<i32, u32>,
    /// Strong-number occurrence counts over the full eligible view
    #[schema(value_type = Object)]
    pub strong_frequency: BTreeMap<i32, u32>,
    /// Top 6 by count over the last 50 eligible draws
    pub hot_numbers: Vec<i32>,
    /// Bottom 6 by count over the last 50 eligible draws (zero-seeded domain)
    pub cold_numbers: Vec<i32>,
    /// Top 6 by draws-since-last-appearance
    pub overdue_numbers: Vec<i32>,
    pub most_common_number: NumberCount,
    pub least_common_number: NumberCount,
    pub most_common_strong: NumberCount,
    pub least_common_strong: NumberCount,
}
