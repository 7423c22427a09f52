use crate::entities::draw_entity as draws;
use crate::error::{AppError, AppResult};
use crate::models::{
    DRAW_SIZE, DrawHistoryQuery, DrawResponse, MAIN_NUMBER_MAX, MAIN_NUMBER_MIN, NewDraw,
    PaginatedResponse, PaginationParams, STRONG_NUMBER_MAX, STRONG_NUMBER_MIN,
};
use crate::utils::{canonicalize_date, eligibility_cutoff};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Result of a ledger insert. Duplicates are an informational outcome, not
/// an error: imports are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// The authoritative draw ledger. Append-only: records are never updated or
/// deleted here; corrections are an administrative concern outside the
/// service.
#[derive(Clone)]
pub struct LedgerService {
    pool: DatabaseConnection,
}

impl LedgerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Validate and persist one draw.
    ///
    /// Uniqueness is enforced by the store's unique index on draw_number via
    /// ON CONFLICT DO NOTHING, so two concurrent inserts of the same draw can
    /// never both report `Inserted` even without outside serialization.
    pub async fn insert(&self, draw: NewDraw) -> AppResult<InsertOutcome> {
        validate_new_draw(&draw)?;
        self.insert_validated(&draw).await
    }

    async fn insert_validated(&self, draw: &NewDraw) -> AppResult<InsertOutcome> {
        let model = draws::ActiveModel {
            draw_number: Set(draw.draw_number),
            draw_date: Set(canonicalize_date(&draw.draw_date)),
            number1: Set(draw.numbers[0]),
            number2: Set(draw.numbers[1]),
            number3: Set(draw.numbers[2]),
            number4: Set(draw.numbers[3]),
            number5: Set(draw.numbers[4]),
            number6: Set(draw.numbers[5]),
            strong_number: Set(draw.strong_number),
            ..Default::default()
        };

        let result = draws::Entity::insert(model)
            .on_conflict(
                OnConflict::column(draws::Column::DrawNumber)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(DbErr::RecordNotInserted) => {
                log::debug!("Draw already exists, skipping: {}", draw.draw_number);
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Idempotent bulk import (CSV bootstrap). Applies inserts in ascending
    /// draw_number order; row failures are logged and counted as skipped,
    /// store failures abort.
    ///
    /// Historical rows only get shape validation, not current-game range
    /// validation: draws from the prior game configuration (numbers beyond
    /// today's ranges) are kept for reference and later excluded from
    /// statistics by the rule filter.
    pub async fn import_batch(&self, mut batch: Vec<NewDraw>) -> AppResult<(usize, usize)> {
        batch.sort_by_key(|d| d.draw_number);

        let mut imported = 0;
        let mut skipped = 0;
        for draw in batch {
            if let Err(e) = validate_historical_draw(&draw) {
                log::warn!("Skipping invalid draw {}: {e}", draw.draw_number);
                skipped += 1;
                continue;
            }
            match self.insert_validated(&draw).await? {
                InsertOutcome::Inserted => imported += 1,
                InsertOutcome::Duplicate => skipped += 1,
            }
        }
        Ok((imported, skipped))
    }

    /// Highest draw_number present, `None` on an empty ledger. Keyed by id,
    /// not date: historical dates can collide or be malformed.
    pub async fn latest_draw_number(&self) -> AppResult<Option<i64>> {
        let latest = draws::Entity::find()
            .order_by_desc(draws::Column::DrawNumber)
            .one(&self.pool)
            .await?;
        Ok(latest.map(|m| m.draw_number))
    }

    /// Paginated history, newest first.
    pub async fn history(
        &self,
        query: &DrawHistoryQuery,
    ) -> AppResult<PaginatedResponse<DrawResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let base_query = draws::Entity::find();
        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by(draws::Column::DrawDate, Order::Desc)
            .order_by(draws::Column::DrawNumber, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// The most recent `limit` draws, newest first.
    pub async fn latest_draws(&self, limit: u64) -> AppResult<Vec<DrawResponse>> {
        let items = draws::Entity::find()
            .order_by(draws::Column::DrawDate, Order::Desc)
            .order_by(draws::Column::DrawNumber, Order::Desc)
            .limit(limit.clamp(1, 100))
            .all(&self.pool)
            .await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Draws inside the eligibility window, newest first: recency filter
    /// (draw_date within the rolling window, compared on canonical text) plus
    /// the rule filter excluding legacy-game records.
    pub async fn eligible_draws(&self) -> AppResult<Vec<draws::Model>> {
        let cutoff = eligibility_cutoff();
        let rows = draws::Entity::find()
            .filter(draws::Column::DrawDate.gte(cutoff))
            .filter(draws::Column::StrongNumber.lte(STRONG_NUMBER_MAX))
            .filter(draws::Column::Number1.lte(MAIN_NUMBER_MAX))
            .filter(draws::Column::Number2.lte(MAIN_NUMBER_MAX))
            .filter(draws::Column::Number3.lte(MAIN_NUMBER_MAX))
            .filter(draws::Column::Number4.lte(MAIN_NUMBER_MAX))
            .filter(draws::Column::Number5.lte(MAIN_NUMBER_MAX))
            .filter(draws::Column::Number6.lte(MAIN_NUMBER_MAX))
            .order_by(draws::Column::DrawDate, Order::Desc)
            .order_by(draws::Column::DrawNumber, Order::Desc)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Field-level validation. Failures name the offending field and reject the
/// whole record; nothing is written.
pub fn validate_new_draw(draw: &NewDraw) -> AppResult<()> {
    if draw.draw_number < 1 {
        return Err(AppError::ValidationError(
            "draw_number: must be a positive integer".to_string(),
        ));
    }

    if draw.numbers.len() != DRAW_SIZE {
        return Err(AppError::ValidationError(format!(
            "numbers: exactly {DRAW_SIZE} main numbers required, got {}",
            draw.numbers.len()
        )));
    }

    for &n in &draw.numbers {
        if !(MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX).contains(&n) {
            return Err(AppError::ValidationError(format!(
                "numbers: {n} outside {MAIN_NUMBER_MIN}..={MAIN_NUMBER_MAX}"
            )));
        }
    }

    let mut sorted = draw.numbers.clone();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(AppError::ValidationError(
            "numbers: values must be pairwise distinct".to_string(),
        ));
    }

    if !(STRONG_NUMBER_MIN..=STRONG_NUMBER_MAX).contains(&draw.strong_number) {
        return Err(AppError::ValidationError(format!(
            "strong_number: {} outside {STRONG_NUMBER_MIN}..={STRONG_NUMBER_MAX}",
            draw.strong_number
        )));
    }

    Ok(())
}

/// Shape-only validation for historical imports: positive id, six positive
/// numbers, positive strong number. Legacy-game ranges are allowed in; the
/// eligible-view rule filter keeps them out of statistics.
pub fn validate_historical_draw(draw: &NewDraw) -> AppResult<()> {
    if draw.draw_number < 1 {
        return Err(AppError::ValidationError(
            "draw_number: must be a positive integer".to_string(),
        ));
    }
    if draw.numbers.len() != DRAW_SIZE {
        return Err(AppError::ValidationError(format!(
            "numbers: exactly {DRAW_SIZE} main numbers required, got {}",
            draw.numbers.len()
        )));
    }
    if draw.numbers.iter().any(|&n| n < 1) || draw.strong_number < 1 {
        return Err(AppError::ValidationError(
            "numbers: values must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(numbers: Vec<i32>, strong: i32) -> NewDraw {
        NewDraw {
            draw_number: 3878,
            draw_date: "16/12/2025".to_string(),
            numbers,
            strong_number: strong,
        }
    }

    #[test]
    fn test_validate_accepts_valid_draw() {
        assert!(validate_new_draw(&draw(vec![3, 9, 14, 22, 30, 36], 5)).is_ok());
        assert!(validate_new_draw(&draw(vec![1, 2, 3, 4, 5, 37], 7)).is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_count() {
        let err = validate_new_draw(&draw(vec![1, 2, 3, 4, 5], 1)).unwrap_err();
        assert!(err.to_string().contains("numbers"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_number() {
        let err = validate_new_draw(&draw(vec![1, 2, 3, 4, 5, 38], 1)).unwrap_err();
        assert!(err.to_string().contains("38"));
        assert!(validate_new_draw(&draw(vec![0, 2, 3, 4, 5, 6], 1)).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_numbers() {
        let err = validate_new_draw(&draw(vec![1, 2, 3, 4, 5, 5], 1)).unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn test_validate_rejects_bad_strong_number() {
        assert!(validate_new_draw(&draw(vec![1, 2, 3, 4, 5, 6], 0)).is_err());
        assert!(validate_new_draw(&draw(vec![1, 2, 3, 4, 5, 6], 8)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_draw_number() {
        let mut d = draw(vec![1, 2, 3, 4, 5, 6], 1);
        d.draw_number = 0;
        assert!(validate_new_draw(&d).is_err());
    }

    #[test]
    fn test_historical_validation_admits_legacy_ranges() {
        // prior game configuration: numbers beyond 37, strong beyond 7
        let legacy = draw(vec![5, 12, 23, 41, 45, 49], 8);
        assert!(validate_new_draw(&legacy).is_err());
        assert!(validate_historical_draw(&legacy).is_ok());
    }

    #[test]
    fn test_historical_validation_still_rejects_malformed_rows() {
        assert!(validate_historical_draw(&draw(vec![1, 2, 3], 1)).is_err());
        assert!(validate_historical_draw(&draw(vec![0, 2, 3, 4, 5, 6], 1)).is_err());
        let mut d = draw(vec![1, 2, 3, 4, 5, 6], 0);
        assert!(validate_historical_draw(&d).is_err());
        d.strong_number = 1;
        d.draw_number = -3;
        assert!(validate_historical_draw(&d).is_err());
    }
}
