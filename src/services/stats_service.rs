use std::collections::BTreeMap;

use crate::entities::draw_entity as draws;
use crate::error::AppResult;
use crate::models::{MAIN_NUMBER_MAX, MAIN_NUMBER_MIN, NumberCount, StatisticsResponse};
use crate::services::LedgerService;

/// In-memory snapshot of the eligible slice of the ledger, newest draw
/// first. Computed fresh per query; all statistics and prediction inputs are
/// derived from it so one load serves a whole request.
#[derive(Debug, Clone)]
pub struct EligibleView {
    draws: Vec<[i32; 6]>,
    strongs: Vec<i32>,
    max_draw_number: i64,
}

impl EligibleView {
    pub fn new(draws: Vec<[i32; 6]>, strongs: Vec<i32>, max_draw_number: i64) -> Self {
        debug_assert_eq!(draws.len(), strongs.len());
        Self {
            draws,
            strongs,
            max_draw_number,
        }
    }

    pub fn from_models(models: &[draws::Model]) -> Self {
        let max_draw_number = models.iter().map(|m| m.draw_number).max().unwrap_or(0);
        Self::new(
            models.iter().map(|m| m.numbers()).collect(),
            models.iter().map(|m| m.strong_number).collect(),
            max_draw_number,
        )
    }

    /// Total eligible draw count.
    pub fn count(&self) -> usize {
        self.draws.len()
    }

    /// Max eligible draw_number, 0 when empty (seed input).
    pub fn max_draw_number(&self) -> i64 {
        self.max_draw_number
    }

    /// The most recent `limit` draws (all when `None`), newest first.
    pub fn window(&self, limit: Option<usize>) -> &[[i32; 6]] {
        let n = limit.unwrap_or(self.draws.len()).min(self.draws.len());
        &self.draws[..n]
    }

    /// The most recent `limit` strong numbers (all when `None`), newest first.
    pub fn strong_window(&self, limit: Option<usize>) -> &[i32] {
        let n = limit.unwrap_or(self.strongs.len()).min(self.strongs.len());
        &self.strongs[..n]
    }

    /// Occurrence count per main number across the windowed draws. Only
    /// observed numbers are present; an empty window yields an empty map.
    pub fn frequency_map(&self, limit: Option<usize>) -> BTreeMap<i32, u32> {
        let mut freq = BTreeMap::new();
        for draw in self.window(limit) {
            for &n in draw {
                *freq.entry(n).or_insert(0) += 1;
            }
        }
        freq
    }

    /// Occurrence count per strong number across the windowed draws.
    pub fn strong_frequency_map(&self, limit: Option<usize>) -> BTreeMap<i32, u32> {
        let mut freq = BTreeMap::new();
        for &n in self.strong_window(limit) {
            *freq.entry(n).or_insert(0) += 1;
        }
        freq
    }

    /// Most frequent numbers in the window, count descending, ties broken by
    /// natural number order ascending.
    pub fn hot_numbers(&self, top_n: usize, window: Option<usize>) -> Vec<i32> {
        let mut entries: Vec<(i32, u32)> = self.frequency_map(window).into_iter().collect();
        entries.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
        entries.truncate(top_n);
        entries.into_iter().map(|(n, _)| n).collect()
    }

    /// Least frequent numbers in the window, count ascending, ties ascending.
    /// The whole domain is seeded with zero counts first so numbers absent
    /// from the window still rank as coldest.
    pub fn cold_numbers(&self, top_n: usize, window: Option<usize>) -> Vec<i32> {
        let freq = self.frequency_map(window);
        let mut entries: Vec<(i32, u32)> = (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX)
            .map(|n| (n, freq.get(&n).copied().unwrap_or(0)))
            .collect();
        entries.sort_by_key(|&(_, count)| count);
        entries.truncate(top_n);
        entries.into_iter().map(|(n, _)| n).collect()
    }

    /// For each domain number, the index (0 = most recent) of the most recent
    /// eligible draw containing it; never-seen numbers take the total draw
    /// count, making them maximally overdue. Ranked descending by index,
    /// ties ascending by number.
    pub fn overdue_numbers(&self, top_n: usize) -> Vec<(i32, usize)> {
        let total = self.draws.len();
        let mut last_seen: Vec<Option<usize>> = vec![None; MAIN_NUMBER_MAX as usize];

        for (idx, draw) in self.draws.iter().enumerate() {
            for &n in draw {
                if (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX).contains(&n) {
                    let slot = &mut last_seen[(n - 1) as usize];
                    if slot.is_none() {
                        *slot = Some(idx);
                    }
                }
            }
        }

        let mut entries: Vec<(i32, usize)> = (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX)
            .map(|n| (n, last_seen[(n - 1) as usize].unwrap_or(total)))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(top_n);
        entries
    }
}

/// Entry with the highest count; ties go to the smaller number. `None` on an
/// empty map.
pub fn most_common(freq: &BTreeMap<i32, u32>) -> Option<NumberCount> {
    freq.iter()
        .max_by_key(|&(n, count)| (*count, std::cmp::Reverse(*n)))
        .map(|(&number, &count)| NumberCount { number, count })
}

/// Entry with the lowest count; ties go to the smaller number. `None` on an
/// empty map.
pub fn least_common(freq: &BTreeMap<i32, u32>) -> Option<NumberCount> {
    freq.iter()
        .min_by_key(|&(n, count)| (*count, *n))
        .map(|(&number, &count)| NumberCount { number, count })
}

/// Pure aggregation over an already-loaded view.
pub fn snapshot_from_view(view: &EligibleView) -> StatisticsResponse {
    let frequency = view.frequency_map(None);
    let strong_frequency = view.strong_frequency_map(None);

    StatisticsResponse {
        total_draws: view.count(),
        hot_numbers: view.hot_numbers(6, Some(50)),
        cold_numbers: view.cold_numbers(6, Some(50)),
        overdue_numbers: view
            .overdue_numbers(6)
            .into_iter()
            .map(|(n, _)| n)
            .collect(),
        most_common_number: most_common(&frequency).unwrap_or(NumberCount::NONE),
        least_common_number: least_common(&frequency).unwrap_or(NumberCount::NONE),
        most_common_strong: most_common(&strong_frequency).unwrap_or(NumberCount::NONE),
        least_common_strong: least_common(&strong_frequency).unwrap_or(NumberCount::NONE),
        frequency,
        strong_frequency,
    }
}

/// Statistics over the eligible view of the ledger.
#[derive(Clone)]
pub struct StatsService {
    ledger: LedgerService,
}

impl StatsService {
    pub fn new(ledger: LedgerService) -> Self {
        Self { ledger }
    }

    pub async fn eligible_view(&self) -> AppResult<EligibleView> {
        let models = self.ledger.eligible_draws().await?;
        Ok(EligibleView::from_models(&models))
    }

    pub async fn snapshot(&self) -> AppResult<StatisticsResponse> {
        let view = self.eligible_view().await?;
        Ok(snapshot_from_view(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rows: &[([i32; 6], i32)]) -> EligibleView {
        EligibleView::new(
            rows.iter().map(|(d, _)| *d).collect(),
            rows.iter().map(|(_, s)| *s).collect(),
            3878,
        )
    }

    #[test]
    fn test_frequency_map_flattens_slots() {
        let v = view(&[
            ([1, 2, 3, 4, 5, 6], 1),
            ([1, 2, 3, 10, 11, 12], 2),
            ([1, 20, 21, 22, 23, 24], 2),
        ]);
        let freq = v.frequency_map(None);
        assert_eq!(freq.get(&1), Some(&3));
        assert_eq!(freq.get(&2), Some(&2));
        assert_eq!(freq.get(&20), Some(&1));
        assert_eq!(freq.get(&37), None);
    }

    #[test]
    fn test_frequency_map_respects_window() {
        let v = view(&[([1, 2, 3, 4, 5, 6], 1), ([7, 8, 9, 10, 11, 12], 2)]);
        let freq = v.frequency_map(Some(1));
        assert_eq!(freq.get(&1), Some(&1));
        assert_eq!(freq.get(&7), None);
    }

    #[test]
    fn test_empty_view_yields_empty_maps_and_sentinel() {
        let v = view(&[]);
        assert!(v.frequency_map(None).is_empty());
        let snapshot = snapshot_from_view(&v);
        assert_eq!(snapshot.total_draws, 0);
        assert_eq!(snapshot.most_common_number, NumberCount::NONE);
        assert_eq!(snapshot.least_common_strong, NumberCount::NONE);
    }

    #[test]
    fn test_hot_numbers_tie_break_ascending() {
        // 5 and 9 both appear twice, 1/2/3 once
        let v = view(&[
            ([5, 9, 1, 2, 3, 30], 1),
            ([5, 9, 14, 22, 28, 33], 1),
        ]);
        let hot = v.hot_numbers(2, None);
        assert_eq!(hot, vec![5, 9]);
    }

    #[test]
    fn test_cold_numbers_seed_full_domain() {
        // only 6 numbers ever seen; coldest are unseen numbers in ascending order
        let v = view(&[([1, 2, 3, 4, 5, 6], 1)]);
        let cold = v.cold_numbers(3, None);
        assert_eq!(cold, vec![7, 8, 9]);
        // out-of-domain numbers can never appear
        assert!(!v.cold_numbers(37, None).contains(&40));
    }

    #[test]
    fn test_cold_ranks_zero_count_before_observed() {
        let v = view(&[([7, 7, 7, 7, 7, 7], 1)]); // degenerate on purpose
        let cold = v.cold_numbers(37, None);
        let pos_unseen = cold.iter().position(|&n| n == 36).unwrap();
        let pos_seen = cold.iter().position(|&n| n == 7).unwrap();
        assert!(pos_unseen < pos_seen);
    }

    #[test]
    fn test_overdue_never_seen_is_maximal() {
        let v = view(&[
            ([1, 2, 3, 4, 5, 6], 1),
            ([1, 2, 3, 4, 5, 7], 1),
            ([1, 2, 3, 4, 5, 8], 1),
        ]);
        let overdue = v.overdue_numbers(37);
        // 37 never appeared: rank equals the total eligible draw count
        let (_, rank) = overdue.iter().find(|(n, _)| *n == 37).copied().unwrap();
        assert_eq!(rank, v.count());
        // 6 last appeared in the most recent draw (index 0)
        let (_, rank6) = overdue.iter().find(|(n, _)| *n == 6).copied().unwrap();
        assert_eq!(rank6, 0);
        // 8 last appeared two draws ago
        let (_, rank8) = overdue.iter().find(|(n, _)| *n == 8).copied().unwrap();
        assert_eq!(rank8, 2);
        // never-seen numbers rank first, ascending among themselves
        assert_eq!(overdue[0].0, 9);
    }

    #[test]
    fn test_most_and_least_common() {
        let v = view(&[([1, 2, 3, 4, 5, 6], 3), ([1, 7, 8, 9, 10, 11], 3)]);
        let freq = v.frequency_map(None);
        assert_eq!(
            most_common(&freq),
            Some(NumberCount {
                number: 1,
                count: 2
            })
        );
        // ties on count=1 resolve to the smallest number
        assert_eq!(
            least_common(&freq),
            Some(NumberCount {
                number: 2,
                count: 1
            })
        );
        let strong = v.strong_frequency_map(None);
        assert_eq!(
            most_common(&strong),
            Some(NumberCount {
                number: 3,
                count: 2
            })
        );
    }

    #[test]
    fn test_snapshot_windows() {
        let v = view(&[([1, 2, 3, 4, 5, 6], 2); 60]);
        let snapshot = snapshot_from_view(&v);
        assert_eq!(snapshot.total_draws, 60);
        assert_eq!(snapshot.hot_numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(snapshot.frequency.get(&1), Some(&60));
        assert_eq!(snapshot.strong_frequency.get(&2), Some(&60));
        assert_eq!(snapshot.overdue_numbers.len(), 6);
    }
}
