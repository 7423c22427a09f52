//! Prediction generation.
//!
//! A fixed roster of heuristic strategies, each a pure function of the
//! eligible view and an injected RNG. Draws are independent random events,
//! so none of this outperforms chance; the value is in the reproducibility
//! contract: with `variety = 0` the RNG is seeded from the ledger content
//! and the output is identical until new draws arrive.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::AppResult;
use crate::models::{
    DRAW_SIZE, MAIN_NUMBER_MAX, MAIN_NUMBER_MIN, PredictionResponse, STRONG_NUMBER_MAX,
    STRONG_NUMBER_MIN,
};
use crate::services::{EligibleView, StatsService};

/// Hard cap per generation call.
pub const MAX_PREDICTIONS: usize = 10;
/// Variety at or above this value means a fully entropy-seeded RNG.
pub const MAX_VARIETY: u8 = 100;

/// The closed strategy roster, dispatched round-robin in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    FrequencyBased,
    Balanced,
    Overdue,
    PatternBased,
    StatisticalAverage,
    RecentTrends,
    NumberPairs,
    SumTargeting,
    OddEvenBalanced,
    SpreadDistribution,
}

impl Strategy {
    pub const ROSTER: [Strategy; 10] = [
        Strategy::FrequencyBased,
        Strategy::Balanced,
        Strategy::Overdue,
        Strategy::PatternBased,
        Strategy::StatisticalAverage,
        Strategy::RecentTrends,
        Strategy::NumberPairs,
        Strategy::SumTargeting,
        Strategy::OddEvenBalanced,
        Strategy::SpreadDistribution,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::FrequencyBased => "Frequency Based (Hot Numbers)",
            Strategy::Balanced => "Balanced (Hot & Cold)",
            Strategy::Overdue => "Overdue Numbers",
            Strategy::PatternBased => "Pattern Based",
            Strategy::StatisticalAverage => "Statistical Average",
            Strategy::RecentTrends => "Recent Trends",
            Strategy::NumberPairs => "Number Pairs Analysis",
            Strategy::SumTargeting => "Sum-Based Targeting",
            Strategy::OddEvenBalanced => "Odd/Even Balanced",
            Strategy::SpreadDistribution => "Spread Distribution",
        }
    }

    /// Produce one candidate draw: 6 distinct ascending numbers in [1,37]
    /// and a strong number in [1,7]. All randomness flows through `rng`.
    pub fn predict(&self, view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
        match self {
            Strategy::FrequencyBased => frequency_based(view, rng),
            Strategy::Balanced => balanced(view, rng),
            Strategy::Overdue => overdue(view, rng),
            Strategy::PatternBased => pattern_based(view, rng),
            Strategy::StatisticalAverage => statistical_average(view, rng),
            Strategy::RecentTrends => recent_trends(view, rng),
            Strategy::NumberPairs => number_pairs(view, rng),
            Strategy::SumTargeting => sum_targeting(view, rng),
            Strategy::OddEvenBalanced => odd_even_balanced(view, rng),
            Strategy::SpreadDistribution => spread_distribution(view, rng),
        }
    }
}

/// Sample 6 of the top-15 hot numbers (window 100); most frequent strong.
fn frequency_based(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let hot = view.hot_numbers(15, Some(100));

    let numbers = if hot.len() >= DRAW_SIZE {
        sample(rng, &hot, DRAW_SIZE)
    } else {
        let mut picked = hot.clone();
        picked.extend(sample(rng, &remaining_domain(&hot), DRAW_SIZE - hot.len()));
        picked
    };

    let strong = most_frequent_strong(view, Some(100)).unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// 3 from the top-10 hot + 3 from the top-10 cold (window 50); random strong
/// among the top 3 most frequent.
fn balanced(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let hot = view.hot_numbers(10, Some(50));
    let cold = view.cold_numbers(10, Some(50));

    let mut selected: Vec<i32> = if hot.len() >= 3 {
        sample(rng, &hot, 3)
    } else {
        hot.clone()
    };

    // on sparse data hot and cold can overlap; keep the picks distinct
    let cold_pool: Vec<i32> = cold
        .iter()
        .copied()
        .filter(|n| !selected.contains(n))
        .collect();
    if cold_pool.len() >= 3 {
        selected.extend(sample(rng, &cold_pool, 3));
    } else {
        selected.extend(cold_pool);
    }

    pad_from_domain(rng, &mut selected);

    let top_strong: Vec<i32> = ranked_desc(&view.strong_frequency_map(None))
        .into_iter()
        .take(3)
        .collect();
    let strong = top_strong
        .choose(rng)
        .copied()
        .unwrap_or_else(|| random_strong(rng));
    (finalize(selected), strong)
}

/// Sample 6 of the top-12 overdue numbers; least frequent strong.
fn overdue(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let pool: Vec<i32> = view
        .overdue_numbers(12)
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    let numbers = sample(rng, &pool, DRAW_SIZE);

    let strong = least_frequent_strong(view, None).unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// Randomized even/odd split target (2-4 even) filled from a shuffled
/// domain; random strong among the last 10 draws.
fn pattern_based(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let mut even_slots = *[2usize, 3, 4].choose(rng).unwrap();
    let mut odd_slots = DRAW_SIZE - even_slots;

    let mut domain: Vec<i32> = (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX).collect();
    domain.shuffle(rng);

    let mut numbers = Vec::with_capacity(DRAW_SIZE);
    for n in domain {
        if numbers.len() >= DRAW_SIZE {
            break;
        }
        if n % 2 == 0 && even_slots > 0 {
            numbers.push(n);
            even_slots -= 1;
        } else if n % 2 == 1 && odd_slots > 0 {
            numbers.push(n);
            odd_slots -= 1;
        }
    }
    pad_from_domain(rng, &mut numbers);

    let strong = view
        .strong_window(Some(10))
        .choose(rng)
        .copied()
        .unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// Numbers whose frequency sits within 30% of the mean frequency; strong
/// analogous over strong frequencies.
fn statistical_average(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let freq = view.frequency_map(None);

    let numbers = if freq.is_empty() {
        let domain: Vec<i32> = (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX).collect();
        sample(rng, &domain, DRAW_SIZE)
    } else {
        let avg = freq.values().map(|&c| c as f64).sum::<f64>() / freq.len() as f64;
        let candidates: Vec<i32> = freq
            .iter()
            .filter(|&(_, &count)| (count as f64 - avg).abs() <= avg * 0.3)
            .map(|(&n, _)| n)
            .collect();
        if candidates.len() >= DRAW_SIZE {
            sample(rng, &candidates, DRAW_SIZE)
        } else {
            let mut picked = candidates.clone();
            picked.extend(sample(
                rng,
                &remaining_domain(&candidates),
                DRAW_SIZE - candidates.len(),
            ));
            picked
        }
    };

    let strong_freq = view.strong_frequency_map(None);
    let strong = if strong_freq.is_empty() {
        random_strong(rng)
    } else {
        let avg =
            strong_freq.values().map(|&c| c as f64).sum::<f64>() / strong_freq.len() as f64;
        let candidates: Vec<i32> = strong_freq
            .iter()
            .filter(|&(_, &count)| (count as f64 - avg).abs() <= avg * 0.3)
            .map(|(&n, _)| n)
            .collect();
        candidates
            .choose(rng)
            .copied()
            .unwrap_or_else(|| random_strong(rng))
    };

    (finalize(numbers), strong)
}

/// Sample 6 of the 12 most frequent numbers in the last 10 draws; most
/// frequent recent strong.
fn recent_trends(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let trending: Vec<i32> = ranked_desc(&view.frequency_map(Some(10)))
        .into_iter()
        .take(12)
        .collect();

    let numbers = if trending.len() >= DRAW_SIZE {
        sample(rng, &trending, DRAW_SIZE)
    } else {
        let mut picked = trending.clone();
        picked.extend(sample(
            rng,
            &remaining_domain(&trending),
            DRAW_SIZE - trending.len(),
        ));
        picked
    };

    let strong = most_frequent_strong(view, Some(10)).unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// Greedily collect distinct numbers from the 10 most co-occurring pairs of
/// the last 100 draws; most frequent strong.
fn number_pairs(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let mut pair_freq: BTreeMap<(i32, i32), u32> = BTreeMap::new();
    for draw in view.window(Some(100)) {
        for i in 0..draw.len() {
            for j in i + 1..draw.len() {
                let pair = (draw[i].min(draw[j]), draw[i].max(draw[j]));
                *pair_freq.entry(pair).or_insert(0) += 1;
            }
        }
    }

    let mut pairs: Vec<((i32, i32), u32)> = pair_freq.into_iter().collect();
    pairs.sort_by_key(|&(_, count)| Reverse(count));

    let mut numbers: Vec<i32> = Vec::new();
    'outer: for ((a, b), _) in pairs.into_iter().take(10) {
        for n in [a, b] {
            if !numbers.contains(&n) {
                numbers.push(n);
            }
            if numbers.len() >= DRAW_SIZE {
                break 'outer;
            }
        }
    }
    pad_from_domain(rng, &mut numbers);

    let strong = most_frequent_strong(view, Some(100)).unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// Resample uniformly until the candidate sum lands within 10% of the mean
/// draw sum of the last 100 draws, bounded to 100 attempts (the last attempt
/// is accepted as-is); most frequent strong.
fn sum_targeting(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let domain: Vec<i32> = (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX).collect();
    let window = view.window(Some(100));

    let mut numbers = sample(rng, &domain, DRAW_SIZE);
    if !window.is_empty() {
        let avg = window
            .iter()
            .map(|d| d.iter().sum::<i32>() as f64)
            .sum::<f64>()
            / window.len() as f64;
        let target = avg as i32;
        let band = (target as f64 * 0.1) as i32;

        let mut attempts = 0;
        while attempts < 100 {
            let sum: i32 = numbers.iter().sum();
            if (target - band..=target + band).contains(&sum) {
                break;
            }
            numbers = sample(rng, &domain, DRAW_SIZE);
            attempts += 1;
        }
    }

    let strong = most_frequent_strong(view, Some(100)).unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// 3 of the top-10 most frequent odds + 3 of the top-10 most frequent evens
/// (window 50), padded from the spare parity pools; random strong among the
/// window-50 strong numbers.
fn odd_even_balanced(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let ranked = ranked_desc(&view.frequency_map(Some(50)));
    let top_odds: Vec<i32> = ranked.iter().copied().filter(|n| n % 2 == 1).take(10).collect();
    let top_evens: Vec<i32> = ranked.iter().copied().filter(|n| n % 2 == 0).take(10).collect();

    let mut numbers: Vec<i32> = Vec::new();
    if top_odds.len() >= 3 {
        numbers.extend(sample(rng, &top_odds, 3));
    } else {
        numbers.extend(&top_odds);
        let spare: Vec<i32> = (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX)
            .step_by(2)
            .filter(|n| !numbers.contains(n))
            .collect();
        numbers.extend(sample(rng, &spare, 3 - top_odds.len()));
    }

    if top_evens.len() >= 3 {
        numbers.extend(sample(rng, &top_evens, 3));
    } else {
        numbers.extend(&top_evens);
        let spare: Vec<i32> = (MAIN_NUMBER_MIN + 1..=MAIN_NUMBER_MAX)
            .step_by(2)
            .filter(|n| !numbers.contains(n))
            .collect();
        numbers.extend(sample(rng, &spare, 3 - top_evens.len()));
    }

    let strong_keys: Vec<i32> = view.strong_frequency_map(Some(50)).into_keys().collect();
    let strong = strong_keys
        .choose(rng)
        .copied()
        .unwrap_or_else(|| random_strong(rng));
    (finalize(numbers), strong)
}

/// One number per contiguous sixth of the domain: the most frequent in the
/// segment (window 100), or a random in-segment number when unobserved;
/// strong at the median rank of the ascending strong frequency map.
fn spread_distribution(view: &EligibleView, rng: &mut StdRng) -> (Vec<i32>, i32) {
    let freq = view.frequency_map(Some(100));
    let segment = MAIN_NUMBER_MAX as f64 / DRAW_SIZE as f64;

    let mut numbers = Vec::with_capacity(DRAW_SIZE);
    for i in 0..DRAW_SIZE {
        let start = (i as f64 * segment) as i32 + 1;
        let end = (((i + 1) as f64) * segment) as i32;
        let end = end.min(MAIN_NUMBER_MAX);

        let best = (start..=end)
            .filter(|n| freq.contains_key(n))
            .max_by_key(|n| (freq[n], Reverse(*n)));
        match best {
            Some(n) => numbers.push(n),
            None => numbers.push(rng.gen_range(start..=end)),
        }
    }

    let strong_freq = view.strong_frequency_map(Some(100));
    let strong = if strong_freq.is_empty() {
        random_strong(rng)
    } else {
        let mut entries: Vec<(i32, u32)> = strong_freq.into_iter().collect();
        entries.sort_by_key(|&(_, count)| count);
        entries[entries.len() / 2].0
    };

    (finalize(numbers), strong)
}

fn sample(rng: &mut StdRng, pool: &[i32], k: usize) -> Vec<i32> {
    pool.choose_multiple(rng, k).copied().collect()
}

/// Top up with uniform domain picks until 6 distinct numbers are held.
fn pad_from_domain(rng: &mut StdRng, numbers: &mut Vec<i32>) {
    while numbers.len() < DRAW_SIZE {
        let n = rng.gen_range(MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX);
        if !numbers.contains(&n) {
            numbers.push(n);
        }
    }
}

fn remaining_domain(exclude: &[i32]) -> Vec<i32> {
    (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX)
        .filter(|n| !exclude.contains(n))
        .collect()
}

fn finalize(mut numbers: Vec<i32>) -> Vec<i32> {
    numbers.truncate(DRAW_SIZE);
    numbers.sort_unstable();
    numbers
}

/// Map entries by count descending, ties by natural number order ascending.
fn ranked_desc(freq: &BTreeMap<i32, u32>) -> Vec<i32> {
    let mut entries: Vec<(i32, u32)> = freq.iter().map(|(&n, &c)| (n, c)).collect();
    entries.sort_by_key(|&(_, count)| Reverse(count));
    entries.into_iter().map(|(n, _)| n).collect()
}

fn most_frequent_strong(view: &EligibleView, limit: Option<usize>) -> Option<i32> {
    view.strong_frequency_map(limit)
        .into_iter()
        .max_by_key(|&(n, count)| (count, Reverse(n)))
        .map(|(n, _)| n)
}

fn least_frequent_strong(view: &EligibleView, limit: Option<usize>) -> Option<i32> {
    view.strong_frequency_map(limit)
        .into_iter()
        .min_by_key(|&(n, count)| (count, n))
        .map(|(n, _)| n)
}

fn random_strong(rng: &mut StdRng) -> i32 {
    rng.gen_range(STRONG_NUMBER_MIN..=STRONG_NUMBER_MAX)
}

/// Content-derived base seed: stable hash over eligible draw count, max
/// eligible draw_number, strategy name and invocation index. First four
/// md5 bytes, big-endian.
fn base_seed(view: &EligibleView, strategy: Strategy, index: usize) -> u64 {
    let key = format!(
        "{}_{}_{}_{}",
        view.count(),
        view.max_draw_number(),
        strategy.display_name(),
        index
    );
    let digest = md5::compute(key.as_bytes());
    u64::from(u32::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3],
    ]))
}

/// Variety seeding policy:
/// - 0: deterministic seed from ledger content (identical output until the
///   ledger changes)
/// - 100: entropy-seeded, non-reproducible
/// - in between: base seed perturbed by a random offset in [0, variety]
fn variety_rng(view: &EligibleView, strategy: Strategy, index: usize, variety: u8) -> StdRng {
    if variety >= MAX_VARIETY {
        return StdRng::from_entropy();
    }

    let seed = base_seed(view, strategy, index);
    if variety == 0 {
        StdRng::seed_from_u64(seed)
    } else {
        let offset = rand::thread_rng().gen_range(0..=variety as u64);
        StdRng::seed_from_u64(seed.wrapping_add(offset))
    }
}

/// Round-robin roster dispatch over an already-loaded view, capped at
/// `MAX_PREDICTIONS` per call.
pub fn generate_from_view(
    view: &EligibleView,
    count: usize,
    variety: u8,
) -> Vec<PredictionResponse> {
    let count = count.min(MAX_PREDICTIONS);

    (0..count)
        .map(|i| {
            let strategy = Strategy::ROSTER[i % Strategy::ROSTER.len()];
            let mut rng = variety_rng(view, strategy, i, variety);
            let (numbers, strong_number) = strategy.predict(view, &mut rng);
            PredictionResponse {
                prediction_number: i + 1,
                strategy: strategy.display_name().to_string(),
                numbers,
                strong_number,
            }
        })
        .collect()
}

/// Prediction generation over the eligible view of the ledger.
#[derive(Clone)]
pub struct PredictionService {
    stats: StatsService,
}

impl PredictionService {
    pub fn new(stats: StatsService) -> Self {
        Self { stats }
    }

    pub async fn generate(&self, count: usize, variety: u8) -> AppResult<Vec<PredictionResponse>> {
        let view = self.stats.eligible_view().await?;
        Ok(generate_from_view(&view, count, variety))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_view(n: usize) -> EligibleView {
        let mut draws = Vec::with_capacity(n);
        let mut strongs = Vec::with_capacity(n);
        for i in 0..n {
            let base = i as i32;
            draws.push([0, 5, 11, 17, 23, 29].map(|off| (base + off) % 37 + 1));
            strongs.push((i % 7) as i32 + 1);
        }
        EligibleView::new(draws, strongs, 3800 + n as i64)
    }

    fn assert_valid_prediction(numbers: &[i32], strong: i32) {
        assert_eq!(numbers.len(), DRAW_SIZE, "got {numbers:?}");
        assert!(
            numbers.windows(2).all(|w| w[0] < w[1]),
            "not distinct ascending: {numbers:?}"
        );
        assert!(
            numbers
                .iter()
                .all(|n| (MAIN_NUMBER_MIN..=MAIN_NUMBER_MAX).contains(n))
        );
        assert!((STRONG_NUMBER_MIN..=STRONG_NUMBER_MAX).contains(&strong));
    }

    #[test]
    fn test_all_strategies_produce_valid_draws() {
        let view = synthetic_view(120);
        for (i, strategy) in Strategy::ROSTER.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(42 + i as u64);
            let (numbers, strong) = strategy.predict(&view, &mut rng);
            assert_valid_prediction(&numbers, strong);
        }
    }

    #[test]
    fn test_all_strategies_handle_empty_view() {
        let view = EligibleView::new(Vec::new(), Vec::new(), 0);
        for strategy in Strategy::ROSTER {
            let mut rng = StdRng::seed_from_u64(7);
            let (numbers, strong) = strategy.predict(&view, &mut rng);
            assert_valid_prediction(&numbers, strong);
        }
    }

    #[test]
    fn test_all_strategies_handle_single_draw_view() {
        let view = EligibleView::new(vec![[1, 2, 3, 4, 5, 6]], vec![4], 3878);
        for strategy in Strategy::ROSTER {
            let mut rng = StdRng::seed_from_u64(11);
            let (numbers, strong) = strategy.predict(&view, &mut rng);
            assert_valid_prediction(&numbers, strong);
        }
    }

    #[test]
    fn test_variety_zero_is_deterministic() {
        let view = synthetic_view(80);
        let first = generate_from_view(&view, 10, 0);
        let second = generate_from_view(&view, 10, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_variety_hundred_is_still_valid() {
        let view = synthetic_view(40);
        let predictions = generate_from_view(&view, 5, 100);
        assert_eq!(predictions.len(), 5);
        for p in &predictions {
            assert_valid_prediction(&p.numbers, p.strong_number);
        }
    }

    #[test]
    fn test_round_robin_dispatch_and_cap() {
        let view = synthetic_view(30);
        let predictions = generate_from_view(&view, 25, 0);
        assert_eq!(predictions.len(), MAX_PREDICTIONS);
        assert_eq!(predictions[0].strategy, "Frequency Based (Hot Numbers)");
        assert_eq!(predictions[9].strategy, "Spread Distribution");
        assert_eq!(predictions[0].prediction_number, 1);
        assert_eq!(predictions[9].prediction_number, 10);
    }

    #[test]
    fn test_base_seed_varies_by_strategy_and_index() {
        let view = synthetic_view(10);
        let s1 = base_seed(&view, Strategy::FrequencyBased, 0);
        let s2 = base_seed(&view, Strategy::Balanced, 0);
        let s3 = base_seed(&view, Strategy::FrequencyBased, 1);
        assert_ne!(s1, s2);
        assert_ne!(s1, s3);
    }

    #[test]
    fn test_frequency_strategy_draws_from_hot_pool() {
        // only six numbers ever observed, so they are the whole hot pool
        let view = EligibleView::new(vec![[1, 2, 3, 4, 5, 6]; 120], vec![3; 120], 3878);
        let mut rng = StdRng::seed_from_u64(1);
        let (numbers, strong) = Strategy::FrequencyBased.predict(&view, &mut rng);
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(strong, 3);
    }

    #[test]
    fn test_overdue_strategy_prefers_unseen_numbers() {
        // 7..=18 are the 12 most overdue (never seen, ascending tie-break)
        let view = EligibleView::new(vec![[1, 2, 3, 4, 5, 6]; 50], vec![1; 50], 100);
        let mut rng = StdRng::seed_from_u64(2);
        let (numbers, _) = Strategy::Overdue.predict(&view, &mut rng);
        assert!(numbers.iter().all(|n| (7..=18).contains(n)), "{numbers:?}");
    }

    #[test]
    fn test_spread_picks_one_number_per_segment() {
        let view = synthetic_view(100);
        let mut rng = StdRng::seed_from_u64(3);
        let (numbers, _) = Strategy::SpreadDistribution.predict(&view, &mut rng);
        let segments = [(1, 6), (7, 12), (13, 18), (19, 24), (25, 30), (31, 37)];
        for ((lo, hi), n) in segments.iter().zip(numbers.iter()) {
            assert!(
                (*lo..=*hi).contains(n),
                "{n} outside segment {lo}..={hi}: {numbers:?}"
            );
        }
    }

    #[test]
    fn test_pattern_even_split_bounds() {
        let view = synthetic_view(20);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (numbers, _) = Strategy::PatternBased.predict(&view, &mut rng);
            let evens = numbers.iter().filter(|n| *n % 2 == 0).count();
            assert!((2..=4).contains(&evens), "evens={evens}: {numbers:?}");
        }
    }

    #[test]
    fn test_sum_targeting_lands_in_band() {
        let view = synthetic_view(100);
        let window = view.window(Some(100));
        let avg = window
            .iter()
            .map(|d| d.iter().sum::<i32>() as f64)
            .sum::<f64>()
            / window.len() as f64;
        let target = avg as i32;
        let band = (target as f64 * 0.1) as i32;

        let mut rng = StdRng::seed_from_u64(4);
        let (numbers, _) = Strategy::SumTargeting.predict(&view, &mut rng);
        let sum: i32 = numbers.iter().sum();
        assert!(
            (target - band..=target + band).contains(&sum),
            "sum {sum} outside {}..={}",
            target - band,
            target + band
        );
    }

    #[test]
    fn test_odd_even_strategy_is_three_three() {
        let view = synthetic_view(60);
        let mut rng = StdRng::seed_from_u64(5);
        let (numbers, _) = Strategy::OddEvenBalanced.predict(&view, &mut rng);
        let evens = numbers.iter().filter(|n| *n % 2 == 0).count();
        assert_eq!(evens, 3, "{numbers:?}");
    }
}
