use crate::core::evidence::EvidenceCount;
use serde::Serialize;

/// Sorts `values` in place and returns its distinct values in ascending
/// order. The caller's buffer is reordered; pass one owned exclusively for
/// this call.
pub fn unique_sorted(values: &mut [u32]) -> Vec<u32> {
    values.sort_unstable();
    let mut unique = Vec::with_capacity(values.len());
    for &value in values.iter() {
        if unique.last() != Some(&value) {
            unique.push(value);
        }
    }
    unique
}

/// Returns the index of the first element `>= key` in `sorted`, i.e. the
/// count of elements strictly less than `key`. Bounded binary search,
/// narrowing the bracket until its width is 1; the quartile bucket
/// arithmetic depends on this exact insertion-point behavior for keys
/// absent from the array.
pub fn count_less_than(key: u32, sorted: &[u32]) -> i32 {
    let mut lo: i64 = -1;
    let mut hi: i64 = sorted.len() as i64;
    while hi - lo > 1 {
        let mid = (hi + lo) / 2;
        if sorted[mid as usize] < key {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi as i32
}

/// Quartile boundary values and the four-band population histogram they
/// induce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuartileBounds {
    pub q1: u32,
    pub q2: u32,
    pub q3: u32,
    pub counts: [i32; 4],
}

/// Computes quartile boundaries and bucket counts over the "many"
/// population (per-sample totals of at least 2). Boundaries are picked
/// from the *unique* value set so that skewed distributions do not
/// collapse all quartiles onto one repeated value; the small-set cases
/// and the general boundary formula are fixed numeric contracts that
/// downstream consumers depend on. `values` is sorted in place.
pub fn quartile_counts(values: &mut [u32]) -> QuartileBounds {
    let unique = unique_sorted(values);
    let mut bounds = QuartileBounds::default();

    match unique.len() {
        0 => {}
        1 => {
            bounds.q3 = unique[0];
            bounds.counts = [0, 0, 0, 1];
        }
        2 => {
            bounds.q2 = unique[0];
            bounds.q3 = unique[1];
            bounds.counts = [0, 0, 1, 1];
        }
        3 => {
            bounds.q1 = unique[0];
            bounds.q2 = unique[1];
            bounds.q3 = unique[2];
            bounds.counts = [0, 1, 2, 3];
        }
        u => {
            bounds.q1 = unique[u / 4];
            bounds.q2 = unique[u / 2];
            bounds.q3 = unique[(u / 2 + 1 + u / 4).min(u - 1)];

            bounds.counts[0] = count_less_than(bounds.q1, values);
            bounds.counts[1] = count_less_than(bounds.q2, values) - bounds.counts[0];
            bounds.counts[2] =
                count_less_than(bounds.q3, values) - bounds.counts[1] - bounds.counts[0];
            bounds.counts[3] =
                values.len() as i32 - bounds.counts[2] - bounds.counts[1] - bounds.counts[0];
        }
    }

    bounds
}

/// Population evidence summary: how many samples carry zero or exactly one
/// supporting observation, the evidence depth extremes over all samples,
/// and the quartile histogram over the remaining "many" population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuartileSummary {
    pub zero_count: i32,
    pub one_count: i32,
    pub q1: u32,
    pub q2: u32,
    pub q3: u32,
    pub min: u32,
    pub max: u32,
    pub counts: [i32; 4],
}

pub fn summarize(depths: &[EvidenceCount]) -> QuartileSummary {
    let mut zero_count = 0;
    let mut one_count = 0;
    let mut min = u32::MAX;
    let mut max = 0;

    let mut many = Vec::with_capacity(depths.len());
    for depth in depths {
        let total = depth.total();
        match total {
            0 => zero_count += 1,
            1 => one_count += 1,
            _ => many.push(total),
        }
        min = min.min(total);
        max = max.max(total);
    }

    let bounds = quartile_counts(&mut many);

    QuartileSummary {
        zero_count,
        one_count,
        q1: bounds.q1,
        q2: bounds.q2,
        q3: bounds.q3,
        min,
        max,
        counts: bounds.counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn count(paired_end: u32, split_read: u32) -> EvidenceCount {
        EvidenceCount {
            paired_end,
            split_read,
        }
    }

    #[test]
    fn test_unique_sorted_basic() {
        let mut values = vec![5, 3, 5, 1, 3, 3];
        assert_eq!(unique_sorted(&mut values), vec![1, 3, 5]);
        assert_eq!(values, vec![1, 3, 3, 3, 5, 5]);
    }

    #[test]
    fn test_unique_sorted_idempotent_random() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let len = rng.random_range(0..50);
            let mut values: Vec<u32> = (0..len).map(|_| rng.random_range(0..20)).collect();
            let once = unique_sorted(&mut values);
            let twice = unique_sorted(&mut once.clone());
            assert_eq!(once, twice);
            // Strictly ascending, no duplicates.
            assert!(once.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_count_less_than_brute_force() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let len = rng.random_range(0..60);
            let mut sorted: Vec<u32> = (0..len).map(|_| rng.random_range(0..40)).collect();
            sorted.sort_unstable();
            for key in 0..45 {
                let expected = sorted.iter().filter(|&&v| v < key).count() as i32;
                assert_eq!(count_less_than(key, &sorted), expected, "key {key}");
            }
        }
    }

    #[test]
    fn test_count_less_than_monotonic() {
        let sorted = [2, 2, 4, 7, 7, 7, 11];
        let mut previous = count_less_than(0, &sorted);
        for key in 1..15 {
            let current = count_less_than(key, &sorted);
            assert!(current >= previous, "key {key}");
            previous = current;
        }
    }

    #[test]
    fn test_quartile_counts_single_value() {
        let mut values = vec![5];
        let bounds = quartile_counts(&mut values);
        assert_eq!(
            bounds,
            QuartileBounds {
                q1: 0,
                q2: 0,
                q3: 5,
                counts: [0, 0, 0, 1],
            }
        );
    }

    #[test]
    fn test_quartile_counts_two_values() {
        let mut values = vec![3, 7];
        let bounds = quartile_counts(&mut values);
        assert_eq!(
            bounds,
            QuartileBounds {
                q1: 0,
                q2: 3,
                q3: 7,
                counts: [0, 0, 1, 1],
            }
        );
    }

    #[test]
    fn test_quartile_counts_three_values() {
        let mut values = vec![2, 4, 9];
        let bounds = quartile_counts(&mut values);
        assert_eq!(
            bounds,
            QuartileBounds {
                q1: 2,
                q2: 4,
                q3: 9,
                counts: [0, 1, 2, 3],
            }
        );
    }

    #[test]
    fn test_quartile_counts_empty() {
        let mut values: Vec<u32> = Vec::new();
        assert_eq!(quartile_counts(&mut values), QuartileBounds::default());
    }

    #[test]
    fn test_quartile_counts_general_case() {
        // unique = [2, 3, 5, 8, 13, 21], U = 6:
        // Q1 = unique[1] = 3, Q2 = unique[3] = 8, Q3 = unique[min(5, 5)] = 21.
        let mut values = vec![21, 2, 8, 3, 13, 5, 8, 2];
        let bounds = quartile_counts(&mut values);
        assert_eq!(bounds.q1, 3);
        assert_eq!(bounds.q2, 8);
        assert_eq!(bounds.q3, 21);
        // Bands: < 3 -> {2, 2}; [3, 8) -> {3, 5}; [8, 21) -> {8, 8, 13}; rest -> {21}.
        assert_eq!(bounds.counts, [2, 2, 3, 1]);
    }

    #[test]
    fn test_bucket_counts_sum_random_general_case() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            // Draw populations guaranteed to have at least four distinct
            // values so the general boundary formula applies.
            let mut values: Vec<u32> = vec![2, 5, 9, 14];
            let extra = rng.random_range(0..40);
            values.extend((0..extra).map(|_| rng.random_range(2..30u32)));
            let total = values.len() as i32;

            let bounds = quartile_counts(&mut values);
            assert!(bounds.counts.iter().all(|&c| c >= 0), "{:?}", bounds);
            assert_eq!(bounds.counts.iter().sum::<i32>(), total, "{:?}", bounds);
        }
    }

    #[test]
    fn test_summarize_zero_one_many_split() {
        let depths = vec![
            count(0, 0),
            count(1, 0),
            count(0, 1),
            count(3, 2),
            count(0, 7),
            count(2, 0),
        ];
        let summary = summarize(&depths);
        assert_eq!(summary.zero_count, 1);
        assert_eq!(summary.one_count, 2);
        assert_eq!(summary.min, 0);
        assert_eq!(summary.max, 7);
        // Many population is [5, 7, 2]: three unique values.
        assert_eq!((summary.q1, summary.q2, summary.q3), (2, 5, 7));
        assert_eq!(summary.counts, [0, 1, 2, 3]);
    }

    #[test]
    fn test_summarize_min_includes_low_depth_samples() {
        let depths = vec![count(2, 2), count(0, 1), count(4, 4)];
        let summary = summarize(&depths);
        assert_eq!(summary.min, 1);
        assert_eq!(summary.max, 8);
        assert_eq!(summary.zero_count, 0);
        assert_eq!(summary.one_count, 1);
    }

    #[test]
    fn test_summarize_all_zero() {
        let depths = vec![count(0, 0); 4];
        let summary = summarize(&depths);
        assert_eq!(summary.zero_count, 4);
        assert_eq!(summary.one_count, 0);
        assert_eq!((summary.q1, summary.q2, summary.q3), (0, 0, 0));
        assert_eq!(summary.counts, [0, 0, 0, 0]);
        assert_eq!(summary.min, 0);
        assert_eq!(summary.max, 0);
    }
}
