//! Domain partitioning
//!
//! Splits the iteration domain `[0, n)` into `h` contiguous, near-equal,
//! non-overlapping ranges, one per worker.
//!
//! The first `n % h` partitions receive one extra element, so partition sizes
//! differ by at most one. When `h > n` the trailing partitions are empty,
//! which is valid: an empty range contributes nothing to the sum.
//!
//! # Example
//!
//! ```
//! use pipulse::partition::partition;
//!
//! let items = partition(10, 3);
//! let ranges: Vec<_> = items.iter().map(|item| item.range()).collect();
//! assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
//! ```

use std::ops::Range;

/// One worker's exclusive assignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkItem {
    pub worker_id: usize,
    /// First iteration index (inclusive)
    pub start: u64,
    /// Last iteration index (exclusive)
    pub end: u64,
    /// Subinterval width, `1.0 / n` for every item of one computation
    pub step: f64,
}

impl WorkItem {
    #[inline]
    pub fn range(&self) -> Range<u64> {
        self.start..self.end
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Lazy iterator over the partitions of `[0, n)`
///
/// Produces exactly `h` items without allocating, so callers can size their
/// own storage (fallibly) before materializing anything.
#[derive(Debug, Clone)]
pub struct Partitions {
    block: u64,
    remainder: u64,
    step: f64,
    next_id: usize,
    next_start: u64,
    count: usize,
}

impl Partitions {
    /// Partition `[0, n)` into `h` ranges
    ///
    /// # Panics
    ///
    /// Panics if `n` or `h` is zero.
    pub fn new(n: u64, h: usize) -> Self {
        assert!(n > 0, "cannot partition an empty domain");
        assert!(h > 0, "cannot partition across zero workers");

        let workers = h as u64;
        Self {
            block: n / workers,
            remainder: n % workers,
            step: 1.0 / n as f64,
            next_id: 0,
            next_start: 0,
            count: h,
        }
    }
}

impl Iterator for Partitions {
    type Item = WorkItem;

    fn next(&mut self) -> Option<WorkItem> {
        if self.next_id == self.count {
            return None;
        }

        let extra = u64::from((self.next_id as u64) < self.remainder);
        let start = self.next_start;
        let end = start + self.block + extra;
        let item = WorkItem {
            worker_id: self.next_id,
            start,
            end,
            step: self.step,
        };

        self.next_id += 1;
        self.next_start = end;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next_id;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Partitions {}

/// Partition `[0, n)` into `h` work items
pub fn partition(n: u64, h: usize) -> Vec<WorkItem> {
    Partitions::new(n, h).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        let items = partition(100, 4);
        assert_eq!(items.len(), 4);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.worker_id, i);
            assert_eq!(item.len(), 25);
        }
        assert_eq!(items[3].end, 100);
    }

    #[test]
    fn test_remainder_goes_to_first_partitions() {
        let sizes: Vec<u64> = partition(11, 4).iter().map(WorkItem::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 2]);
    }

    #[test]
    fn test_single_worker_covers_everything() {
        let items = partition(1_000, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].range(), 0..1_000);
        assert_eq!(items[0].step, 1.0 / 1_000.0);
    }

    #[test]
    fn test_more_workers_than_elements() {
        let items = partition(3, 5);
        let sizes: Vec<u64> = items.iter().map(WorkItem::len).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
        assert!(items[4].is_empty());
        assert_eq!(items[4].range(), 3..3);
    }

    #[test]
    fn test_step_shared_by_all_items() {
        let items = partition(2_000_000_000, 17);
        assert!(items.iter().all(|item| item.step == 1.0 / 2_000_000_000.0));
    }

    #[test]
    fn test_exact_size() {
        let mut parts = Partitions::new(10, 3);
        assert_eq!(parts.len(), 3);
        parts.next();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(partition(2_147_483_647, 13), partition(2_147_483_647, 13));
    }

    #[test]
    #[should_panic(expected = "zero workers")]
    fn test_zero_workers_panics() {
        Partitions::new(10, 0);
    }

    proptest! {
        #[test]
        fn prop_partitions_are_complete_and_balanced(n in 1u64..=2_147_483_647, h in 1usize..=512) {
            let items = partition(n, h);
            let block = n / h as u64;

            prop_assert_eq!(items.len(), h);
            prop_assert_eq!(items[0].start, 0);
            prop_assert_eq!(items[h - 1].end, n);
            for pair in items.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for item in &items {
                prop_assert!(item.len() == block || item.len() == block + 1);
            }
            prop_assert_eq!(items.iter().map(WorkItem::len).sum::<u64>(), n);
        }

        #[test]
        fn prop_partitioning_is_deterministic(n in 1u64..=1_000_000, h in 1usize..=64) {
            prop_assert_eq!(partition(n, h), partition(n, h));
        }
    }
}
