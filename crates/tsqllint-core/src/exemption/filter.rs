//! Exemption-aware violation filtering.

use super::{normalize_rule_name, ExemptionRange};
use crate::types::RawViolation;
use std::collections::HashMap;

/// Exemption ranges indexed for point lookups.
///
/// Ranges are bucketed by rule name (plus one global bucket), then sorted and
/// merged so that each lookup is a binary search.
#[derive(Debug, Default)]
pub struct ExemptionIndex {
    global: Vec<(usize, usize)>,
    scoped: HashMap<String, Vec<(usize, usize)>>,
}

impl ExemptionIndex {
    /// Builds an index from exemption ranges.
    #[must_use]
    pub fn new(ranges: &[ExemptionRange]) -> Self {
        let mut global = Vec::new();
        let mut scoped: HashMap<String, Vec<(usize, usize)>> = HashMap::new();

        for range in ranges {
            let interval = (range.start_char, range.stop_char);
            match &range.rule_name {
                None => global.push(interval),
                Some(name) => scoped
                    .entry(normalize_rule_name(name))
                    .or_default()
                    .push(interval),
            }
        }

        merge(&mut global);
        for intervals in scoped.values_mut() {
            merge(intervals);
        }

        Self { global, scoped }
    }

    /// Returns true when there are no ranges at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.scoped.is_empty()
    }

    /// Whether a violation of `rule_name` starting at `offset` is suppressed.
    #[must_use]
    pub fn is_exempt(&self, rule_name: &str, offset: usize) -> bool {
        if contains(&self.global, offset) {
            return true;
        }
        self.scoped
            .get(&normalize_rule_name(rule_name))
            .is_some_and(|intervals| contains(intervals, offset))
    }

    /// Splits violations into survivors and the number suppressed.
    ///
    /// Survivors keep their input order.
    #[must_use]
    pub fn filter(&self, violations: Vec<RawViolation>) -> (Vec<RawViolation>, usize) {
        if self.is_empty() {
            return (violations, 0);
        }
        let total = violations.len();
        let survivors: Vec<RawViolation> = violations
            .into_iter()
            .filter(|v| !self.is_exempt(&v.rule_name, v.start_char))
            .collect();
        let suppressed = total - survivors.len();
        (survivors, suppressed)
    }
}

/// Sorts intervals and merges the overlapping or touching ones.
fn merge(intervals: &mut Vec<(usize, usize)>) {
    intervals.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(intervals.len());
    for &(start, stop) in intervals.iter() {
        match merged.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(stop),
            _ => merged.push((start, stop)),
        }
    }
    *intervals = merged;
}

/// Point query against sorted, disjoint intervals.
fn contains(intervals: &[(usize, usize)], offset: usize) -> bool {
    let idx = intervals.partition_point(|&(start, _)| start <= offset);
    idx > 0 && intervals[idx - 1].1 >= offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: &str, start: usize) -> RawViolation {
        RawViolation {
            rule_name: rule.to_string(),
            message: "msg".to_string(),
            trigger_text: "x".to_string(),
            start_char: start,
            stop_char: start,
            line: 1,
            column: start,
        }
    }

    #[test]
    fn merge_collapses_overlaps() {
        let mut intervals = vec![(10, 20), (0, 5), (15, 30), (6, 8), (40, 41)];
        merge(&mut intervals);
        assert_eq!(intervals, vec![(0, 8), (10, 30), (40, 41)]);
    }

    #[test]
    fn contains_checks_bounds() {
        let intervals = vec![(0, 8), (10, 30)];
        assert!(contains(&intervals, 0));
        assert!(contains(&intervals, 8));
        assert!(!contains(&intervals, 9));
        assert!(contains(&intervals, 30));
        assert!(!contains(&intervals, 31));
        assert!(!contains(&[], 0));
    }

    #[test]
    fn global_range_suppresses_every_rule() {
        let index = ExemptionIndex::new(&[ExemptionRange::new(None, 5, 10)]);
        assert!(index.is_exempt("keyword-casing", 5));
        assert!(index.is_exempt("select-star", 10));
        assert!(!index.is_exempt("select-star", 11));
    }

    #[test]
    fn scoped_range_suppresses_only_its_rule() {
        let index = ExemptionIndex::new(&[ExemptionRange::new(Some("select-star"), 0, 100)]);
        assert!(index.is_exempt("select-star", 50));
        assert!(index.is_exempt("Select-Star", 50));
        assert!(!index.is_exempt("keyword-casing", 50));
    }

    #[test]
    fn only_start_offset_is_tested() {
        let index = ExemptionIndex::new(&[ExemptionRange::new(None, 5, 10)]);
        let mut v = violation("r", 3);
        v.stop_char = 8;
        let (survivors, suppressed) = index.filter(vec![v]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(suppressed, 0);
    }

    #[test]
    fn filter_preserves_order_of_survivors() {
        let index = ExemptionIndex::new(&[
            ExemptionRange::new(Some("b"), 0, 10),
            ExemptionRange::new(None, 20, 30),
        ]);
        let input = vec![
            violation("a", 1),
            violation("b", 2),
            violation("a", 25),
            violation("c", 40),
            violation("b", 12),
        ];
        let (survivors, suppressed) = index.filter(input);
        let kept: Vec<_> = survivors
            .iter()
            .map(|v| (v.rule_name.as_str(), v.start_char))
            .collect();
        assert_eq!(kept, vec![("a", 1), ("c", 40), ("b", 12)]);
        assert_eq!(suppressed, 2);
    }

    #[test]
    fn empty_index_keeps_everything() {
        let index = ExemptionIndex::new(&[]);
        assert!(index.is_empty());
        let (survivors, suppressed) = index.filter(vec![violation("a", 0)]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(suppressed, 0);
    }
}
