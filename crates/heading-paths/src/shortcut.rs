//! Bounded-detour savings along a fixed baseline path.
//!
//! A baseline path with unit steps has index `i` equal to its cost from the
//! source. Jumping from `path[i]` to `path[j]` in `d` Manhattan steps costs
//! `i + d` instead of `j`, so every shortcut's saving follows from index
//! arithmetic without re-solving.

use std::collections::BTreeMap;

use heading_core::Point;

use crate::distance::manhattan;

/// Shortcut tally: how many index pairs save each amount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortcutCounts {
    /// Number of qualifying pairs.
    pub total: u64,
    /// Saving → number of pairs with that saving.
    pub histogram: BTreeMap<i64, u64>,
}

impl ShortcutCounts {
    /// Record one pair saving `improvement`.
    pub fn record(&mut self, improvement: i64) {
        self.total += 1;
        *self.histogram.entry(improvement).or_insert(0) += 1;
    }
}

/// Limits on which shortcuts are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortcutRules {
    /// Longest allowed jump, in Manhattan distance.
    pub max_detour: u32,
    /// Smallest saving worth counting.
    pub min_improvement: i64,
}

impl Default for ShortcutRules {
    fn default() -> Self {
        Self {
            max_detour: 2,
            min_improvement: 1,
        }
    }
}

impl ShortcutRules {
    /// Count shortcuts along `path` under these rules.
    pub fn count(self, path: &[Point]) -> ShortcutCounts {
        count_shortcuts(path, self.max_detour, self.min_improvement)
    }
}

/// Count pairs `i < j` of `path` positions whose direct jump of at most
/// `max_detour` Manhattan steps saves at least `min_improvement`.
///
/// The saving of a pair is `j - (i + manhattan(path[i], path[j]))`.
pub fn count_shortcuts(path: &[Point], max_detour: u32, min_improvement: i64) -> ShortcutCounts {
    let max_detour = i64::from(max_detour);
    let mut counts = ShortcutCounts::default();

    for (i, &from) in path.iter().enumerate() {
        for (j, &to) in path.iter().enumerate().skip(i + 1) {
            let d = i64::from(manhattan(from, to));
            if d > max_detour {
                continue;
            }
            let improvement = j as i64 - (i as i64 + d);
            if improvement >= min_improvement {
                counts.record(improvement);
            }
        }
    }

    log::debug!(
        "shortcuts: {} pairs within {} steps save at least {} (path of {})",
        counts.total,
        max_detour,
        min_improvement,
        path.len()
    );
    counts
}
