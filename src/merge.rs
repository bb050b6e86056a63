// 🔍 Merge Engine - combine two holiday sets, first source wins per date
// Dedup key is `date`; output is stably sorted by date

use crate::holiday::HolidayRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// MERGE RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Merged records, ascending by date
    pub records: Vec<HolidayRecord>,

    /// Records taken from the primary set (all of them)
    pub primary_count: usize,

    /// Secondary records whose date was not in the primary set
    pub secondary_added: usize,

    /// Secondary records dropped because primary already covers the date
    pub secondary_dropped: usize,
}

// ============================================================================
// MERGE ENGINE
// ============================================================================

pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        MergeEngine
    }

    /// Merge `secondary` into `primary`.
    ///
    /// Every primary record is kept, including several on the same date.
    /// A secondary record survives only if primary has nothing on its date.
    /// Equal dates keep input order: primary first, then secondary.
    pub fn merge(
        &self,
        primary: Vec<HolidayRecord>,
        secondary: Vec<HolidayRecord>,
    ) -> MergeResult {
        let primary_dates: HashSet<String> = primary.iter().map(|h| h.date.clone()).collect();

        let primary_count = primary.len();
        let secondary_total = secondary.len();

        let mut records = primary;
        records.extend(
            secondary
                .into_iter()
                .filter(|h| !primary_dates.contains(&h.date)),
        );

        let secondary_added = records.len() - primary_count;

        // Vec::sort_by is stable
        records.sort_by(|a, b| a.date.cmp(&b.date));

        MergeResult {
            records,
            primary_count,
            secondary_added,
            secondary_dropped: secondary_total - secondary_added,
        }
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for `MergeEngine::new().merge(..).records`
pub fn merge(primary: Vec<HolidayRecord>, secondary: Vec<HolidayRecord>) -> Vec<HolidayRecord> {
    MergeEngine::new().merge(primary, secondary).records
}

// ============================================================================
// TESTS
// ============================================================================
