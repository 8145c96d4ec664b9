//! Monthly summary models.
//!
//! The [`MonthlySummary`] is the month-bucketed reporting table built by the
//! monthly aggregator: one narrative row per period role, one column per
//! month touched by any row.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `(year, month)` bucket key. Orders chronologically.
///
/// Serializes as its `"YYYY-MM"` string form so it can key a JSON object.
///
/// # Example
///
/// ```
/// use deadline_engine::models::MonthKey;
///
/// let key = MonthKey::new(2024, 6);
/// assert_eq!(key.to_string(), "2024-06");
/// assert_eq!(key.label(), "jun-2024");
/// assert!(MonthKey::new(2023, 12) < key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl MonthKey {
    /// Creates a key.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Short Spanish column label, e.g. `"jun-2024"`.
    pub fn label(&self) -> String {
        const MONTHS: [&str; 12] = [
            "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
        ];
        let name = MONTHS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        format!("{}-{}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("invalid month key '{}', expected YYYY-MM", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in month key '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in month key '{}'", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in month key '{}'", s));
        }
        Ok(Self::new(year, month))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A column of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthColumn {
    /// The bucket key.
    pub key: MonthKey,
    /// Display label.
    pub label: String,
}

/// One narrative row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Narrative sentence describing the period, or a not-applicable placeholder.
    pub narrative: String,
    /// Calendar days per month touched by the period.
    pub per_month: BTreeMap<MonthKey, u32>,
    /// Total calendar days of the row.
    pub total: u32,
}

impl SummaryRow {
    /// A row with no counts.
    pub fn empty(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            per_month: BTreeMap::new(),
            total: 0,
        }
    }

    /// The count for a month, zero when the row did not touch it.
    pub fn count(&self, key: MonthKey) -> u32 {
        self.per_month.get(&key).copied().unwrap_or(0)
    }
}

/// The month-bucketed reporting table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Month columns, ascending.
    pub months: Vec<MonthColumn>,
    /// Narrative rows: the fixed roles first, then additional orders by index.
    pub rows: Vec<SummaryRow>,
}

impl MonthlySummary {
    /// The synthetic totals row: every column summed across rows.
    pub fn totals_row(&self) -> SummaryRow {
        let mut per_month = BTreeMap::new();
        for row in &self.rows {
            for (key, count) in &row.per_month {
                *per_month.entry(*key).or_insert(0) += count;
            }
        }
        SummaryRow {
            narrative: "Total".to_string(),
            per_month,
            total: self.grand_total(),
        }
    }

    /// Sum of every row total.
    pub fn grand_total(&self) -> u32 {
        self.rows.iter().map(|r| r.total).sum()
    }
}
