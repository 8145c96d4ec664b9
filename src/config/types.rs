//! Reference-table types.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML reference tables, and the assembled [`ReferenceTables`] the engine
//! queries at run time.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarContext, Resolution};

/// Metadata about the jurisdiction the tables describe.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "CO").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// ISO currency code the fine is expressed in.
    pub currency: String,
    /// Name of the currency unit used for the fine equivalence (e.g., "UVB").
    pub unit_name: String,
}

/// A declared holiday.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayEntry {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
}

/// holidays.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// Holidays keyed by year.
    pub holidays: BTreeMap<i32, Vec<HolidayEntry>>,
}

/// A court-closure range. A missing `end` marks a single-day closure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosureRange {
    /// First closed day.
    pub start: NaiveDate,
    /// Last closed day, inclusive.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl ClosureRange {
    /// Expands the range into every closed date.
    pub fn dates(&self) -> EngineResult<Vec<NaiveDate>> {
        let end = self.end.unwrap_or(self.start);
        if end < self.start {
            return Err(EngineError::InvalidReferenceData {
                message: format!("closure range {} ends before it starts ({})", self.start, end),
            });
        }
        Ok(self.start.iter_days().take_while(|d| *d <= end).collect())
    }
}

/// closures.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosuresConfig {
    /// Closure ranges, in any order.
    pub closures: Vec<ClosureRange>,
}

/// resolutions.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionsConfig {
    /// Suspension resolutions, in table order.
    pub resolutions: Vec<Resolution>,
}

/// minimum_wage.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MinimumWageConfig {
    /// Monthly minimum wage keyed by year.
    pub minimum_wage: BTreeMap<i32, Decimal>,
}

/// unit_value.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitValueConfig {
    /// Currency-unit value keyed by year.
    pub unit_value: BTreeMap<i32, Decimal>,
}

/// Which date selects the minimum-wage year of the fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineYearBasis {
    /// The year of the compliance deadline advanced by the total delay days.
    #[default]
    AccrualDate,
    /// The year of the pipeline's fine-base milestone.
    FineBaseDate,
}

/// Statutory constants (settings.yaml). Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Business days until a ruling notified by listing becomes enforceable.
    pub enforceability_business_days: u32,
    /// Length of the grace period following a report or accreditation deadline.
    pub grace_period_business_days: u32,
    /// Divisor applied to the monthly minimum wage to get the daily fine.
    pub daily_wage_divisor: u32,
    /// Which date selects the minimum-wage year.
    pub fine_year_basis: FineYearBasis,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            enforceability_business_days: 3,
            grace_period_business_days: 10,
            daily_wage_divisor: 7,
            fine_year_basis: FineYearBasis::AccrualDate,
        }
    }
}

/// The assembled reference tables.
///
/// Closure ranges are expanded once at construction; every query afterwards
/// is read-only.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    metadata: JurisdictionMetadata,
    settings: EngineSettings,
    holidays: BTreeMap<i32, Vec<HolidayEntry>>,
    closure_dates: HashSet<NaiveDate>,
    resolutions: Vec<Resolution>,
    minimum_wage: BTreeMap<i32, Decimal>,
    unit_value: BTreeMap<i32, Decimal>,
}

impl ReferenceTables {
    /// Assembles the tables, rejecting inverted closure or resolution intervals.
    pub fn new(
        metadata: JurisdictionMetadata,
        settings: EngineSettings,
        holidays: HolidaysConfig,
        closures: ClosuresConfig,
        resolutions: ResolutionsConfig,
        minimum_wage: MinimumWageConfig,
        unit_value: UnitValueConfig,
    ) -> EngineResult<Self> {
        let mut closure_dates = HashSet::new();
        for range in &closures.closures {
            closure_dates.extend(range.dates()?);
        }

        if let Some(bad) = resolutions.resolutions.iter().find(|r| r.end < r.start) {
            return Err(EngineError::InvalidReferenceData {
                message: format!("resolution '{}' ends before it starts", bad.label),
            });
        }

        Ok(Self {
            metadata,
            settings,
            holidays: holidays.holidays,
            closure_dates,
            resolutions: resolutions.resolutions,
            minimum_wage: minimum_wage.minimum_wage,
            unit_value: unit_value.unit_value,
        })
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the statutory settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the suspension resolutions.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Monthly minimum wage for a year.
    ///
    /// A missing year is a lookup error naming the table and the year.
    pub fn minimum_wage(&self, year: i32) -> EngineResult<Decimal> {
        self.minimum_wage
            .get(&year)
            .copied()
            .ok_or_else(|| EngineError::ReferenceDataMissing {
                table: "minimum_wage".to_string(),
                year,
            })
    }

    /// Currency-unit value for a year, `None` when not tabulated.
    pub fn unit_value(&self, year: i32) -> Option<Decimal> {
        self.unit_value.get(&year).copied()
    }

    /// Builds the calendar context for a case spanning `from_year..=to_year`.
    ///
    /// Holidays are restricted to the year range; every closure date and every
    /// resolution is carried.
    pub fn calendar_context(&self, from_year: i32, to_year: i32) -> CalendarContext {
        let holidays = self
            .holidays
            .range(from_year..=to_year)
            .flat_map(|(_, entries)| entries.iter().map(|h| h.date));

        self.context_with_holidays(holidays)
    }

    /// Builds the calendar context carrying every tabulated holiday.
    ///
    /// Scans that run past the case's own dates still see the holidays of
    /// later years.
    pub fn full_calendar_context(&self) -> CalendarContext {
        let holidays = self
            .holidays
            .values()
            .flat_map(|entries| entries.iter().map(|h| h.date));

        self.context_with_holidays(holidays)
    }

    fn context_with_holidays(&self, holidays: impl Iterator<Item = NaiveDate>) -> CalendarContext {
        CalendarContext::new(
            holidays,
            self.closure_dates.iter().copied(),
            self.resolutions.clone(),
        )
    }
}
