//! Audit models for the deadline engine.
//!
//! Two kinds of audit output are produced: day-by-day scan logs for the
//! business-day stages ([`DayLogEntry`]), and a stage-level [`AuditTrace`]
//! recording the input, output and reasoning of every pipeline decision.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How a scanned calendar day was classified.
///
/// Classification priority is closure, then weekend, then holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClassification {
    /// A business day; it counts toward the term.
    Business,
    /// Saturday or Sunday.
    Weekend,
    /// A declared holiday.
    Holiday,
    /// A full court-closure day.
    Closure,
}

impl DayClassification {
    /// Whether the day counts toward a business-day term.
    pub fn counts(&self) -> bool {
        matches!(self, DayClassification::Business)
    }

    /// Spanish label used in rendered logs.
    pub fn label(&self) -> &'static str {
        match self {
            DayClassification::Business => "hábil",
            DayClassification::Weekend => "fin de semana",
            DayClassification::Holiday => "festivo",
            DayClassification::Closure => "suspensión",
        }
    }
}

/// One scanned day of a business-day computation.
///
/// # Example
///
/// ```
/// use deadline_engine::models::{DayClassification, DayLogEntry};
/// use chrono::NaiveDate;
///
/// let entry = DayLogEntry {
///     date: NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
///     classification: DayClassification::Business,
///     business_day_number: Some(1),
/// };
/// assert_eq!(entry.to_string(), "lun 17/6/2024 → hábil (1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLogEntry {
    /// The scanned date.
    pub date: NaiveDate,
    /// How the date was classified.
    pub classification: DayClassification,
    /// The running business-day count, present only on business days.
    pub business_day_number: Option<u32>,
}

impl DayLogEntry {
    /// Abbreviated Spanish weekday name for the entry's date.
    pub fn weekday_label(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "lun",
            Weekday::Tue => "mar",
            Weekday::Wed => "mié",
            Weekday::Thu => "jue",
            Weekday::Fri => "vie",
            Weekday::Sat => "sáb",
            Weekday::Sun => "dom",
        }
    }
}

impl fmt::Display for DayLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}/{} → ",
            self.weekday_label(),
            self.date.day(),
            self.date.month(),
            self.date.year()
        )?;
        match self.business_day_number {
            Some(n) => write!(f, "{} ({})", self.classification.label(), n),
            None => write!(f, "no cuenta ({})", self.classification.label()),
        }
    }
}

/// A single step in the audit trace recording a pipeline decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statutory reference for the rule, when one applies.
    pub legal_ref: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The ordered audit trace for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pipeline steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// The number the next recorded step will get.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Finds the first step recorded for a rule.
    pub fn find(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}
