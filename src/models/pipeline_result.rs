//! Pipeline result models.
//!
//! This module contains the [`PipelineResult`] produced by the deadline
//! pipeline and the types it is composed of.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, DayLogEntry, Period};

/// Timeliness of the non-compliance report.
///
/// Exactly one classification applies to any combination of report date,
/// compliance deadline and report deadline.
///
/// # Example
///
/// ```
/// use deadline_engine::models::ReportTimeliness;
///
/// assert_eq!(ReportTimeliness::Extemporaneous.to_string(), "EXTEMPORÁNEO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTimeliness {
    /// Filed on or before the compliance deadline.
    Premature,
    /// Filed after the compliance deadline and on or before the report deadline.
    Timely,
    /// Filed after the report deadline.
    Extemporaneous,
}

impl ReportTimeliness {
    /// Classifies a report date against the compliance and report deadlines.
    pub fn classify(
        report_date: NaiveDate,
        compliance_deadline: NaiveDate,
        report_deadline: NaiveDate,
    ) -> Self {
        if report_date <= compliance_deadline {
            ReportTimeliness::Premature
        } else if report_date > report_deadline {
            ReportTimeliness::Extemporaneous
        } else {
            ReportTimeliness::Timely
        }
    }
}

impl fmt::Display for ReportTimeliness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTimeliness::Premature => write!(f, "PRETEMPORE"),
            ReportTimeliness::Timely => write!(f, "OPORTUNO"),
            ReportTimeliness::Extemporaneous => write!(f, "EXTEMPORÁNEO"),
        }
    }
}

/// The milestone dates computed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    /// The date the ruling became enforceable.
    pub enforceability_date: NaiveDate,
    /// Deadline of the conditional obligation.
    pub conditional_deadline: NaiveDate,
    /// The date the compliance term started running from.
    pub compliance_base_date: NaiveDate,
    /// Compliance deadline (Ddo).
    pub compliance_deadline: NaiveDate,
    /// Report deadline (Ddte).
    pub report_deadline: NaiveDate,
    /// The report date moved forward to the next business day if needed.
    pub report_understood_date: NaiveDate,
    /// Listing date of the initiating order, if one was issued.
    pub order_state_date: Option<NaiveDate>,
    /// Accreditation deadline, if an accreditation term was granted.
    pub accreditation_deadline: Option<NaiveDate>,
}

/// The business-day scan logs retained for audit display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLogs {
    /// Scan of the compliance term (empty for fixed-date terms).
    pub compliance: Vec<DayLogEntry>,
    /// Scan of the report term.
    pub report: Vec<DayLogEntry>,
}

/// Everything the deadline pipeline computes for a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Milestone dates.
    pub milestones: Milestones,
    /// Whether the acknowledged conditional compliance was on time, when acknowledged.
    pub conditional_compliance_on_time: Option<bool>,
    /// Report timeliness classification.
    pub timeliness: ReportTimeliness,
    /// Computed periods, in creation order.
    pub periods: Vec<Period>,
    /// Total closure-excluded calendar days across all periods.
    pub total_calendar_days: u32,
    /// Labels of resolutions crossed by any period, deduplicated, first-seen order.
    pub crossed_resolutions: Vec<String>,
    /// Milestone that selects the governing minimum-wage year under the fine-base basis.
    pub fine_base_date: NaiveDate,
    /// Day-by-day scan logs.
    pub day_logs: DayLogs,
    /// Stage-level audit trace.
    pub audit_trace: AuditTrace,
}

impl PipelineResult {
    /// Sums the calendar days of every period.
    pub fn sum_period_days(periods: &[Period]) -> u32 {
        periods.iter().map(|p| p.calendar_days).sum()
    }
}
