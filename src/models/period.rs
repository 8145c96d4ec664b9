//! Period models.
//!
//! A [`Period`] is a computed sub-interval of the case timeline. The pipeline
//! tags each one with a [`PeriodRole`] at creation time; the monthly
//! aggregator and the resolution-crossing detection consume them by role.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The procedural role a period plays in the case timeline.
///
/// Additional-order roles carry the 1-based position of the order in the
/// case input.
///
/// # Example
///
/// ```
/// use deadline_engine::models::PeriodRole;
///
/// assert_eq!(PeriodRole::ReportGrace.to_string(), "Informe → +10 días (Art. 120)");
/// assert_eq!(PeriodRole::AdditionalTerm { index: 2 }.to_string(), "Plazo auto adicional #2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum PeriodRole {
    /// From the compliance deadline to the date the report is understood filed.
    ComplianceToReport,
    /// The grace period following the report.
    ReportGrace,
    /// From the initiating order to its notification by listing.
    OrderToState,
    /// From the order's listing to the accreditation deadline.
    StateToAccreditation,
    /// The grace period following the accreditation deadline.
    AccreditationGrace,
    /// From an additional order to its notification by listing.
    AdditionalOrderToState {
        /// 1-based position of the order in the case input.
        index: usize,
    },
    /// From an additional order's listing to its term deadline.
    AdditionalTerm {
        /// 1-based position of the order in the case input.
        index: usize,
    },
    /// The grace period following an additional order's term deadline.
    AdditionalGrace {
        /// 1-based position of the order in the case input.
        index: usize,
    },
}

impl PeriodRole {
    /// The roles that always get a row in the monthly summary, in row order.
    pub const FIXED: [PeriodRole; 5] = [
        PeriodRole::ComplianceToReport,
        PeriodRole::ReportGrace,
        PeriodRole::OrderToState,
        PeriodRole::StateToAccreditation,
        PeriodRole::AccreditationGrace,
    ];

    /// The additional-order index, if this is an additional-order role.
    pub fn additional_index(&self) -> Option<usize> {
        match self {
            PeriodRole::AdditionalOrderToState { index }
            | PeriodRole::AdditionalTerm { index }
            | PeriodRole::AdditionalGrace { index } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodRole::ComplianceToReport => write!(f, "Cumplimiento → Informe"),
            PeriodRole::ReportGrace => write!(f, "Informe → +10 días (Art. 120)"),
            PeriodRole::OrderToState => write!(f, "Auto inicio → Estado"),
            PeriodRole::StateToAccreditation => write!(f, "Estado → Acreditación"),
            PeriodRole::AccreditationGrace => write!(f, "Acreditación → +10 días"),
            PeriodRole::AdditionalOrderToState { index } => {
                write!(f, "Auto adicional #{}", index)
            }
            PeriodRole::AdditionalTerm { index } => write!(f, "Plazo auto adicional #{}", index),
            PeriodRole::AdditionalGrace { index } => {
                write!(f, "+10 días auto adicional #{}", index)
            }
        }
    }
}

/// A computed sub-interval of the case timeline.
///
/// `start <= end` always holds. `calendar_days` counts the days strictly
/// after `start` through `end`, leaving out court-closure days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The role the period plays in the timeline.
    pub role: PeriodRole,
    /// Human-readable label derived from the role.
    pub label: String,
    /// First date of the period.
    pub start: NaiveDate,
    /// Last date of the period.
    pub end: NaiveDate,
    /// Closure-excluded calendar days the period contributes to the total.
    pub calendar_days: u32,
}

impl Period {
    /// Creates a period, deriving its label from the role.
    pub fn new(role: PeriodRole, start: NaiveDate, end: NaiveDate, calendar_days: u32) -> Self {
        debug_assert!(start <= end, "period {} starts after it ends", role);
        Self {
            role,
            label: role.to_string(),
            start,
            end,
            calendar_days,
        }
    }
}
