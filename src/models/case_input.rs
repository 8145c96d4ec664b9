//! Case input models.
//!
//! This module defines the [`CaseInput`] record handed to the engine by the
//! form-reading collaborator, together with the term and order types it is
//! built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the ruling was notified.
///
/// Notification by listing (notificación por estado) becomes enforceable
/// only after a fixed number of business days; every other notice type is
/// enforceable on the notification date itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeType {
    /// Ordinary notice by listing (estado).
    Listing,
    /// Notice given in hearing (estrados).
    InHearing,
    /// Notice tied to a conditional obligation.
    ConditionalObligation,
}

/// A procedural term, given either as a business-day count or as a fixed date.
///
/// # Example
///
/// ```
/// use deadline_engine::models::Term;
///
/// let term: Term = serde_json::from_str(r#"{"mode": "business_days", "days": 5}"#).unwrap();
/// assert_eq!(term, Term::BusinessDays { days: 5 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Term {
    /// The term runs for this many business days.
    BusinessDays {
        /// Number of business days.
        days: u32,
    },
    /// The term expires on a fixed date. `None` means the form left it blank.
    FixedDate {
        /// The expiry date, if supplied.
        date: Option<NaiveDate>,
    },
}

impl Term {
    /// Whether this is a fixed-date term whose date was left blank.
    pub fn is_missing_fixed_date(&self) -> bool {
        matches!(self, Term::FixedDate { date: None })
    }

    /// The business-day count, or zero for fixed-date terms.
    pub fn business_days(&self) -> u32 {
        match self {
            Term::BusinessDays { days } => *days,
            Term::FixedDate { .. } => 0,
        }
    }
}

impl Default for Term {
    fn default() -> Self {
        Term::BusinessDays { days: 0 }
    }
}

/// The conditional obligation imposed before the main compliance term starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionalTerm {
    /// The conditional term itself.
    pub term: Term,
    /// The date on which compliance with the condition was acknowledged, if any.
    #[serde(default)]
    pub acknowledged_compliance: Option<NaiveDate>,
}

/// An additional order issued after the initiating order.
///
/// An entry with no date and a zero term is an intentionally blank form
/// block and is ignored everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionalOrder {
    /// The date the order was issued.
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    /// The business-day term the order granted.
    #[serde(default)]
    pub term_days: u32,
}

impl AdditionalOrder {
    /// Whether the block was left entirely empty.
    pub fn is_blank(&self) -> bool {
        self.order_date.is_none() && self.term_days == 0
    }

    /// The order date when the entry is complete enough to run, `None` otherwise.
    pub fn runnable_date(&self) -> Option<NaiveDate> {
        self.order_date.filter(|_| self.term_days > 0)
    }
}

/// Everything the engine needs to know about one enforcement case.
///
/// # Example
///
/// ```
/// use deadline_engine::models::{CaseInput, ConditionalTerm, NoticeType, Term};
/// use chrono::NaiveDate;
///
/// let input = CaseInput {
///     notification_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     notice_type: NoticeType::Listing,
///     conditional_term: ConditionalTerm::default(),
///     compliance_term: Term::BusinessDays { days: 10 },
///     report_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
///     report_term_days: 3,
///     initiating_order_date: None,
///     accreditation_term_days: 0,
///     additional_orders: vec![],
/// };
/// assert_eq!(input.compliance_term.business_days(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    /// The date the ruling was notified.
    pub notification_date: NaiveDate,
    /// How the ruling was notified.
    pub notice_type: NoticeType,
    /// The conditional obligation, if one was imposed.
    #[serde(default)]
    pub conditional_term: ConditionalTerm,
    /// The term granted to comply (Ddo).
    pub compliance_term: Term,
    /// The date non-compliance was reported.
    pub report_date: NaiveDate,
    /// Business days granted to report non-compliance (Ddte).
    #[serde(default)]
    pub report_term_days: u32,
    /// The date of the initiating order, if one was issued.
    #[serde(default)]
    pub initiating_order_date: Option<NaiveDate>,
    /// Business days granted to accredit compliance after the initiating order.
    #[serde(default)]
    pub accreditation_term_days: u32,
    /// Additional orders, in the order they were entered.
    #[serde(default)]
    pub additional_orders: Vec<AdditionalOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fixed_date_term_without_date_is_missing() {
        assert!(Term::FixedDate { date: None }.is_missing_fixed_date());
        assert!(
            !Term::FixedDate {
                date: Some(make_date("2024-07-01"))
            }
            .is_missing_fixed_date()
        );
        assert!(!Term::BusinessDays { days: 0 }.is_missing_fixed_date());
    }

    #[test]
    fn test_fixed_date_term_has_no_business_days() {
        let term = Term::FixedDate {
            date: Some(make_date("2024-07-01")),
        };
        assert_eq!(term.business_days(), 0);
    }

    #[test]
    fn test_blank_additional_order() {
        assert!(AdditionalOrder::default().is_blank());
        assert_eq!(AdditionalOrder::default().runnable_date(), None);
    }

    #[test]
    fn test_additional_order_needs_positive_term_to_run() {
        let order = AdditionalOrder {
            order_date: Some(make_date("2024-09-02")),
            term_days: 0,
        };
        assert!(!order.is_blank());
        assert_eq!(order.runnable_date(), None);

        let order = AdditionalOrder {
            order_date: Some(make_date("2024-09-02")),
            term_days: 5,
        };
        assert_eq!(order.runnable_date(), Some(make_date("2024-09-02")));
    }

    #[test]
    fn test_term_serialization() {
        let json = serde_json::to_string(&Term::FixedDate {
            date: Some(make_date("2024-07-01")),
        })
        .unwrap();
        assert_eq!(json, r#"{"mode":"fixed_date","date":"2024-07-01"}"#);
    }

    #[test]
    fn test_case_input_deserialization_with_defaults() {
        let json = r#"{
            "notification_date": "2024-07-01",
            "notice_type": "listing",
            "compliance_term": {"mode": "business_days", "days": 10},
            "report_date": "2024-08-01"
        }"#;

        let input: CaseInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.notice_type, NoticeType::Listing);
        assert_eq!(input.conditional_term, ConditionalTerm::default());
        assert_eq!(input.report_term_days, 0);
        assert!(input.initiating_order_date.is_none());
        assert!(input.additional_orders.is_empty());
    }
}
