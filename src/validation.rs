//! Pre-flight validation of case input.
//!
//! Checks the chronology and internal consistency of a [`CaseInput`] before
//! the deadline pipeline runs. Detects:
//! - A report that does not follow the notification
//! - An initiating order issued before the report
//! - Fixed-date terms without their date
//! - Partially filled additional-order blocks
//!
//! Validation never mutates its input and never fails: it reports every
//! violation it finds, in check order, plus non-blocking warnings.

use thiserror::Error;

use crate::models::{CaseInput, Term};

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The report date is on or before the notification date.
    ReportNotAfterNotification,
    /// The initiating order predates the report.
    OrderBeforeReport,
    /// The conditional obligation is in fixed-date mode without a date.
    MissingConditionalDate,
    /// The compliance term is in fixed-date mode without a date.
    MissingComplianceDate,
    /// An additional-order block is neither blank nor complete.
    IncompleteAdditionalOrder,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The outcome of validating a case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Blocking violations, in check order.
    pub errors: Vec<ValidationError>,
    /// Non-blocking observations.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether the case may proceed to the pipeline.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The violation messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

/// Validates a case before computation.
///
/// Checks:
/// 1. The report date is strictly after the notification date
/// 2. An initiating order, if present, is on or after the report date
/// 3. A fixed-date conditional obligation has its date
/// 4. A fixed-date compliance term has its date
/// 5. Every additional order is either blank or has both a date and a positive term
///
/// # Example
///
/// ```
/// use deadline_engine::models::{CaseInput, ConditionalTerm, NoticeType, Term};
/// use deadline_engine::validation::validate_case;
/// use chrono::NaiveDate;
///
/// let input = CaseInput {
///     notification_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     notice_type: NoticeType::Listing,
///     conditional_term: ConditionalTerm::default(),
///     compliance_term: Term::BusinessDays { days: 5 },
///     report_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     report_term_days: 3,
///     initiating_order_date: None,
///     accreditation_term_days: 0,
///     additional_orders: vec![],
/// };
///
/// let report = validate_case(&input);
/// assert!(!report.is_valid());
/// ```
pub fn validate_case(input: &CaseInput) -> ValidationReport {
    let mut report = ValidationReport::default();

    if input.report_date <= input.notification_date {
        report.errors.push(ValidationError::new(
            ValidationErrorKind::ReportNotAfterNotification,
            "La noticia de incumplimiento debe ser posterior a la notificación.",
        ));
    }

    if let Some(order_date) = input.initiating_order_date {
        if order_date < input.report_date {
            report.errors.push(ValidationError::new(
                ValidationErrorKind::OrderBeforeReport,
                "El auto de inicio debe ser igual o posterior a la noticia de incumplimiento.",
            ));
        }
    } else if input.accreditation_term_days > 0 {
        report.warnings.push(
            "Se indicó un plazo de acreditación sin fecha de auto de inicio; el plazo no se computa."
                .to_string(),
        );
    }

    if input.conditional_term.term.is_missing_fixed_date() {
        report.errors.push(ValidationError::new(
            ValidationErrorKind::MissingConditionalDate,
            "Debe indicar la fecha límite de la obligación condicional.",
        ));
    }

    if input.compliance_term.is_missing_fixed_date() {
        report.errors.push(ValidationError::new(
            ValidationErrorKind::MissingComplianceDate,
            "Debe indicar la fecha límite de cumplimiento (Ddo).",
        ));
    }

    if matches!(input.compliance_term, Term::FixedDate { .. })
        && input.conditional_term.acknowledged_compliance.is_some()
    {
        report.warnings.push(
            "El plazo de cumplimiento es una fecha fija; la fecha de cumplimiento de la obligación condicional no lo desplaza."
                .to_string(),
        );
    }

    for (position, order) in input.additional_orders.iter().enumerate() {
        if order.is_blank() {
            continue;
        }
        let index = position + 1;
        if order.order_date.is_none() {
            report.errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteAdditionalOrder,
                format!("En el auto adicional #{}, debe indicar la fecha del auto.", index),
            ));
        }
        if order.term_days == 0 {
            report.errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteAdditionalOrder,
                format!(
                    "En el auto adicional #{}, el plazo debe ser mayor que cero.",
                    index
                ),
            ));
        }
    }

    report
}
