//! End-to-end tests for the Deadline Engine.
//!
//! These tests run complete cases against the Colombian reference tables
//! in `config/colombia`, covering:
//! - Holidays and court closures inside business-day scans
//! - Initiating and additional orders
//! - Resolution crossings
//! - Month bucketing
//! - Fine year selection across a year boundary
//! - Validation and lookup failures
//! - JSON input and output

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use deadline_engine::calculation::compute_case;
use deadline_engine::config::{ConfigLoader, ReferenceTables};
use deadline_engine::error::EngineError;
use deadline_engine::models::{
    AdditionalOrder, CaseInput, ConditionalTerm, MonthKey, MonthlySummary, NoticeType,
    PeriodRole, ReportTimeliness, Term,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_tables() -> ReferenceTables {
    ConfigLoader::load("./config/colombia")
        .expect("Failed to load config")
        .into_tables()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A listing-notified case with an initiating order and one additional order,
/// crossing the August 2024 closure.
fn create_full_case() -> CaseInput {
    CaseInput {
        // Friday; Monday 2024-07-01 is a holiday
        notification_date: make_date("2024-06-28"),
        notice_type: NoticeType::Listing,
        conditional_term: ConditionalTerm::default(),
        compliance_term: Term::BusinessDays { days: 10 },
        // Saturday
        report_date: make_date("2024-08-10"),
        report_term_days: 5,
        initiating_order_date: Some(make_date("2024-08-23")),
        accreditation_term_days: 5,
        additional_orders: vec![
            AdditionalOrder {
                order_date: Some(make_date("2024-11-25")),
                term_days: 5,
            },
            AdditionalOrder::default(),
        ],
    }
}

/// An in-hearing case whose grace period runs into the December closure.
fn create_year_end_case() -> CaseInput {
    CaseInput {
        notification_date: make_date("2024-11-05"),
        notice_type: NoticeType::InHearing,
        conditional_term: ConditionalTerm::default(),
        compliance_term: Term::BusinessDays { days: 10 },
        report_date: make_date("2024-12-16"),
        report_term_days: 3,
        initiating_order_date: None,
        accreditation_term_days: 0,
        additional_orders: vec![],
    }
}

// =============================================================================
// Full Case
// =============================================================================

#[test]
fn test_full_case_milestones() {
    let tables = load_tables();
    let result = compute_case(&create_full_case(), &tables, make_date("2025-03-01")).unwrap();
    let m = &result.pipeline.milestones;

    assert_eq!(m.enforceability_date, make_date("2024-07-04"));
    assert_eq!(m.compliance_deadline, make_date("2024-07-18"));
    assert_eq!(m.report_deadline, make_date("2024-07-25"));
    assert_eq!(m.report_understood_date, make_date("2024-08-12"));
    assert_eq!(m.order_state_date, Some(make_date("2024-08-26")));
    // Aug 27 and 28 are closed
    assert_eq!(m.accreditation_deadline, Some(make_date("2024-09-04")));
    assert_eq!(result.pipeline.timeliness, ReportTimeliness::Extemporaneous);
    assert_eq!(result.pipeline.day_logs.compliance.len(), 14);
}

#[test]
fn test_full_case_periods_and_total() {
    let tables = load_tables();
    let result = compute_case(&create_full_case(), &tables, make_date("2025-03-01")).unwrap();
    let pipeline = &result.pipeline;

    let days: Vec<(PeriodRole, u32)> = pipeline
        .periods
        .iter()
        .map(|p| (p.role, p.calendar_days))
        .collect();
    assert_eq!(
        days,
        vec![
            (PeriodRole::ComplianceToReport, 25),
            (PeriodRole::ReportGrace, 15),
            (PeriodRole::OrderToState, 3),
            (PeriodRole::StateToAccreditation, 7),
            (PeriodRole::AccreditationGrace, 14),
            (PeriodRole::AdditionalOrderToState { index: 1 }, 1),
            (PeriodRole::AdditionalTerm { index: 1 }, 7),
            (PeriodRole::AdditionalGrace { index: 1 }, 14),
        ]
    );
    assert_eq!(pipeline.total_calendar_days, 86);
    assert_eq!(pipeline.fine_base_date, make_date("2024-12-17"));
    assert_eq!(
        pipeline.crossed_resolutions,
        vec![
            "Resolución No. 48972 del 27 de agosto de 2024".to_string(),
            "Resolución No. 49390 del 28 de agosto de 2024".to_string(),
        ]
    );
}

#[test]
fn test_full_case_monthly_summary() {
    let tables = load_tables();
    let result = compute_case(&create_full_case(), &tables, make_date("2025-03-01")).unwrap();
    let summary = &result.monthly_summary;

    let labels: Vec<&str> = summary.months.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["jul-2024", "ago-2024", "sep-2024", "nov-2024", "dic-2024"]);

    // five fixed rows plus three for the additional order
    assert_eq!(summary.rows.len(), 8);

    let totals = summary.totals_row();
    assert_eq!(totals.count(MonthKey::new(2024, 7)), 13);
    assert_eq!(totals.count(MonthKey::new(2024, 8)), 33);
    assert_eq!(totals.count(MonthKey::new(2024, 9)), 18);
    assert_eq!(totals.count(MonthKey::new(2024, 11)), 5);
    assert_eq!(totals.count(MonthKey::new(2024, 12)), 17);
    assert_eq!(totals.total, 86);
    assert_eq!(summary.grand_total(), result.pipeline.total_calendar_days);
}

#[test]
fn test_full_case_fine() {
    let tables = load_tables();
    let result = compute_case(&create_full_case(), &tables, make_date("2025-03-01")).unwrap();
    let fine = &result.fine;

    assert_eq!(fine.accrual_date, make_date("2024-10-14"));
    assert_eq!(fine.fine_year, 2024);
    assert_eq!(fine.min_wage_used, decimal("1300000"));
    assert_eq!(fine.total_days, 86);
    // 86 * 1_300_000 / 7 = 15_971_428.57
    assert_eq!(fine.fine_amount, 15_971_429);
    assert_eq!(
        fine.fine_amount_in_words,
        "QUINCE MILLONES NOVECIENTOS SETENTA Y UN MIL CUATROCIENTOS VEINTINUEVE PESOS"
    );
    assert_eq!(fine.unit_value_year, 2025);
    assert_eq!(fine.unit_value, Some(decimal("11552")));
    assert_eq!(fine.fine_in_units.map(|u| u.round_dp(2)), Some(decimal("1382.57")));
}

#[test]
fn test_full_case_metadata() {
    let tables = load_tables();
    let result = compute_case(&create_full_case(), &tables, make_date("2025-03-01")).unwrap();

    assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    assert!(result.warnings.is_empty());
    assert!(!result.pipeline.audit_trace.steps.is_empty());
}

// =============================================================================
// Year Boundary
// =============================================================================

#[test]
fn test_year_end_closure_moves_fine_year() {
    let tables = load_tables();
    let result = compute_case(&create_year_end_case(), &tables, make_date("2025-03-01")).unwrap();
    let pipeline = &result.pipeline;

    assert_eq!(pipeline.milestones.compliance_deadline, make_date("2024-11-20"));
    // grace period skips the closure from 2024-12-20 to 2025-01-10
    let grace = pipeline
        .periods
        .iter()
        .find(|p| p.role == PeriodRole::ReportGrace)
        .unwrap();
    assert_eq!(grace.end, make_date("2025-01-21"));
    assert_eq!(pipeline.total_calendar_days, 40);
    assert_eq!(
        pipeline.crossed_resolutions,
        vec!["Resolución No. 77546 del 11 de diciembre de 2024".to_string()]
    );

    // the fine base stays at the compliance deadline, but the sanction
    // accrues in 2025
    assert_eq!(pipeline.fine_base_date, make_date("2024-11-20"));
    assert_eq!(result.fine.accrual_date, make_date("2025-01-21"));
    assert_eq!(result.fine.fine_year, 2025);
    assert_eq!(result.fine.fine_amount, 8_134_286);
}

// =============================================================================
// Conditional Obligation and Premature Report
// =============================================================================

#[test]
fn test_late_conditional_compliance_and_premature_report() {
    let tables = load_tables();
    let input = CaseInput {
        notification_date: make_date("2024-04-01"),
        notice_type: NoticeType::ConditionalObligation,
        conditional_term: ConditionalTerm {
            term: Term::BusinessDays { days: 3 },
            acknowledged_compliance: Some(make_date("2024-04-10")),
        },
        compliance_term: Term::BusinessDays { days: 5 },
        report_date: make_date("2024-04-12"),
        report_term_days: 3,
        initiating_order_date: None,
        accreditation_term_days: 0,
        additional_orders: vec![],
    };

    let result = compute_case(&input, &tables, make_date("2024-09-01")).unwrap();
    let pipeline = &result.pipeline;

    assert_eq!(pipeline.milestones.conditional_deadline, make_date("2024-04-04"));
    assert_eq!(pipeline.conditional_compliance_on_time, Some(false));
    assert_eq!(pipeline.milestones.compliance_deadline, make_date("2024-04-17"));
    assert_eq!(pipeline.timeliness, ReportTimeliness::Premature);

    // only the grace period, which spans the April-June closure
    assert_eq!(pipeline.periods.len(), 1);
    assert_eq!(pipeline.periods[0].end, make_date("2024-06-14"));
    assert_eq!(pipeline.total_calendar_days, 14);

    assert_eq!(
        result.monthly_summary.rows[0].narrative,
        "Cumplimiento → Informe: no aplica para este caso."
    );
    assert_eq!(result.fine.fine_amount, 2_600_000);
    assert_eq!(
        result.fine.fine_amount_in_words,
        "DOS MILLONES SEISCIENTOS MIL PESOS"
    );
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn test_invalid_case_is_rejected_before_the_pipeline() {
    let tables = load_tables();
    let mut input = create_year_end_case();
    input.report_date = input.notification_date;

    let result = compute_case(&input, &tables, make_date("2025-03-01"));
    match result {
        Err(EngineError::ValidationFailed { messages }) => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("posterior a la notificación"));
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_unacknowledged_conditional_compliance_fails() {
    let tables = load_tables();
    let mut input = create_year_end_case();
    input.conditional_term.term = Term::BusinessDays { days: 5 };

    let result = compute_case(&input, &tables, make_date("2025-03-01"));
    assert_eq!(
        result.unwrap_err(),
        EngineError::UnacknowledgedCompliance { term_days: 5 }
    );
}

#[test]
fn test_missing_minimum_wage_year_is_reported() {
    let tables = load_tables();
    let input = CaseInput {
        notification_date: make_date("2014-03-03"),
        notice_type: NoticeType::InHearing,
        conditional_term: ConditionalTerm::default(),
        compliance_term: Term::BusinessDays { days: 5 },
        report_date: make_date("2014-03-20"),
        report_term_days: 3,
        initiating_order_date: None,
        accreditation_term_days: 0,
        additional_orders: vec![],
    };

    let err = compute_case(&input, &tables, make_date("2014-06-01")).unwrap_err();
    assert_eq!(
        err,
        EngineError::ReferenceDataMissing {
            table: "minimum_wage".to_string(),
            year: 2014
        }
    );
    assert!(err.to_string().contains("minimum_wage"));
    assert!(err.to_string().contains("2014"));
}

#[test]
fn test_accreditation_term_without_order_is_a_warning() {
    let tables = load_tables();
    let mut input = create_year_end_case();
    input.accreditation_term_days = 5;

    let result = compute_case(&input, &tables, make_date("2025-03-01")).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.pipeline.total_calendar_days, 40);
}

// =============================================================================
// Later Years
// =============================================================================

#[test]
fn test_additional_order_in_a_later_year_sees_that_years_holidays() {
    let tables = load_tables();
    let input = CaseInput {
        notification_date: make_date("2024-03-04"),
        notice_type: NoticeType::InHearing,
        conditional_term: ConditionalTerm::default(),
        compliance_term: Term::BusinessDays { days: 5 },
        report_date: make_date("2024-04-01"),
        report_term_days: 3,
        initiating_order_date: None,
        accreditation_term_days: 0,
        additional_orders: vec![AdditionalOrder {
            order_date: Some(make_date("2025-12-31")),
            term_days: 1,
        }],
    };

    let result = compute_case(&input, &tables, make_date("2024-06-01")).unwrap();
    let pipeline = &result.pipeline;

    let spans: Vec<(PeriodRole, NaiveDate, NaiveDate, u32)> = pipeline
        .periods
        .iter()
        .filter(|p| p.role.additional_index().is_some())
        .map(|p| (p.role, p.start, p.end, p.calendar_days))
        .collect();
    // Closed through Jan 9, weekend Jan 10-11, Reyes Magos on Monday Jan 12
    assert_eq!(
        spans,
        vec![
            (
                PeriodRole::AdditionalOrderToState { index: 1 },
                make_date("2025-12-31"),
                make_date("2026-01-13"),
                4
            ),
            (
                PeriodRole::AdditionalTerm { index: 1 },
                make_date("2026-01-13"),
                make_date("2026-01-14"),
                1
            ),
            (
                PeriodRole::AdditionalGrace { index: 1 },
                make_date("2026-01-14"),
                make_date("2026-01-28"),
                14
            ),
        ]
    );
    assert_eq!(pipeline.total_calendar_days, 53);
    assert_eq!(pipeline.fine_base_date, make_date("2026-01-28"));

    let january = MonthKey::new(2026, 1);
    assert_eq!(result.monthly_summary.totals_row().count(january), 19);
}

// =============================================================================
// JSON
// =============================================================================

#[test]
fn test_case_input_from_json() {
    let json = r#"{
        "notification_date": "2024-11-05",
        "notice_type": "in_hearing",
        "compliance_term": { "mode": "business_days", "days": 10 },
        "report_date": "2024-12-16",
        "report_term_days": 3
    }"#;

    let input: CaseInput = serde_json::from_str(json).unwrap();
    assert_eq!(input, create_year_end_case());
}

#[test]
fn test_case_result_serializes_to_json() {
    let tables = load_tables();
    let result = compute_case(&create_year_end_case(), &tables, make_date("2025-03-01")).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["pipeline"]["timeliness"], "extemporaneous");
    assert_eq!(value["pipeline"]["total_calendar_days"], 40);
    assert_eq!(value["fine"]["fine_amount"], 8_134_286);
    assert!(value["computation_id"].is_string());

    assert_eq!(value["monthly_summary"]["months"][0]["key"], "2024-11");
    let rows = value["monthly_summary"]["rows"].as_array().unwrap();
    let first_row = rows[0]["per_month"].as_object().unwrap();
    assert_eq!(first_row["2024-11"], 10);

    let summary: MonthlySummary =
        serde_json::from_value(value["monthly_summary"].clone()).unwrap();
    assert_eq!(summary, result.monthly_summary);
}
