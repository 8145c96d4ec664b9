//! Deadline pipeline.
//!
//! Orchestrates the case timeline stage by stage: enforceability, the
//! conditional obligation, the compliance term (Ddo), the report term
//! (Ddte), report timeliness, the grace periods, and the initiating and
//! additional order sub-pipelines. Every stage records an audit step.
//!
//! The pipeline is pure: it reads the case input and calendar context and
//! returns a [`PipelineResult`], or the first structural error it meets.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, CalendarContext, CaseInput, DayLogs, Milestones, NoticeType, Period,
    PeriodRole, PipelineResult, ReportTimeliness, Term,
};

use super::business_calendar::{
    add_business_days, count_calendar_days_excluding_closures, detect_suspension_crossings,
    next_business_day, roll_forward_to_business_day,
};

const GRACE_PERIOD_REF: &str = "Art. 120 CGP";

/// The roles an order sub-pipeline tags its three periods with.
#[derive(Debug, Clone, Copy)]
struct OrderRoles {
    to_state: PeriodRole,
    term: PeriodRole,
    grace: PeriodRole,
}

impl OrderRoles {
    fn initiating() -> Self {
        Self {
            to_state: PeriodRole::OrderToState,
            term: PeriodRole::StateToAccreditation,
            grace: PeriodRole::AccreditationGrace,
        }
    }

    fn additional(index: usize) -> Self {
        Self {
            to_state: PeriodRole::AdditionalOrderToState { index },
            term: PeriodRole::AdditionalTerm { index },
            grace: PeriodRole::AdditionalGrace { index },
        }
    }
}

/// Dates produced by one order sub-pipeline.
#[derive(Debug, Clone, Copy)]
struct OrderTimeline {
    state_date: NaiveDate,
    term_deadline: Option<NaiveDate>,
    grace_end: Option<NaiveDate>,
}

/// Runs the deadline pipeline for a case.
///
/// # Arguments
///
/// * `input` - The case input (expected to have passed validation)
/// * `ctx` - The calendar context for the case's year range
/// * `settings` - Statutory constants
///
/// # Returns
///
/// Returns the [`PipelineResult`], or an error if:
/// - A fixed-date term has no date (`MissingFixedDate`)
/// - A positive conditional term was declared without acknowledged compliance
///   (`UnacknowledgedCompliance`)
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::run_deadline_pipeline;
/// use deadline_engine::config::EngineSettings;
/// use deadline_engine::models::{CalendarContext, CaseInput, ConditionalTerm, NoticeType, Term};
/// use chrono::NaiveDate;
///
/// let input = CaseInput {
///     notification_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     notice_type: NoticeType::InHearing,
///     conditional_term: ConditionalTerm::default(),
///     compliance_term: Term::BusinessDays { days: 5 },
///     report_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
///     report_term_days: 3,
///     initiating_order_date: None,
///     accreditation_term_days: 0,
///     additional_orders: vec![],
/// };
///
/// let result = run_deadline_pipeline(&input, &CalendarContext::default(), &EngineSettings::default())
///     .unwrap();
/// assert_eq!(
///     result.milestones.compliance_deadline,
///     NaiveDate::from_ymd_opt(2024, 7, 8).unwrap()
/// );
/// ```
pub fn run_deadline_pipeline(
    input: &CaseInput,
    ctx: &CalendarContext,
    settings: &EngineSettings,
) -> EngineResult<PipelineResult> {
    let mut trace = AuditTrace::default();

    // Stage 1: enforceability
    let enforceability_days = match input.notice_type {
        NoticeType::Listing => settings.enforceability_business_days,
        NoticeType::InHearing | NoticeType::ConditionalObligation => 0,
    };
    let enforceability_date =
        add_business_days(input.notification_date, enforceability_days, ctx).end_date;
    record(
        &mut trace,
        "enforceability_date",
        "Enforceability Date",
        None,
        serde_json::json!({
            "notification_date": input.notification_date.to_string(),
            "notice_type": input.notice_type,
            "business_days": enforceability_days
        }),
        serde_json::json!({ "enforceability_date": enforceability_date.to_string() }),
        format!(
            "Ruling notified {} becomes enforceable after {} business days: {}",
            input.notification_date, enforceability_days, enforceability_date
        ),
    );
    debug!(%enforceability_date, "Computed enforceability date");

    // Stage 2: conditional obligation deadline
    let conditional = &input.conditional_term;
    let conditional_deadline = match conditional.term {
        Term::BusinessDays { days } if days > 0 => {
            add_business_days(enforceability_date, days, ctx).end_date
        }
        Term::BusinessDays { .. } => enforceability_date,
        Term::FixedDate { date: Some(date) } => date,
        Term::FixedDate { date: None } => {
            return Err(EngineError::MissingFixedDate {
                field: "conditional_term.date".to_string(),
            });
        }
    };
    record(
        &mut trace,
        "conditional_deadline",
        "Conditional Obligation Deadline",
        None,
        serde_json::json!({
            "enforceability_date": enforceability_date.to_string(),
            "term": conditional.term
        }),
        serde_json::json!({ "conditional_deadline": conditional_deadline.to_string() }),
        format!("Conditional obligation expires on {}", conditional_deadline),
    );

    // Stage 3: compliance base date
    let (compliance_base_date, conditional_compliance_on_time) =
        match conditional.acknowledged_compliance {
            Some(acknowledged) => (acknowledged, Some(acknowledged <= conditional_deadline)),
            None if conditional.term.business_days() > 0 => {
                return Err(EngineError::UnacknowledgedCompliance {
                    term_days: conditional.term.business_days(),
                });
            }
            None => (enforceability_date, None),
        };
    record(
        &mut trace,
        "compliance_base_date",
        "Compliance Base Date",
        None,
        serde_json::json!({
            "acknowledged_compliance": conditional.acknowledged_compliance.map(|d| d.to_string()),
            "conditional_deadline": conditional_deadline.to_string()
        }),
        serde_json::json!({
            "compliance_base_date": compliance_base_date.to_string(),
            "on_time": conditional_compliance_on_time
        }),
        match conditional_compliance_on_time {
            Some(true) => format!("Conditional compliance acknowledged on time: {}", compliance_base_date),
            Some(false) => format!("Conditional compliance acknowledged late: {}", compliance_base_date),
            None => format!(
                "No conditional compliance to wait for; term runs from enforceability {}",
                compliance_base_date
            ),
        },
    );

    // Stage 4: compliance deadline (Ddo)
    let (compliance_deadline, compliance_log) = match input.compliance_term {
        Term::BusinessDays { days } => {
            let scan = add_business_days(compliance_base_date, days, ctx);
            (scan.end_date, scan.log)
        }
        Term::FixedDate { date: Some(date) } => (date, Vec::new()),
        Term::FixedDate { date: None } => {
            return Err(EngineError::MissingFixedDate {
                field: "compliance_term.date".to_string(),
            });
        }
    };
    record(
        &mut trace,
        "compliance_deadline",
        "Compliance Deadline (Ddo)",
        None,
        serde_json::json!({
            "compliance_base_date": compliance_base_date.to_string(),
            "term": input.compliance_term
        }),
        serde_json::json!({
            "compliance_deadline": compliance_deadline.to_string(),
            "days_scanned": compliance_log.len()
        }),
        format!("Compliance term expires on {}", compliance_deadline),
    );
    debug!(%compliance_deadline, "Computed compliance deadline");

    // Stage 5: report deadline (Ddte)
    let report_scan = add_business_days(compliance_deadline, input.report_term_days, ctx);
    let report_deadline = report_scan.end_date;
    record(
        &mut trace,
        "report_deadline",
        "Report Deadline (Ddte)",
        None,
        serde_json::json!({
            "compliance_deadline": compliance_deadline.to_string(),
            "report_term_days": input.report_term_days
        }),
        serde_json::json!({ "report_deadline": report_deadline.to_string() }),
        format!(
            "{} business days after {}: {}",
            input.report_term_days, compliance_deadline, report_deadline
        ),
    );

    // Stage 6: report understood date
    let report_understood_date = roll_forward_to_business_day(input.report_date, ctx);

    // Stage 7: timeliness
    let timeliness =
        ReportTimeliness::classify(input.report_date, compliance_deadline, report_deadline);
    record(
        &mut trace,
        "report_timeliness",
        "Report Timeliness",
        None,
        serde_json::json!({
            "report_date": input.report_date.to_string(),
            "compliance_deadline": compliance_deadline.to_string(),
            "report_deadline": report_deadline.to_string()
        }),
        serde_json::json!({
            "timeliness": timeliness,
            "report_understood_date": report_understood_date.to_string()
        }),
        format!(
            "Report filed {} (understood {}) is {}",
            input.report_date, report_understood_date, timeliness
        ),
    );
    debug!(%timeliness, "Classified report");

    let mut periods = Vec::new();

    // Stage 8: compliance -> report understood
    if report_understood_date >= compliance_deadline {
        periods.push(Period::new(
            PeriodRole::ComplianceToReport,
            compliance_deadline,
            report_understood_date,
            count_calendar_days_excluding_closures(compliance_deadline, report_understood_date, ctx),
        ));
    }

    // Stage 9: grace period after the report
    let report_grace_end =
        add_business_days(report_understood_date, settings.grace_period_business_days, ctx)
            .end_date;
    periods.push(Period::new(
        PeriodRole::ReportGrace,
        report_understood_date,
        report_grace_end,
        count_calendar_days_excluding_closures(report_understood_date, report_grace_end, ctx),
    ));
    record(
        &mut trace,
        "report_grace_period",
        "Grace Period After Report",
        Some(GRACE_PERIOD_REF),
        serde_json::json!({
            "report_understood_date": report_understood_date.to_string(),
            "business_days": settings.grace_period_business_days
        }),
        serde_json::json!({ "grace_end": report_grace_end.to_string() }),
        format!("Grace period after the report runs until {}", report_grace_end),
    );

    let mut fine_base_date = compliance_deadline;
    let mut order_state_date = None;
    let mut accreditation_deadline = None;

    // Stage 10: initiating order
    if let Some(order_date) = input.initiating_order_date {
        let timeline = run_order(
            order_date,
            input.accreditation_term_days,
            OrderRoles::initiating(),
            ctx,
            settings,
            &mut periods,
        );
        order_state_date = Some(timeline.state_date);
        accreditation_deadline = timeline.term_deadline;
        if let Some(grace_end) = timeline.grace_end {
            fine_base_date = grace_end;
        }
        record(
            &mut trace,
            "initiating_order",
            "Initiating Order",
            Some(GRACE_PERIOD_REF),
            serde_json::json!({
                "order_date": order_date.to_string(),
                "accreditation_term_days": input.accreditation_term_days
            }),
            order_output(&timeline),
            format!(
                "Initiating order of {} listed on {}",
                order_date, timeline.state_date
            ),
        );
    }

    // Stage 11: additional orders
    for (position, order) in input.additional_orders.iter().enumerate() {
        let Some(order_date) = order.runnable_date() else {
            continue;
        };
        let index = position + 1;
        let timeline = run_order(
            order_date,
            order.term_days,
            OrderRoles::additional(index),
            ctx,
            settings,
            &mut periods,
        );
        if let Some(grace_end) = timeline.grace_end {
            fine_base_date = grace_end;
        }
        record(
            &mut trace,
            "additional_order",
            "Additional Order",
            Some(GRACE_PERIOD_REF),
            serde_json::json!({
                "index": index,
                "order_date": order_date.to_string(),
                "term_days": order.term_days
            }),
            order_output(&timeline),
            format!(
                "Additional order #{} of {} listed on {}",
                index, order_date, timeline.state_date
            ),
        );
    }

    // Stage 12: resolution crossings
    let crossed_resolutions = crossed_resolution_labels(&periods, ctx);

    // Stage 13: total
    let total_calendar_days = PipelineResult::sum_period_days(&periods);
    record(
        &mut trace,
        "total_calendar_days",
        "Total Calendar Days",
        None,
        serde_json::json!({ "periods": periods.len() }),
        serde_json::json!({
            "total_calendar_days": total_calendar_days,
            "crossed_resolutions": crossed_resolutions,
            "fine_base_date": fine_base_date.to_string()
        }),
        format!(
            "{} periods add up to {} calendar days",
            periods.len(),
            total_calendar_days
        ),
    );
    debug!(total_calendar_days, periods = periods.len(), "Pipeline finished");

    Ok(PipelineResult {
        milestones: Milestones {
            enforceability_date,
            conditional_deadline,
            compliance_base_date,
            compliance_deadline,
            report_deadline,
            report_understood_date,
            order_state_date,
            accreditation_deadline,
        },
        conditional_compliance_on_time,
        timeliness,
        periods,
        total_calendar_days,
        crossed_resolutions,
        fine_base_date,
        day_logs: DayLogs {
            compliance: compliance_log,
            report: report_scan.log,
        },
        audit_trace: trace,
    })
}

/// Runs one order sub-pipeline: order to listing, listing to term deadline,
/// term deadline to the end of the grace period.
///
/// The last two steps only run for a positive term.
fn run_order(
    order_date: NaiveDate,
    term_days: u32,
    roles: OrderRoles,
    ctx: &CalendarContext,
    settings: &EngineSettings,
    periods: &mut Vec<Period>,
) -> OrderTimeline {
    let state_date = next_business_day(order_date, ctx);
    periods.push(Period::new(
        roles.to_state,
        order_date,
        state_date,
        count_calendar_days_excluding_closures(order_date, state_date, ctx),
    ));

    if term_days == 0 {
        return OrderTimeline {
            state_date,
            term_deadline: None,
            grace_end: None,
        };
    }

    let term_deadline = add_business_days(state_date, term_days, ctx).end_date;
    periods.push(Period::new(
        roles.term,
        state_date,
        term_deadline,
        count_calendar_days_excluding_closures(state_date, term_deadline, ctx),
    ));

    let grace_end =
        add_business_days(term_deadline, settings.grace_period_business_days, ctx).end_date;
    periods.push(Period::new(
        roles.grace,
        term_deadline,
        grace_end,
        count_calendar_days_excluding_closures(term_deadline, grace_end, ctx),
    ));

    OrderTimeline {
        state_date,
        term_deadline: Some(term_deadline),
        grace_end: Some(grace_end),
    }
}

fn order_output(timeline: &OrderTimeline) -> serde_json::Value {
    serde_json::json!({
        "state_date": timeline.state_date.to_string(),
        "term_deadline": timeline.term_deadline.map(|d| d.to_string()),
        "grace_end": timeline.grace_end.map(|d| d.to_string())
    })
}

/// Labels of every resolution crossed by any period, first-seen order.
fn crossed_resolution_labels(periods: &[Period], ctx: &CalendarContext) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for period in periods {
        for resolution in detect_suspension_crossings(period.start, period.end, ctx.resolutions()) {
            if seen.insert(resolution.label.as_str()) {
                labels.push(resolution.label.clone());
            }
        }
    }
    labels
}

fn record(
    trace: &mut AuditTrace,
    rule_id: &str,
    rule_name: &str,
    legal_ref: Option<&str>,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) {
    let step_number = trace.next_step_number();
    trace.steps.push(AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        legal_ref: legal_ref.map(str::to_string),
        input,
        output,
        reasoning,
    });
}
