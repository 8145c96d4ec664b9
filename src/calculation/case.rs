//! Case orchestration.
//!
//! Runs a complete computation: validation, calendar context construction,
//! the deadline pipeline, the monthly aggregator and the fine calculator,
//! combined into one [`CaseResult`].

use std::time::Instant;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ReferenceTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{CaseInput, CaseResult};
use crate::validation::validate_case;

use super::deadline_pipeline::run_deadline_pipeline;
use super::fine::{accrual_date, calculate_fine, fine_year};
use super::monthly_summary::build_monthly_summary;

/// Computes a case end to end.
///
/// # Arguments
///
/// * `input` - The case input
/// * `tables` - The reference tables
/// * `as_of` - The evaluation date; its year selects the currency-unit value
///
/// # Returns
///
/// Returns the [`CaseResult`], or an error if:
/// - The input fails validation (`ValidationFailed`)
/// - The pipeline meets a structurally missing field
/// - The minimum-wage table has no entry for the fine year
pub fn compute_case(
    input: &CaseInput,
    tables: &ReferenceTables,
    as_of: NaiveDate,
) -> EngineResult<CaseResult> {
    let computation_id = Uuid::new_v4();
    info!(computation_id = %computation_id, "Processing case");
    let start_time = Instant::now();

    let validation = validate_case(input);
    if !validation.is_valid() {
        warn!(
            computation_id = %computation_id,
            errors = validation.errors.len(),
            "Case validation failed"
        );
        return Err(EngineError::ValidationFailed {
            messages: validation.messages(),
        });
    }

    let ctx = tables.full_calendar_context();
    let settings = tables.settings();

    let pipeline = run_deadline_pipeline(input, &ctx, settings).inspect_err(|err| {
        warn!(computation_id = %computation_id, error = %err, "Pipeline failed");
    })?;

    let monthly_summary = build_monthly_summary(&pipeline.periods, &ctx);

    let accrual = accrual_date(
        pipeline.milestones.compliance_deadline,
        pipeline.total_calendar_days,
        &ctx,
    );
    let year = fine_year(settings.fine_year_basis, accrual, pipeline.fine_base_date);
    let fine = calculate_fine(
        pipeline.total_calendar_days,
        accrual,
        year,
        as_of.year(),
        tables,
    )
    .inspect_err(|err| {
        warn!(computation_id = %computation_id, error = %err, "Fine calculation failed");
    })?;

    info!(
        computation_id = %computation_id,
        total_days = pipeline.total_calendar_days,
        timeliness = %pipeline.timeliness,
        fine_amount = fine.fine_amount,
        duration_us = start_time.elapsed().as_micros(),
        "Case computed"
    );

    Ok(CaseResult {
        computation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        warnings: validation.warnings,
        pipeline,
        monthly_summary,
        fine,
    })
}
