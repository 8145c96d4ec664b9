//! Monthly aggregator.
//!
//! Turns the pipeline's period list into a reporting table: one narrative
//! row per fixed period role (a "not applicable" row when the case has no
//! such period), then up to three rows per additional order. Every row's
//! closure-excluded calendar days are bucketed by `(year, month)`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::{
    CalendarContext, MonthColumn, MonthKey, MonthlySummary, Period, PeriodRole, SummaryRow,
};

use super::business_calendar::counted_days_after;

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Builds the month-bucketed summary for a case's periods.
///
/// Fixed-role rows always come first and in the same order, whether or not
/// the case produced the period. Additional-order rows follow, grouped by
/// order index.
pub fn build_monthly_summary(periods: &[Period], ctx: &CalendarContext) -> MonthlySummary {
    let mut rows = Vec::new();

    for role in PeriodRole::FIXED {
        let row = match periods.iter().find(|p| p.role == role) {
            Some(period) => bucket_row(period, ctx),
            None => SummaryRow::empty(format!("{}: no aplica para este caso.", role)),
        };
        rows.push(row);
    }

    let mut additional: BTreeMap<usize, Vec<&Period>> = BTreeMap::new();
    for period in periods {
        if let Some(index) = period.role.additional_index() {
            additional.entry(index).or_default().push(period);
        }
    }
    for group in additional.values_mut() {
        group.sort_by_key(|p| additional_rank(p.role));
        rows.extend(group.iter().map(|p| bucket_row(p, ctx)));
    }

    let keys: BTreeSet<MonthKey> = rows
        .iter()
        .flat_map(|row| row.per_month.keys().copied())
        .collect();
    let months = keys
        .into_iter()
        .map(|key| MonthColumn {
            key,
            label: key.label(),
        })
        .collect::<Vec<_>>();

    debug!(rows = rows.len(), months = months.len(), "Built monthly summary");

    MonthlySummary { months, rows }
}

fn bucket_row(period: &Period, ctx: &CalendarContext) -> SummaryRow {
    let mut per_month = BTreeMap::new();
    for day in counted_days_after(period.start, period.end, ctx) {
        *per_month
            .entry(MonthKey::new(day.year(), day.month()))
            .or_insert(0u32) += 1;
    }
    let total = per_month.values().sum();

    SummaryRow {
        narrative: narrative(period),
        per_month,
        total,
    }
}

fn additional_rank(role: PeriodRole) -> u8 {
    match role {
        PeriodRole::AdditionalOrderToState { .. } => 0,
        PeriodRole::AdditionalTerm { .. } => 1,
        _ => 2,
    }
}

fn narrative(period: &Period) -> String {
    let start = long_date(period.start);
    let end = long_date(period.end);
    match period.role {
        PeriodRole::ComplianceToReport => format!(
            "Desde el vencimiento del plazo de cumplimiento ({}) hasta la fecha en que se entiende presentada la noticia de incumplimiento ({}).",
            start, end
        ),
        PeriodRole::ReportGrace => format!(
            "Desde la noticia de incumplimiento ({}) hasta el vencimiento del término del art. 120 CGP ({}).",
            start, end
        ),
        PeriodRole::OrderToState => format!(
            "Desde el auto de inicio ({}) hasta su notificación por estado ({}).",
            start, end
        ),
        PeriodRole::StateToAccreditation => format!(
            "Desde la notificación por estado ({}) hasta el vencimiento del plazo de acreditación ({}).",
            start, end
        ),
        PeriodRole::AccreditationGrace => format!(
            "Desde el vencimiento del plazo de acreditación ({}) hasta el vencimiento del término del art. 120 CGP ({}).",
            start, end
        ),
        PeriodRole::AdditionalOrderToState { index } => format!(
            "Auto adicional #{}: desde el auto ({}) hasta su notificación por estado ({}).",
            index, start, end
        ),
        PeriodRole::AdditionalTerm { index } => format!(
            "Auto adicional #{}: desde la notificación por estado ({}) hasta el vencimiento del plazo ({}).",
            index, start, end
        ),
        PeriodRole::AdditionalGrace { index } => format!(
            "Auto adicional #{}: desde el vencimiento del plazo ({}) hasta el vencimiento del término del art. 120 CGP ({}).",
            index, start, end
        ),
    }
}

/// Spanish long-form date, e.g. `"17 de junio de 2024"`.
pub(crate) fn long_date(date: NaiveDate) -> String {
    let month = MONTH_NAMES
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{} de {} de {}", date.day(), month, date.year())
}
