//! Calculation logic for the deadline engine.
//!
//! This module contains the business calendar (business-day arithmetic,
//! closure-aware calendar-day counting, suspension-crossing detection), the
//! deadline pipeline that builds a case timeline from it, the monthly
//! aggregator, the fine calculator with its amount-to-words spelling, and
//! the case orchestrator tying them together.

mod amount_in_words;
mod business_calendar;
mod case;
mod deadline_pipeline;
mod fine;
mod monthly_summary;

pub use amount_in_words::{amount_in_words, pesos_in_words};
pub use business_calendar::{
    BusinessDayScan, add_business_days, advance_calendar_days_excluding_closures, classify_day,
    count_calendar_days_excluding_closures, detect_suspension_crossings, is_business_day,
    next_business_day, roll_forward_to_business_day,
};
pub use case::compute_case;
pub use deadline_pipeline::run_deadline_pipeline;
pub use fine::{accrual_date, calculate_fine, fine_year, round_fine};
pub use monthly_summary::build_monthly_summary;
