//! Core data models for the deadline engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod calendar_context;
mod case_input;
mod case_result;
mod fine_result;
mod monthly_summary;
mod period;
mod pipeline_result;

pub use audit::{AuditStep, AuditTrace, DayClassification, DayLogEntry};
pub use calendar_context::{CalendarContext, Resolution};
pub use case_input::{AdditionalOrder, CaseInput, ConditionalTerm, NoticeType, Term};
pub use case_result::CaseResult;
pub use fine_result::FineResult;
pub use monthly_summary::{MonthColumn, MonthKey, MonthlySummary, SummaryRow};
pub use period::{Period, PeriodRole};
pub use pipeline_result::{DayLogs, Milestones, PipelineResult, ReportTimeliness};
