//! Combined case result model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FineResult, MonthlySummary, PipelineResult};

/// The complete result of computing one case.
///
/// This is the record handed to the rendering collaborator: the pipeline
/// output, the monthly reporting table built over its periods, and the fine
/// computed over its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Unique identifier for this computation.
    pub computation_id: Uuid,
    /// When the computation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the computation.
    pub engine_version: String,
    /// Non-blocking validation warnings.
    pub warnings: Vec<String>,
    /// Deadline pipeline output.
    pub pipeline: PipelineResult,
    /// Month-bucketed reporting table.
    pub monthly_summary: MonthlySummary,
    /// Fine computed over the pipeline totals.
    pub fine: FineResult,
}
