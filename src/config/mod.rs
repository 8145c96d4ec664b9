//! Reference-table loading and management for the deadline engine.
//!
//! This module provides functionality to load the static reference tables
//! (holidays, court closures, suspension resolutions, minimum wage and
//! currency-unit values) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use deadline_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/colombia").unwrap();
//! println!("Loaded jurisdiction: {}", config.tables().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClosureRange, ClosuresConfig, EngineSettings, FineYearBasis, HolidayEntry, HolidaysConfig,
    JurisdictionMetadata, MinimumWageConfig, ReferenceTables, ResolutionsConfig, UnitValueConfig,
};
