//! Reference-table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the static
//! reference tables from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ClosuresConfig, EngineSettings, HolidaysConfig, JurisdictionMetadata, MinimumWageConfig,
    ReferenceTables, ResolutionsConfig, UnitValueConfig,
};

/// Loads and provides access to the reference tables.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/colombia/
/// ├── jurisdiction.yaml   # Jurisdiction metadata
/// ├── settings.yaml       # Statutory constants (optional, defaults apply)
/// ├── holidays.yaml       # Holidays by year
/// ├── closures.yaml       # Court-closure date ranges
/// ├── resolutions.yaml    # Term-suspension resolutions
/// ├── minimum_wage.yaml   # Monthly minimum wage by year
/// └── unit_value.yaml     # Currency-unit value by year
/// ```
///
/// # Example
///
/// ```no_run
/// use deadline_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/colombia").unwrap();
/// let wage = loader.tables().minimum_wage(2024).unwrap();
/// println!("Minimum wage 2024: ${}", wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: ReferenceTables,
}

impl ConfigLoader {
    /// Loads the reference tables from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A closure range or resolution interval ends before it starts
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;

        let settings_path = path.join("settings.yaml");
        let settings = if settings_path.exists() {
            Self::load_yaml::<EngineSettings>(&settings_path)?
        } else {
            EngineSettings::default()
        };

        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;
        let closures = Self::load_yaml::<ClosuresConfig>(&path.join("closures.yaml"))?;
        let resolutions = Self::load_yaml::<ResolutionsConfig>(&path.join("resolutions.yaml"))?;
        let minimum_wage = Self::load_yaml::<MinimumWageConfig>(&path.join("minimum_wage.yaml"))?;
        let unit_value = Self::load_yaml::<UnitValueConfig>(&path.join("unit_value.yaml"))?;

        let tables = ReferenceTables::new(
            metadata,
            settings,
            holidays,
            closures,
            resolutions,
            minimum_wage,
            unit_value,
        )?;

        tracing::debug!(
            jurisdiction = %tables.metadata().code,
            resolutions = tables.resolutions().len(),
            "Loaded reference tables"
        );

        Ok(Self { tables })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded reference tables.
    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Consumes the loader, returning the reference tables.
    pub fn into_tables(self) -> ReferenceTables {
        self.tables
    }
}
