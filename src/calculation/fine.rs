//! Fine calculation.
//!
//! The fine is the number of days of delay times the daily rate (the
//! monthly minimum wage of the fine year over the configured divisor),
//! rounded half-to-even to a whole amount. Its equivalence in currency units
//! is reported when the unit table has an entry for the evaluation year.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use tracing::warn;

use crate::config::{FineYearBasis, ReferenceTables};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarContext, FineResult};

use super::amount_in_words::pesos_in_words;
use super::business_calendar::advance_calendar_days_excluding_closures;

/// Rounds to a whole number, sending exact halves to the nearest even integer.
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::round_fine;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_fine(Decimal::new(25, 1)), Decimal::new(2, 0));
/// assert_eq!(round_fine(Decimal::new(35, 1)), Decimal::new(4, 0));
/// ```
pub fn round_fine(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// The date the sanction is deemed to accrue: the compliance deadline
/// advanced by the total days of delay, skipping closures.
pub fn accrual_date(
    compliance_deadline: NaiveDate,
    total_days: u32,
    ctx: &CalendarContext,
) -> NaiveDate {
    advance_calendar_days_excluding_closures(compliance_deadline, total_days, ctx)
}

/// Selects the minimum-wage year of the fine.
pub fn fine_year(basis: FineYearBasis, accrual_date: NaiveDate, fine_base_date: NaiveDate) -> i32 {
    match basis {
        FineYearBasis::AccrualDate => accrual_date.year(),
        FineYearBasis::FineBaseDate => fine_base_date.year(),
    }
}

/// Calculates the fine for a number of days of delay.
///
/// # Arguments
///
/// * `total_days` - Closure-excluded calendar days of delay
/// * `accrual_date` - The date the sanction accrues
/// * `fine_year` - The year whose minimum wage applies
/// * `unit_value_year` - The year whose currency-unit value applies
/// * `tables` - The reference tables
///
/// # Returns
///
/// Returns the [`FineResult`], or an error if:
/// - The minimum-wage table has no entry for `fine_year`
/// - The configured daily-wage divisor is zero
///
/// A missing currency-unit value leaves the unit equivalence empty.
pub fn calculate_fine(
    total_days: u32,
    accrual_date: NaiveDate,
    fine_year: i32,
    unit_value_year: i32,
    tables: &ReferenceTables,
) -> EngineResult<FineResult> {
    let min_wage = tables.minimum_wage(fine_year)?;

    let divisor = tables.settings().daily_wage_divisor;
    if divisor == 0 {
        return Err(EngineError::InvalidReferenceData {
            message: "daily_wage_divisor must be positive".to_string(),
        });
    }
    let unit_rate = min_wage / Decimal::from(divisor);

    let rounded = round_fine(Decimal::from(total_days) * unit_rate);
    let fine_amount = rounded
        .to_u64()
        .ok_or_else(|| EngineError::InvalidReferenceData {
            message: format!("fine amount {} is not a non-negative whole number", rounded),
        })?;

    let unit_value = tables.unit_value(unit_value_year).filter(|v| !v.is_zero());
    if unit_value.is_none() {
        warn!(
            year = unit_value_year,
            "No currency-unit value for year, omitting unit equivalence"
        );
    }
    let fine_in_units = unit_value.map(|v| Decimal::from(fine_amount) / v);

    Ok(FineResult {
        fine_year,
        accrual_date,
        min_wage_used: min_wage,
        unit_rate,
        total_days,
        fine_amount,
        fine_amount_in_words: pesos_in_words(fine_amount),
        unit_value_year,
        unit_value,
        fine_in_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ClosuresConfig, EngineSettings, HolidaysConfig, JurisdictionMetadata, MinimumWageConfig,
        ResolutionsConfig, UnitValueConfig,
    };
    use std::collections::BTreeMap;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_tables(settings: EngineSettings) -> ReferenceTables {
        let mut minimum_wage = BTreeMap::new();
        minimum_wage.insert(2023, Decimal::new(700000, 0));
        minimum_wage.insert(2024, Decimal::new(1300000, 0));

        let mut unit_value = BTreeMap::new();
        unit_value.insert(2024, Decimal::new(10000, 0));

        ReferenceTables::new(
            JurisdictionMetadata {
                code: "CO".to_string(),
                name: "Prueba".to_string(),
                currency: "COP".to_string(),
                unit_name: "UVB".to_string(),
            },
            settings,
            HolidaysConfig {
                holidays: BTreeMap::new(),
            },
            ClosuresConfig { closures: vec![] },
            ResolutionsConfig {
                resolutions: vec![],
            },
            MinimumWageConfig { minimum_wage },
            UnitValueConfig { unit_value },
        )
        .unwrap()
    }

    #[test]
    fn test_round_fine_half_to_even() {
        assert_eq!(round_fine(Decimal::new(25, 1)), Decimal::new(2, 0));
        assert_eq!(round_fine(Decimal::new(35, 1)), Decimal::new(4, 0));
        assert_eq!(round_fine(Decimal::new(24, 1)), Decimal::new(2, 0));
        assert_eq!(round_fine(Decimal::new(26, 1)), Decimal::new(3, 0));
        assert_eq!(round_fine(Decimal::new(5, 1)), Decimal::new(0, 0));
    }

    #[test]
    fn test_five_days_at_seven_hundred_thousand() {
        let tables = create_test_tables(EngineSettings::default());
        let fine = calculate_fine(5, make_date("2023-07-20"), 2023, 2024, &tables).unwrap();

        assert_eq!(fine.min_wage_used, Decimal::new(700000, 0));
        assert_eq!(fine.unit_rate, Decimal::new(100000, 0));
        assert_eq!(fine.fine_amount, 500_000);
        assert_eq!(fine.fine_amount_in_words, "QUINIENTOS MIL PESOS");
        assert_eq!(fine.unit_value, Some(Decimal::new(10000, 0)));
        assert_eq!(fine.fine_in_units, Some(Decimal::new(50, 0)));
    }

    #[test]
    fn test_fractional_rate_is_rounded() {
        let tables = create_test_tables(EngineSettings::default());
        let fine = calculate_fine(10, make_date("2024-07-20"), 2024, 2024, &tables).unwrap();

        // 10 * 1_300_000 / 7 = 1_857_142.857...
        assert_eq!(fine.fine_amount, 1_857_143);
    }

    #[test]
    fn test_zero_days_gives_zero_fine() {
        let tables = create_test_tables(EngineSettings::default());
        let fine = calculate_fine(0, make_date("2024-07-20"), 2024, 2024, &tables).unwrap();

        assert_eq!(fine.fine_amount, 0);
        assert_eq!(fine.fine_amount_in_words, "CERO PESOS");
    }

    #[test]
    fn test_missing_wage_year_is_a_lookup_error() {
        let tables = create_test_tables(EngineSettings::default());
        let result = calculate_fine(5, make_date("2031-01-01"), 2031, 2031, &tables);

        let err = result.unwrap_err();
        assert_eq!(
            err,
            EngineError::ReferenceDataMissing {
                table: "minimum_wage".to_string(),
                year: 2031
            }
        );
        assert!(err.to_string().contains("2031"));
    }

    #[test]
    fn test_missing_unit_value_is_not_fatal() {
        let tables = create_test_tables(EngineSettings::default());
        let fine = calculate_fine(5, make_date("2023-07-20"), 2023, 2023, &tables).unwrap();

        assert_eq!(fine.fine_amount, 500_000);
        assert!(fine.unit_value.is_none());
        assert!(fine.fine_in_units.is_none());
    }

    #[test]
    fn test_zero_divisor_is_rejected() {
        let settings = EngineSettings {
            daily_wage_divisor: 0,
            ..EngineSettings::default()
        };
        let tables = create_test_tables(settings);
        let result = calculate_fine(5, make_date("2023-07-20"), 2023, 2024, &tables);
        assert!(matches!(result, Err(EngineError::InvalidReferenceData { .. })));
    }

    #[test]
    fn test_accrual_date_skips_closures() {
        let ctx = CalendarContext::new([], [make_date("2023-12-31")], vec![]);
        // Dec 29 + 3 counted days: Dec 30, (31 closed), Jan 1, Jan 2
        assert_eq!(accrual_date(make_date("2023-12-29"), 3, &ctx), make_date("2024-01-02"));
        assert_eq!(
            accrual_date(make_date("2023-12-29"), 3, &CalendarContext::default()),
            make_date("2024-01-01")
        );
    }

    #[test]
    fn test_fine_year_by_basis() {
        let accrual = make_date("2025-01-03");
        let base = make_date("2024-12-10");
        assert_eq!(fine_year(FineYearBasis::AccrualDate, accrual, base), 2025);
        assert_eq!(fine_year(FineYearBasis::FineBaseDate, accrual, base), 2024);
    }
}
