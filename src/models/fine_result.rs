//! Fine result model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The statutory fine computed for a case.
///
/// `fine_amount` is a non-negative whole number of currency units, rounded
/// half-to-even.
///
/// # Example
///
/// ```
/// use deadline_engine::models::FineResult;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let fine = FineResult {
///     fine_year: 2024,
///     accrual_date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
///     min_wage_used: Decimal::new(700_000, 0),
///     unit_rate: Decimal::new(100_000, 0),
///     total_days: 5,
///     fine_amount: 500_000,
///     fine_amount_in_words: "QUINIENTOS MIL PESOS".to_string(),
///     unit_value_year: 2024,
///     unit_value: None,
///     fine_in_units: None,
/// };
/// assert!(fine.fine_in_units.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineResult {
    /// The year whose minimum wage governs the fine.
    pub fine_year: i32,
    /// The date the sanction is deemed to accrue.
    pub accrual_date: NaiveDate,
    /// Monthly minimum wage for `fine_year`.
    pub min_wage_used: Decimal,
    /// Fine per day of delay.
    pub unit_rate: Decimal,
    /// Days of delay the fine is computed over.
    pub total_days: u32,
    /// The fine, in whole currency units.
    pub fine_amount: u64,
    /// The fine spelled out in words with its currency noun.
    pub fine_amount_in_words: String,
    /// The year used for the currency-unit equivalence.
    pub unit_value_year: i32,
    /// Value of one currency unit in `unit_value_year`, if tabulated.
    pub unit_value: Option<Decimal>,
    /// The fine expressed in currency units, if `unit_value` is known.
    pub fine_in_units: Option<Decimal>,
}
