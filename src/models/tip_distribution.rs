//! Gratuity distribution outputs.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::GratuityTotals;
use super::lenient;

/// How the gratuity pool is split among employees.
///
/// # Example
///
/// ```
/// use gratuity_engine::models::DistributionMethod;
///
/// assert_eq!(DistributionMethod::default(), DistributionMethod::Percentage);
/// assert_eq!("equal".parse::<DistributionMethod>().unwrap(), DistributionMethod::Equal);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMethod {
    /// Weighted by each employee's points.
    #[default]
    Percentage,
    /// Split evenly among rows that name an employee.
    Equal,
}

impl DistributionMethod {
    /// Returns the stored name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionMethod::Percentage => "percentage",
            DistributionMethod::Equal => "equal",
        }
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" => Ok(DistributionMethod::Percentage),
            "equal" => Ok(DistributionMethod::Equal),
            other => Err(format!("unknown distribution method: {}", other)),
        }
    }
}

/// One employee's share of the gratuity pool.
///
/// Older stored entries used `cc_grat` / `ccGratuity` and `name` for the
/// same fields; those spellings are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipDistributionEntry {
    /// The employee's name, copied from the sales row.
    #[serde(alias = "name", default, deserialize_with = "lenient::string")]
    pub employee: String,
    /// The employee's position, copied from the sales row.
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    /// Total gratuity share.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tips: Decimal,
    /// Share sourced from credit card gratuity.
    #[serde(
        alias = "ccGratuity",
        alias = "cc_grat",
        default,
        deserialize_with = "lenient::decimal"
    )]
    pub cc_gratuity: Decimal,
    /// Share sourced from cash gratuity.
    #[serde(
        alias = "cashGratuity",
        alias = "cash_grat",
        default,
        deserialize_with = "lenient::decimal"
    )]
    pub cash_gratuity: Decimal,
    /// The points the share was computed from.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub points: Decimal,
}

/// A tip distribution together with the pool it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipReport {
    /// One entry per sales row, in input order.
    pub distribution: Vec<TipDistributionEntry>,
    /// The gratuity pool totals.
    pub totals: GratuityTotals,
    /// The method used, echoed for labelling.
    pub method: DistributionMethod,
}
