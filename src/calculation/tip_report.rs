//! Tip report composition.

use crate::models::{DistributionMethod, SalesRow, TipReport};

use super::{compute_gratuity_totals, distribute_gratuity};

/// Builds a [`TipReport`] from the sales rows.
///
/// The report combines the per-employee distribution, the gratuity totals
/// and the method used, so the caller can label the result.
///
/// # Examples
///
/// ```
/// use gratuity_engine::calculation::generate_tip_report;
/// use gratuity_engine::models::{DistributionMethod, SalesRow};
///
/// let report = generate_tip_report(&[], DistributionMethod::Equal);
/// assert!(report.distribution.is_empty());
/// assert_eq!(report.method, DistributionMethod::Equal);
/// ```
pub fn generate_tip_report(rows: &[SalesRow], method: DistributionMethod) -> TipReport {
    TipReport {
        distribution: distribute_gratuity(rows, method),
        totals: compute_gratuity_totals(rows),
        method,
    }
}
