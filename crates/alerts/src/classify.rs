//! Stock thresholds and reorder math.
//!
//! Thresholds are percentages of the reorder point:
//! - `0` units, or at most 25% → critical
//! - at most 50% → low
//! - at most 150% → adequate
//! - above 150% → overstocked
//!
//! Comparisons are done by cross-multiplying in `i128`, so boundaries are exact
//! and there is no division by a zero reorder point.

use crate::alert::StockStatus;

pub fn classify_stock(total_quantity: i64, reorder_point: i64) -> StockStatus {
    // Checked first so an empty shelf never reads as "0% of nothing".
    if total_quantity == 0 {
        return StockStatus::Critical;
    }

    let q = i128::from(total_quantity);
    let r = i128::from(reorder_point);

    if 4 * q <= r {
        StockStatus::Critical
    } else if 2 * q <= r {
        StockStatus::Low
    } else if 2 * q <= 3 * r {
        StockStatus::Adequate
    } else {
        StockStatus::Overstocked
    }
}

/// Units needed to bring stock up to 150% of the reorder point (never negative).
pub fn recommend_reorder_quantity(total_quantity: i64, reorder_point: i64) -> i64 {
    // ceil(1.5 * r) == ceil(3r / 2)
    let target = (reorder_point.saturating_mul(3).saturating_add(1)).div_euclid(2);
    target.saturating_sub(total_quantity).max(0)
}
