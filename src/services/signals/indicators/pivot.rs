//! Classic floor-trader pivot points.

use crate::types::{Candle, PivotLevels};

/// Pivot levels from the candle before the latest one.
///
/// Returns `None` when there is no prior candle.
pub fn pivot_levels(candles: &[Candle]) -> Option<PivotLevels> {
    let prior = candles.len().checked_sub(2).map(|i| &candles[i])?;

    let pivot = (prior.high + prior.low + prior.close) / 3.0;
    let range = prior.high - prior.low;

    Some(PivotLevels {
        pivot,
        r1: 2.0 * pivot - prior.low,
        s1: 2.0 * pivot - prior.high,
        r2: pivot + range,
        s2: pivot - range,
    })
}
