//! Average True Range (ATR) indicator.

use super::ema::Ema;
use crate::types::Candle;

/// True range of every candle.
///
/// The first candle has no predecessor, so its range is high - low.
/// After that: `max(high - low, |high - prevClose|, |low - prevClose|)`.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let hl = current.high - current.low;
            match i.checked_sub(1).map(|p| &candles[p]) {
                Some(previous) => {
                    let hc = (current.high - previous.close).abs();
                    let lc = (current.low - previous.close).abs();
                    hl.max(hc).max(lc)
                }
                None => hl,
            }
        })
        .collect()
}

/// ATR (Average True Range) indicator.
///
/// Measures market volatility as the seeded EMA of the true range.
/// Higher ATR = higher volatility.
#[derive(Debug, Clone, Copy)]
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// ATR series aligned with `candles`.
    pub fn calculate(&self, candles: &[Candle]) -> Vec<f64> {
        Ema::new(self.period).calculate(&true_ranges(candles))
    }

    /// ATR as a percentage of `price`; 0 for a non-positive price.
    pub fn percent_of(atr: f64, price: f64) -> f64 {
        if price > 0.0 {
            (atr / price) * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_uptrend_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Candle::new(1_000_000 + i as i64 * 86_400_000, base, base + 2.0, base - 1.0, base + 1.0, 1000.0)
            })
            .collect()
    }

    #[test]
    fn test_true_range_first_candle() {
        let candles = create_uptrend_candles(1);
        assert_eq!(true_ranges(&candles), vec![3.0]);
    }

    #[test]
    fn test_true_range_gap_up() {
        let candles = vec![
            Candle::new(0, 10.0, 11.0, 9.0, 10.0, 1.0),
            Candle::new(1, 15.0, 16.0, 15.0, 15.5, 1.0),
        ];
        // |high - prevClose| = 6 dominates high - low = 1
        assert_eq!(true_ranges(&candles)[1], 6.0);
    }

    #[test]
    fn test_true_range_gap_down() {
        let candles = vec![
            Candle::new(0, 10.0, 11.0, 9.0, 10.0, 1.0),
            Candle::new(1, 5.0, 5.5, 4.0, 5.0, 1.0),
        ];
        assert_eq!(true_ranges(&candles)[1], 6.0);
    }

    #[test]
    fn test_atr_positive_value() {
        let atr = Atr::default().calculate(&create_uptrend_candles(30));
        assert_eq!(atr.len(), 30);
        assert!(atr[29] > 0.0, "ATR should be positive, got {}", atr[29]);
    }

    #[test]
    fn test_atr_constant_range() {
        let candles: Vec<Candle> = (0..20)
            .map(|i| Candle::new(i, 100.0, 102.0, 98.0, 100.0, 1.0))
            .collect();
        let atr = Atr::default().calculate(&candles);
        assert!(atr.iter().all(|v| *v == 4.0));
    }

    #[test]
    fn test_atr_percent() {
        assert!((Atr::percent_of(2.0, 100.0) - 2.0).abs() < 1e-12);
        assert_eq!(Atr::percent_of(2.0, 0.0), 0.0);
    }
}
