//! Average Directional Index (ADX) indicator.

use super::atr::true_ranges;
use super::ema::Ema;
use crate::types::{AdxReading, Candle};

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-40: Trending
/// - Above 40: Strong trend
///
/// +DM, -DM and true range are smoothed with the seeded EMA, combined into
/// DX and smoothed again. With `min_history` candles or fewer the reading is
/// all zeros, which the rule bank treats as a weak trend.
#[derive(Debug, Clone, Copy)]
pub struct Adx {
    period: usize,
    min_history: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self {
            period: 14,
            min_history: 30,
        }
    }
}

impl Adx {
    pub fn new(period: usize, min_history: usize) -> Self {
        Self {
            period,
            min_history,
        }
    }

    /// Directional movement between consecutive candles, starting at index 1.
    fn directional_movement(candles: &[Candle]) -> (Vec<f64>, Vec<f64>) {
        candles
            .windows(2)
            .map(|pair| {
                let (previous, current) = (&pair[0], &pair[1]);
                let up_move = current.high - previous.high;
                let down_move = previous.low - current.low;

                let plus_dm = if up_move > down_move && up_move > 0.0 {
                    up_move
                } else {
                    0.0
                };
                let minus_dm = if down_move > up_move && down_move > 0.0 {
                    down_move
                } else {
                    0.0
                };
                (plus_dm, minus_dm)
            })
            .unzip()
    }

    fn directional_index(dm: &[f64], atr: &[f64]) -> Vec<f64> {
        dm.iter()
            .zip(atr.iter())
            .map(|(dm, atr)| if *atr > 0.0 { (dm / atr) * 100.0 } else { 0.0 })
            .collect()
    }

    pub fn calculate(&self, candles: &[Candle]) -> AdxReading {
        if candles.len() <= self.min_history {
            return AdxReading::default();
        }

        let ema = Ema::new(self.period);
        let (plus_dm, minus_dm) = Self::directional_movement(candles);
        let atr = ema.calculate(&true_ranges(candles)[1..]);

        let plus_di = Self::directional_index(&ema.calculate(&plus_dm), &atr);
        let minus_di = Self::directional_index(&ema.calculate(&minus_dm), &atr);

        let dx: Vec<f64> = plus_di
            .iter()
            .zip(minus_di.iter())
            .map(|(p, m)| {
                let di_sum = p + m;
                if di_sum > 0.0 {
                    ((p - m).abs() / di_sum) * 100.0
                } else {
                    0.0
                }
            })
            .collect();

        AdxReading {
            adx: ema.calculate(&dx).last().copied().unwrap_or(0.0),
            plus_di: plus_di.last().copied().unwrap_or(0.0),
            minus_di: minus_di.last().copied().unwrap_or(0.0),
        }
    }
}
