//! Stochastic Oscillator indicator.

use crate::types::Candle;

/// Stochastic Oscillator %K.
///
/// Compares the latest close to the price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
///
/// Signals:
/// - Below 20: Oversold (bullish)
/// - Above 80: Overbought (bearish)
///
/// A zero range (flat market) and a history shorter than the period both
/// yield exactly 50.
#[derive(Debug, Clone, Copy)]
pub struct Stochastic {
    k_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self { k_period: 14 }
    }
}

impl Stochastic {
    pub const NEUTRAL: f64 = 50.0;

    pub fn new(k_period: usize) -> Self {
        Self { k_period }
    }

    pub fn calculate(&self, candles: &[Candle]) -> f64 {
        if self.k_period == 0 || candles.len() < self.k_period {
            return Self::NEUTRAL;
        }
        let Some(current) = candles.last() else {
            return Self::NEUTRAL;
        };

        let window = &candles[candles.len() - self.k_period..];
        let lowest_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let highest_high = window
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);

        if highest_high == lowest_low {
            return Self::NEUTRAL;
        }

        ((current.close - lowest_low) / (highest_high - lowest_low)) * 100.0
    }
}
