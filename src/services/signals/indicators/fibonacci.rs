//! Fibonacci retracement levels.

use crate::types::{Candle, FibonacciLevels};

/// Fibonacci retracements over the trailing `lookback` candles.
///
/// Each level sits at `high - (high - low) * ratio`, so the 61.8% level is
/// the deepest "golden" retracement from the window high.
#[derive(Debug, Clone, Copy)]
pub struct Fibonacci {
    lookback: usize,
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self { lookback: 90 }
    }
}

impl Fibonacci {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    pub fn calculate(&self, candles: &[Candle]) -> FibonacciLevels {
        let window = &candles[candles.len().saturating_sub(self.lookback)..];
        if window.is_empty() {
            return FibonacciLevels::default();
        }

        let high = window
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let range = high - low;
        let level = |ratio: f64| high - range * ratio;

        FibonacciLevels {
            high,
            level_236: level(0.236),
            level_382: level(0.382),
            level_500: level(0.5),
            level_618: level(0.618),
            level_786: level(0.786),
            low,
        }
    }
}
