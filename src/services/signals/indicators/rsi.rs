//! Relative Strength Index (RSI) indicator.

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// The first average gain/loss is the mean of the first `period` deltas;
/// later values use Wilder smoothing. A zero average loss saturates at 100.
#[derive(Debug, Clone, Copy)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Minimum number of closes for any defined value.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }

    /// Calculate the RSI series, aligned with `closes`.
    ///
    /// Indices before `period` are `None`; with fewer than `period + 1`
    /// closes every index is `None`.
    pub fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; closes.len()];
        if self.period == 0 || closes.len() < self.min_periods() {
            return result;
        }

        let period = self.period as f64;
        let mut gain = 0.0;
        let mut loss = 0.0;
        for i in 1..=self.period {
            let change = closes[i] - closes[i - 1];
            if change > 0.0 {
                gain += change;
            } else {
                loss -= change;
            }
        }

        let mut avg_gain = gain / period;
        let mut avg_loss = loss / period;
        result[self.period] = Some(Self::from_averages(avg_gain, avg_loss));

        for i in (self.period + 1)..closes.len() {
            let change = closes[i] - closes[i - 1];
            avg_gain = (avg_gain * (period - 1.0) + change.max(0.0)) / period;
            avg_loss = (avg_loss * (period - 1.0) + (-change).max(0.0)) / period;
            result[i] = Some(Self::from_averages(avg_gain, avg_loss));
        }

        result
    }
}
