//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::Ema;
use crate::types::MacdReading;

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All three series use the seeded EMA, so they are defined at every index.
#[derive(Debug, Clone, Copy)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD series aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Reading at `index`, if in range.
    pub fn at(&self, index: usize) -> Option<MacdReading> {
        Some(MacdReading {
            line: *self.line.get(index)?,
            signal: *self.signal.get(index)?,
            histogram: *self.histogram.get(index)?,
        })
    }

    /// Reading at the last index.
    pub fn last(&self) -> Option<MacdReading> {
        self.at(self.line.len().checked_sub(1)?)
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn calculate(&self, closes: &[f64]) -> MacdSeries {
        let fast = Ema::new(self.fast_period).calculate(closes);
        let slow = Ema::new(self.slow_period).calculate(closes);

        let line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
        let signal = Ema::new(self.signal_period).calculate(&line);
        let histogram = line.iter().zip(signal.iter()).map(|(m, s)| m - s).collect();

        MacdSeries {
            line,
            signal,
            histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_empty() {
        let series = Macd::default().calculate(&[]);
        assert!(series.line.is_empty());
        assert!(series.last().is_none());
    }

    #[test]
    fn test_macd_defined_everywhere() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let series = Macd::default().calculate(&closes);
        assert_eq!(series.line.len(), 40);
        assert_eq!(series.signal.len(), 40);
        assert_eq!(series.histogram.len(), 40);
        assert!(series.line.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_macd_first_index_is_zero() {
        let series = Macd::default().calculate(&[123.0, 130.0]);
        let first = series.at(0).unwrap();
        assert_eq!(first.line, 0.0);
        assert_eq!(first.signal, 0.0);
        assert_eq!(first.histogram, 0.0);
    }

    #[test]
    fn test_macd_uptrend_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let reading = Macd::default().calculate(&closes).last().unwrap();
        assert!(reading.line > 0.0);
        assert!(reading.line > reading.signal);
        assert!((reading.histogram - (reading.line - reading.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_downtrend_negative() {
        let closes: Vec<f64> = (0..60).map(|i| 300.0 - i as f64 * 2.0).collect();
        let reading = Macd::default().calculate(&closes).last().unwrap();
        assert!(reading.line < 0.0);
        assert!(reading.histogram < 0.0);
    }

    #[test]
    fn test_macd_custom_periods() {
        let closes: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
        let short = Macd::new(3, 6, 2).calculate(&closes).last().unwrap();
        let long = Macd::default().calculate(&closes).last().unwrap();
        assert!(short.line < long.line);
    }
}
