//! Exponential Moving Average (EMA).

/// EMA (Exponential Moving Average).
///
/// Seeded from the first sample rather than an SMA of the first `period`
/// samples, so every index has a value:
/// - `ema[0] = series[0]`
/// - `ema[i] = series[i] * k + ema[i-1] * (1 - k)`, `k = 2 / (period + 1)`
///
/// Cross detection in the rule bank compares EMAs bit for bit, so both the
/// seeding and the order of operations here must stay as written.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor `2 / (period + 1)`.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    /// Calculate the EMA series. Output has the same length as the input.
    pub fn calculate(&self, series: &[f64]) -> Vec<f64> {
        let multiplier = self.multiplier();
        let mut result = Vec::with_capacity(series.len());

        let mut iter = series.iter();
        let Some(&first) = iter.next() else {
            return result;
        };

        let mut ema = first;
        result.push(ema);
        for &value in iter {
            ema = value * multiplier + ema * (1.0 - multiplier);
            result.push(ema);
        }

        result
    }
}

/// Seeded EMA of `series` over `period`.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    Ema::new(period).calculate(series)
}
