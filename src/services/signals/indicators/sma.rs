//! Simple Moving Average (SMA).

/// SMA (Simple Moving Average).
///
/// Windowed arithmetic mean. Indices before `period - 1` have no value
/// (`None`), never zero.
#[derive(Debug, Clone, Copy)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Calculate the SMA series, aligned with the input.
    pub fn calculate(&self, series: &[f64]) -> Vec<Option<f64>> {
        if self.period == 0 {
            return vec![None; series.len()];
        }

        (0..series.len())
            .map(|i| {
                if i + 1 < self.period {
                    None
                } else {
                    let window = &series[i + 1 - self.period..=i];
                    Some(window.iter().sum::<f64>() / self.period as f64)
                }
            })
            .collect()
    }
}

/// SMA of `series` over `period`.
pub fn sma(series: &[f64], period: usize) -> Vec<Option<f64>> {
    Sma::new(period).calculate(series)
}
