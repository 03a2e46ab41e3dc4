//! Bollinger Bands indicator.

use super::sma::Sma;
use crate::types::BollingerBand;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// StdDev is the population standard deviation of the trailing window.
/// Bands are undefined until `period` closes exist.
#[derive(Debug, Clone, Copy)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Calculate population standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    /// Calculate the bands at every index.
    pub fn calculate(&self, closes: &[f64]) -> Vec<Option<BollingerBand>> {
        let middle = Sma::new(self.period).calculate(closes);

        middle
            .iter()
            .enumerate()
            .map(|(i, sma)| {
                let middle = (*sma)?;
                let window = &closes[i + 1 - self.period..=i];
                let std_dev = Self::std_dev(window, middle);
                Some(BollingerBand {
                    upper: middle + self.std_dev_multiplier * std_dev,
                    middle,
                    lower: middle - self.std_dev_multiplier * std_dev,
                })
            })
            .collect()
    }

    /// Bands at the last index only.
    pub fn latest(&self, closes: &[f64]) -> Option<BollingerBand> {
        self.calculate(closes).pop().flatten()
    }
}
