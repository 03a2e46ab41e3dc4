//! Relative volume.

use super::sma::Sma;

/// Latest volume against its simple moving average.
#[derive(Debug, Clone, Copy)]
pub struct VolumeRatio {
    period: usize,
}

impl Default for VolumeRatio {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl VolumeRatio {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Returns 1.0 when the average is undefined or zero.
    pub fn calculate(&self, volumes: &[f64]) -> f64 {
        let Some(&latest) = volumes.last() else {
            return 1.0;
        };

        match Sma::new(self.period).calculate(volumes).last() {
            Some(Some(avg)) if *avg != 0.0 => latest / avg,
            _ => 1.0,
        }
    }
}
