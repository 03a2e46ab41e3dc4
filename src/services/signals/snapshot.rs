//! Point-in-time indicator snapshots.

use super::indicators::{
    ema, pivot_levels, sma, Adx, Atr, BollingerBands, Fibonacci, Macd, Rsi, Stochastic,
    VolumeRatio,
};
use crate::types::{Candle, IndicatorSnapshot};

/// Compute every indicator at the last index of `candles`.
///
/// Returns `None` for an empty slice. Lookbacks longer than the history
/// fall back to their neutral defaults.
pub fn snapshot(candles: &[Candle]) -> Option<IndicatorSnapshot> {
    let latest = candles.last()?;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let price = latest.close;

    let last_ema = |period: usize| ema(&closes, period).last().copied().unwrap_or(price);
    let atr = Atr::default()
        .calculate(candles)
        .last()
        .copied()
        .unwrap_or(0.0);

    Some(IndicatorSnapshot {
        price,
        volume: latest.volume,
        rsi: Rsi::default().calculate(&closes).last().copied().flatten(),
        macd: Macd::default()
            .calculate(&closes)
            .last()
            .unwrap_or_default(),
        ema_9: last_ema(9),
        ema_21: last_ema(21),
        ema_50: last_ema(50),
        ema_200: last_ema(200),
        sma_20: sma(&closes, 20).last().copied().flatten(),
        bollinger: BollingerBands::default().latest(&closes),
        atr,
        atr_pct: Atr::percent_of(atr, price),
        adx: Adx::default().calculate(candles),
        stochastic_k: Stochastic::default().calculate(candles),
        volume_ratio: VolumeRatio::default().calculate(&volumes),
        fibonacci: Fibonacci::default().calculate(candles),
        pivot: pivot_levels(candles),
    })
}

/// Snapshots at the latest candle and the one before it.
///
/// `previous` is computed from the history without the latest candle, so
/// cross-detection rules compare two causal readings.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPair {
    pub current: IndicatorSnapshot,
    pub previous: IndicatorSnapshot,
}

impl SnapshotPair {
    /// Requires at least two candles.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let (_, history) = candles.split_last()?;
        Some(Self {
            previous: snapshot(history)?,
            current: snapshot(candles)?,
        })
    }
}
