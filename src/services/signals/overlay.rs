//! Per-candle indicator overlay for price charts.

use super::indicators::{ema, Atr, BollingerBands, Macd, Rsi};
use crate::types::{Candle, CandleIndicators};

/// Evaluate the chart indicators at every index of `candles`.
pub fn overlay(candles: &[Candle]) -> Vec<CandleIndicators> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let rsi = Rsi::default().calculate(&closes);
    let macd = Macd::default().calculate(&closes);
    let bands = BollingerBands::default().calculate(&closes);
    let ema_20 = ema(&closes, 20);
    let ema_50 = ema(&closes, 50);
    let ema_200 = ema(&closes, 200);
    let atr = Atr::default().calculate(candles);

    candles
        .iter()
        .enumerate()
        .map(|(i, &candle)| {
            let reading = macd.at(i).unwrap_or_default();
            let band = bands[i];
            CandleIndicators {
                candle,
                rsi: rsi[i],
                macd: reading.line,
                macd_signal: reading.signal,
                macd_hist: reading.histogram,
                bb_upper: band.map(|b| b.upper),
                bb_middle: band.map(|b| b.middle),
                bb_lower: band.map(|b| b.lower),
                ema_20: ema_20[i],
                ema_50: ema_50[i],
                ema_200: ema_200[i],
                atr: atr[i],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::snapshot;

    fn rising(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle::new(
                    i as i64 * 3_600_000,
                    close - 1.0,
                    close + 1.0,
                    close - 2.0,
                    close,
                    500.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_overlay_empty() {
        assert!(overlay(&[]).is_empty());
    }

    #[test]
    fn test_overlay_aligned_with_candles() {
        let candles = rising(40);
        let points = overlay(&candles);
        assert_eq!(points.len(), 40);
        assert_eq!(points[39].candle, candles[39]);
    }

    #[test]
    fn test_warmup_values_omitted() {
        let points = overlay(&rising(30));

        assert!(points[13].rsi.is_none());
        assert!(points[14].rsi.is_some());
        assert!(points[18].bb_middle.is_none());
        assert!(points[19].bb_middle.is_some());
        assert_eq!(points[0].ema_200, 100.0);
        assert_eq!(points[0].macd, 0.0);
    }

    #[test]
    fn test_last_point_matches_snapshot() {
        let candles = rising(60);
        let last = *overlay(&candles).last().unwrap();
        let snap = snapshot(&candles).unwrap();

        assert_eq!(last.rsi, snap.rsi);
        assert_eq!(last.macd, snap.macd.line);
        assert_eq!(last.macd_hist, snap.macd.histogram);
        assert_eq!(last.ema_50, snap.ema_50);
        assert_eq!(last.ema_200, snap.ema_200);
        assert_eq!(last.bb_upper, snap.bollinger.map(|b| b.upper));
        assert_eq!(last.atr, snap.atr);
    }

    #[test]
    fn test_serialization_skips_missing_values() {
        let points = overlay(&rising(2));
        let json = serde_json::to_value(points[1]).unwrap();

        assert_eq!(json["close"], 101.0);
        assert!(json.get("rsi").is_none());
        assert!(json.get("bbUpper").is_none());
        assert!(json.get("ema200").is_some());
        assert!(json.get("macdHist").is_some());
    }
}
