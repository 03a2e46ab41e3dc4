//! Fear/greed composite.

use crate::types::SentimentBand;

/// Blend the aggregate score, RSI and relative volume into a 0..=100 index.
///
/// `rsi` should already have the neutral default applied.
pub fn sentiment_index(total_score: f64, rsi: f64, volume_ratio: f64) -> u8 {
    let volume_term = if volume_ratio > 1.0 { 5.0 } else { -3.0 };
    let raw = 50.0 + total_score * 5.0 + (rsi - 50.0) * 0.3 + volume_term;
    raw.round().clamp(0.0, 100.0) as u8
}

/// Index and its band.
pub fn sentiment(total_score: f64, rsi: f64, volume_ratio: f64) -> (u8, SentimentBand) {
    let index = sentiment_index(total_score, rsi, volume_ratio);
    (index, SentimentBand::from_index(index))
}
