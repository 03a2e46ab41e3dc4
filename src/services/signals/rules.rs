//! Interpretive rule bank.
//!
//! Each rule reads the current and previous snapshots and votes BUY, SELL
//! or NEUTRAL with a fixed weight. Weights are asymmetric on purpose:
//! crossovers and RSI extremes count more than confirmation signals.

use super::snapshot::SnapshotPair;
use crate::types::{Rule, Stance};

/// A single rule in the bank.
pub trait TradingRule: Send + Sync {
    /// Display name, unique within the bank.
    fn name(&self) -> &'static str;

    fn evaluate(&self, pair: &SnapshotPair) -> Rule;
}

/// Which way two lines crossed between the previous and current readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cross {
    Bullish,
    Bearish,
    None,
}

fn cross(prev_fast: f64, prev_slow: f64, fast: f64, slow: f64) -> Cross {
    if prev_fast <= prev_slow && fast > slow {
        Cross::Bullish
    } else if prev_fast >= prev_slow && fast < slow {
        Cross::Bearish
    } else {
        Cross::None
    }
}

/// RSI(14) extremes.
pub struct RsiRule;

impl TradingRule for RsiRule {
    fn name(&self) -> &'static str {
        "RSI (14)"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let rsi = pair.current.rsi_or_neutral();
        match rsi {
            r if r < 30.0 => Rule::new(self.name(), Stance::Buy, 1.5, format!("{:.0} oversold", r)),
            r if r > 70.0 => {
                Rule::new(self.name(), Stance::Sell, -1.5, format!("{:.0} overbought", r))
            }
            r => Rule::new(self.name(), Stance::Neutral, 0.0, format!("{:.0}", r)),
        }
    }
}

/// MACD line crossing its signal line.
pub struct MacdCrossRule;

impl TradingRule for MacdCrossRule {
    fn name(&self) -> &'static str {
        "MACD Cross"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let (prev, cur) = (&pair.previous.macd, &pair.current.macd);
        match cross(prev.line, prev.signal, cur.line, cur.signal) {
            Cross::Bullish => Rule::new(self.name(), Stance::Buy, 1.5, "Bullish cross"),
            Cross::Bearish => Rule::new(self.name(), Stance::Sell, -1.5, "Death cross"),
            Cross::None if cur.line > cur.signal => {
                Rule::new(self.name(), Stance::Neutral, 0.3, "Bullish")
            }
            Cross::None => Rule::new(self.name(), Stance::Neutral, -0.3, "Bearish"),
        }
    }
}

/// Short-term EMA 9/21 crossover.
pub struct EmaCrossRule;

impl TradingRule for EmaCrossRule {
    fn name(&self) -> &'static str {
        "EMA 9/21"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let (prev, cur) = (&pair.previous, &pair.current);
        match cross(prev.ema_9, prev.ema_21, cur.ema_9, cur.ema_21) {
            Cross::Bullish => Rule::new(self.name(), Stance::Buy, 1.0, "Bull cross"),
            Cross::Bearish => Rule::new(self.name(), Stance::Sell, -1.0, "Bear cross"),
            Cross::None if cur.ema_9 > cur.ema_21 => {
                Rule::new(self.name(), Stance::Neutral, 0.2, "Bullish")
            }
            Cross::None => Rule::new(self.name(), Stance::Neutral, -0.2, "Bearish"),
        }
    }
}

/// Long-term EMA 50/200 regime. Never neutral.
pub struct TrendRule;

impl TradingRule for TrendRule {
    fn name(&self) -> &'static str {
        "EMA 50/200"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        if pair.current.ema_50 > pair.current.ema_200 {
            Rule::new(self.name(), Stance::Buy, 1.0, "Golden cross")
        } else {
            Rule::new(self.name(), Stance::Sell, -1.0, "Death cross")
        }
    }
}

/// Price touching a Bollinger band.
pub struct BollingerRule;

impl TradingRule for BollingerRule {
    fn name(&self) -> &'static str {
        "Bollinger"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let price = pair.current.price;
        match pair.current.bollinger {
            Some(band) if price <= band.lower => {
                Rule::new(self.name(), Stance::Buy, 1.0, "Lower band")
            }
            Some(band) if price >= band.upper => {
                Rule::new(self.name(), Stance::Sell, -1.0, "Upper band")
            }
            _ => Rule::new(self.name(), Stance::Neutral, 0.0, "Inside bands"),
        }
    }
}

/// Stochastic %K extremes.
pub struct StochasticRule;

impl TradingRule for StochasticRule {
    fn name(&self) -> &'static str {
        "Stochastic"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let k = pair.current.stochastic_k;
        let detail = format!("%K={:.0}", k);
        if k < 20.0 {
            Rule::new(self.name(), Stance::Buy, 1.0, detail)
        } else if k > 80.0 {
            Rule::new(self.name(), Stance::Sell, -1.0, detail)
        } else {
            Rule::new(self.name(), Stance::Neutral, 0.0, detail)
        }
    }
}

/// Trend strength, signed by price against EMA21.
pub struct AdxRule;

impl TradingRule for AdxRule {
    fn name(&self) -> &'static str {
        "ADX"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let cur = &pair.current;
        let adx = cur.adx.adx;
        if adx <= 25.0 {
            return Rule::new(self.name(), Stance::Neutral, 0.0, format!("{:.0} weak", adx));
        }

        let detail = format!("{:.0} strong", adx);
        if cur.price > cur.ema_21 {
            Rule::new(self.name(), Stance::Buy, 0.5, detail)
        } else {
            Rule::new(self.name(), Stance::Sell, -0.5, detail)
        }
    }
}

/// Volume spikes confirming the latest move.
pub struct VolumeRule;

impl TradingRule for VolumeRule {
    fn name(&self) -> &'static str {
        "Volume"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let ratio = pair.current.volume_ratio;
        let (price, prior) = (pair.current.price, pair.previous.price);
        if ratio > 1.5 && price > prior {
            Rule::new(self.name(), Stance::Buy, 0.5, format!("{:.1}x bull", ratio))
        } else if ratio > 1.5 && price < prior {
            Rule::new(self.name(), Stance::Sell, -0.5, format!("{:.1}x bear", ratio))
        } else {
            Rule::new(self.name(), Stance::Neutral, 0.0, format!("{:.1}x", ratio))
        }
    }
}

/// Proximity to the 61.8% retracement.
pub struct FibonacciRule;

impl FibonacciRule {
    /// Within this percentage of the level counts as "near".
    const PROXIMITY_PCT: f64 = 2.0;
}

impl TradingRule for FibonacciRule {
    fn name(&self) -> &'static str {
        "Fibonacci"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let price = pair.current.price;
        let level = pair.current.fibonacci.level_618;
        let distance = (price - level).abs() / price * 100.0;

        if distance < Self::PROXIMITY_PCT && price > level {
            Rule::new(self.name(), Stance::Buy, 0.5, "Near 61.8%")
        } else if distance < Self::PROXIMITY_PCT && price < level {
            Rule::new(self.name(), Stance::Sell, -0.5, "Below 61.8%")
        } else {
            Rule::new(self.name(), Stance::Neutral, 0.0, format!("{:.0}% away", distance))
        }
    }
}

/// Breakouts through R1/S1.
pub struct PivotRule;

impl TradingRule for PivotRule {
    fn name(&self) -> &'static str {
        "Pivot"
    }

    fn evaluate(&self, pair: &SnapshotPair) -> Rule {
        let price = pair.current.price;
        match pair.current.pivot {
            Some(levels) if price > levels.r1 => {
                Rule::new(self.name(), Stance::Buy, 0.5, "Above R1")
            }
            Some(levels) if price < levels.s1 => {
                Rule::new(self.name(), Stance::Sell, -0.5, "Below S1")
            }
            _ => Rule::new(self.name(), Stance::Neutral, 0.0, "Near pivot"),
        }
    }
}

/// Every rule, in evaluation order.
pub fn rule_bank() -> Vec<Box<dyn TradingRule>> {
    vec![
        // Momentum
        Box::new(RsiRule),
        Box::new(MacdCrossRule),
        // Trend
        Box::new(EmaCrossRule),
        Box::new(TrendRule),
        // Volatility
        Box::new(BollingerRule),
        Box::new(StochasticRule),
        Box::new(AdxRule),
        // Volume
        Box::new(VolumeRule),
        // Levels
        Box::new(FibonacciRule),
        Box::new(PivotRule),
    ]
}

/// Evaluate the whole bank against a snapshot pair.
pub fn evaluate_all(pair: &SnapshotPair) -> Vec<Rule> {
    rule_bank().iter().map(|rule| rule.evaluate(pair)).collect()
}
