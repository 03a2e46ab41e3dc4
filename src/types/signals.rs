use serde::{Deserialize, Serialize};

/// Stance a single rule takes on the latest candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stance {
    Buy,
    Sell,
    Neutral,
}

impl Stance {
    /// Get display label for this stance.
    pub fn label(&self) -> &'static str {
        match self {
            Stance::Buy => "BUY",
            Stance::Sell => "SELL",
            Stance::Neutral => "NEUTRAL",
        }
    }
}

/// Overall signal derived from the aggregate rule score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl SignalLabel {
    /// Discretise an aggregate score with the fixed threshold ladder.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 3.0 => SignalLabel::StrongBuy,
            s if s >= 1.0 => SignalLabel::Buy,
            s if s <= -3.0 => SignalLabel::StrongSell,
            s if s <= -1.0 => SignalLabel::Sell,
            _ => SignalLabel::Neutral,
        }
    }

    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "STRONG BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::Neutral => "NEUTRAL",
            SignalLabel::Sell => "SELL",
            SignalLabel::StrongSell => "STRONG SELL",
        }
    }

    /// Position on the bearish-to-bullish scale, from -2 to +2.
    pub fn rank(&self) -> i8 {
        match self {
            SignalLabel::StrongSell => -2,
            SignalLabel::Sell => -1,
            SignalLabel::Neutral => 0,
            SignalLabel::Buy => 1,
            SignalLabel::StrongBuy => 2,
        }
    }
}

/// Outcome of one interpretive rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Rule name, e.g. "RSI (14)".
    pub name: String,
    pub stance: Stance,
    /// Contribution to the aggregate score.
    pub score: f64,
    /// Human-readable reading, e.g. "28 oversold".
    pub detail: String,
}

impl Rule {
    pub fn new(name: &str, stance: Stance, score: f64, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            stance,
            score,
            detail: detail.into(),
        }
    }
}

/// MACD line, signal line and histogram at one index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdReading {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Bollinger band values at one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerBand {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBand {
    /// Band width relative to the middle band.
    pub fn width(&self) -> f64 {
        if self.middle == 0.0 {
            0.0
        } else {
            (self.upper - self.lower) / self.middle
        }
    }
}

/// ADX with its directional indicators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdxReading {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

/// Fibonacci retracement levels measured down from the window high.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciLevels {
    pub high: f64,
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
    pub low: f64,
}

/// Classic floor-trader pivots from the prior candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotLevels {
    pub pivot: f64,
    pub r1: f64,
    pub s1: f64,
    pub r2: f64,
    pub s2: f64,
}

/// Every indicator value at one candle index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub volume: f64,
    /// RSI(14); `None` until 15 closes exist.
    pub rsi: Option<f64>,
    pub macd: MacdReading,
    pub ema_9: f64,
    pub ema_21: f64,
    pub ema_50: f64,
    pub ema_200: f64,
    pub sma_20: Option<f64>,
    pub bollinger: Option<BollingerBand>,
    pub atr: f64,
    pub atr_pct: f64,
    pub adx: AdxReading,
    pub stochastic_k: f64,
    /// Latest volume over its 20-period average.
    pub volume_ratio: f64,
    pub fibonacci: FibonacciLevels,
    pub pivot: Option<PivotLevels>,
}

impl IndicatorSnapshot {
    /// RSI with the neutral default applied.
    pub fn rsi_or_neutral(&self) -> f64 {
        self.rsi.unwrap_or(50.0)
    }
}

/// Where a forecast came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    /// Weighted log-return projection.
    Statistical,
    /// Percentage supplied by an external prediction service.
    External,
}

/// Short-horizon price projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Number of periods ahead.
    pub horizon: u32,
    pub point: f64,
    pub upper_bound: f64,
    pub lower_bound: f64,
    pub change_pct: f64,
    pub source: ForecastSource,
}

/// Fear/greed band of the sentiment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBand {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentBand {
    /// Band an index in 0..=100.
    pub fn from_index(index: u8) -> Self {
        match index {
            0..=20 => SentimentBand::ExtremeFear,
            21..=40 => SentimentBand::Fear,
            41..=60 => SentimentBand::Neutral,
            61..=80 => SentimentBand::Greed,
            _ => SentimentBand::ExtremeGreed,
        }
    }

    /// Get display name for this band.
    pub fn name(&self) -> &'static str {
        match self {
            SentimentBand::ExtremeFear => "Extreme Fear",
            SentimentBand::Fear => "Fear",
            SentimentBand::Neutral => "Neutral",
            SentimentBand::Greed => "Greed",
            SentimentBand::ExtremeGreed => "Extreme Greed",
        }
    }
}

/// Full result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Latest close.
    pub price: f64,
    /// Change of the latest close against the prior close, in percent.
    pub price_change_pct: f64,
    /// Open time of the latest candle (Unix milliseconds).
    pub last_candle_time: i64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume_24h: f64,
    pub indicators: IndicatorSnapshot,
    pub rules: Vec<Rule>,
    pub total_score: f64,
    pub signal: SignalLabel,
    pub forecast: Forecast,
    pub sentiment_index: u8,
    pub sentiment: SentimentBand,
}

impl AnalysisResult {
    /// Number of rules voting BUY.
    pub fn bullish_count(&self) -> usize {
        self.rules.iter().filter(|r| r.stance == Stance::Buy).count()
    }

    /// Number of rules voting SELL.
    pub fn bearish_count(&self) -> usize {
        self.rules.iter().filter(|r| r.stance == Stance::Sell).count()
    }

    /// Find a rule outcome by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// Analysis for a named asset, as served by the API.
/// Latest-candle digest served alongside a price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub price: f64,
    pub change_pct: f64,
    pub total_score: f64,
    pub signal: SignalLabel,
    pub sentiment_index: u8,
    pub sentiment: SentimentBand,
    /// Band width relative to the middle band.
    pub bb_width: Option<f64>,
    /// Where the price sits in the bands: 0 at the lower, 1 at the upper.
    pub bb_percent: Option<f64>,
    pub indicators: IndicatorSnapshot,
    /// Non-neutral rules, e.g. `"RSI (14): SELL (75 overbought)"`.
    pub active_rules: Vec<String>,
}

impl PriceSummary {
    pub fn from_analysis(result: &AnalysisResult) -> Self {
        let band = result.indicators.bollinger;
        let bb_percent = band
            .filter(|b| b.upper > b.lower)
            .map(|b| (result.price - b.lower) / (b.upper - b.lower));

        Self {
            price: result.price,
            change_pct: result.price_change_pct,
            total_score: result.total_score,
            signal: result.signal,
            sentiment_index: result.sentiment_index,
            sentiment: result.sentiment,
            bb_width: band.map(|b| b.width()),
            bb_percent,
            indicators: result.indicators.clone(),
            active_rules: result
                .rules
                .iter()
                .filter(|r| r.stance != Stance::Neutral)
                .map(|r| format!("{}: {} ({})", r.name, r.stance.label(), r.detail))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub name: String,
    pub analysis: AnalysisResult,
    /// Unix timestamp (milliseconds) when computed.
    pub computed_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_label_ladder() {
        assert_eq!(SignalLabel::from_score(3.0), SignalLabel::StrongBuy);
        assert_eq!(SignalLabel::from_score(2.99), SignalLabel::Buy);
        assert_eq!(SignalLabel::from_score(1.0), SignalLabel::Buy);
        assert_eq!(SignalLabel::from_score(0.99), SignalLabel::Neutral);
        assert_eq!(SignalLabel::from_score(-0.99), SignalLabel::Neutral);
        assert_eq!(SignalLabel::from_score(-1.0), SignalLabel::Sell);
        assert_eq!(SignalLabel::from_score(-3.0), SignalLabel::StrongSell);
        assert_eq!(SignalLabel::from_score(-8.8), SignalLabel::StrongSell);
    }

    #[test]
    fn test_signal_label_serialization() {
        let json = serde_json::to_string(&SignalLabel::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG_BUY\"");
        let parsed: SignalLabel = serde_json::from_str("\"STRONG_SELL\"").unwrap();
        assert_eq!(parsed, SignalLabel::StrongSell);
    }

    #[test]
    fn test_stance_serialization() {
        assert_eq!(serde_json::to_string(&Stance::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Stance::Neutral).unwrap(), "\"NEUTRAL\"");
    }

    #[test]
    fn test_sentiment_band_thresholds() {
        assert_eq!(SentimentBand::from_index(0), SentimentBand::ExtremeFear);
        assert_eq!(SentimentBand::from_index(20), SentimentBand::ExtremeFear);
        assert_eq!(SentimentBand::from_index(21), SentimentBand::Fear);
        assert_eq!(SentimentBand::from_index(40), SentimentBand::Fear);
        assert_eq!(SentimentBand::from_index(60), SentimentBand::Neutral);
        assert_eq!(SentimentBand::from_index(80), SentimentBand::Greed);
        assert_eq!(SentimentBand::from_index(81), SentimentBand::ExtremeGreed);
        assert_eq!(SentimentBand::from_index(100), SentimentBand::ExtremeGreed);
    }

    #[test]
    fn test_bollinger_width() {
        let band = BollingerBand {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
        };
        assert!((band.width() - 0.2).abs() < 1e-12);
    }
}
