//! Aggregate scoring of rule outcomes.

use crate::types::{Rule, SignalLabel};

/// Sum of rule scores, in rule order. Unclamped.
pub fn total_score(rules: &[Rule]) -> f64 {
    rules.iter().fold(0.0, |acc, rule| acc + rule.score)
}

/// Total score and its discretised label.
pub fn score(rules: &[Rule]) -> (f64, SignalLabel) {
    let total = total_score(rules);
    (total, SignalLabel::from_score(total))
}
