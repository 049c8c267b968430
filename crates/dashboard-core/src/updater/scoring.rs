//! Confidence score and analysis text for a daily snapshot

use crate::engine::ConfidenceLevel;

pub const BASE_SCORE: i64 = 50;

/// Volume above which a session counts as a spike
pub const VOLUME_SPIKE: u64 = 1_000_000;

pub const DEFAULT_CATALYST: &str = "Technical momentum and volume analysis";

/// Momentum and volume based score in 0..=100
pub fn confidence_score(price_change_percent: f64, volume: u64) -> i64 {
    let mut score = BASE_SCORE;

    if price_change_percent > 2.0 {
        score += 15;
    } else if price_change_percent > 1.0 {
        score += 10;
    } else if price_change_percent > 0.0 {
        score += 5;
    }

    if volume > VOLUME_SPIKE {
        score += 10;
    }

    score.clamp(0, 100)
}

pub fn analysis_comment(score: i64) -> &'static str {
    match ConfidenceLevel::from_score(score.clamp(0, 100) as u32) {
        ConfidenceLevel::High => {
            "Strong momentum with positive technical indicators. High conviction setup."
        },
        ConfidenceLevel::Moderate => "Moderate momentum showing potential. Monitor for confirmation.",
        ConfidenceLevel::Low => "Needs more confirmation. Watch for volume increase and breakout.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_tiers() {
        assert_eq!(confidence_score(-1.0, 0), 50);
        assert_eq!(confidence_score(0.0, 0), 50);
        assert_eq!(confidence_score(0.5, 0), 55);
        assert_eq!(confidence_score(1.0, 0), 55);
        assert_eq!(confidence_score(1.5, 0), 60);
        assert_eq!(confidence_score(2.0, 0), 60);
        assert_eq!(confidence_score(2.01, 0), 65);
    }

    #[test]
    fn test_volume_spike_bonus() {
        assert_eq!(confidence_score(0.0, VOLUME_SPIKE), 50);
        assert_eq!(confidence_score(0.0, VOLUME_SPIKE + 1), 60);
        assert_eq!(confidence_score(3.0, 50_000_000), 75);
    }

    #[test]
    fn test_analysis_comment_bands() {
        assert!(analysis_comment(75).starts_with("Strong momentum"));
        assert!(analysis_comment(70).starts_with("Strong momentum"));
        assert!(analysis_comment(60).starts_with("Moderate momentum"));
        assert!(analysis_comment(49).starts_with("Needs more confirmation"));
        assert!(analysis_comment(-10).starts_with("Needs more confirmation"));
    }
}
