//! Summary statistics over a filtered record set

use crate::models::StockRecord;
use serde::{Deserialize, Serialize};

/// Scores at or above this count as high confidence
pub const HIGH_CONFIDENCE_THRESHOLD: u32 = 70;

/// Lower bound of the moderate band
pub const MODERATE_CONFIDENCE_THRESHOLD: u32 = 50;

/// Band a confidence score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            Self::High
        } else if score >= MODERATE_CONFIDENCE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_count: usize,
    pub high_confidence_count: usize,
    /// Mean of the clamped scores, rounded half-to-even; 0 when empty
    pub average_score: u32,
}

impl Summary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a StockRecord>,
    {
        let mut total_count = 0usize;
        let mut high_confidence_count = 0usize;
        let mut score_sum = 0u64;

        for record in records {
            let score = record.effective_score();
            total_count += 1;
            score_sum += u64::from(score);
            if ConfidenceLevel::from_score(score) == ConfidenceLevel::High {
                high_confidence_count += 1;
            }
        }

        let average_score = if total_count == 0 {
            0
        } else {
            round_half_even(score_sum, total_count as u64) as u32
        };

        Self {
            total_count,
            high_confidence_count,
            average_score,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// `numerator / denominator` rounded to the nearest integer, ties to even
fn round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;
    match twice_remainder.cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient % 2),
    }
}
