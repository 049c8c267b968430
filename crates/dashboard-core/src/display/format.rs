//! Display strings for prices, changes and timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown in place of any missing value
pub const NOT_AVAILABLE: &str = "N/A";

/// Direction of the day's move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_change(change: Option<f64>) -> Self {
        match change.map(normalize) {
            Some(v) if v > 0.0 => Self::Up,
            Some(v) if v < 0.0 => Self::Down,
            _ => Self::Flat,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Up => "positive",
            Self::Down => "negative",
            Self::Flat => "neutral",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => "•",
        }
    }
}

// Values that would print as -0.00 count as zero.
fn normalize(value: f64) -> f64 {
    if value.abs() < 0.005 { 0.0 } else { value }
}

/// `1234.5` -> `"1,234.50"`
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format_grouped(p, 2),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Signed absolute change, e.g. `"+2.11"`
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c.is_finite() => signed(normalize(c), ""),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Signed percent change, e.g. `"-0.72%"`
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) if p.is_finite() => signed(normalize(p), "%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn signed(value: f64, suffix: &str) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{}{suffix}", format_grouped(value, 2))
}

pub fn format_volume(volume: Option<u64>) -> String {
    volume.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format_grouped(v as f64, 0))
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}
