//! Lead scoring and priority classification.
//!
//! The score is a 0–100 heuristic, not a probability. Every keyword set is
//! matched as a plain lower-cased substring and each set contributes its
//! bonus at most once, independently of the others.

use crate::domain::model::{CustomerInfo, PriorityTier};

pub const BASE_SCORE: i32 = 50;

/// Customer has at least one recorded purchase.
pub const REPEAT_CUSTOMER_BONUS: i32 = 20;

/// Total spend strictly above this amount counts as a high-value customer.
pub const HIGH_VALUE_SPEND_THRESHOLD: f64 = 10_000.0;
pub const HIGH_VALUE_SPEND_BONUS: i32 = 15;

pub const URGENT_KEYWORDS: &[&str] = &["urgent", "asap", "emergency", "immediately", "crisis"];
pub const URGENT_BONUS: i32 = 25;

pub const HIGH_VALUE_KEYWORDS: &[&str] = &["bulk", "large order", "contract", "partnership"];
pub const HIGH_VALUE_BONUS: i32 = 20;

pub const BUDGET_KEYWORDS: &[&str] = &["budget", "price", "cost", "quote"];
pub const BUDGET_BONUS: i32 = 10;

/// Scores at or above this are `high`.
pub const HIGH_PRIORITY_THRESHOLD: u8 = 80;

/// Scores at or above this (and below high) are `medium`.
pub const MEDIUM_PRIORITY_THRESHOLD: u8 = 60;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

pub fn lead_score(customer: Option<&CustomerInfo>, inquiry: &str) -> u8 {
    let mut score = BASE_SCORE;

    if let Some(customer) = customer {
        if customer.purchase_count > 0 {
            score += REPEAT_CUSTOMER_BONUS;
        }
        if customer.total_spent > HIGH_VALUE_SPEND_THRESHOLD {
            score += HIGH_VALUE_SPEND_BONUS;
        }
    }

    let text = inquiry.to_lowercase();
    if contains_any(&text, URGENT_KEYWORDS) {
        score += URGENT_BONUS;
    }
    if contains_any(&text, HIGH_VALUE_KEYWORDS) {
        score += HIGH_VALUE_BONUS;
    }
    if contains_any(&text, BUDGET_KEYWORDS) {
        score += BUDGET_BONUS;
    }

    score.clamp(MIN_SCORE, MAX_SCORE) as u8
}

pub fn priority_for(score: u8) -> PriorityTier {
    if score >= HIGH_PRIORITY_THRESHOLD {
        PriorityTier::High
    } else if score >= MEDIUM_PRIORITY_THRESHOLD {
        PriorityTier::Medium
    } else {
        PriorityTier::Standard
    }
}
