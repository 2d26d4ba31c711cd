use crate::core::scoring::{contains_any, priority_for};
use crate::domain::model::{
    CustomerInfo, PriorityTier, Recommendation, RecommendationPriority,
};

const CATTLE_KEYWORDS: &[&str] = &["cattle", "beef"];
const EQUINE_KEYWORDS: &[&str] = &["horse", "equine"];

const CATTLE_PRODUCTS: &[&str] = &[
    "High-energy cattle feed",
    "Mineral supplements",
    "Pasture management",
];
const EQUINE_PRODUCTS: &[&str] = &[
    "Premium horse feed",
    "Performance supplements",
    "Hay quality assessment",
];

fn follow_up(tier: PriorityTier) -> Recommendation {
    let (action, timeline, reason) = match tier {
        PriorityTier::High => (
            "Immediate personal consultation",
            "Within 24 hours",
            "High-value lead with urgent needs",
        ),
        PriorityTier::Medium => (
            "Scheduled consultation call",
            "Within 3 business days",
            "Qualified lead requiring personalized attention",
        ),
        PriorityTier::Standard => (
            "Email follow-up with resources",
            "Within 1 week",
            "General inquiry, provide educational materials",
        ),
    };

    Recommendation {
        priority: tier.into(),
        action: action.to_string(),
        timeline: Some(timeline.to_string()),
        reason: Some(reason.to_string()),
        products: Vec::new(),
        specialist: None,
    }
}

fn product_consultation(action: &str, products: &[&str], specialist: &str) -> Recommendation {
    Recommendation {
        priority: RecommendationPriority::Product,
        action: action.to_string(),
        timeline: None,
        reason: None,
        products: products.iter().map(|p| p.to_string()).collect(),
        specialist: Some(specialist.to_string()),
    }
}

/// 第一筆永遠是依優先等級的後續動作，之後依序附加牛隻、馬匹的產品建議
///
/// `customer` 目前不影響建議內容，保留給呼叫端一致的簽章。
pub fn recommend(
    _customer: Option<&CustomerInfo>,
    inquiry: &str,
    score: u8,
) -> Vec<Recommendation> {
    let mut recommendations = vec![follow_up(priority_for(score))];

    let text = inquiry.to_lowercase();
    if contains_any(&text, CATTLE_KEYWORDS) {
        recommendations.push(product_consultation(
            "Cattle nutrition consultation",
            CATTLE_PRODUCTS,
            "Cattle nutrition expert",
        ));
    }
    if contains_any(&text, EQUINE_KEYWORDS) {
        recommendations.push(product_consultation(
            "Equine feed consultation",
            EQUINE_PRODUCTS,
            "Equine nutrition specialist",
        ));
    }

    recommendations
}
