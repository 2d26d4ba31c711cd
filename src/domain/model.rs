use serde::{Deserialize, Serialize};

/// 固定的業務區域，每區一位業務代表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    #[serde(rename = "territory")]
    pub id: String,
    #[serde(rename = "rep")]
    pub representative: String,
    pub phone: String,
    pub email: String,
    pub coverage: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// 評分用的客戶摘要，呼叫端負責從資料庫取得
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub purchase_count: usize,
    #[serde(default)]
    pub total_spent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    High,
    Medium,
    Standard,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Standard => "standard",
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationPriority {
    High,
    Medium,
    Standard,
    Product,
}

impl From<PriorityTier> for RecommendationPriority {
    fn from(tier: PriorityTier) -> Self {
        match tier {
            PriorityTier::High => RecommendationPriority::High,
            PriorityTier::Medium => RecommendationPriority::Medium,
            PriorityTier::Standard => RecommendationPriority::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: u8,
    pub priority: PriorityTier,
    pub territory: Territory,
    pub recommendations: Vec<Recommendation>,
}

/// 資料表中的一列，欄位不固定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Row {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}
