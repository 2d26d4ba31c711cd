use crate::core::recommendations::recommend;
use crate::core::scoring::{lead_score, priority_for};
use crate::core::territory::TerritoryTable;
use crate::domain::model::{CustomerInfo, ScoringResult, Territory};

/// 潛在客戶評估：區域指派、評分、優先等級與建議
///
/// 純函式，沒有 I/O 也沒有內部狀態，相同輸入永遠得到相同結果。
#[derive(Debug, Clone, Default)]
pub struct LeadEvaluationEngine {
    territories: TerritoryTable,
}

impl LeadEvaluationEngine {
    pub fn new(territories: TerritoryTable) -> Self {
        Self { territories }
    }

    pub fn territories(&self) -> &TerritoryTable {
        &self.territories
    }

    pub fn territory_for(&self, location: Option<&str>) -> &Territory {
        self.territories.resolve(location)
    }

    pub fn evaluate(
        &self,
        customer: Option<&CustomerInfo>,
        inquiry: &str,
        location: Option<&str>,
    ) -> ScoringResult {
        let territory = self.territories.resolve(location).clone();
        let score = lead_score(customer, inquiry);
        let priority = priority_for(score);
        let recommendations = recommend(customer, inquiry, score);

        tracing::debug!(
            score,
            priority = %priority,
            territory = %territory.id,
            recommendations = recommendations.len(),
            "Lead evaluated"
        );

        ScoringResult {
            score,
            priority,
            territory,
            recommendations,
        }
    }
}
