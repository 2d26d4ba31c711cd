use crate::domain::model::Territory;
use crate::utils::error::{AgentError, Result};
use std::collections::HashSet;

pub const DEFAULT_TERRITORY_ID: &str = "central";

/// 依宣告順序排列的業務區域表，建構後不可變
#[derive(Debug, Clone)]
pub struct TerritoryTable {
    territories: Vec<Territory>,
    // 預先轉小寫的涵蓋地名，與 territories 同索引
    coverage_lower: Vec<Vec<String>>,
    default_index: usize,
}

impl TerritoryTable {
    pub fn new(territories: Vec<Territory>, default_id: &str) -> Result<Self> {
        if territories.is_empty() {
            return Err(AgentError::config("Territory table cannot be empty"));
        }

        let mut seen = HashSet::new();
        for territory in &territories {
            if !seen.insert(territory.id.as_str()) {
                return Err(AgentError::InvalidConfigValueError {
                    field: "territories.regions".to_string(),
                    value: territory.id.clone(),
                    reason: "Duplicate territory id".to_string(),
                });
            }
            // 空字串會匹配所有地點
            if territory.coverage.iter().any(|place| place.trim().is_empty()) {
                return Err(AgentError::InvalidConfigValueError {
                    field: format!("territories.regions.{}.coverage", territory.id),
                    value: String::new(),
                    reason: "Covered place names cannot be blank".to_string(),
                });
            }
        }

        let default_index = territories
            .iter()
            .position(|t| t.id == default_id)
            .ok_or_else(|| AgentError::InvalidConfigValueError {
                field: "territories.default".to_string(),
                value: default_id.to_string(),
                reason: "Default territory is not defined in the table".to_string(),
            })?;

        let coverage_lower = territories
            .iter()
            .map(|t| t.coverage.iter().map(|place| place.to_lowercase()).collect())
            .collect();

        Ok(Self {
            territories,
            coverage_lower,
            default_index,
        })
    }

    /// 內建的蒙大拿五區
    pub fn montana() -> Self {
        Self::new(montana_territories(), DEFAULT_TERRITORY_ID)
            .expect("built-in territory table is valid")
    }

    /// 小寫子字串比對，第一個命中的區域勝出；無命中或空白輸入回傳預設區
    pub fn resolve(&self, location: Option<&str>) -> &Territory {
        let location = match location {
            Some(loc) if !loc.is_empty() => loc.to_lowercase(),
            _ => return self.default_territory(),
        };

        self.coverage_lower
            .iter()
            .position(|places| places.iter().any(|place| location.contains(place.as_str())))
            .map(|index| &self.territories[index])
            .unwrap_or_else(|| self.default_territory())
    }

    pub fn default_territory(&self) -> &Territory {
        &self.territories[self.default_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }
}

impl Default for TerritoryTable {
    fn default() -> Self {
        Self::montana()
    }
}

fn territory(
    id: &str,
    representative: &str,
    phone: &str,
    email: &str,
    coverage: &[&str],
    specialties: &[&str],
) -> Territory {
    Territory {
        id: id.to_string(),
        representative: representative.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        coverage: coverage.iter().map(|s| s.to_string()).collect(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn montana_territories() -> Vec<Territory> {
    vec![
        territory(
            "northwest",
            "Sarah Johnson",
            "(406) 555-0101",
            "sarah.johnson@mfcompany.com",
            &["Missoula", "Kalispell", "Whitefish", "Columbia Falls"],
            &["cattle", "horses"],
        ),
        territory(
            "northeast",
            "Mike Peterson",
            "(406) 555-0102",
            "mike.peterson@mfcompany.com",
            &["Great Falls", "Havre", "Glasgow", "Malta"],
            &["cattle", "grain"],
        ),
        territory(
            "central",
            "Lisa Chen",
            "(406) 555-0103",
            "lisa.chen@mfcompany.com",
            &["Helena", "Butte", "Bozeman", "Livingston"],
            &["horses", "small livestock"],
        ),
        territory(
            "south",
            "David Rodriguez",
            "(406) 555-0104",
            "david.rodriguez@mfcompany.com",
            &["Billings", "Miles City", "Glendive", "Sidney"],
            &["cattle", "bulk orders"],
        ),
        territory(
            "southwest",
            "Jennifer White",
            "(406) 555-0105",
            "jennifer.white@mfcompany.com",
            &["Missoula", "Hamilton", "Dillon", "Anaconda"],
            &["horses", "sheep"],
        ),
    ]
}
