use crate::domain::model::{CustomerInfo, PriorityTier, Recommendation, Row, Territory};
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::non_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `customers` 資料表的一列；未知欄位保留在 `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub assigned_rep: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub purchase_history: Option<Vec<Value>>,
    #[serde(default)]
    pub total_spent: Option<f64>,
    #[serde(default)]
    pub last_contact: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CustomerRecord {
    /// 主鍵可能是整數或 UUID，統一轉成查詢字串
    pub fn id_filter(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&CustomerRecord> for CustomerInfo {
    fn from(record: &CustomerRecord) -> Self {
        CustomerInfo {
            name: non_blank(record.name.as_deref()).map(str::to_string),
            phone: record.phone.clone(),
            email: record.email.clone(),
            location: record.location.clone(),
            purchase_count: record.purchase_history.as_ref().map_or(0, Vec::len),
            total_spent: record.total_spent.unwrap_or(0.0),
        }
    }
}

/// 客戶查詢條件，優先序：電話 → email → 姓名
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerQuery {
    Phone(String),
    Email(String),
    Name(String),
}

impl CustomerQuery {
    pub fn from_params(
        phone: Option<&str>,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self> {
        if let Some(phone) = non_blank(phone) {
            Ok(CustomerQuery::Phone(phone.to_string()))
        } else if let Some(email) = non_blank(email) {
            Ok(CustomerQuery::Email(email.to_string()))
        } else if let Some(name) = non_blank(name) {
            Ok(CustomerQuery::Name(name.to_string()))
        } else {
            Err(AgentError::validation(
                "Phone, email, or name parameter required",
            ))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub territory: String,
    pub assigned_rep: String,
    pub rep_contact: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_contact: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerCreated {
    pub success: bool,
    pub customer: CustomerRecord,
    pub territory: Territory,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerLookup {
    pub customers: Vec<CustomerRecord>,
    pub found: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub customer_info: Option<ContactInfo>,
    pub inquiry: Option<String>,
    pub urgency: Option<String>,
    pub preferred_contact: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewConsultation {
    pub customer_phone: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub inquiry: String,
    pub urgency: String,
    pub lead_score: u8,
    pub territory: String,
    pub assigned_rep: String,
    pub status: String,
    pub preferred_contact: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextSteps {
    pub immediate: String,
    pub timeline: String,
    pub assigned_rep: String,
    pub contact_info: ContactDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationOutcome {
    pub success: bool,
    pub consultation: Row,
    pub lead_score: u8,
    pub priority: PriorityTier,
    pub territory: Territory,
    pub recommendations: Vec<Recommendation>,
    pub next_steps: NextSteps,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub store: String,
    pub voice: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
    pub services: ServiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_query_precedence() {
        let query =
            CustomerQuery::from_params(Some("(406) 555-1234"), Some("a@b.com"), Some("Hank"))
                .unwrap();
        assert_eq!(query, CustomerQuery::Phone("(406) 555-1234".into()));

        let query = CustomerQuery::from_params(Some("  "), Some("a@b.com"), None).unwrap();
        assert_eq!(query, CustomerQuery::Email("a@b.com".into()));

        let query = CustomerQuery::from_params(None, None, Some("Hank")).unwrap();
        assert_eq!(query, CustomerQuery::Name("Hank".into()));

        assert!(matches!(
            CustomerQuery::from_params(None, None, None),
            Err(AgentError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_customer_record_keeps_unknown_columns() {
        let record: CustomerRecord = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Hank Miller",
            "phone": "(406) 555-2000",
            "purchase_history": [{"sku": "CT-100"}, {"sku": "MN-7"}],
            "total_spent": 12500.5,
            "ranch_size": "800 acres"
        }))
        .unwrap();

        assert_eq!(record.id_filter().as_deref(), Some("42"));
        assert_eq!(record.extra.get("ranch_size").and_then(|v| v.as_str()), Some("800 acres"));

        let info = CustomerInfo::from(&record);
        assert_eq!(info.purchase_count, 2);
        assert_eq!(info.total_spent, 12500.5);
        assert_eq!(info.name.as_deref(), Some("Hank Miller"));
    }

    #[test]
    fn test_customer_record_tolerates_null_columns() {
        let record: CustomerRecord = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": null,
            "phone": "(406) 555-0909",
            "notes": null,
            "purchase_history": [{"sku": "HY-20"}],
            "total_spent": 20000
        }))
        .unwrap();

        assert!(record.name.is_none());
        let info = CustomerInfo::from(&record);
        assert!(info.name.is_none());
        assert_eq!(info.purchase_count, 1);
        assert_eq!(info.total_spent, 20000.0);
    }

    #[test]
    fn test_consultation_request_uses_camel_case() {
        let request: ConsultationRequest = serde_json::from_value(serde_json::json!({
            "customerInfo": {"name": "Ada", "phone": "555"},
            "inquiry": "Need hay",
            "preferredContact": "email"
        }))
        .unwrap();

        assert_eq!(request.preferred_contact.as_deref(), Some("email"));
        assert!(request.urgency.is_none());
        assert_eq!(
            request.customer_info.and_then(|c| c.phone).as_deref(),
            Some("555")
        );
    }
}
