use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mfc_agent::domain::model::{PriorityTier, Row};
use mfc_agent::domain::ports::FeedStore;
use mfc_agent::domain::records::{
    ConsultationRequest, ContactInfo, CustomerQuery, CustomerRecord, NewConsultation,
    NewCustomer, NewCustomerRequest, ProductFilter,
};
use mfc_agent::{AgentError, AgentService, LeadEvaluationEngine};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Recorded {
    customers: Vec<CustomerRecord>,
    consultations: Vec<serde_json::Value>,
    touched: Vec<(String, String)>,
}

#[derive(Clone, Default)]
struct MockStore {
    state: Arc<Mutex<Recorded>>,
    offline: bool,
}

impl MockStore {
    fn with_customer(customer: CustomerRecord) -> Self {
        let store = Self::default();
        store.state.try_lock().unwrap().customers.push(customer);
        store
    }

    fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_online(&self) -> mfc_agent::Result<()> {
        if self.offline {
            return Err(AgentError::StoreError {
                status: 503,
                message: "connection refused".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FeedStore for MockStore {
    async fn ping(&self) -> mfc_agent::Result<()> {
        self.check_online()
    }

    async fn find_customers(&self, query: &CustomerQuery) -> mfc_agent::Result<Vec<CustomerRecord>> {
        self.check_online()?;
        let state = self.state.lock().await;
        Ok(state
            .customers
            .iter()
            .filter(|c| match query {
                CustomerQuery::Phone(p) => c.phone.as_deref() == Some(p.as_str()),
                CustomerQuery::Email(e) => c.email.as_deref() == Some(e.as_str()),
                CustomerQuery::Name(n) => c
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&n.to_lowercase())),
            })
            .take(10)
            .cloned()
            .collect())
    }

    async fn find_customer_by_phone(&self, phone: &str) -> mfc_agent::Result<Option<CustomerRecord>> {
        Ok(self
            .find_customers(&CustomerQuery::Phone(phone.to_string()))
            .await?
            .into_iter()
            .next())
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> mfc_agent::Result<CustomerRecord> {
        self.check_online()?;
        let mut record: CustomerRecord = serde_json::from_value(serde_json::to_value(customer)?)?;
        let mut state = self.state.lock().await;
        record.id = Some(serde_json::json!(state.customers.len() + 1));
        state.customers.push(record.clone());
        Ok(record)
    }

    async fn touch_customer(
        &self,
        id: &str,
        notes: &str,
        _last_contact: DateTime<Utc>,
    ) -> mfc_agent::Result<()> {
        self.check_online()?;
        let mut state = self.state.lock().await;
        state.touched.push((id.to_string(), notes.to_string()));
        Ok(())
    }

    async fn insert_consultation(&self, consultation: &NewConsultation) -> mfc_agent::Result<Row> {
        self.check_online()?;
        let mut value = serde_json::to_value(consultation)?;
        let mut state = self.state.lock().await;
        value["id"] = serde_json::json!(state.consultations.len() + 1);
        state.consultations.push(value.clone());
        Ok(serde_json::from_value(value)?)
    }

    async fn list_products(&self, _filter: &ProductFilter) -> mfc_agent::Result<Vec<Row>> {
        self.check_online()?;
        Ok(Vec::new())
    }

    async fn list_territories(&self) -> mfc_agent::Result<Vec<Row>> {
        self.check_online()?;
        Ok(Vec::new())
    }
}

fn returning_rancher() -> CustomerRecord {
    serde_json::from_value(serde_json::json!({
        "id": 7,
        "name": "Hank Miller",
        "phone": "(406) 555-7777",
        "location": "Great Falls",
        "notes": "Runs 400 head",
        "purchase_history": [{"order": 1}, {"order": 2}],
        "total_spent": 15000
    }))
    .unwrap()
}

fn service(store: MockStore) -> AgentService<MockStore> {
    AgentService::new(store, LeadEvaluationEngine::default(), false)
}

#[tokio::test]
async fn test_consultation_for_returning_customer() -> Result<()> {
    let store = MockStore::with_customer(returning_rancher());
    let service = service(store.clone());

    let outcome = service
        .request_consultation(ConsultationRequest {
            customer_info: Some(ContactInfo {
                name: Some("Hank Miller".into()),
                phone: Some(" (406) 555-7777\t".into()),
                email: None,
                location: Some("Great Falls".into()),
            }),
            inquiry: Some("We need an urgent bulk cattle order".into()),
            urgency: None,
            preferred_contact: None,
            location: None,
        })
        .await?;

    assert_eq!(outcome.lead_score, 100);
    assert_eq!(outcome.priority, PriorityTier::High);
    assert_eq!(outcome.territory.id, "northeast");
    assert_eq!(outcome.next_steps.timeline, "< 4 hours");
    assert_eq!(outcome.next_steps.assigned_rep, "Mike Peterson");
    assert_eq!(outcome.recommendations.len(), 2);

    let state = store.state.lock().await;
    let saved = &state.consultations[0];
    assert_eq!(saved["lead_score"], 100);
    assert_eq!(saved["customer_phone"], "(406) 555-7777");
    assert_eq!(saved["urgency"], "medium");
    assert_eq!(saved["preferred_contact"], "phone");
    assert_eq!(saved["status"], "new");
    assert_eq!(saved["territory"], "northeast");

    assert_eq!(state.touched.len(), 1);
    let (id, notes) = &state.touched[0];
    assert_eq!(id, "7");
    assert!(notes.starts_with("Runs 400 head\n["));
    assert!(notes.ends_with("New consultation: We need an urgent bulk cattle order..."));
    Ok(())
}

#[tokio::test]
async fn test_consultation_for_new_caller_prefers_request_location() -> Result<()> {
    let store = MockStore::default();
    let service = service(store.clone());

    let outcome = service
        .request_consultation(ConsultationRequest {
            customer_info: Some(ContactInfo {
                name: Some("June Carter".into()),
                phone: Some("(406) 555-1212".into()),
                email: Some("june@example.com".into()),
                location: Some("Helena".into()),
            }),
            inquiry: Some("What's the price for horse feed?".into()),
            urgency: Some("low".into()),
            preferred_contact: Some("email".into()),
            location: Some("Billings".into()),
        })
        .await?;

    assert_eq!(outcome.lead_score, 60);
    assert_eq!(outcome.priority, PriorityTier::Medium);
    assert_eq!(outcome.territory.id, "south");
    assert_eq!(outcome.next_steps.immediate, "Standard processing");
    assert_eq!(outcome.consultation.get_str("preferred_contact"), Some("email"));

    let state = store.state.lock().await;
    assert!(state.touched.is_empty());
    assert_eq!(state.consultations[0]["urgency"], "low");
    Ok(())
}

#[tokio::test]
async fn test_consultation_requires_contact_and_inquiry() {
    let service = service(MockStore::default());

    let missing_contact = service
        .request_consultation(ConsultationRequest {
            inquiry: Some("Need hay".into()),
            ..Default::default()
        })
        .await;
    assert!(matches!(missing_contact, Err(AgentError::ValidationError { .. })));

    let blank_inquiry = service
        .request_consultation(ConsultationRequest {
            customer_info: Some(ContactInfo::default()),
            inquiry: Some("   ".into()),
            ..Default::default()
        })
        .await;
    assert!(matches!(blank_inquiry, Err(AgentError::ValidationError { .. })));
}

#[tokio::test]
async fn test_create_customer_assigns_territory() -> Result<()> {
    let store = MockStore::default();
    let service = service(store.clone());

    let created = service
        .create_customer(NewCustomerRequest {
            name: Some("Rosa Diaz".into()),
            phone: Some("(406) 555-3030".into()),
            email: Some("".into()),
            location: Some("Dillon, MT".into()),
            notes: None,
        })
        .await?;

    assert!(created.success);
    assert_eq!(created.territory.id, "southwest");
    assert_eq!(created.customer.territory.as_deref(), Some("southwest"));
    assert_eq!(created.customer.assigned_rep.as_deref(), Some("Jennifer White"));
    assert!(created.customer.email.is_none());
    assert_eq!(
        created.customer.extra.get("rep_contact").and_then(|v| v.as_str()),
        Some("(406) 555-0105")
    );

    let err = service
        .create_customer(NewCustomerRequest {
            name: Some("No Phone".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_friendly_message(), "Name and phone are required");
    Ok(())
}

#[tokio::test]
async fn test_lookup_by_name_and_missing_params() -> Result<()> {
    let service = service(MockStore::with_customer(returning_rancher()));

    let lookup = service.lookup_customers(None, None, Some("miller")).await?;
    assert!(lookup.found);
    assert_eq!(lookup.customers[0].phone.as_deref(), Some("(406) 555-7777"));

    let empty = service
        .lookup_customers(Some("(406) 555-0000"), None, None)
        .await?;
    assert!(!empty.found);

    assert!(service.lookup_customers(None, Some(" "), None).await.is_err());
    Ok(())
}

#[test]
fn test_health_reports_store_outage() {
    let service = AgentService::new(MockStore::offline(), LeadEvaluationEngine::default(), true);

    let report = tokio_test::block_on(service.health());

    assert_eq!(report.status, "unhealthy");
    assert_eq!(report.services.voice, "configured");
    assert!(report.error.unwrap().contains("connection refused"));
}

#[test]
fn test_consultation_survives_lookup_outage() {
    let service = service(MockStore::offline());

    // 查詢失敗會被忽略，但寫入失敗仍要回報
    let result = tokio_test::block_on(service.request_consultation(ConsultationRequest {
        customer_info: Some(ContactInfo {
            phone: Some("(406) 555-9999".into()),
            ..Default::default()
        }),
        inquiry: Some("hay".into()),
        ..Default::default()
    }));

    assert!(matches!(result, Err(AgentError::StoreError { status: 503, .. })));
}
