use crate::core::engine::LeadEvaluationEngine;
use crate::core::scoring::HIGH_PRIORITY_THRESHOLD;
use crate::domain::model::{CustomerInfo, Row, Territory};
use crate::domain::ports::FeedStore;
use crate::domain::records::{
    ConsultationOutcome, ConsultationRequest, ContactDetails, CustomerCreated, CustomerLookup,
    CustomerQuery, CustomerRecord, HealthReport, NewConsultation, NewCustomer,
    NewCustomerRequest, NextSteps, ProductFilter, ServiceStatus,
};
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::non_blank;
use chrono::{DateTime, Utc};

const DEFAULT_URGENCY: &str = "medium";
const DEFAULT_PREFERRED_CONTACT: &str = "phone";
const NEW_CONSULTATION_STATUS: &str = "new";
const NOTE_INQUIRY_PREVIEW_CHARS: usize = 100;

fn owned(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

/// 依分數決定回電時程，並附上負責業務的聯絡方式
pub fn next_steps(score: u8, territory: &Territory) -> NextSteps {
    let (immediate, timeline) = if score >= HIGH_PRIORITY_THRESHOLD {
        ("High priority - immediate callback", "< 4 hours")
    } else {
        ("Standard processing", "1-2 business days")
    };

    NextSteps {
        immediate: immediate.to_string(),
        timeline: timeline.to_string(),
        assigned_rep: territory.representative.clone(),
        contact_info: ContactDetails {
            phone: territory.phone.clone(),
            email: territory.email.clone(),
        },
    }
}

/// 在既有備註後追加一行諮詢紀錄
pub fn append_consultation_note(existing: Option<&str>, inquiry: &str, now: DateTime<Utc>) -> String {
    let preview: String = inquiry.chars().take(NOTE_INQUIRY_PREVIEW_CHARS).collect();
    let line = format!(
        "[{}] New consultation: {}...",
        now.format("%Y-%m-%d"),
        preview
    );

    match existing.filter(|notes| !notes.is_empty()) {
        Some(notes) => format!("{}\n{}", notes, line),
        None => line,
    }
}

/// 客戶、商品、區域與諮詢請求的業務流程；資料存取透過 `FeedStore`
pub struct AgentService<S: FeedStore> {
    store: S,
    engine: LeadEvaluationEngine,
    voice_configured: bool,
}

impl<S: FeedStore> AgentService<S> {
    pub fn new(store: S, engine: LeadEvaluationEngine, voice_configured: bool) -> Self {
        Self {
            store,
            engine,
            voice_configured,
        }
    }

    pub async fn health(&self) -> HealthReport {
        let voice = if self.voice_configured {
            "configured"
        } else {
            "not_configured"
        };

        match self.store.ping().await {
            Ok(()) => HealthReport {
                status: "healthy".to_string(),
                timestamp: Utc::now(),
                database: "connected".to_string(),
                services: ServiceStatus {
                    store: "operational".to_string(),
                    voice: voice.to_string(),
                },
                error: None,
            },
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                HealthReport {
                    status: "unhealthy".to_string(),
                    timestamp: Utc::now(),
                    database: "unreachable".to_string(),
                    services: ServiceStatus {
                        store: "down".to_string(),
                        voice: voice.to_string(),
                    },
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub async fn lookup_customers(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<CustomerLookup> {
        let query = CustomerQuery::from_params(phone, email, name)?;
        let customers = self.store.find_customers(&query).await?;
        Ok(CustomerLookup {
            found: !customers.is_empty(),
            customers,
        })
    }

    pub async fn create_customer(&self, request: NewCustomerRequest) -> Result<CustomerCreated> {
        let (name, phone) = match (
            owned(request.name.as_deref()),
            owned(request.phone.as_deref()),
        ) {
            (Some(name), Some(phone)) => (name, phone),
            _ => return Err(AgentError::validation("Name and phone are required")),
        };

        let location = owned(request.location.as_deref());
        let territory = self.engine.territory_for(location.as_deref()).clone();
        let now = Utc::now();

        let customer = NewCustomer {
            name,
            phone,
            email: owned(request.email.as_deref()),
            location,
            territory: territory.id.clone(),
            assigned_rep: territory.representative.clone(),
            rep_contact: territory.phone.clone(),
            notes: owned(request.notes.as_deref()),
            created_at: now,
            last_contact: now,
        };

        let customer = self.store.insert_customer(&customer).await?;
        tracing::info!(
            territory = %territory.id,
            rep = %territory.representative,
            "Customer created"
        );

        Ok(CustomerCreated {
            success: true,
            customer,
            territory,
        })
    }

    pub async fn products(&self, filter: ProductFilter) -> Result<Vec<Row>> {
        let filter = ProductFilter {
            category: owned(filter.category.as_deref()),
            search: owned(filter.search.as_deref()),
        };
        self.store.list_products(&filter).await
    }

    pub async fn territories(&self) -> Result<Vec<Row>> {
        self.store.list_territories().await
    }

    // 查詢失敗不阻擋諮詢流程，視為新客戶
    async fn existing_customer(&self, phone: Option<&str>) -> Option<CustomerRecord> {
        let phone = non_blank(phone)?;
        match self.store.find_customer_by_phone(phone).await {
            Ok(customer) => customer,
            Err(e) => {
                tracing::warn!("Customer lookup during consultation failed: {}", e);
                None
            }
        }
    }

    pub async fn request_consultation(
        &self,
        request: ConsultationRequest,
    ) -> Result<ConsultationOutcome> {
        let (contact, inquiry) = match (
            request.customer_info,
            owned(request.inquiry.as_deref()),
        ) {
            (Some(contact), Some(inquiry)) => (contact, inquiry),
            _ => {
                return Err(AgentError::validation(
                    "Customer info and inquiry are required",
                ))
            }
        };

        let phone = owned(contact.phone.as_deref());
        let customer = self.existing_customer(phone.as_deref()).await;
        let customer_info = customer.as_ref().map(CustomerInfo::from);

        let location = non_blank(request.location.as_deref())
            .or_else(|| non_blank(contact.location.as_deref()));
        let result = self
            .engine
            .evaluate(customer_info.as_ref(), &inquiry, location);

        let now = Utc::now();
        let consultation = NewConsultation {
            customer_phone: phone,
            customer_name: owned(contact.name.as_deref()),
            customer_email: owned(contact.email.as_deref()),
            inquiry: inquiry.clone(),
            urgency: owned(request.urgency.as_deref())
                .unwrap_or_else(|| DEFAULT_URGENCY.to_string()),
            lead_score: result.score,
            territory: result.territory.id.clone(),
            assigned_rep: result.territory.representative.clone(),
            status: NEW_CONSULTATION_STATUS.to_string(),
            preferred_contact: owned(request.preferred_contact.as_deref())
                .unwrap_or_else(|| DEFAULT_PREFERRED_CONTACT.to_string()),
            created_at: now,
        };
        let consultation = self.store.insert_consultation(&consultation).await?;

        if let Some(customer) = &customer {
            if let Some(id) = customer.id_filter() {
                let notes = append_consultation_note(customer.notes.as_deref(), &inquiry, now);
                if let Err(e) = self.store.touch_customer(&id, &notes, now).await {
                    tracing::warn!("Failed to update customer {}: {}", id, e);
                }
            }
        }

        tracing::info!(
            score = result.score,
            priority = %result.priority,
            territory = %result.territory.id,
            returning = customer.is_some(),
            "Consultation recorded"
        );

        let next_steps = next_steps(result.score, &result.territory);
        Ok(ConsultationOutcome {
            success: true,
            consultation,
            lead_score: result.score,
            priority: result.priority,
            territory: result.territory,
            recommendations: result.recommendations,
            next_steps,
        })
    }
}
