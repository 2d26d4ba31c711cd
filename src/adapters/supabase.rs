use crate::config::StoreConfig;
use crate::domain::model::Row;
use crate::domain::ports::FeedStore;
use crate::domain::records::{
    CustomerQuery, CustomerRecord, NewConsultation, NewCustomer, ProductFilter,
};
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const CUSTOMER_LOOKUP_LIMIT: &str = "10";

/// 透過 PostgREST (`/rest/v1/{table}`) 存取 Supabase 資料表
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        tracing::debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        // PostgREST 錯誤格式：{"message": "...", "code": "..."}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);

        tracing::warn!("Store request failed: {} {}", status, message);
        Err(AgentError::StoreError {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// 寫入並取回第一筆 representation
    async fn insert<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body);

        let mut rows: Vec<T> = Self::fetch(request).await?;
        if rows.is_empty() {
            return Err(AgentError::StoreError {
                status: 200,
                message: format!("Insert into {} returned no rows", table),
            });
        }
        Ok(rows.swap_remove(0))
    }
}

#[async_trait]
impl FeedStore for SupabaseStore {
    async fn ping(&self) -> Result<()> {
        let request = self
            .request(Method::GET, "customers")
            .query(&[("select", "id"), ("limit", "1")]);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn find_customers(&self, query: &CustomerQuery) -> Result<Vec<CustomerRecord>> {
        let filter = match query {
            CustomerQuery::Phone(phone) => ("phone", format!("eq.{}", phone)),
            CustomerQuery::Email(email) => ("email", format!("eq.{}", email)),
            CustomerQuery::Name(name) => ("name", format!("ilike.*{}*", name)),
        };

        let request = self
            .request(Method::GET, "customers")
            .query(&[("select", "*"), ("limit", CUSTOMER_LOOKUP_LIMIT)])
            .query(&[filter]);

        let customers: Vec<CustomerRecord> = Self::fetch(request).await?;
        tracing::debug!("Customer lookup returned {} rows", customers.len());
        Ok(customers)
    }

    async fn find_customer_by_phone(&self, phone: &str) -> Result<Option<CustomerRecord>> {
        let request = self
            .request(Method::GET, "customers")
            .query(&[("select", "*"), ("limit", "1")])
            .query(&[("phone", format!("eq.{}", phone))]);

        let mut customers: Vec<CustomerRecord> = Self::fetch(request).await?;
        Ok(customers.pop())
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerRecord> {
        self.insert("customers", customer).await
    }

    async fn touch_customer(
        &self,
        id: &str,
        notes: &str,
        last_contact: DateTime<Utc>,
    ) -> Result<()> {
        let request = self
            .request(Method::PATCH, "customers")
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({
                "last_contact": last_contact,
                "notes": notes,
            }));

        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn insert_consultation(&self, consultation: &NewConsultation) -> Result<Row> {
        self.insert("consultations", consultation).await
    }

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Row>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "name".to_string()),
        ];
        if let Some(category) = &filter.category {
            params.push(("category", format!("eq.{}", category)));
        }
        if let Some(search) = &filter.search {
            params.push((
                "or",
                format!("(name.ilike.*{0}*,description.ilike.*{0}*)", search),
            ));
        }

        let request = self.request(Method::GET, "products").query(&params);
        Self::fetch(request).await
    }

    async fn list_territories(&self) -> Result<Vec<Row>> {
        let request = self
            .request(Method::GET, "territories")
            .query(&[("select", "*"), ("order", "territory_name")]);
        Self::fetch(request).await
    }
}
