use crate::domain::model::Row;
use crate::domain::records::{
    CustomerQuery, CustomerRecord, NewConsultation, NewCustomer, ProductFilter,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 外部關聯式資料庫（customers / products / territories / consultations）
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn ping(&self) -> Result<()>;

    /// 最多回傳 10 筆
    async fn find_customers(&self, query: &CustomerQuery) -> Result<Vec<CustomerRecord>>;

    async fn find_customer_by_phone(&self, phone: &str) -> Result<Option<CustomerRecord>>;

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerRecord>;

    async fn touch_customer(
        &self,
        id: &str,
        notes: &str,
        last_contact: DateTime<Utc>,
    ) -> Result<()>;

    async fn insert_consultation(&self, consultation: &NewConsultation) -> Result<Row>;

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Row>>;

    async fn list_territories(&self) -> Result<Vec<Row>>;
}

/// 第三方文字轉語音服務
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// 回傳 audio/mpeg 位元組
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
