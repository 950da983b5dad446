use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use washline_catalog::Service;
use washline_order::{Order, OrderError, OrderUpdate, Report, StatusCategory};

pub type StoreResult<T> = Result<T, OrderError>;

/// Order persistence and change notification, shaped the way the hosted
/// backend exposes it: create/read/update plus a push subscription that
/// delivers the full current order set after every committed mutation.
/// Orders are never deleted.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(&self, order: Order) -> StoreResult<Order>;

    async fn get(&self, id: Uuid) -> StoreResult<Order>;

    /// All orders, newest first, optionally narrowed to a status category
    async fn list(&self, filter: Option<StatusCategory>) -> StoreResult<Vec<Order>>;

    /// One client's orders, newest first
    async fn list_for_client(
        &self,
        client_id: &str,
        filter: Option<StatusCategory>,
    ) -> StoreResult<Vec<Order>>;

    /// Apply a typed partial update atomically and return the new snapshot.
    /// A failed validation commits nothing.
    async fn update(&self, id: Uuid, update: OrderUpdate) -> StoreResult<Order>;

    fn subscribe(&self) -> broadcast::Receiver<Vec<Order>>;
}

/// Read access to the service catalog
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn list_services(&self) -> Vec<Service>;

    async fn get_service(&self, id: &str) -> Option<Service>;

    /// Seed the catalog, a no-op unless the store is empty
    async fn seed(&self, services: Vec<Service>);
}

/// Side-channel issue reports, keyed by order id
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn file(&self, order_id: Uuid, client_id: &str, reason: String) -> StoreResult<Uuid>;

    async fn list_for_order(&self, order_id: Uuid) -> Vec<Report>;
}
