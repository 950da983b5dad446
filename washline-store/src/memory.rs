use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use washline_catalog::Service;
use washline_order::{Order, OrderError, OrderUpdate, Report, StatusCategory};

use crate::repository::{OrderStore, ReportStore, ServiceStore, StoreResult};

/// In-memory backing store, the stand-in for the hosted document database.
///
/// Writers go through a single `RwLock` per collection, which gives the
/// one-update-at-a-time behavior the domain layer assumes. After every
/// committed order mutation the full order set is pushed to subscribers;
/// a lagging subscriber just misses snapshots and catches up on the next
/// push.
pub struct MemoryStore {
    orders: RwLock<HashMap<Uuid, Order>>,
    services: RwLock<HashMap<String, Service>>,
    reports: RwLock<Vec<Report>>,
    feed: broadcast::Sender<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(64);
        Self {
            orders: RwLock::new(HashMap::new()),
            services: RwLock::new(HashMap::new()),
            reports: RwLock::new(Vec::new()),
            feed,
        }
    }

    /// Newest first, same ordering the dashboards show
    fn sorted(orders: &HashMap<Uuid, Order>) -> Vec<Order> {
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.timestamps.placed_at.cmp(&a.timestamps.placed_at));
        all
    }

    fn publish(&self, snapshot: Vec<Order>) {
        // Send fails when nobody is subscribed, which is fine
        let _ = self.feed.send(snapshot);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        tracing::info!(order_id = %order.id, client = %order.client_id, "order placed");
        orders.insert(order.id, order.clone());
        let snapshot = Self::sorted(&orders);
        drop(orders);
        self.publish(snapshot);
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Order> {
        self.orders
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(OrderError::NotFound(id))
    }

    async fn list(&self, filter: Option<StatusCategory>) -> StoreResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut all = Self::sorted(&orders);
        if let Some(category) = filter {
            all.retain(|o| category.matches(o.status));
        }
        Ok(all)
    }

    async fn list_for_client(
        &self,
        client_id: &str,
        filter: Option<StatusCategory>,
    ) -> StoreResult<Vec<Order>> {
        let mut all = self.list(filter).await?;
        all.retain(|o| o.client_id == client_id);
        Ok(all)
    }

    async fn update(&self, id: Uuid, update: OrderUpdate) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;

        update.apply(order, Utc::now())?;
        tracing::info!(order_id = %id, status = %order.status, "order updated");

        let updated = order.clone();
        let snapshot = Self::sorted(&orders);
        drop(orders);
        self.publish(snapshot);
        Ok(updated)
    }

    fn subscribe(&self) -> broadcast::Receiver<Vec<Order>> {
        self.feed.subscribe()
    }
}

#[async_trait]
impl ServiceStore for MemoryStore {
    async fn list_services(&self) -> Vec<Service> {
        let services = self.services.read().await;
        let mut all: Vec<Service> = services.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    async fn get_service(&self, id: &str) -> Option<Service> {
        self.services.read().await.get(id).cloned()
    }

    async fn seed(&self, services: Vec<Service>) {
        let mut current = self.services.write().await;
        if !current.is_empty() {
            return;
        }
        tracing::info!(count = services.len(), "seeding service catalog");
        for service in services {
            current.insert(service.id.clone(), service);
        }
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn file(&self, order_id: Uuid, client_id: &str, reason: String) -> StoreResult<Uuid> {
        // Reports only attach to orders that exist
        if !self.orders.read().await.contains_key(&order_id) {
            return Err(OrderError::NotFound(order_id));
        }
        let report = Report {
            id: Uuid::new_v4(),
            order_id,
            client_id: client_id.to_string(),
            reason,
            filed_at: Utc::now(),
        };
        let report_id = report.id;
        self.reports.write().await.push(report);
        tracing::info!(%order_id, %report_id, "report filed");
        Ok(report_id)
    }

    async fn list_for_order(&self, order_id: Uuid) -> Vec<Report> {
        self.reports
            .read()
            .await
            .iter()
            .filter(|r| r.order_id == order_id)
            .cloned()
            .collect()
    }
}
