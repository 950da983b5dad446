pub mod app_config;
pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{OrderStore, ReportStore, ServiceStore, StoreResult};
