pub mod garment;
pub mod pricing;
pub mod service;

pub use garment::{ClothQuantity, GarmentKind};
pub use pricing::{quote, PricingError};
pub use service::{default_services, Service};
