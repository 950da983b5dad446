pub mod changes;
pub mod flow;
pub mod lifecycle;
pub mod models;
pub mod payment;
pub mod pii;

pub use changes::OrderUpdate;
pub use lifecycle::{advance, place, record_payment, ClientDetails, OrderError};
pub use models::{
    Order, OrderStatus, PaymentMethod, PaymentStatus, Report, StatusCategory, Timestamps,
};
