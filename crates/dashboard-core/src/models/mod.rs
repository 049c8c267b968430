//! Stock feed data model

mod lenient;
pub mod record;

pub use record::{StockFeed, StockRecord};
