//! Services for fetching and aggregating sales data

pub mod aggregator;
pub mod fetcher;
pub mod format;

pub use aggregator::{Aggregator, DashboardTables};
pub use fetcher::{parse_records, SalesClient};
pub use format::{format_compact, format_number};
