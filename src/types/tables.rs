//! Aggregate table rows
//!
//! Each row type backs one of the derived tables. Rows carry exact sums and
//! counts over the filtered record subset; the sort order is established by
//! the aggregator and preserved here.

use chrono::NaiveDate;
use serde::Serialize;

/// Revenue per purchase place, with the place's deduplicated coordinates.
/// Tables of these are sorted descending by revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRevenue {
    pub place: String,
    pub lat: f64,
    pub lon: f64,
    pub revenue: f64,
}

/// Sale count per purchase place, sorted descending by count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCount {
    pub place: String,
    pub lat: f64,
    pub lon: f64,
    pub count: u64,
}

/// Revenue per calendar month, in chronological order.
/// `month` is the first day of the month; `month_name` is the English month
/// name used for chart labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRevenue {
    pub month: NaiveDate,
    pub year: i32,
    pub month_name: &'static str,
    pub revenue: f64,
}

/// Sale count per calendar month, in chronological order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    pub month: NaiveDate,
    pub year: i32,
    pub month_name: &'static str,
    pub count: u64,
}

/// Revenue per product category, sorted descending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// Sale count per product category, sorted descending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Revenue and count per seller in one table, first-encounter order.
/// Top-N views sort a copy by the chosen measure and take the head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerSummary {
    pub seller: String,
    pub revenue: f64,
    pub count: u64,
}
