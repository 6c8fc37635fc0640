//! Aggregator service for computing sales statistics
//!
//! Pure functions over `&[SaleRecord]`: each returns a freshly built table.
//! Seller filtering happens before every aggregation; nothing here mutates
//! its input. Descending sorts are stable so tied groups keep their
//! first-encounter order.

use crate::types::{
    CategoryCount, CategoryRevenue, Filters, MonthCount, MonthRevenue, SaleRecord, SellerSummary,
    StateCount, StateRevenue,
};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// English month names, matching the chart labels of the original dashboard
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Truncate a date to the first day of its month
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn descending_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Aggregator for computing sales statistics
pub struct Aggregator;

impl Aggregator {
    /// Keep only records whose seller is in the set. An empty set keeps
    /// everything (no filter selected).
    pub fn filter_sellers(records: &[SaleRecord], sellers: &HashSet<String>) -> Vec<SaleRecord> {
        if sellers.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| sellers.contains(&r.seller))
            .cloned()
            .collect()
    }

    /// Total revenue over the given records
    pub fn total_revenue(records: &[SaleRecord]) -> f64 {
        records.iter().map(|r| r.price).sum()
    }

    /// Number of sales (rows)
    pub fn sale_count(records: &[SaleRecord]) -> usize {
        records.len()
    }

    /// Distinct seller names in first-encounter order
    pub fn distinct_sellers(records: &[SaleRecord]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut names = Vec::new();
        for record in records {
            if seen.insert(record.seller.as_str()) {
                names.push(record.seller.clone());
            }
        }
        names
    }

    /// Revenue per purchase place, descending. Coordinates come from the
    /// first record seen for each place (dedup, first occurrence wins).
    pub fn revenue_by_state(records: &[SaleRecord]) -> Vec<StateRevenue> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<StateRevenue> = Vec::new();

        for record in records {
            match index.get(record.place.as_str()) {
                Some(&i) => rows[i].revenue += record.price,
                None => {
                    index.insert(record.place.as_str(), rows.len());
                    rows.push(StateRevenue {
                        place: record.place.clone(),
                        lat: record.lat,
                        lon: record.lon,
                        revenue: record.price,
                    });
                }
            }
        }

        rows.sort_by(|a, b| descending_f64(a.revenue, b.revenue));
        rows
    }

    /// Sale count per purchase place, descending, same coordinate handling
    /// as [`Aggregator::revenue_by_state`]
    pub fn count_by_state(records: &[SaleRecord]) -> Vec<StateCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<StateCount> = Vec::new();

        for record in records {
            match index.get(record.place.as_str()) {
                Some(&i) => rows[i].count += 1,
                None => {
                    index.insert(record.place.as_str(), rows.len());
                    rows.push(StateCount {
                        place: record.place.clone(),
                        lat: record.lat,
                        lon: record.lon,
                        count: 1,
                    });
                }
            }
        }

        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Revenue per calendar month, chronological (never sorted by value)
    pub fn revenue_by_month(records: &[SaleRecord]) -> Vec<MonthRevenue> {
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut rows: Vec<MonthRevenue> = Vec::new();

        for record in records {
            let month = month_start(record.purchase_date);
            match index.get(&month) {
                Some(&i) => rows[i].revenue += record.price,
                None => {
                    index.insert(month, rows.len());
                    rows.push(MonthRevenue {
                        month,
                        year: month.year(),
                        month_name: MONTH_NAMES[month.month0() as usize],
                        revenue: record.price,
                    });
                }
            }
        }

        rows.sort_by_key(|row| row.month);
        rows
    }

    /// Sale count per calendar month, chronological
    pub fn count_by_month(records: &[SaleRecord]) -> Vec<MonthCount> {
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut rows: Vec<MonthCount> = Vec::new();

        for record in records {
            let month = month_start(record.purchase_date);
            match index.get(&month) {
                Some(&i) => rows[i].count += 1,
                None => {
                    index.insert(month, rows.len());
                    rows.push(MonthCount {
                        month,
                        year: month.year(),
                        month_name: MONTH_NAMES[month.month0() as usize],
                        count: 1,
                    });
                }
            }
        }

        rows.sort_by_key(|row| row.month);
        rows
    }

    /// Revenue per product category, descending
    pub fn revenue_by_category(records: &[SaleRecord]) -> Vec<CategoryRevenue> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<CategoryRevenue> = Vec::new();

        for record in records {
            match index.get(record.category.as_str()) {
                Some(&i) => rows[i].revenue += record.price,
                None => {
                    index.insert(record.category.as_str(), rows.len());
                    rows.push(CategoryRevenue {
                        category: record.category.clone(),
                        revenue: record.price,
                    });
                }
            }
        }

        rows.sort_by(|a, b| descending_f64(a.revenue, b.revenue));
        rows
    }

    /// Sale count per product category, descending
    pub fn count_by_category(records: &[SaleRecord]) -> Vec<CategoryCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<CategoryCount> = Vec::new();

        for record in records {
            match index.get(record.category.as_str()) {
                Some(&i) => rows[i].count += 1,
                None => {
                    index.insert(record.category.as_str(), rows.len());
                    rows.push(CategoryCount {
                        category: record.category.clone(),
                        count: 1,
                    });
                }
            }
        }

        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Revenue and count per seller in one table, first-encounter order
    pub fn by_seller(records: &[SaleRecord]) -> Vec<SellerSummary> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<SellerSummary> = Vec::new();

        for record in records {
            match index.get(record.seller.as_str()) {
                Some(&i) => {
                    rows[i].revenue += record.price;
                    rows[i].count += 1;
                }
                None => {
                    index.insert(record.seller.as_str(), rows.len());
                    rows.push(SellerSummary {
                        seller: record.seller.clone(),
                        revenue: record.price,
                        count: 1,
                    });
                }
            }
        }

        rows
    }

    /// Top `n` sellers by revenue, descending (ties keep table order)
    pub fn top_sellers_by_revenue(sellers: &[SellerSummary], n: usize) -> Vec<SellerSummary> {
        let mut sorted = sellers.to_vec();
        sorted.sort_by(|a, b| descending_f64(a.revenue, b.revenue));
        sorted.truncate(n);
        sorted
    }

    /// Top `n` sellers by sale count, descending (ties keep table order)
    pub fn top_sellers_by_count(sellers: &[SellerSummary], n: usize) -> Vec<SellerSummary> {
        let mut sorted = sellers.to_vec();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(n);
        sorted
    }
}

/// All derived tables for one render pass, built from scratch from the raw
/// records plus the seller filter
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardTables {
    pub total_revenue: f64,
    pub sale_count: usize,
    pub state_revenue: Vec<StateRevenue>,
    pub state_count: Vec<StateCount>,
    pub monthly_revenue: Vec<MonthRevenue>,
    pub monthly_count: Vec<MonthCount>,
    pub category_revenue: Vec<CategoryRevenue>,
    pub category_count: Vec<CategoryCount>,
    pub sellers: Vec<SellerSummary>,
}

impl DashboardTables {
    /// Apply the seller filter, then compute every table over the filtered
    /// subset
    pub fn from_records(records: &[SaleRecord], filters: &Filters) -> Self {
        let filtered = Aggregator::filter_sellers(records, &filters.sellers);
        Self {
            total_revenue: Aggregator::total_revenue(&filtered),
            sale_count: Aggregator::sale_count(&filtered),
            state_revenue: Aggregator::revenue_by_state(&filtered),
            state_count: Aggregator::count_by_state(&filtered),
            monthly_revenue: Aggregator::revenue_by_month(&filtered),
            monthly_count: Aggregator::count_by_month(&filtered),
            category_revenue: Aggregator::revenue_by_category(&filtered),
            category_count: Aggregator::count_by_category(&filtered),
            sellers: Aggregator::by_seller(&filtered),
        }
    }
}
