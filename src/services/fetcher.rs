//! Sales API client
//!
//! One blocking GET per page load. Region and year travel as `regiao`/`ano`
//! query parameters; an empty value means "no filter". Network and decode
//! failures propagate to the caller — there is no retry layer.

use crate::types::{DashboardError, Region, Result, SaleRecord, YearFilter};

/// Fixed sales-data endpoint
pub const SALES_API_URL: &str = "https://labdados.com/produtos";

/// Blocking client for the sales API
pub struct SalesClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SalesClient {
    pub fn new() -> Self {
        Self::with_base_url(SALES_API_URL.to_string())
    }

    /// Client against a custom endpoint (tests)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
        }
    }

    /// Fetch all records matching the region/year filters
    pub fn fetch(&self, region: Region, year: YearFilter) -> Result<Vec<SaleRecord>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("regiao", region.query_value()),
                ("ano", year.query_value()),
            ])
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        parse_records(&body)
    }
}

impl Default for SalesClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a response body as a JSON array of sale records
pub fn parse_records(body: &str) -> Result<Vec<SaleRecord>> {
    serde_json::from_str(body).map_err(|e| DashboardError::Parse(e.to_string()))
}
