//! Sales records and the filter domain

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Date format used by the sales API (`Data da Compra`)
pub const BR_DATE_FORMAT: &str = "%d/%m/%Y";

/// One sales transaction as returned by the API. Immutable once fetched.
///
/// Field names on the wire are the API's Portuguese column labels, so every
/// field carries a serde rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(
        rename = "Data da Compra",
        deserialize_with = "deserialize_br_date",
        serialize_with = "serialize_br_date"
    )]
    pub purchase_date: NaiveDate,
    #[serde(rename = "Local da compra")]
    pub place: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Vendedor")]
    pub seller: String,
}

fn deserialize_br_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&text, BR_DATE_FORMAT).map_err(serde::de::Error::custom)
}

fn serialize_br_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(BR_DATE_FORMAT).to_string())
}

/// The five region options the API accepts. Brasil means "no filter" and maps
/// to an empty `regiao` query value. (The upstream list has no Sudeste.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Region {
    #[default]
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sul,
}

impl Region {
    /// All regions in selector order
    pub const ALL: [Region; 5] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sul,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Brasil => "Brasil",
            Self::CentroOeste => "Centro-Oeste",
            Self::Nordeste => "Nordeste",
            Self::Norte => "Norte",
            Self::Sul => "Sul",
        }
    }

    /// Value sent as the `regiao` query parameter (lowercased, empty for Brasil)
    pub fn query_value(self) -> String {
        match self {
            Self::Brasil => String::new(),
            other => other.label().to_lowercase(),
        }
    }

    /// Next region in selector order (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Brasil => Self::CentroOeste,
            Self::CentroOeste => Self::Nordeste,
            Self::Nordeste => Self::Norte,
            Self::Norte => Self::Sul,
            Self::Sul => Self::Brasil,
        }
    }

    /// Previous region in selector order (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Brasil => Self::Sul,
            Self::CentroOeste => Self::Brasil,
            Self::Nordeste => Self::CentroOeste,
            Self::Norte => Self::Nordeste,
            Self::Sul => Self::Norte,
        }
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brasil" => Ok(Self::Brasil),
            "centro-oeste" => Ok(Self::CentroOeste),
            "nordeste" => Ok(Self::Nordeste),
            "norte" => Ok(Self::Norte),
            "sul" => Ok(Self::Sul),
            other => Err(format!(
                "unknown region '{}' (expected brasil, centro-oeste, nordeste, norte or sul)",
                other
            )),
        }
    }
}

/// First year the API has data for
pub const MIN_YEAR: i32 = 2020;
/// Last year the API has data for
pub const MAX_YEAR: i32 = 2023;

/// Year filter: all periods, or one year between [`MIN_YEAR`] and [`MAX_YEAR`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    /// Value sent as the `ano` query parameter (empty for all periods)
    pub fn query_value(self) -> String {
        match self {
            Self::All => String::new(),
            Self::Year(y) => y.to_string(),
        }
    }

    /// Display label for the filter bar
    pub fn label(self) -> String {
        match self {
            Self::All => "todo o período".to_string(),
            Self::Year(y) => y.to_string(),
        }
    }

    /// Toggle between all periods and the year slider's start position
    pub fn toggled(self) -> Self {
        match self {
            Self::All => Self::Year(MIN_YEAR),
            Self::Year(_) => Self::All,
        }
    }

    /// Step one year forward, clamped to [`MAX_YEAR`]. No-op for All.
    pub fn step_up(self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Year(y) => Self::Year((y + 1).min(MAX_YEAR)),
        }
    }

    /// Step one year back, clamped to [`MIN_YEAR`]. No-op for All.
    pub fn step_down(self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Year(y) => Self::Year((y - 1).max(MIN_YEAR)),
        }
    }
}

/// Bounds for the "top sellers" chart size
pub const MIN_TOP_SELLERS: usize = 2;
pub const MAX_TOP_SELLERS: usize = 10;
pub const DEFAULT_TOP_SELLERS: usize = 5;

/// Request-scoped filter state threaded through fetch → aggregate → render.
///
/// Region and year are API-level filters (query parameters); the seller set
/// is applied client-side before aggregation. An empty seller set means
/// "all sellers".
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub region: Region,
    pub year: YearFilter,
    pub sellers: HashSet<String>,
    pub top_sellers: usize,
}

impl Filters {
    pub fn new() -> Self {
        Self {
            region: Region::default(),
            year: YearFilter::default(),
            sellers: HashSet::new(),
            top_sellers: DEFAULT_TOP_SELLERS,
        }
    }

    /// Set the top-sellers count, clamped to the 2..=10 input range
    pub fn set_top_sellers(&mut self, n: usize) {
        self.top_sellers = n.clamp(MIN_TOP_SELLERS, MAX_TOP_SELLERS);
    }

    /// Drop selected sellers that no longer appear in the fetched data
    pub fn retain_known_sellers(&mut self, known: &[String]) {
        self.sellers.retain(|s| known.iter().any(|k| k == s));
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self::new()
    }
}
