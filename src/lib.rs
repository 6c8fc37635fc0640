//! Terminal dashboard for the labdados sales API.
//!
//! Pipeline: fetch (`services::fetcher`) → aggregate (`services::aggregator`)
//! → present (`tui` or the `report` CLI subcommand).

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
