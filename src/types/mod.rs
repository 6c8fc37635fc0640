//! Type definitions for vendas-tui

mod error;
mod sale;
mod tables;

pub use error::*;
pub use sale::*;
pub use tables::*;
