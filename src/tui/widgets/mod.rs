//! TUI widgets

pub mod bars;
pub mod filter_bar;
pub mod help;
pub mod revenue;
pub mod sales;
pub mod seller_select;
pub mod sellers;
pub mod spinner;
pub mod tabs;
