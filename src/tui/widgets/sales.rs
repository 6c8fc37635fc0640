//! Quantidade de vendas tab layout widget

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::bars::{BarList, BarRow};
use super::filter_bar::FilterBar;
use super::revenue::{render_keybindings, render_metrics, render_separator, TOP_STATES};
use super::tabs::{Tab, TabBar};
use crate::services::{format_number, DashboardTables};
use crate::tui::theme::Theme;
use crate::types::Filters;

const MAX_CONTENT_WIDTH: u16 = 170;

/// Quantidade view: same shape as the Receita tab, charted over sale counts.
pub struct SalesView<'a> {
    tables: &'a DashboardTables,
    filters: &'a Filters,
    seller_total: usize,
    theme: Theme,
}

impl<'a> SalesView<'a> {
    pub fn new(
        tables: &'a DashboardTables,
        filters: &'a Filters,
        seller_total: usize,
        theme: Theme,
    ) -> Self {
        Self {
            tables,
            filters,
            seller_total,
            theme,
        }
    }

    fn state_rows(&self) -> Vec<BarRow> {
        self.tables
            .state_count
            .iter()
            .take(TOP_STATES)
            .map(|row| BarRow {
                label: row.place.clone(),
                value: row.count as f64,
                value_text: format_number(row.count),
                detail: Some(format!("({:.2}, {:.2})", row.lat, row.lon)),
            })
            .collect()
    }

    fn month_rows(&self) -> Vec<BarRow> {
        self.tables
            .monthly_count
            .iter()
            .map(|row| BarRow {
                label: format!("{} {}", row.month_name, row.year),
                value: row.count as f64,
                value_text: format_number(row.count),
                detail: None,
            })
            .collect()
    }

    fn category_rows(&self) -> Vec<BarRow> {
        self.tables
            .category_count
            .iter()
            .map(|row| BarRow {
                label: row.category.clone(),
                value: row.count as f64,
                value_text: format_number(row.count),
                detail: None,
            })
            .collect()
    }
}

impl Widget for SalesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // 0: TabBar
            Constraint::Length(1), // 1: Separator
            Constraint::Length(1), // 2: Filter bar
            Constraint::Length(1), // 3: Blank
            Constraint::Length(2), // 4: Metrics
            Constraint::Length(1), // 5: Blank
            Constraint::Fill(1),   // 6: Charts
            Constraint::Length(1), // 7: Separator
            Constraint::Length(1), // 8: Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Vendas, self.theme).render(chunks[0], buf);
        render_separator(chunks[1], buf, self.theme);
        FilterBar::new(self.filters.clone(), self.seller_total, self.theme)
            .render(chunks[2], buf);
        render_metrics(
            chunks[4],
            buf,
            self.tables.total_revenue,
            self.tables.sale_count,
            self.theme,
        );

        let columns = Layout::horizontal([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(chunks[6]);

        BarList::new("Vendas por estado (top 5)", self.state_rows(), self.theme)
            .render(columns[0], buf);
        BarList::new("Vendas mensais", self.month_rows(), self.theme).render(columns[1], buf);
        BarList::new("Vendas por categoria", self.category_rows(), self.theme)
            .render(columns[2], buf);

        render_separator(chunks[7], buf, self.theme);
        render_keybindings(chunks[8], buf, self.theme);
    }
}
