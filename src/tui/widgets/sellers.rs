//! Vendedores tab layout widget

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::bars::{BarList, BarRow};
use super::filter_bar::FilterBar;
use super::revenue::{render_keybindings, render_metrics, render_separator};
use super::tabs::{Tab, TabBar};
use crate::services::{format_compact, format_number, Aggregator, DashboardTables};
use crate::tui::theme::Theme;
use crate::types::Filters;

const MAX_CONTENT_WIDTH: u16 = 170;

/// Vendedores view: top-N seller rankings by revenue and by sale count.
pub struct SellersView<'a> {
    tables: &'a DashboardTables,
    filters: &'a Filters,
    seller_total: usize,
    theme: Theme,
}

impl<'a> SellersView<'a> {
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

    fn revenue_rows(&self) -> Vec<BarRow> {
        Aggregator::top_sellers_by_revenue(&self.tables.sellers, self.filters.top_sellers)
            .into_iter()
            .map(|row| BarRow {
                label: row.seller,
                value: row.revenue,
                value_text: format_compact(row.revenue, "R$"),
                detail: None,
            })
            .collect()
    }

    fn count_rows(&self) -> Vec<BarRow> {
        Aggregator::top_sellers_by_count(&self.tables.sellers, self.filters.top_sellers)
            .into_iter()
            .map(|row| BarRow {
                label: row.seller,
                value: row.count as f64,
                value_text: format_number(row.count),
                detail: None,
            })
            .collect()
    }
}

impl Widget for SellersView<'_> {
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

        TabBar::new(Tab::Vendedores, self.theme).render(chunks[0], buf);
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

        let columns =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[6]);

        let n = self.filters.top_sellers;
        BarList::new(
            format!("Top {} vendedores (receita)", n),
            self.revenue_rows(),
            self.theme,
        )
        .render(columns[0], buf);
        BarList::new(
            format!("Top {} vendedores (quantidade de vendas)", n),
            self.count_rows(),
            self.theme,
        )
        .render(columns[1], buf);

        render_separator(chunks[7], buf, self.theme);
        render_keybindings(chunks[8], buf, self.theme);
    }
}
