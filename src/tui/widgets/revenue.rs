//! Receita tab layout widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::bars::{BarList, BarRow};
use super::filter_bar::FilterBar;
use super::tabs::{Tab, TabBar};
use crate::services::{format_compact, format_number, DashboardTables};
use crate::tui::theme::Theme;
use crate::types::Filters;

/// States rendered in the ranking list (the source dashboard maps everything
/// but charts only the top five)
pub const TOP_STATES: usize = 5;

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Receita view combining the metric header with state, month and category
/// revenue charts.
pub struct RevenueView<'a> {
    tables: &'a DashboardTables,
    filters: &'a Filters,
    seller_total: usize,
    theme: Theme,
}

impl<'a> RevenueView<'a> {
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
            .state_revenue
            .iter()
            .take(TOP_STATES)
            .map(|row| BarRow {
                label: row.place.clone(),
                value: row.revenue,
                value_text: format_compact(row.revenue, "R$"),
                detail: Some(format!("({:.2}, {:.2})", row.lat, row.lon)),
            })
            .collect()
    }

    fn month_rows(&self) -> Vec<BarRow> {
        self.tables
            .monthly_revenue
            .iter()
            .map(|row| BarRow {
                label: format!("{} {}", row.month_name, row.year),
                value: row.revenue,
                value_text: format_compact(row.revenue, "R$"),
                detail: None,
            })
            .collect()
    }

    fn category_rows(&self) -> Vec<BarRow> {
        self.tables
            .category_revenue
            .iter()
            .map(|row| BarRow {
                label: row.category.clone(),
                value: row.revenue,
                value_text: format_compact(row.revenue, "R$"),
                detail: None,
            })
            .collect()
    }
}

impl Widget for RevenueView<'_> {
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

        TabBar::new(Tab::Receita, self.theme).render(chunks[0], buf);
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

        BarList::new("Receita por estado (top 5)", self.state_rows(), self.theme)
            .render(columns[0], buf);
        BarList::new("Receita mensal", self.month_rows(), self.theme).render(columns[1], buf);
        BarList::new("Receita por categoria", self.category_rows(), self.theme)
            .render(columns[2], buf);

        render_separator(chunks[7], buf, self.theme);
        render_keybindings(chunks[8], buf, self.theme);
    }
}

/// Horizontal rule in the muted color
pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Two-line headline: total revenue and sale count, side by side
pub fn render_metrics(area: Rect, buf: &mut Buffer, revenue: f64, count: usize, theme: Theme) {
    let halves =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let metric = |value: String, label: &'static str| {
        Paragraph::new(vec![
            Line::from(Span::styled(
                value,
                Style::default()
                    .fg(theme.money())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(theme.muted()))),
        ])
        .alignment(Alignment::Center)
    };

    metric(format_compact(revenue, "R$"), "Receita").render(halves[0], buf);
    metric(format_number(count as u64), "Quantidade de vendas").render(halves[1], buf);
}

/// Bottom keybinding hints shared by every tab
pub fn render_keybindings(area: Rect, buf: &mut Buffer, theme: Theme) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent()));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(theme.muted()));

    let bindings = Paragraph::new(Line::from(vec![
        key("Tab"),
        desc(": Trocar aba"),
        Span::raw("  "),
        key("r"),
        desc(": Região"),
        Span::raw("  "),
        key("←→"),
        desc(": Ano"),
        Span::raw("  "),
        key("v"),
        desc(": Vendedores"),
        Span::raw("  "),
        key("?"),
        desc(": Ajuda"),
        Span::raw("  "),
        key("q"),
        desc(": Sair"),
    ]))
    .alignment(Alignment::Center);

    bindings.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SaleRecord, BR_DATE_FORMAT};
    use chrono::NaiveDate;

    fn record(place: &str, price: f64, date: &str, seller: &str) -> SaleRecord {
        SaleRecord {
            category: "livros".to_string(),
            price,
            purchase_date: NaiveDate::parse_from_str(date, BR_DATE_FORMAT).unwrap(),
            place: place.to_string(),
            lat: -10.0,
            lon: -50.0,
            seller: seller.to_string(),
        }
    }

    fn tables() -> DashboardTables {
        let records = vec![
            record("SP", 100.0, "01/01/2022", "Ana"),
            record("RJ", 50.0, "15/02/2022", "Beto"),
            record("SP", 25.0, "10/03/2022", "Ana"),
        ];
        DashboardTables::from_records(&records, &Filters::default())
    }

    #[test]
    fn test_state_rows_capped_at_top_five() {
        let records: Vec<SaleRecord> = (0..8)
            .map(|i| record(&format!("UF{}", i), 10.0, "01/01/2022", "Ana"))
            .collect();
        let tables = DashboardTables::from_records(&records, &Filters::default());
        let filters = Filters::default();
        let view = RevenueView::new(&tables, &filters, 1, Theme::Dark);
        assert_eq!(view.state_rows().len(), TOP_STATES);
    }

    #[test]
    fn test_month_rows_labelled_with_name_and_year() {
        let tables = tables();
        let filters = Filters::default();
        let view = RevenueView::new(&tables, &filters, 2, Theme::Dark);
        let rows = view.month_rows();
        assert_eq!(rows[0].label, "January 2022");
        assert_eq!(rows[1].label, "February 2022");
        assert_eq!(rows[2].label, "March 2022");
    }

    #[test]
    fn test_render_does_not_panic() {
        let tables = tables();
        let filters = Filters::default();
        let view = RevenueView::new(&tables, &filters, 2, Theme::Dark);
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
    }

    #[test]
    fn test_render_empty_tables() {
        let tables = DashboardTables::from_records(&[], &Filters::default());
        let filters = Filters::default();
        let view = RevenueView::new(&tables, &filters, 0, Theme::Light);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
    }
}
