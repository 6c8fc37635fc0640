//! Filter status bar - shows the currently active filters

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::types::Filters;

/// Single-line summary of the active region, year, seller and top-N filters.
pub struct FilterBar {
    filters: Filters,
    seller_total: usize,
    theme: Theme,
}

impl FilterBar {
    pub fn new(filters: Filters, seller_total: usize, theme: Theme) -> Self {
        Self {
            filters,
            seller_total,
            theme,
        }
    }

    fn seller_summary(&self) -> String {
        if self.filters.sellers.is_empty() {
            "todos".to_string()
        } else {
            format!("{}/{}", self.filters.sellers.len(), self.seller_total)
        }
    }
}

impl Widget for FilterBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = |text: &'static str| {
            Span::styled(
                text,
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            )
        };
        let value = |text: String| Span::styled(text, Style::default().fg(self.theme.accent()));
        let sep = Span::styled("  │  ", Style::default().fg(self.theme.muted()));

        let line = Line::from(vec![
            label("Região: "),
            value(self.filters.region.label().to_string()),
            sep.clone(),
            label("Ano: "),
            value(self.filters.year.label()),
            sep.clone(),
            label("Vendedores: "),
            value(self.seller_summary()),
            sep,
            label("Top: "),
            value(self.filters.top_sellers.to_string()),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Region;

    #[test]
    fn test_seller_summary_all() {
        let bar = FilterBar::new(Filters::default(), 8, Theme::Dark);
        assert_eq!(bar.seller_summary(), "todos");
    }

    #[test]
    fn test_seller_summary_subset() {
        let mut filters = Filters::default();
        filters.sellers.insert("Ana".to_string());
        filters.sellers.insert("Beto".to_string());
        let bar = FilterBar::new(filters, 8, Theme::Dark);
        assert_eq!(bar.seller_summary(), "2/8");
    }

    #[test]
    fn test_render_does_not_panic() {
        let mut filters = Filters::default();
        filters.region = Region::Nordeste;
        let bar = FilterBar::new(filters, 3, Theme::Light);
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
    }
}
