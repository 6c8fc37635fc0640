//! Horizontal bar lists standing in for the original's bar charts

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Format a proportional bar.
/// Example: value=500, max=1000, width=8 → "▓▓▓▓░░░░"
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = value / max;
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width); // Clamp to prevent overflow when ratio > 1.0
    let empty = width.saturating_sub(filled);
    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}

/// One chart row: group label, scaling value, formatted value text, and an
/// optional dim detail suffix (e.g. coordinates)
#[derive(Debug, Clone)]
pub struct BarRow {
    pub label: String,
    pub value: f64,
    pub value_text: String,
    pub detail: Option<String>,
}

/// Label column width in a bar list
const LABEL_WIDTH: usize = 18;
/// Bar column width
const BAR_WIDTH: usize = 20;

/// Titled list of labelled proportional bars. Tolerates zero rows (renders
/// the title plus a "sem dados" hint).
pub struct BarList {
    title: String,
    rows: Vec<BarRow>,
    theme: Theme,
}

impl BarList {
    pub fn new(title: impl Into<String>, rows: Vec<BarRow>, theme: Theme) -> Self {
        Self {
            title: title.into(),
            rows,
            theme,
        }
    }

    /// Rows rendered for a given area height (title takes one line)
    pub fn visible_rows(&self, height: u16) -> usize {
        self.rows.len().min(height.saturating_sub(1) as usize)
    }
}

impl Widget for BarList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_string(
            area.x,
            area.y,
            &self.title,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        if self.rows.is_empty() {
            if area.height > 1 {
                buf.set_string(
                    area.x,
                    area.y + 1,
                    "sem dados",
                    Style::default().fg(self.theme.muted()),
                );
            }
            return;
        }

        let max = self
            .rows
            .iter()
            .map(|r| r.value)
            .fold(f64::NEG_INFINITY, f64::max)
            .max(0.0);

        let visible = self.visible_rows(area.height);
        for (i, row) in self.rows.iter().take(visible).enumerate() {
            let y = area.y + 1 + i as u16;

            // Truncate long labels (UTF-8 safe)
            let label = if row.label.chars().count() > LABEL_WIDTH {
                format!(
                    "{}…",
                    row.label
                        .chars()
                        .take(LABEL_WIDTH - 1)
                        .collect::<String>()
                )
            } else {
                row.label.clone()
            };

            let bar = format_bar(row.value, max, BAR_WIDTH);

            let mut spans = vec![
                Span::styled(
                    format!("{:<width$}", label, width = LABEL_WIDTH),
                    Style::default().fg(self.theme.accent()),
                ),
                Span::raw(" "),
                Span::styled(bar, Style::default().fg(self.theme.bar())),
                Span::raw(" "),
                Span::styled(
                    format!("{:>14}", row.value_text),
                    Style::default().fg(self.theme.text()),
                ),
            ];
            if let Some(detail) = &row.detail {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    detail.clone(),
                    Style::default().fg(self.theme.muted()),
                ));
            }

            let line = Line::from(spans);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== format_bar tests ==========

    #[test]
    fn test_format_bar_zero_max() {
        assert_eq!(format_bar(10.0, 0.0, 5), "░░░░░");
    }

    #[test]
    fn test_format_bar_half() {
        assert_eq!(format_bar(500.0, 1000.0, 8), "▓▓▓▓░░░░");
    }

    #[test]
    fn test_format_bar_full() {
        assert_eq!(format_bar(1000.0, 1000.0, 4), "▓▓▓▓");
    }

    #[test]
    fn test_format_bar_clamps_over_max() {
        assert_eq!(format_bar(2000.0, 1000.0, 4), "▓▓▓▓");
    }

    #[test]
    fn test_format_bar_zero_width() {
        assert_eq!(format_bar(500.0, 1000.0, 0), "");
    }

    // ========== BarList tests ==========

    fn make_rows() -> Vec<BarRow> {
        vec![
            BarRow {
                label: "SP".to_string(),
                value: 400.0,
                value_text: "R$ 400.00 ".to_string(),
                detail: None,
            },
            BarRow {
                label: "RJ".to_string(),
                value: 200.0,
                value_text: "R$ 200.00 ".to_string(),
                detail: Some("(-22.25, -42.66)".to_string()),
            },
        ]
    }

    #[test]
    fn test_visible_rows_limited_by_height() {
        let list = BarList::new("Top estados", make_rows(), Theme::Dark);
        assert_eq!(list.visible_rows(2), 1); // title takes one line
        assert_eq!(list.visible_rows(10), 2);
        assert_eq!(list.visible_rows(0), 0);
    }

    #[test]
    fn test_empty_list_renders_without_panicking() {
        let list = BarList::new("Receita por estado", Vec::new(), Theme::Dark);
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);
    }

    #[test]
    fn test_render_into_tiny_area_is_safe() {
        let list = BarList::new("Receita", make_rows(), Theme::Dark);
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);
    }
}
