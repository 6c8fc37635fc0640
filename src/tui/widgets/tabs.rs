//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Available tabs, mirroring the original dashboard's three views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Receita,
    Vendas,
    Vendedores,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::Receita => "Receita",
            Self::Vendas => "Quantidade de vendas",
            Self::Vendedores => "Vendedores",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[Tab::Receita, Tab::Vendas, Tab::Vendedores]
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Receita => Self::Vendas,
            Self::Vendas => Self::Vendedores,
            Self::Vendedores => Self::Receita,
        }
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Receita => Self::Vendedores,
            Self::Vendas => Self::Receita,
            Self::Vendedores => Self::Vendas,
        }
    }

    /// Get tab from number key (1-3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Receita),
            2 => Some(Self::Vendas),
            3 => Some(Self::Vendedores),
            _ => None,
        }
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Calculate total width of all tabs for centering
        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| {
                let label = tab.label();
                let display_len = if *tab == self.selected {
                    label.chars().count() + 2 // "[label]"
                } else {
                    label.chars().count()
                };
                display_len as u16 + 2 // + spacing
            })
            .sum::<u16>()
            .saturating_sub(2); // Remove trailing spacing

        // Center the tabs
        let start_x = area.x + (area.width.saturating_sub(total_width)) / 2;
        let mut x = start_x;

        for tab in Tab::all() {
            let is_selected = *tab == self.selected;
            let label = tab.label();

            let display = if is_selected {
                format!("[{}]", label)
            } else {
                label.to_string()
            };

            let display_len = display.chars().count() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2; // Add spacing between tabs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_labels() {
        assert_eq!(Tab::Receita.label(), "Receita");
        assert_eq!(Tab::Vendas.label(), "Quantidade de vendas");
        assert_eq!(Tab::Vendedores.label(), "Vendedores");
    }

    #[test]
    fn test_tab_all() {
        let all = Tab::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], Tab::Receita);
        assert_eq!(all[1], Tab::Vendas);
        assert_eq!(all[2], Tab::Vendedores);
    }

    #[test]
    fn test_tab_next_wraps() {
        assert_eq!(Tab::Receita.next(), Tab::Vendas);
        assert_eq!(Tab::Vendas.next(), Tab::Vendedores);
        assert_eq!(Tab::Vendedores.next(), Tab::Receita);
    }

    #[test]
    fn test_tab_prev_wraps() {
        assert_eq!(Tab::Receita.prev(), Tab::Vendedores);
        assert_eq!(Tab::Vendedores.prev(), Tab::Vendas);
        assert_eq!(Tab::Vendas.prev(), Tab::Receita);
    }

    #[test]
    fn test_tab_default() {
        assert_eq!(Tab::default(), Tab::Receita);
    }

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::Receita));
        assert_eq!(Tab::from_number(2), Some(Tab::Vendas));
        assert_eq!(Tab::from_number(3), Some(Tab::Vendedores));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(4), None);
    }
}
