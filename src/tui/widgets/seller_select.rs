//! Seller multi-select popup

use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const POPUP_WIDTH: u16 = 40;

/// Selection state for the seller filter popup.
///
/// `selected` mirrors `names` index-for-index. Applying a selection where
/// every name is checked (or none is) clears the filter entirely.
pub struct SellerSelect {
    names: Vec<String>,
    selected: Vec<bool>,
    cursor: usize,
}

impl SellerSelect {
    pub fn new(names: Vec<String>, active: &HashSet<String>) -> Self {
        let selected = names
            .iter()
            .map(|name| active.is_empty() || active.contains(name))
            .collect();
        Self {
            names,
            selected,
            cursor: 0,
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.names.len() {
            self.cursor += 1;
        }
    }

    /// Toggle the seller under the cursor
    pub fn toggle(&mut self) {
        if let Some(flag) = self.selected.get_mut(self.cursor) {
            *flag = !*flag;
        }
    }

    /// Check every seller, or uncheck every seller if all are checked
    pub fn toggle_all(&mut self) {
        let all_checked = self.selected.iter().all(|&s| s);
        for flag in &mut self.selected {
            *flag = !all_checked;
        }
    }

    /// Resolve the selection into a filter set. An empty set means no
    /// seller filter, so selecting everyone (or no one) maps to empty.
    pub fn apply(&self) -> HashSet<String> {
        let checked: Vec<&String> = self
            .names
            .iter()
            .zip(&self.selected)
            .filter(|(_, &sel)| sel)
            .map(|(name, _)| name)
            .collect();
        if checked.is_empty() || checked.len() == self.names.len() {
            HashSet::new()
        } else {
            checked.into_iter().cloned().collect()
        }
    }
}

/// Popup widget rendering a [`SellerSelect`] as a checkbox list.
pub struct SellerSelectPopup<'a> {
    state: &'a SellerSelect,
    theme: Theme,
}

impl<'a> SellerSelectPopup<'a> {
    pub fn new(state: &'a SellerSelect, theme: Theme) -> Self {
        Self { state, theme }
    }

    /// Popup area centered in `area`, sized to the seller list
    pub fn centered_area(&self, area: Rect) -> Rect {
        // rows + border + hint line
        let height = (self.state.names.len() as u16 + 4).min(area.height);
        let width = POPUP_WIDTH.min(area.width);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Widget for SellerSelectPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Vendedores ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height.saturating_sub(1) as usize;
        // Keep the cursor on screen
        let offset = self.state.cursor.saturating_sub(visible.saturating_sub(1));

        for (row, idx) in (offset..self.state.names.len()).take(visible).enumerate() {
            let checked = if self.state.selected[idx] { "[x]" } else { "[ ]" };
            let is_cursor = idx == self.state.cursor;
            let marker = if is_cursor { "> " } else { "  " };
            let style = if is_cursor {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text())
            };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(self.theme.accent())),
                Span::styled(format!("{} ", checked), style),
                Span::styled(self.state.names[idx].clone(), style),
            ]);
            Paragraph::new(line).render(
                Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
                buf,
            );
        }

        if inner.height > 0 {
            let hint = Line::from(Span::styled(
                "Espaço marca · a todos · Enter aplica",
                Style::default().fg(self.theme.muted()),
            ));
            Paragraph::new(hint).alignment(Alignment::Center).render(
                Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
                buf,
            );
        }
    }
}
