//! Advanced filters panel, drawn over the body.

use super::render_frame;
use crate::app::modes::FilterField;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FiltersPanel;

const PANEL_WIDTH: usize = 44;
const PANEL_HEIGHT: usize = 8;

/// Renders the panel centered in the pane.
///
/// ```text
/// ┌ Filters ─────────────────────────────────┐
/// │                                          │
/// │ ▸ Genre      ◂ Science Fiction ▸         │
/// │   Min year   1960▏                       │
/// │                                          │
/// │ Leave year empty for any year            │
/// └──────────────────────────────────────────┘
/// ```
pub fn render_filters_panel(panel: &FiltersPanel, theme: &Theme, rows: usize, cols: usize) {
    let width = PANEL_WIDTH.min(cols.saturating_sub(2)).max(12);
    let inner = width - 4;
    let top = rows.saturating_sub(PANEL_HEIGHT) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;

    render_frame(top, left, width, PANEL_HEIGHT, "Filters", &theme.colors.accent);

    let genre_focused = panel.focus == FilterField::Genre;
    let fields = [
        ("Genre", format!("◂ {} ▸", panel.genre), genre_focused),
        (
            "Min year",
            if genre_focused { panel.year.clone() } else { format!("{}▏", panel.year) },
            !genre_focused,
        ),
    ];

    for (i, (label, value, focused)) in fields.iter().enumerate() {
        position_cursor(top + 2 + i, left + 2);
        let marker = if *focused { "▸ " } else { "  " };
        let color = if *focused {
            &theme.colors.accent
        } else {
            &theme.colors.text_normal
        };
        print!("{}", Theme::fg(color));
        if *focused {
            print!("{}", Theme::bold());
        }
        print!("{}", fit(&format!("{marker}{label:<10} {value}"), inner));
        print!("{}", Theme::reset());
    }

    position_cursor(top + 5, left + 2);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit("Leave year empty for any year", inner));
    print!("{}", Theme::reset());
}
