//! Category tab bar.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CategoryBar;

const SEPARATOR: &str = " │ ";

/// Renders the category labels on one line with the active one highlighted.
///
/// When the labels do not fit, leading tabs are dropped until the active tab
/// does. Returns the next free row.
pub fn render_category_bar(row: usize, bar: &CategoryBar, theme: &Theme, cols: usize) -> usize {
    let first = first_visible(&bar.labels, bar.active, cols.saturating_sub(2));

    position_cursor(row, 1);
    print!(" ");
    let mut used = 1;
    for (i, label) in bar.labels.iter().enumerate().skip(first) {
        let tab = format!(" {label} ");
        let sep = if i == first { "" } else { SEPARATOR };
        if used + width(sep) + width(&tab) > cols {
            break;
        }

        print!("{}{sep}", Theme::fg(&theme.colors.border));
        if i == bar.active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{tab}");
        print!("{}", Theme::reset());
        used += width(sep) + width(&tab);
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    row + 1
}

/// Smallest start index for which tabs `start..=active` fit in `room`.
fn first_visible(labels: &[String], active: usize, room: usize) -> usize {
    let active = active.min(labels.len().saturating_sub(1));
    let mut start = 0;
    while start < active && span_width(&labels[start..=active]) > room {
        start += 1;
    }
    start
}

fn span_width(labels: &[String]) -> usize {
    let tabs: usize = labels.iter().map(|l| width(l) + 2).sum();
    tabs + width(SEPARATOR) * labels.len().saturating_sub(1)
}
