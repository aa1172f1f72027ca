//! Search input box.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin on each side of the box.
const SEARCH_BOX_MARGIN: usize = 5;

const CURSOR: char = '▏';

/// Renders a three-line bordered box holding the query.
///
/// ```text
/// [margin] ┌─────────────────────┐ [margin]
/// [margin] │ Search: dune▏       │ [margin]
/// [margin] └─────────────────────┘ [margin]
/// ```
///
/// A focused box uses the accent color and shows a cursor after the query.
/// Long queries keep their tail visible.
///
/// Returns the next free row.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.accent
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let label = " Search: ";
    let room = inner_width.saturating_sub(width(label) + 1);
    let query = tail(&search.query, room);
    let mut text = format!("{label}{query}");
    if search.is_focused {
        text.push(CURSOR);
    }
    let text = truncate(&text, inner_width);
    let padding = inner_width.saturating_sub(width(&text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Last `max` characters of `text`, led by `…` when cut.
fn tail(text: &str, max: usize) -> String {
    let len = width(text);
    if len <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::from('…');
    out.extend(text.chars().skip(len - (max - 1)));
    out
}

#[cfg(test)]
mod tests {
    use super::tail;

    #[test]
    fn long_queries_keep_their_end() {
        assert_eq!(tail("the lord of the rings", 8), "…e rings");
        assert_eq!(tail("dune", 8), "dune");
        assert_eq!(tail("dune", 0), "");
    }
}
