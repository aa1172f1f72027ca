//! List layout: one book per row.
//!
//! Columns are TITLE, AUTHOR, YEAR, GENRE and RATING. Year, genre and rating
//! have fixed widths; title and author share whatever is left.

use crate::ui::helpers::{self, fit, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const YEAR_WIDTH: usize = 6;
const GENRE_WIDTH: usize = 18;
const RATING_WIDTH: usize = 10;
const GAP: usize = 2;

/// Column widths for a `cols`-wide pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    title: usize,
    author: usize,
}

impl Columns {
    fn for_width(cols: usize) -> Self {
        let fixed = YEAR_WIDTH + GENRE_WIDTH + RATING_WIDTH + GAP * 4;
        let flexible = cols.saturating_sub(fixed);
        let title = flexible * 11 / 20;
        Self {
            title,
            author: flexible - title,
        }
    }
}

/// Renders the column headings. Returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let widths = Columns::for_width(cols);
    let gap = " ".repeat(GAP);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let line = format!(
        "{}{gap}{}{gap}{}{gap}{}{gap}{}",
        fit("TITLE", widths.title),
        fit("AUTHOR", widths.author),
        fit("YEAR", YEAR_WIDTH),
        fit("GENRE", GENRE_WIDTH),
        fit("RATING", RATING_WIDTH),
    );
    print!("{}", truncate(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders one row per item. Returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let widths = Columns::for_width(cols);
    let mut current_row = row;
    for item in items {
        render_table_row(current_row, item, widths, theme, cols);
        current_row += 1;
    }
    current_row
}

/// Selected rows are painted across the full width; match highlighting is
/// skipped on them so the selection colors stay intact.
fn render_table_row(row: usize, item: &DisplayItem, widths: Columns, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    let base_fg = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}", Theme::fg(base_fg));

    let gap = " ".repeat(GAP);
    let mut used = 0;

    used += print_cell(&item.title, &item.title_ranges, widths.title, theme, item.is_selected, base_fg);
    print!("{gap}");
    used += print_cell(&item.author, &item.author_ranges, widths.author, theme, item.is_selected, base_fg);
    print!("{gap}");

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}{gap}", fit(&item.year, YEAR_WIDTH));
    print!("{}{gap}", fit(&item.genre, GENRE_WIDTH));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.star_fg));
    }
    print!("{}", fit(&format!("{} {}", item.stars, item.rating), RATING_WIDTH));
    used += YEAR_WIDTH + GENRE_WIDTH + RATING_WIDTH + GAP * 4;

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}

/// Prints `text` cut to `len` with match highlights, padded to `len`.
fn print_cell(
    text: &str,
    ranges: &[(usize, usize)],
    len: usize,
    theme: &Theme,
    is_selected: bool,
    base_fg: &str,
) -> usize {
    let cut = truncate(text, len);
    helpers::render_highlighted_text(&cut, ranges, theme, is_selected, base_fg);
    print!("{}", " ".repeat(len.saturating_sub(width(&cut))));
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_gets_the_larger_share() {
        let widths = Columns::for_width(120);
        assert_eq!(widths.title + widths.author, 120 - 42);
        assert!(widths.title > widths.author);
    }

    #[test]
    fn narrow_panes_collapse_flexible_columns() {
        assert_eq!(Columns::for_width(30), Columns { title: 0, author: 0 });
    }
}
