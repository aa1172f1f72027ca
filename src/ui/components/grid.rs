//! Grid layout: books as fixed-size cards, row-major.
//!
//! ```text
//! ┃ Dune                     ┃ Neuromancer
//! ┃ Frank Herbert            ┃ William Gibson
//! ┃ ★★★★◐ 4.5                ┃ ★★★★☆ 4.1
//! ┃ 1965 · Science Fiction   ┃ 1984 · Cyberpunk
//! ```

use crate::ui::helpers::{self, fit, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, CARD_GAP, CARD_HEIGHT, CARD_WIDTH};

/// Left edge mark; the selected card's is drawn in the accent color.
const EDGE: char = '┃';

/// Renders `items` in rows of `columns` cards. Returns the next free row.
pub fn render_grid(row: usize, items: &[DisplayItem], columns: usize, theme: &Theme) -> usize {
    let columns = columns.max(1);
    let mut top = row;

    for chunk in items.chunks(columns) {
        for (i, item) in chunk.iter().enumerate() {
            let left = 2 + i * (CARD_WIDTH + CARD_GAP);
            render_card(top, left, item, theme);
        }
        top += CARD_HEIGHT + 1;
    }
    top
}

fn render_card(top: usize, left: usize, item: &DisplayItem, theme: &Theme) {
    let inner = CARD_WIDTH - 2;
    let edge = if item.is_selected {
        &theme.colors.accent
    } else {
        &theme.colors.border
    };
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    let start_line = |line: usize| {
        position_cursor(top + line, left);
        print!("{}{EDGE} ", Theme::fg(edge));
        if item.is_selected {
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        }
    };

    start_line(0);
    print!("{}{}", Theme::bold(), Theme::fg(base_fg));
    let title = truncate(&item.title, inner);
    helpers::render_highlighted_text(&title, &item.title_ranges, theme, item.is_selected, base_fg);
    print!("{}", " ".repeat(inner.saturating_sub(width(&title))));
    print!("{}", Theme::reset());

    start_line(1);
    print!("{}", Theme::fg(base_fg));
    let author = truncate(&item.author, inner);
    helpers::render_highlighted_text(&author, &item.author_ranges, theme, item.is_selected, base_fg);
    print!("{}", " ".repeat(inner.saturating_sub(width(&author))));
    print!("{}", Theme::reset());

    start_line(2);
    print!("{}", Theme::fg(if item.is_selected { base_fg } else { &theme.colors.star_fg }));
    let rating = format!("{} {}", item.stars, item.rating);
    let price_room = inner.saturating_sub(width(&rating) + 1);
    let price = truncate(&item.price, price_room);
    print!("{rating}");
    print!("{}", " ".repeat(inner.saturating_sub(width(&rating) + width(&price))));
    print!("{}", Theme::fg(if item.is_selected { base_fg } else { &theme.colors.price_fg }));
    print!("{price}");
    print!("{}", Theme::reset());

    start_line(3);
    print!("{}", Theme::fg(if item.is_selected { base_fg } else { &theme.colors.text_dim }));
    print!("{}", fit(&meta_line(item), inner));
    print!("{}", Theme::reset());
}

/// `"1965 · Science Fiction"`, with either part omitted when empty.
fn meta_line(item: &DisplayItem) -> String {
    match (item.year.is_empty(), item.genre.is_empty()) {
        (false, false) => format!("{} · {}", item.year, item.genre),
        (false, true) => item.year.clone(),
        (true, false) => item.genre.clone(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(year: &str, genre: &str) -> DisplayItem {
        DisplayItem {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            year: year.into(),
            genre: genre.into(),
            rating: "4.5".into(),
            stars: "★★★★◐".into(),
            price: String::new(),
            is_selected: false,
            title_ranges: vec![],
            author_ranges: vec![],
        }
    }

    #[test]
    fn meta_line_skips_missing_parts() {
        assert_eq!(meta_line(&item("1965", "Science Fiction")), "1965 · Science Fiction");
        assert_eq!(meta_line(&item("", "Fantasy")), "Fantasy");
        assert_eq!(meta_line(&item("", "")), "");
    }
}
