//! Component renderers.
//!
//! Each component draws one part of the screen at an explicit row and returns
//! the next free row where that makes sense. Overlays (filters panel, modal)
//! position themselves.
//!
//! # Components
//!
//! - `header`: Title and status line
//! - `categories`: Category tabs
//! - `search`: Search input box
//! - `table`: List layout
//! - `grid`: Card layout
//! - `message`: Loading, empty, and error messages
//! - `landing`: Landing page
//! - `filters`: Advanced filters overlay
//! - `modal`: Book detail overlay
//! - `footer`: Keybinding hints

mod categories;
mod filters;
mod footer;
mod grid;
mod header;
mod landing;
mod message;
mod modal;
mod search;
mod table;

pub use categories::render_category_bar;
pub use filters::render_filters_panel;
pub use footer::render_footer;
pub use grid::render_grid;
pub use header::render_header;
pub use landing::render_landing;
pub use message::render_message;
pub use modal::render_modal;
pub use search::render_search_bar;
pub use table::{render_table_headers, render_table_rows};

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;

/// Draws a horizontal rule across the pane. Returns the next free row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws a titled box and blanks its interior.
fn render_frame(
    top: usize,
    left: usize,
    box_width: usize,
    height: usize,
    title: &str,
    color: &str,
) {
    let inner = box_width.saturating_sub(2);
    let label = truncate(&format!(" {title} "), inner);

    position_cursor(top, left);
    print!("{}┌{}", Theme::fg(color), label);
    print!("{}┐", "─".repeat(inner.saturating_sub(width(&label))));

    for row in top + 1..top + height.saturating_sub(1) {
        position_cursor(row, left);
        print!("{}│{}", Theme::fg(color), " ".repeat(inner));
        print!("{}│", Theme::fg(color));
    }

    position_cursor(top + height.saturating_sub(1), left);
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}
