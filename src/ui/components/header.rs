//! Title bar and status line.

use crate::ui::helpers::{position_cursor, print_centered, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title and, below it, the status line with the result
/// count on the left and the active controls on the right.
///
/// Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print_centered(row, &header.title, cols);
    print!("{}", Theme::reset());

    let status = truncate(&header.status, cols);
    let controls_room = cols.saturating_sub(width(&status) + 2);
    let controls = truncate(&header.controls, controls_room);
    let gap = cols.saturating_sub(width(&status) + width(&controls));

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{status}");
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{controls}");
    print!("{}", Theme::reset());

    row + 2
}
