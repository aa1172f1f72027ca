//! Centered loading, empty, and error messages.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message two rows below `row` with its subtitle under it.
pub fn render_message(row: usize, message: &EmptyState, theme: &Theme, cols: usize) {
    let color = if message.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    print!("{}", Theme::fg(color));
    print_centered(row + 2, &message.message, cols);
    print!("{}", Theme::reset());

    if !message.subtitle.is_empty() {
        print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        print_centered(row + 3, &message.subtitle, cols);
        print!("{}", Theme::reset());
    }
}
