//! Landing page shown before the first browse or search.

use crate::ui::helpers::{print_centered, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LandingInfo;

/// Renders the landing block vertically centered between `row` and `bottom`.
///
/// Hints are left-aligned as a block so their key columns line up.
pub fn render_landing(row: usize, bottom: usize, info: &LandingInfo, theme: &Theme, cols: usize) {
    let height = 3 + info.hints.len();
    let top = row + bottom.saturating_sub(row).saturating_sub(height) / 2;

    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    print_centered(top, &info.title, cols);
    print!("{}", Theme::reset());

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(top + 1, &info.tagline, cols);
    print!("{}", Theme::reset());

    let block = info.hints.iter().map(|h| width(h)).max().unwrap_or(0);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    for (i, hint) in info.hints.iter().enumerate() {
        let padded = format!("{hint}{}", " ".repeat(block - width(hint)));
        print_centered(top + 3 + i, &padded, cols);
    }
    print!("{}", Theme::reset());
}
