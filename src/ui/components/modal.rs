//! Book detail modal, drawn over everything else.

use super::render_frame;
use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BookDetail;

const MAX_WIDTH: usize = 72;
const LABEL_WIDTH: usize = 10;

/// Renders the modal centered in the pane.
///
/// Content top to bottom: title, author, star rating, metadata, the wrapped
/// description, and the store link. The description gives up lines first
/// when the pane is short.
pub fn render_modal(detail: &BookDetail, theme: &Theme, rows: usize, cols: usize) {
    let width = MAX_WIDTH.min(cols.saturating_sub(4)).max(20);
    let inner = width - 4;

    let fixed = 3 + 1 + detail.metadata.len() + 1 + 1 + 1;
    let max_height = rows.saturating_sub(2).max(fixed + 3);
    let description_room = max_height.saturating_sub(fixed + 2).max(1);
    let mut description = wrap(&detail.description, inner);
    if description.len() > description_room {
        description.truncate(description_room);
        if let Some(last) = description.last_mut() {
            last.push('…');
        }
    }

    let height = fixed + description.len() + 2;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    render_frame(top, left, width, height, "Details", &theme.colors.accent);

    let mut row = top + 1;
    let mut line = |text: &str, style: String| {
        position_cursor(row, left + 2);
        print!("{style}{}{}", fit(text, inner), Theme::reset());
        row += 1;
    };

    line(&detail.title, format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent)));
    line(&detail.author_line, Theme::fg(&theme.colors.text_dim));
    line(
        &format!("{} {}", detail.stars, detail.rating),
        Theme::fg(&theme.colors.star_fg),
    );
    line("", String::new());
    for (label, value) in &detail.metadata {
        line(
            &format!("{label:<LABEL_WIDTH$}{value}"),
            Theme::fg(&theme.colors.text_normal),
        );
    }
    line("", String::new());
    for text in &description {
        line(text, Theme::fg(&theme.colors.text_normal));
    }
    line("", String::new());
    line(
        &format!("{:<LABEL_WIDTH$}{}", "Link", detail.link),
        format!("{}{}", Theme::underline(), Theme::fg(&theme.colors.accent)),
    );
}
