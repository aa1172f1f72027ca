//! Top-level rendering coordinator.
//!
//! ```text
//! row 1      (blank)
//! row 2      title
//! row 3      status / controls
//! row 4      ──────
//! row 5      category tabs            results page only
//!            search box (3 rows)      while searching or a query is active
//!            body                     landing, message, list, or grid
//! rows - 1   ──────
//! rows       keybinding hints
//! ```
//!
//! The filters panel and the detail modal are drawn last, over the body.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Renders the plugin UI to stdout for a `rows` × `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows = rows, cols = cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, state.theme(), rows, cols);
}

/// Lays out a computed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let footer_row = rows.max(2);
    let footer_border = footer_row - 1;

    let mut row = components::render_header(2, &vm.header, theme, cols);
    row = components::render_border(row, &theme.colors.border, cols);

    if let Some(bar) = &vm.category_bar {
        row = components::render_category_bar(row, bar, theme, cols);
    }
    if let Some(search) = &vm.search_bar {
        row = components::render_search_bar(row, search, theme, cols);
    }

    match &vm.body {
        Body::Landing(info) => components::render_landing(row, footer_border, info, theme, cols),
        Body::Message(message) => components::render_message(row, message, theme, cols),
        Body::List(items) => {
            row = components::render_table_headers(row, theme, cols);
            components::render_table_rows(row, items, theme, cols);
        }
        Body::Grid { items, columns } => {
            components::render_grid(row, items, *columns, theme);
        }
    }

    components::render_border(footer_border, &theme.colors.border, cols);
    components::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(panel) = &vm.filters_panel {
        components::render_filters_panel(panel, theme, rows, cols);
    }
    if let Some(detail) = &vm.modal {
        components::render_modal(detail, theme, rows, cols);
    }
}
