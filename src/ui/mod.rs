//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Render-ready snapshot types
//! - [`renderer`]: Screen layout
//! - [`components`]: Individual screen parts and overlays
//! - [`helpers`]: Text measurement, stars, highlighting
//! - [`theme`]: Light/dark palettes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeMode, ThemeSet};
pub use viewmodel::{
    BookDetail, Body, CategoryBar, DisplayItem, EmptyState, FiltersPanel, FooterInfo, HeaderInfo,
    LandingInfo, SearchBarInfo, UIViewModel,
};
