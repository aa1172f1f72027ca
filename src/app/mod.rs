//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the catalog, api, and worker
//! layers. Data flows one way:
//!
//! ```text
//! Keys / Timers / Web results → Events → handle_event → State → Actions → Host calls
//!                                   ↑                                        ↓
//!                                   └──────────── Worker responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the handler
//! - [`debounce`]: Search-as-you-type debounce bookkeeping
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input modes, pages, layouts, and load status
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::Debounce;
pub use handler::{handle_event, Event};
pub use modes::{FilterField, InputMode, LayoutMode, LoadStatus, Page, SearchFocus};
pub use state::AppState;
