//! Storage layer for persistent user preferences.
//!
//! Only the worker touches storage. Today the single preference is the theme.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `models`: Record types and well-known keys

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use models::{PreferenceRecord, THEME_KEY};
