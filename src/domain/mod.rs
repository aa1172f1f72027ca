//! Domain layer for the Folio plugin.
//!
//! Core types that are independent of Zellij APIs and of the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record and its lenient JSON decoding

pub mod book;
pub mod error;

pub use book::Book;
pub use error::{FolioError, Result};
