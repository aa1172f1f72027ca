//! Catalog backend protocol.
//!
//! Folio never performs I/O itself: the app layer emits fetch actions carrying a
//! URL and a [`RequestTag`], the plugin shim hands them to Zellij's `web_request`,
//! and the result comes back as an event decoded here.
//!
//! - [`request`]: URL building and request tagging
//! - [`response`]: Status checking and lenient JSON decoding

pub mod request;
pub mod response;

pub use request::{BookQuery, Endpoint, RequestKind, RequestTag};
pub use response::{decode_book, decode_books};
