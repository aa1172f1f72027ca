//! Background worker for preference storage.
//!
//! Storage I/O runs on a Zellij worker thread so it never blocks rendering.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Message processing over the preference store

pub mod handler;
pub mod messages;

pub use handler::FolioWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
