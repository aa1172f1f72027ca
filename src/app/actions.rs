//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns `Action`s and the plugin shim
//! performs them: web requests, timers, opening links, worker messages.
//!
//! # Example
//!
//! ```rust
//! use folio::api::{RequestKind, RequestTag};
//! use folio::Action;
//!
//! let fetch = Action::FetchBooks {
//!     url: "http://localhost:5000/books?q=dune".into(),
//!     tag: RequestTag::new(RequestKind::List, 1),
//! };
//! ```

use crate::api::RequestTag;
use crate::worker::WorkerMessage;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Starts a host timer; its expiry comes back as `Event::DebounceElapsed`.
    ScheduleTimer { delay: Duration },

    /// `GET` the list endpoint; the result comes back as `Event::WebResponse`.
    FetchBooks { url: String, tag: RequestTag },

    /// `GET` a single book for the detail modal.
    FetchBook { url: String, tag: RequestTag },

    /// Opens a URL outside the terminal with the configured opener.
    OpenLink { url: String },

    /// Posts a message to the background worker.
    PostToWorker(WorkerMessage),
}
