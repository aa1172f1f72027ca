//! Preference worker.
//!
//! Runs on a Zellij worker thread so disk I/O never blocks rendering. The
//! plugin shim owns the Zellij trait impls; this type only turns JSON payloads
//! into JSON replies.

use crate::domain::error::{FolioError, Result};
use crate::infrastructure::paths;
use crate::storage::{JsonStorage, Storage};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Worker-side state. Storage opens lazily on the first message.
#[derive(Serialize, Deserialize, Default)]
pub struct FolioWorker {
    #[serde(skip)]
    storage: Option<Box<dyn Storage>>,
}

impl FolioWorker {
    /// Opens a worker over the preference file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open(path: PathBuf) -> Result<Self> {
        let storage: Box<dyn Storage> = Box::new(JsonStorage::new(path)?);
        Ok(Self {
            storage: Some(storage),
        })
    }

    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        if self.storage.is_none() {
            *self = Self::open(paths::preferences_path())?;
        }
        self.storage
            .as_mut()
            .ok_or_else(|| FolioError::Worker("Storage not initialized".to_string()))
    }

    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_preferences(&mut self) -> WorkerResponse {
        Self::handle_db_result(
            "load preferences",
            self.get_storage().and_then(|storage| storage.all_preferences()),
            |records| {
                let preferences: BTreeMap<String, String> =
                    records.into_iter().map(|r| (r.key, r.value)).collect();
                tracing::debug!(count = preferences.len(), "preferences loaded");
                WorkerResponse::PreferencesLoaded { preferences }
            },
        )
    }

    fn handle_save_preference(&mut self, key: String, value: &str) -> WorkerResponse {
        Self::handle_db_result(
            "save preference",
            self.get_storage()
                .and_then(|storage| storage.set_preference(&key, value)),
            |()| WorkerResponse::PreferenceSaved { key },
        )
    }

    /// Joins the sender's trace, if the message carries one.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Processes one message.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadPreferences { .. } => self.handle_load_preferences(),
            WorkerMessage::SavePreference { key, value, .. } => self.handle_save_preference(key, &value),
        }
    }

    /// Decodes a JSON [`WorkerMessage`], handles it, and encodes the reply.
    ///
    /// `None` means there is nothing to send back: the payload was not a message
    /// or the reply could not be encoded.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);
        match serde_json::to_string(&response) {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}
