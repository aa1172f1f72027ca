//! Plugin ↔ worker message protocol.
//!
//! Messages cross the thread boundary as JSON. Every request carries an optional
//! [`TraceContext`] so spans opened by the worker join the trace of the plugin
//! event that caused them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trace and parent span ids of the sending span, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current span's OpenTelemetry context.
    ///
    /// `None` when no valid context exists, e.g. before tracing is initialised.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_preferences(LoadPreferences {}),
    save_preference(SavePreference { key: String, value: String }),
}

/// Requests from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read every stored preference.
    LoadPreferences {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Store one preference, replacing any earlier value.
    SavePreference {
        key: String,
        value: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadPreferences { trace_context } | Self::SavePreference { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Replies from the worker to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// All stored preferences, keyed by name.
    PreferencesLoaded { preferences: BTreeMap<String, String> },

    /// A preference was written to disk.
    PreferenceSaved { key: String },

    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_context_empty_without_a_subscriber() {
        let message = WorkerMessage::save_preference("theme".into(), "dark".into());
        assert_eq!(message.trace_context(), None);
    }

    #[test]
    fn context_is_omitted_from_the_payload_when_absent() {
        let payload = serde_json::to_string(&WorkerMessage::load_preferences()).unwrap();
        assert_eq!(payload, r#"{"LoadPreferences":{}}"#);
        let back: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(back, WorkerMessage::LoadPreferences { trace_context: None });
    }
}
