//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → rotating JSON file
//! ```
//!
//! Spans land in `~/.local/share/zellij/folio/folio-otlp.json`, one OTLP
//! document per line. The file rotates at 10 MB and keeps three backups.
//!
//! The level comes from the `trace_level` plugin option and defaults to `info`.
//! Any `EnvFilter` directive works, e.g. `folio=debug`.
//!
//! # Modules
//!
//! - `exporter`: Span exporter and OTLP JSON formatting
//! - `rotation`: Size-rotated file writer

mod exporter;
mod rotation;

pub use rotation::RotationLimits;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every exported batch.
pub const SERVICE_NAME: &str = "Folio";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "folio-otlp.json";

/// Level used when none is configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Observability is optional: if the data directory cannot be created nothing
/// is installed. Later calls are no-ops, so the plugin and worker threads may
/// both call this.
///
/// # Example
///
/// ```rust,no_run
/// use folio::observability::init_tracing;
/// use folio::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(
        data_dir.join(TRACE_FILE),
        resource,
        RotationLimits::default(),
    );
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer));

    let _ = subscriber.try_init();
}
