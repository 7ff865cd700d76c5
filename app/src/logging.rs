use opentelemetry::trace::TracerProvider as _;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber
///
/// Log lines go to stdout, filtered by `RUST_LOG` (default `info`).
/// With `trace_stdout` spans are additionally exported by the
/// OpenTelemetry stdout exporter.
pub fn init(trace_stdout: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let telemetry = if trace_stdout {
        let provider = opentelemetry_sdk::trace::TracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("irrigo");
        let _ = opentelemetry::global::set_tracer_provider(provider);
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(telemetry)
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Flushes pending spans, no-op without a tracer provider
pub fn shutdown() {
    opentelemetry::global::shutdown_tracer_provider();
}
