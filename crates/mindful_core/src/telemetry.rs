//! OpenTelemetry integration for distributed tracing.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize OpenTelemetry with a stdout exporter.
///
/// Installs a tracing subscriber with an OpenTelemetry layer and a fmt layer,
/// both honouring `RUST_LOG`. Keep the returned provider and pass it to
/// [`shutdown_telemetry`] before exit so pending spans are flushed.
///
/// # Errors
///
/// Returns error if subscriber initialization fails.
pub fn init_telemetry() -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::builder().with_service_name("mindful").build())
        .build();

    let tracer = provider.tracer("mindful");

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(EnvFilter::from_default_env());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    opentelemetry::global::set_tracer_provider(provider.clone());
    Ok(provider)
}

/// Flush pending spans and shut the provider down.
pub fn shutdown_telemetry(provider: SdkTracerProvider) {
    if let Err(e) = provider.shutdown() {
        eprintln!("Failed to shut down tracer provider: {e}");
    }
}
