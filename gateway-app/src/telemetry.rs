//! Tracing subscriber and OpenTelemetry setup.

use std::time::Duration;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    propagation::TraceContextPropagator,
    trace as sdktrace,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Keeps the exporters alive; flushes pending spans and metrics on shutdown.
pub struct TelemetryGuard {
    tracer_provider: Option<sdktrace::SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!("failed to flush traces: {}", e);
            }
        }
        if let Some(provider) = self.meter_provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!("failed to flush metrics: {}", e);
            }
        }
    }
}

fn init_tracer(
    app_name: &str,
    endpoint: &str,
) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    Ok((provider.tracer(app_name.to_string()), provider))
}

/// Periodic OTLP export of the HTTP metrics recorded by the router.
fn init_meter_provider(endpoint: &str) -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(30))
        .build();

    Ok(SdkMeterProvider::builder().with_reader(reader).build())
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL`. Logs are JSON lines outside local and
/// test environments. Spans are exported over OTLP only when an endpoint is
/// configured, together with the HTTP metrics.
pub fn init(config: &Config) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},gateway_app={level},gateway_hex={level}",
            level = config.log_level
        ))
    });

    let (json, plain) = if config.environment.structured_logs() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    let mut guard = TelemetryGuard {
        tracer_provider: None,
        meter_provider: None,
    };

    let telemetry = match &config.otlp_endpoint {
        Some(endpoint) => {
            let (tracer, tracer_provider) = init_tracer(&config.app_name, endpoint)?;
            guard.tracer_provider = Some(tracer_provider);

            let meter_provider = init_meter_provider(endpoint)?;
            global::set_meter_provider(meter_provider.clone());
            guard.meter_provider = Some(meter_provider);

            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .with(telemetry)
        .try_init()?;

    Ok(guard)
}
