use opentelemetry::trace::TraceError;
use thiserror::Error;
use tokio::time;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, EnvFilter, Registry};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("failed to install the jaeger pipeline: {0}")]
    Exporter(#[from] TraceError),

    #[error(transparent)]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Initializes application tracing.
///
/// spans and events are always printed to stdout, filtered by `RUST_LOG` (defaults to `info`),
/// when `export_to_jaeger` is set spans are also exported to a jaeger agent.
pub fn init(service_name: &str, export_to_jaeger: bool) -> Result<(), TracerError> {
    let telemetry = if export_to_jaeger {
        opentelemetry::global::set_text_map_propagator(opentelemetry_jaeger::Propagator::new());

        let tracer = opentelemetry_jaeger::new_agent_pipeline()
            .with_service_name(service_name)
            .with_auto_split_batch(true)
            .install_batch(opentelemetry::runtime::Tokio)?;

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = Registry::default()
        .with(telemetry)
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    tracing::subscriber::set_global_default(subscriber)?;

    println!("[TRACER] initialized as service: {}", service_name);
    Ok(())
}

/// `opentelemetry::global::shutdown_tracer_provider()` blocks and might hang forever,
/// so it is run on the blocking pool, see:
///
/// https://github.com/open-telemetry/opentelemetry-rust/issues/868
fn shutdown_trace_provider() {
    println!("[TRACER] shutting down");
    opentelemetry::global::shutdown_tracer_provider();
}

/// Shutdowns tracing with a 500 millisecond timeout to export all non exported spans.
pub async fn shutdown() {
    tokio::select! {
        _ = time::sleep(time::Duration::from_millis(500)) => {
            eprintln!("[TRACER] gracefull shutdown failed");
        },
        _ = tokio::task::spawn_blocking(shutdown_trace_provider) => {
            println!("[TRACER] gracefull shutdown ok");
        }
    }
}
