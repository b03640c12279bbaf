//! # Payment Gateway Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and tracing
//! - Register a processor for every operation kind
//! - Start the HTTP server

mod config;
mod telemetry;

use std::sync::Arc;

use gateway_hex::{
    StubProcessor,
    inbound::{HandlerSettings, HttpServer},
};
use gateway_types::ProcessorRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing subscriber
    let telemetry = telemetry::init(&config)?;

    tracing::info!(
        app = %config.app_name,
        environment = %config.environment,
        "Starting payment gateway on {}",
        config.bind_addr()
    );

    // Every operation kind is served by the stub until a switch adapter exists
    let processors =
        ProcessorRegistry::uniform(Arc::new(StubProcessor::new(&config.stub_response_code)));

    let settings = HandlerSettings {
        request_timeout: config.request_timeout,
        expose_internal_errors: config.expose_internal_errors,
    };

    // Create and run the HTTP server
    let server = HttpServer::with_settings(processors, settings);
    server.run(&config.bind_addr()).await?;

    tracing::info!("Server exiting");

    // Ensure traces are flushed before exit
    telemetry.shutdown();
    Ok(())
}
