//! HTTP Server configuration and startup.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName},
    response::Response,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gateway_types::{OperationKind, ProcessorRegistry};

use super::handlers::{self, AppState, HandlerSettings, REQUEST_ID_HEADER};
use super::response::ResponseBuilder;
use crate::openapi::ApiDoc;

/// HTTP Server for the payment gateway.
pub struct HttpServer {
    state: Arc<AppState>,
}

impl HttpServer {
    /// Creates a new HTTP server with default handler settings.
    pub fn new(processors: ProcessorRegistry) -> Self {
        Self::with_settings(processors, HandlerSettings::default())
    }

    /// Creates a new HTTP server with custom handler settings.
    pub fn with_settings(processors: ProcessorRegistry, settings: HandlerSettings) -> Self {
        Self {
            state: Arc::new(AppState {
                processors,
                settings,
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        let mut router: Router<Arc<AppState>> = Router::new()
            .route("/health", get(handlers::health))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

        for kind in OperationKind::ALL {
            tracing::debug!("POST {}", kind.path());
            router = router.route(
                kind.path(),
                post(
                    move |State(state): State<Arc<AppState>>, headers: HeaderMap, body: Bytes| {
                        handlers::process_operation(kind, state, headers, body)
                    },
                ),
            );
        }

        router
            .layer(metrics)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(request_id))
                    .layer(CatchPanicLayer::custom(panic_response)),
            )
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");

    ResponseBuilder::new().mark_internal_error().send()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
