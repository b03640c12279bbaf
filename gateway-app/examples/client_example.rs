//! Client example driving every financial operation against a local server.
//!
//! Run with: cargo run -p gateway-app --example client_example

use std::net::SocketAddr;
use std::sync::Arc;

use gateway_client::{ClientError, GatewayClient};
use gateway_hex::{StubProcessor, inbound::HttpServer};
use gateway_types::{FinancialRequest, OperationKind, ProcessorRegistry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an ephemeral port and serve the router on it
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");

    let registry = ProcessorRegistry::uniform(Arc::new(StubProcessor::default()));
    let router = HttpServer::new(registry).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = GatewayClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: every operation with a complete request
    // ─────────────────────────────────────────────────────────────────────────

    let req = FinancialRequest {
        mti: "0100".into(),
        processing_code: "000000".into(),
        amount: "1000".into(),
        entry_mode: "051".into(),
        track2: "4761739001010010=22122011758928889".into(),
        terminal_id: "T1".into(),
        merchant_id: "M1".into(),
    };

    for kind in OperationKind::ALL {
        let resp = client.process(kind, &req).await?;
        println!("✅ {:<18} → response_code {}", kind.as_str(), resp.response_code);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: validation failure
    // ─────────────────────────────────────────────────────────────────────────

    let incomplete = FinancialRequest {
        mti: "0100".into(),
        ..FinancialRequest::default()
    };

    match client.authorize(&incomplete).await {
        Err(ClientError::Api {
            status,
            message,
            details,
        }) => {
            println!("❌ {status} {message}");
            if let Some(details) = details {
                println!("{}", serde_json::to_string_pretty(&details)?);
            }
        }
        other => println!("unexpected outcome: {other:?}"),
    }

    Ok(())
}
