//! Gateway CLI
//!
//! Command-line interface for the payment gateway API.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use gateway_client::{ClientError, GatewayClient};
use gateway_types::{FinancialRequest, OperationKind};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(author, version, about = "Payment gateway CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payment gateway
    #[arg(long, env = "GATEWAY_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a financial operation
    Send {
        /// authorization, pre_authorization, confirmation, cancellation or reversal
        operation: OperationKind,

        #[command(flatten)]
        fields: RequestFields,
    },
    /// List the supported operations and their routes
    Operations,
    /// Check API health
    Health,
}

/// Request fields. Omitted fields are sent empty so the server reports them.
#[derive(Args)]
struct RequestFields {
    /// Message type indicator
    #[arg(long, default_value = "")]
    mti: String,
    #[arg(long, default_value = "")]
    processing_code: String,
    /// Amount in the smallest currency unit
    #[arg(long, default_value = "")]
    amount: String,
    #[arg(long, default_value = "")]
    entry_mode: String,
    /// Track 2 equivalent data
    #[arg(long, default_value = "")]
    track2: String,
    #[arg(long, env = "GATEWAY_TERMINAL_ID", default_value = "")]
    terminal_id: String,
    #[arg(long, env = "GATEWAY_MERCHANT_ID", default_value = "")]
    merchant_id: String,
}

impl From<RequestFields> for FinancialRequest {
    fn from(fields: RequestFields) -> Self {
        FinancialRequest {
            mti: fields.mti,
            processing_code: fields.processing_code,
            amount: fields.amount,
            entry_mode: fields.entry_mode,
            track2: fields.track2,
            terminal_id: fields.terminal_id,
            merchant_id: fields.merchant_id,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = GatewayClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Operations => {
            for kind in OperationKind::ALL {
                println!("{:<18} POST {}", kind.as_str(), kind.path());
            }
        }

        Commands::Send { operation, fields } => {
            let req = FinancialRequest::from(fields);
            match client.process(operation, &req).await {
                Ok(resp) => println!("{}", serde_json::to_string_pretty(&resp)?),
                Err(ClientError::Api {
                    status,
                    message,
                    details,
                }) => {
                    eprintln!("✗ {} {}", status, message);
                    if let Some(details) = details {
                        eprintln!("{}", serde_json::to_string_pretty(&details)?);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_parses_operation_and_fields() {
        let cli = Cli::try_parse_from([
            "gateway",
            "send",
            "pre-authorization",
            "--mti",
            "0100",
            "--amount",
            "1000",
        ])
        .unwrap();

        match cli.command {
            Commands::Send { operation, fields } => {
                assert_eq!(operation, OperationKind::PreAuthorization);
                let req = FinancialRequest::from(fields);
                assert_eq!(req.mti, "0100");
                assert_eq!(req.amount, "1000");
                assert!(req.track2.is_empty());
            }
            _ => panic!("expected send command"),
        }
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        assert!(Cli::try_parse_from(["gateway", "send", "refund"]).is_err());
    }
}
