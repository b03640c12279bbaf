//! Configuration loading from environment.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    Local,
    Dev,
    Hml,
    Stg,
    Prd,
}

impl Environment {
    const ALLOWED: &'static str = "test, local, dev, hml, stg, prd";

    /// Whether logs should be emitted as JSON lines.
    pub fn structured_logs(&self) -> bool {
        !matches!(self, Environment::Test | Environment::Local)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Environment::Test),
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "hml" => Ok(Environment::Hml),
            "stg" => Ok(Environment::Stg),
            "prd" => Ok(Environment::Prd),
            other => Err(anyhow::anyhow!(
                "'{}' is not a valid environment. Use one of [{}]",
                other,
                Self::ALLOWED
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Test => "test",
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Hml => "hml",
            Environment::Stg => "stg",
            Environment::Prd => "prd",
        };
        f.write_str(name)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub app_name: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub expose_internal_errors: bool,
    pub stub_response_code: String,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = var("ENVIRONMENT", "local").parse()?;

        let port = var("PORT", "3000")
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let timeout_ms: u64 = var("REQUEST_TIMEOUT_MS", "10000")
            .parse()
            .map_err(|e| anyhow::anyhow!("REQUEST_TIMEOUT_MS must be milliseconds: {}", e))?;

        let expose_internal_errors = var("EXPOSE_INTERNAL_ERRORS", "true")
            .parse()
            .map_err(|e| anyhow::anyhow!("EXPOSE_INTERNAL_ERRORS must be true or false: {}", e))?;

        Ok(Self {
            environment,
            app_name: var("APP_NAME", "payment-gateway"),
            log_level: var("LOG_LEVEL", "info"),
            host: var("HOST", "0.0.0.0"),
            port,
            request_timeout: Duration::from_millis(timeout_ms),
            expose_internal_errors,
            stub_response_code: var("STUB_RESPONSE_CODE", "00"),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
