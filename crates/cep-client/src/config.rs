use std::time::Duration;

use cep_core::AppError;
use url::Url;

/// Environment variable overriding the lookup endpoint.
pub const ENDPOINT_ENV: &str = "CORREIOS_CEP_URL";

pub const DEFAULT_ENDPOINT: &str =
    "http://www.buscacep.correios.com.br/sistemas/buscacep/resultadoBuscaCepEndereco.cfm?t";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Correios lookup client.
///
/// Resolved once at startup and handed to the fetcher; never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration for `endpoint`, rejecting anything that is not
    /// an absolute http(s) URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AppError> {
        let endpoint = endpoint.into();
        let parsed = Url::parse(&endpoint)
            .map_err(|e| AppError::ConfigError(format!("Invalid endpoint '{endpoint}': {e}")))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::ConfigError(format!(
                    "Endpoint scheme '{scheme}' is not allowed (only http/https)"
                )));
            }
        }

        Ok(Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read configuration from environment variables.
    ///
    /// - `CORREIOS_CEP_URL` (optional, defaults to the public Correios endpoint)
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var(ENDPOINT_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::new(raw.trim()),
            _ => Self::new(DEFAULT_ENDPOINT),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
