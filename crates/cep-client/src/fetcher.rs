use cep_core::error::AppError;
use cep_core::traits::Fetcher;
use reqwest::Client;
use serde::Serialize;

use crate::config::ClientConfig;

const USER_AGENT: &str = concat!("cep-tracker/", env!("CARGO_PKG_VERSION"));

/// Encoding of Correios pages served without a charset parameter.
const FALLBACK_CHARSET: &str = "iso-8859-1";

/// Form body of a relaxation search, first page of ten rows.
#[derive(Debug, Serialize)]
struct SearchForm<'a> {
    relaxation: &'a str,
    #[serde(rename = "Metodo")]
    metodo: &'static str,
    #[serde(rename = "TipoConsulta")]
    tipo_consulta: &'static str,
    #[serde(rename = "StartRow")]
    start_row: u32,
    #[serde(rename = "EndRow")]
    end_row: u32,
}

impl<'a> SearchForm<'a> {
    fn new(postal_code: &'a str) -> Self {
        Self {
            relaxation: postal_code,
            metodo: "listaLogradouro",
            tipo_consulta: "relaxation",
            start_row: 1,
            end_row: 10,
        }
    }
}

/// HTTP fetcher for the Correios postal-code search, using reqwest.
///
/// Posts a form-encoded relaxation search to the configured endpoint and
/// returns the raw HTML of the result page, decoded as ISO-8859-1 unless the
/// response names another charset. Failures are not retried.
#[derive(Clone)]
pub struct CorreiosFetcher {
    client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl CorreiosFetcher {
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Fetcher for CorreiosFetcher {
    async fn fetch(&self, postal_code: &str) -> Result<String, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&SearchForm::new(postal_code))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                url = %self.endpoint,
                cep = %postal_code,
                "Correios lookup failed"
            );
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        response
            .text_with_charset(FALLBACK_CHARSET)
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}
