//! Transport to the rendering service.

use async_trait::async_trait;
use thiserror::Error;

use super::GENERATE_PDF_PATH;
use crate::config::ClientConfig;
use crate::paper::PaperDocument;

/// Status and raw body returned by the rendering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response was obtained from the rendering service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// Anything that can turn a paper into a rendered document.
#[async_trait]
pub trait RenderingService: Send + Sync {
    async fn render(&self, document: &PaperDocument) -> Result<ServiceResponse, TransportError>;
}

/// Talks to `POST /api/generate-pdf` over HTTP.
pub struct HttpRenderingService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenderingService {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("ieee-paper-generator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.renderer_url, GENERATE_PDF_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RenderingService for HttpRenderingService {
    async fn render(&self, document: &PaperDocument) -> Result<ServiceResponse, TransportError> {
        log::debug!("POST {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(document).send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            log::debug!("rendering service answered {}", status);
            return Ok(ServiceResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = response.bytes().await?.to_vec();
        log::debug!("rendering service answered {} ({} bytes)", status, body.len());

        Ok(ServiceResponse { status, body })
    }
}
