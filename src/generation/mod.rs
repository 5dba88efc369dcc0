//! Generation protocol - sends a validated paper to the rendering service and
//! keeps the returned PDF until the author downloads it.
//!
//! - `service` - the `RenderingService` seam and its HTTP implementation
//! - `client` - submission gating, artifact retention and delivery

pub mod client;
pub mod service;

pub use client::GenerationClient;
pub use service::{HttpRenderingService, RenderingService, ServiceResponse, TransportError};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::paper::ValidationErrors;

/// Name of the file the generated paper is delivered as.
pub const ARTIFACT_FILENAME: &str = "ieee_conference_paper.pdf";

/// Path of the rendering endpoint, relative to the service base URL.
pub const GENERATE_PDF_PATH: &str = "/api/generate-pdf";

/// Errors surfaced to the author while generating or downloading a paper.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("the paper is not ready for generation: {0}")]
    InvalidDocument(ValidationErrors),
    #[error("the rendering service rejected the paper (HTTP {status})")]
    ServiceRejected { status: u16 },
    #[error("the rendering service could not be reached: {0}. Please try again")]
    TransportFailure(String),
    #[error("no generated paper is available for download")]
    NoArtifact,
    #[error("a generation request is already in progress")]
    SubmissionInProgress,
    #[error("failed to save ieee_conference_paper.pdf: {0}")]
    Delivery(#[source] std::io::Error),
}

/// Token for the PDF produced by one successful submission.
///
/// The bytes stay with the [`GenerationClient`]; a newer submission
/// supersedes the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHandle {
    pub id: Uuid,
    pub size: usize,
    pub generated_at: DateTime<Utc>,
}

impl ArtifactHandle {
    fn new(size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            size,
            generated_at: Utc::now(),
        }
    }
}
