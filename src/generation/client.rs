//! Submission and download of generated papers.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use super::service::RenderingService;
use super::{ArtifactHandle, GenerationError, ARTIFACT_FILENAME};
use crate::paper::PaperDocument;

struct StoredArtifact {
    handle: ArtifactHandle,
    bytes: Vec<u8>,
}

/// Per-session generation state: at most one request in flight and at most
/// one retained artifact.
pub struct GenerationClient<S> {
    service: S,
    in_flight: tokio::sync::Mutex<()>,
    artifact: Mutex<Option<StoredArtifact>>,
}

impl<S: RenderingService> GenerationClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            in_flight: tokio::sync::Mutex::new(()),
            artifact: Mutex::new(None),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate `document`, send it for rendering and retain the result.
    ///
    /// A second call while one is outstanding fails with
    /// [`GenerationError::SubmissionInProgress`]. Failed submissions leave the
    /// previously retained artifact untouched.
    pub async fn submit(&self, document: &PaperDocument) -> Result<ArtifactHandle, GenerationError> {
        document
            .validate_for_submission()
            .into_result()
            .map_err(GenerationError::InvalidDocument)?;

        let _in_flight = self
            .in_flight
            .try_lock()
            .map_err(|_| GenerationError::SubmissionInProgress)?;

        log::info!(
            "Submitting '{}' ({} authors, {} sections) for rendering",
            document.title,
            document.authors.len(),
            document.sections.len()
        );

        let response = self.service.render(document).await.map_err(|e| {
            log::warn!("Rendering request failed: {}", e);
            GenerationError::TransportFailure(e.to_string())
        })?;

        if !response.is_success() {
            log::warn!("Rendering service rejected the paper with status {}", response.status);
            return Err(GenerationError::ServiceRejected {
                status: response.status,
            });
        }

        if response.body.is_empty() {
            log::warn!("Rendering service returned status {} without a document", response.status);
            return Err(GenerationError::ServiceRejected {
                status: response.status,
            });
        }

        let handle = ArtifactHandle::new(response.body.len());
        let previous = self.artifact.lock().replace(StoredArtifact {
            handle: handle.clone(),
            bytes: response.body,
        });
        if let Some(previous) = previous {
            log::debug!("Released superseded artifact {}", previous.handle.id);
        }

        log::info!("Paper generated ({} bytes), artifact {}", handle.size, handle.id);
        Ok(handle)
    }

    /// Write the artifact behind `handle` to `directory/ieee_conference_paper.pdf`.
    ///
    /// Delivery consumes the artifact; each handle downloads once.
    pub fn download(
        &self,
        handle: &ArtifactHandle,
        directory: &Path,
    ) -> Result<PathBuf, GenerationError> {
        let mut slot = self.artifact.lock();
        let stored = match slot.as_ref() {
            Some(stored) if stored.handle.id == handle.id => stored,
            _ => return Err(GenerationError::NoArtifact),
        };

        let path = directory.join(ARTIFACT_FILENAME);
        fs::write(&path, &stored.bytes).map_err(GenerationError::Delivery)?;
        log::info!("Delivered {} to {}", ARTIFACT_FILENAME, path.display());

        *slot = None;
        Ok(path)
    }

    pub fn has_artifact(&self) -> bool {
        self.artifact.lock().is_some()
    }

    /// Handle of the retained artifact, if any.
    pub fn current_handle(&self) -> Option<ArtifactHandle> {
        self.artifact.lock().as_ref().map(|stored| stored.handle.clone())
    }
}
