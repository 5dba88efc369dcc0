mod common;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ieee_paper_generator::generation::{
    GenerationClient, GenerationError, RenderingService, ServiceResponse, TransportError,
    ARTIFACT_FILENAME,
};
use ieee_paper_generator::paper::{DocumentField, PaperDocument};

enum Reply {
    Pdf(Vec<u8>),
    Status(u16),
    Unreachable,
    SlowPdf(Duration, Vec<u8>),
}

/// Rendering service that answers from a script.
struct ScriptedService {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderingService for ScriptedService {
    async fn render(&self, _document: &PaperDocument) -> Result<ServiceResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .pop_front()
            .expect("scripted service ran out of replies");

        match reply {
            Reply::Pdf(body) => Ok(ServiceResponse { status: 200, body }),
            Reply::Status(status) => Ok(ServiceResponse {
                status,
                body: b"{\"error\":\"nope\"}".to_vec(),
            }),
            Reply::Unreachable => Err(TransportError::Other("connection refused".to_string())),
            Reply::SlowPdf(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(ServiceResponse { status: 200, body })
            }
        }
    }
}

#[tokio::test]
async fn test_submit_then_download_once() {
    let client = GenerationClient::new(ScriptedService::new(vec![Reply::Pdf(common::fake_pdf())]));
    let out = tempfile::tempdir().unwrap();

    let handle = client.submit(&common::complete_document()).await.unwrap();
    assert_eq!(handle.size, common::fake_pdf().len());
    assert!(client.has_artifact());

    let path = client.download(&handle, out.path()).unwrap();
    assert_eq!(path, out.path().join(ARTIFACT_FILENAME));
    assert_eq!(std::fs::read(&path).unwrap(), common::fake_pdf());

    let again = client.download(&handle, out.path());
    assert!(matches!(again, Err(GenerationError::NoArtifact)));
    assert!(!client.has_artifact());
}

#[tokio::test]
async fn test_download_before_any_submit() {
    let first = GenerationClient::new(ScriptedService::new(vec![Reply::Pdf(common::fake_pdf())]));
    let other = GenerationClient::new(ScriptedService::new(vec![]));
    let out = tempfile::tempdir().unwrap();

    // A handle minted by another session is not downloadable here.
    let foreign = first.submit(&common::complete_document()).await.unwrap();
    let result = other.download(&foreign, out.path());

    assert!(matches!(result, Err(GenerationError::NoArtifact)));
    assert!(!out.path().join(ARTIFACT_FILENAME).exists());
}

#[tokio::test]
async fn test_invalid_document_is_not_sent() {
    let client = GenerationClient::new(ScriptedService::new(vec![]));

    let err = client.submit(&PaperDocument::new()).await.unwrap_err();
    match err {
        GenerationError::InvalidDocument(violations) => {
            assert!(violations.fields().contains(&"title"));
            assert!(violations.fields().contains(&"authors[0].email"));
        }
        other => panic!("expected InvalidDocument, got {other:?}"),
    }
    assert_eq!(client.service().calls(), 0);
}

#[tokio::test]
async fn test_rejection_keeps_previous_artifact() {
    let client = GenerationClient::new(ScriptedService::new(vec![
        Reply::Pdf(common::fake_pdf()),
        Reply::Status(500),
    ]));
    let doc = common::complete_document();

    let handle = client.submit(&doc).await.unwrap();
    let err = client.submit(&doc).await.unwrap_err();
    assert!(matches!(err, GenerationError::ServiceRejected { status: 500 }));

    assert_eq!(client.current_handle(), Some(handle));
}

#[tokio::test]
async fn test_transport_failure_keeps_previous_artifact() {
    let client = GenerationClient::new(ScriptedService::new(vec![
        Reply::Pdf(common::fake_pdf()),
        Reply::Unreachable,
    ]));
    let doc = common::complete_document();

    let handle = client.submit(&doc).await.unwrap();
    let err = client.submit(&doc).await.unwrap_err();
    assert!(matches!(err, GenerationError::TransportFailure(_)));
    assert!(err.to_string().contains("try again"));

    assert_eq!(client.current_handle(), Some(handle));
}

#[tokio::test]
async fn test_failures_without_prior_artifact_produce_nothing() {
    let client = GenerationClient::new(ScriptedService::new(vec![
        Reply::Status(400),
        Reply::Unreachable,
    ]));
    let doc = common::complete_document();

    assert!(client.submit(&doc).await.is_err());
    assert!(client.submit(&doc).await.is_err());
    assert!(!client.has_artifact());
}

#[tokio::test]
async fn test_success_without_body_is_rejected() {
    let client = GenerationClient::new(ScriptedService::new(vec![Reply::Pdf(Vec::new())]));
    let err = client.submit(&common::complete_document()).await.unwrap_err();
    assert!(matches!(err, GenerationError::ServiceRejected { status: 200 }));
    assert!(!client.has_artifact());
}

#[tokio::test]
async fn test_new_submission_supersedes_handle() {
    let client = GenerationClient::new(ScriptedService::new(vec![
        Reply::Pdf(b"%PDF-first".to_vec()),
        Reply::Pdf(b"%PDF-second".to_vec()),
    ]));
    let mut doc = common::complete_document();
    let out = tempfile::tempdir().unwrap();

    let first = client.submit(&doc).await.unwrap();
    doc.set_field(DocumentField::Title("Revised Title".to_string()));
    let second = client.submit(&doc).await.unwrap();
    assert_ne!(first.id, second.id);

    assert!(matches!(
        client.download(&first, out.path()),
        Err(GenerationError::NoArtifact)
    ));
    let path = client.download(&second, out.path()).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"%PDF-second");
}

#[tokio::test]
async fn test_concurrent_submission_is_rejected() {
    let client = GenerationClient::new(ScriptedService::new(vec![Reply::SlowPdf(
        Duration::from_millis(100),
        common::fake_pdf(),
    )]));
    let doc = common::complete_document();

    let (first, second) = tokio::join!(client.submit(&doc), client.submit(&doc));

    assert!(first.is_ok());
    assert!(matches!(second, Err(GenerationError::SubmissionInProgress)));
    assert_eq!(client.service().calls(), 1);
}

#[tokio::test]
async fn test_failed_delivery_retains_artifact() {
    let client = GenerationClient::new(ScriptedService::new(vec![Reply::Pdf(common::fake_pdf())]));
    let out = tempfile::tempdir().unwrap();
    let missing_dir = out.path().join("does").join("not").join("exist");

    let handle = client.submit(&common::complete_document()).await.unwrap();
    let err = client.download(&handle, &missing_dir).unwrap_err();
    assert!(matches!(err, GenerationError::Delivery(_)));

    assert!(client.download(&handle, out.path()).is_ok());
}
