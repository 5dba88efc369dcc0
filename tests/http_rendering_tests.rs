mod common;

use actix_web::{web, App, HttpResponse, HttpServer};
use std::net::TcpListener;
use std::time::Duration;

use ieee_paper_generator::generation::{
    GenerationClient, GenerationError, HttpRenderingService, RenderingService, ARTIFACT_FILENAME,
};
use ieee_paper_generator::ClientConfig;

/// Stand-in renderer: answers with a PDF when the payload carries the wire
/// fields, 400 otherwise.
async fn stub_generate(body: web::Json<serde_json::Value>) -> HttpResponse {
    let has_wire_fields = body.get("dropCapEnabled").is_some()
        && body.get("abstract").is_some()
        && body["authors"][0].get("cityCountry").is_some();

    if has_wire_fields {
        HttpResponse::Ok()
            .content_type("application/pdf")
            .body(common::fake_pdf())
    } else {
        HttpResponse::BadRequest().finish()
    }
}

async fn stub_reject() -> HttpResponse {
    HttpResponse::UnprocessableEntity().body("cannot render")
}

async fn stub_slow() -> HttpResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    HttpResponse::Ok().body(common::fake_pdf())
}

/// Start a stub renderer on an ephemeral port and return its base URL.
fn spawn_stub(route: fn() -> actix_web::Route) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(move || {
        App::new().service(web::resource("/api/generate-pdf").route(route()))
    })
    .workers(1)
    .listen(listener)
    .expect("failed to listen")
    .run();
    tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

fn client_config(renderer_url: String, timeout: Duration) -> ClientConfig {
    ClientConfig {
        renderer_url,
        request_timeout: timeout,
    }
}

#[tokio::test]
async fn test_posts_wire_document_and_receives_pdf() {
    let url = spawn_stub(|| web::post().to(stub_generate));
    let service = HttpRenderingService::new(&client_config(url, Duration::from_secs(10))).unwrap();

    let response = service.render(&common::complete_document()).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, common::fake_pdf());
}

#[tokio::test]
async fn test_end_to_end_download() {
    let url = spawn_stub(|| web::post().to(stub_generate));
    let service = HttpRenderingService::new(&client_config(url, Duration::from_secs(10))).unwrap();
    let client = GenerationClient::new(service);
    let out = tempfile::tempdir().unwrap();

    let handle = client.submit(&common::complete_document()).await.unwrap();
    let path = client.download(&handle, out.path()).unwrap();

    assert!(path.ends_with(ARTIFACT_FILENAME));
    assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_non_success_status_is_service_rejected() {
    let url = spawn_stub(|| web::post().to(stub_reject));
    let service = HttpRenderingService::new(&client_config(url, Duration::from_secs(10))).unwrap();
    let client = GenerationClient::new(service);

    let err = client.submit(&common::complete_document()).await.unwrap_err();
    assert!(matches!(err, GenerationError::ServiceRejected { status: 422 }));
    assert!(!client.has_artifact());
}

#[tokio::test]
async fn test_unreachable_service_is_transport_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}", port);
    let service = HttpRenderingService::new(&client_config(url, Duration::from_secs(5))).unwrap();
    let client = GenerationClient::new(service);

    let err = client.submit(&common::complete_document()).await.unwrap_err();
    assert!(matches!(err, GenerationError::TransportFailure(_)));
    assert!(!client.has_artifact());
}

#[tokio::test]
async fn test_request_timeout_is_transport_failure() {
    let url = spawn_stub(|| web::post().to(stub_slow));
    let service =
        HttpRenderingService::new(&client_config(url, Duration::from_millis(200))).unwrap();
    let client = GenerationClient::new(service);

    let err = client.submit(&common::complete_document()).await.unwrap_err();
    assert!(matches!(err, GenerationError::TransportFailure(_)));
}

#[tokio::test]
async fn test_rejection_with_truncated_body_is_service_rejected() {
    use std::io::{Read, Write};

    // Announces a long error body, sends a few bytes and hangs up.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 8192];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4096\r\n\r\npartial",
            );
            let _ = stream.flush();
        }
    });

    let url = format!("http://127.0.0.1:{}", port);
    let service = HttpRenderingService::new(&client_config(url, Duration::from_secs(5))).unwrap();
    let client = GenerationClient::new(service);

    let err = client.submit(&common::complete_document()).await.unwrap_err();
    assert!(matches!(err, GenerationError::ServiceRejected { status: 503 }));
    assert!(!client.has_artifact());
}
