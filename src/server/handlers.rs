use actix_web::{http::header, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::RenderState;
use crate::generation::ARTIFACT_FILENAME;
use crate::paper::PaperDocument;
use crate::render::{build_latex_document, RenderError};
use crate::ErrorResponse;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StatusResponse {
    pub message: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/",
    tag = "Paper Generation",
    responses(
        (status = 200, description = "Service is running", body = StatusResponse)
    )
)]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        message: "IEEE Paper Generator API is running!".to_string(),
    })
}

/// Render a paper to PDF
#[utoipa::path(
    post,
    path = "/api/generate-pdf",
    tag = "Paper Generation",
    request_body = PaperDocument,
    responses(
        (status = 200, description = "Rendered paper as application/pdf attachment"),
        (status = 400, description = "Paper failed structural validation", body = ErrorResponse),
        (status = 500, description = "Typesetting failed", body = ErrorResponse)
    )
)]
pub async fn generate_pdf(
    state: web::Data<RenderState>,
    document: web::Json<PaperDocument>,
) -> impl Responder {
    let document = document.into_inner();
    log::info!(
        "Received generation request for '{}' ({} authors, {} sections)",
        document.title,
        document.authors.len(),
        document.sections.len()
    );

    let violations = document.validate_for_submission();
    if !violations.is_empty() {
        log::warn!("Rejecting paper: {}", violations);
        return HttpResponse::BadRequest().json(ErrorResponse::invalid_document(&violations));
    }

    let latex_source = build_latex_document(&document);
    match state.engine.render(&latex_source).await {
        Ok(pdf) => {
            log::info!("Rendered {} ({} bytes)", ARTIFACT_FILENAME, pdf.len());
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ARTIFACT_FILENAME),
                ))
                .body(pdf)
        }
        Err(e) => {
            log::error!("Error generating PDF: {}", e);
            HttpResponse::InternalServerError().json(render_failure(&e))
        }
    }
}

fn render_failure(error: &RenderError) -> ErrorResponse {
    match error {
        RenderError::CompilerExit(_) => ErrorResponse::internal_error(
            "LaTeX compilation failed; check the section content and references for invalid markup",
        ),
        other => ErrorResponse::internal_error(&other.to_string()),
    }
}
