//! HTTP surface of the rendering service.

pub mod handlers;

use actix_web::{error::InternalError, web, HttpRequest, HttpResponse};

use crate::render::LatexRenderEngine;
use crate::ErrorResponse;

/// Largest accepted request body.
const MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Shared state of the rendering service.
pub struct RenderState {
    pub engine: LatexRenderEngine,
}

impl RenderState {
    pub fn new(engine: LatexRenderEngine) -> Self {
        Self { engine }
    }
}

/// JSON extractor settings: undecodable payloads answer with an `ErrorResponse`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_PAYLOAD_BYTES)
        .error_handler(|err, _req| {
            let message = err.to_string();
            log::warn!("Rejecting malformed paper payload: {}", message);
            InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)),
            )
            .into()
        })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::resource("/").route(web::get().to(handlers::home)))
        .service(
            web::resource("/api/generate-pdf").route(web::post().to(handlers::generate_pdf)),
        )
        .default_service(web::route().to(not_found));
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
