use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod generation;
pub mod paper;
pub mod render;
pub mod server;

pub use crate::config::{ClientConfig, ConfigError, ServerConfig};
pub use crate::generation::{ArtifactHandle, GenerationClient, GenerationError};
pub use crate::paper::{PaperDocument, PaperError, ValidationErrors};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    /// One entry per violated rule, for `InvalidDocument` responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<paper::ValidationError>,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            details: Vec::new(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }

    pub fn invalid_document(violations: &ValidationErrors) -> Self {
        let mut response = Self::new(
            "InvalidDocument",
            &format!("{} required field(s) are missing or invalid", violations.len()),
        );
        response.details = violations.as_slice().to_vec();
        response
    }
}

/// Initialise `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::server::handlers::home,
        crate::server::handlers::generate_pdf,
    ),
    components(
        schemas(
            paper::PaperDocument,
            paper::Author,
            paper::Section,
            paper::ValidationError,
            server::handlers::StatusResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Paper Generation", description = "IEEE conference paper rendering.")
    )
)]
pub struct ApiDoc;

pub async fn run() -> std::io::Result<()> {
    init_logging();

    let config = ServerConfig::from_env()
        .inspect_err(|e| log::error!("Invalid server configuration: {}", e))?;

    let state = web::Data::new(server::RenderState::new(
        render::LatexRenderEngine::from_config(&config),
    ));

    let prometheus = PrometheusMetricsBuilder::new("ieee_paper_generator")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!(
        "Starting server at http://{}:{} (compiler: {})",
        config.bind_address,
        config.port,
        config.pdflatex_bin
    );

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);
        if allowed_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(state.clone())
            .configure(server::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
