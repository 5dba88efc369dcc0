//! Rendering backend - turns a paper into IEEEtran LaTeX and compiles it.
//!
//! - `latex` - LaTeX source generation
//! - `engine` - `pdflatex` invocation

pub mod engine;
pub mod latex;

pub use engine::LatexRenderEngine;
pub use latex::build_latex_document;

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while compiling a paper.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write LaTeX source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("pdflatex execution failed: {0}")]
    CompilerIo(#[source] std::io::Error),
    #[error("pdflatex exited with status {0}")]
    CompilerExit(i32),
    #[error("pdflatex did not finish within {0:?}")]
    Timeout(Duration),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("pdflatex finished without producing a PDF")]
    MissingOutput,
}
