//! LaTeX rendering engine.
//!
//! Writes the generated source into a private temporary directory, runs
//! `pdflatex` on it and reads the PDF back. The directory is removed when the
//! render finishes.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::tempdir;
use tokio::process::Command;

use super::RenderError;
use crate::config::ServerConfig;

const SOURCE_FILE: &str = "paper.tex";
const OUTPUT_STEM: &str = "paper";
const LOG_TAIL_LINES: usize = 20;

/// Drives an external `pdflatex` binary.
#[derive(Debug, Clone)]
pub struct LatexRenderEngine {
    program: PathBuf,
    timeout: Duration,
}

impl LatexRenderEngine {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.pdflatex_bin, config.render_timeout)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Compile a complete LaTeX source string to PDF bytes.
    pub async fn render(&self, latex_source: &str) -> Result<Vec<u8>, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let tex_path = temp_dir.path().join(SOURCE_FILE);
        tokio::fs::write(&tex_path, latex_source)
            .await
            .map_err(RenderError::WriteSource)?;

        let child = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(format!("-output-directory={}", temp_dir.path().display()))
            .arg(&tex_path)
            .current_dir(temp_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RenderError::CompilerIo)?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(RenderError::CompilerIo)?,
            Err(_) => {
                log::error!("pdflatex did not finish within {:?}", self.timeout);
                return Err(RenderError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            log::error!(
                "pdflatex exited with status {}:\n{}",
                code,
                log_tail(&output.stdout)
            );
            return Err(RenderError::CompilerExit(code));
        }

        read_output(temp_dir.path()).await
    }
}

async fn read_output(dir: &Path) -> Result<Vec<u8>, RenderError> {
    for extension in ["pdf", "PDF"] {
        let candidate = dir.join(format!("{OUTPUT_STEM}.{extension}"));
        match tokio::fs::read(&candidate).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(RenderError::ReadPdf(e)),
        }
    }
    Err(RenderError::MissingOutput)
}

/// Last lines of the compiler transcript; pdflatex reports errors on stdout.
fn log_tail(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..].join("\n")
}
