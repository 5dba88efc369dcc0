//! Command-line author client for the rendering service.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use ieee_paper_generator::generation::HttpRenderingService;
use ieee_paper_generator::{ClientConfig, GenerationClient, GenerationError, PaperDocument};

#[derive(Parser, Debug)]
#[command(name = "generate-paper", version, about = "Validate and render IEEE conference papers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report every structural problem in a paper
    Validate {
        /// Paper document in JSON wire format
        document: PathBuf,
    },

    /// Print the display label of every section
    Labels { document: PathBuf },

    /// Render a paper and save ieee_conference_paper.pdf
    Submit {
        document: PathBuf,

        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Base URL of the rendering service (overrides RENDERER_URL)
        #[arg(long)]
        renderer: Option<String>,
    },

    /// Print an empty paper to start from
    Template,
}

fn load_document(path: &Path) -> Result<PaperDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid paper", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    ieee_paper_generator::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { document } => {
            let document = load_document(&document)?;
            let violations = document.validate_for_submission();
            if violations.is_empty() {
                println!("Paper is ready for generation.");
            } else {
                println!("{}", violations.to_report());
                std::process::exit(1);
            }
        }
        Commands::Labels { document } => {
            let document = load_document(&document)?;
            for (label, section) in document.section_labels()?.iter().zip(&document.sections) {
                println!("{label}: {}", section.title);
            }
        }
        Commands::Submit {
            document,
            out,
            renderer,
        } => {
            let document = load_document(&document)?;
            let mut config = ClientConfig::from_env()?;
            if let Some(url) = renderer {
                config.renderer_url = url.trim_end_matches('/').to_string();
            }

            let client = GenerationClient::new(HttpRenderingService::new(&config)?);
            let handle = match client.submit(&document).await {
                Ok(handle) => handle,
                Err(GenerationError::InvalidDocument(violations)) => {
                    println!("{}", violations.to_report());
                    bail!("paper was not submitted");
                }
                Err(e) => return Err(e.into()),
            };

            let path = client.download(&handle, &out)?;
            println!("Saved {}", path.display());
        }
        Commands::Template => {
            println!("{}", serde_json::to_string_pretty(&PaperDocument::new())?);
        }
    }

    Ok(())
}
