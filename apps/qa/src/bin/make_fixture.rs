//! Generates the sample PDF resume used to exercise the service's
//! file-upload and parsing paths.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qa::config::Config;
use qa::document::{
    build_content_script, letter_page_config, render, resume_style_sheet, Document,
};

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let document = Document::new(
        resume_style_sheet(),
        letter_page_config(),
        build_content_script(),
    );
    let output_path = config.output_dir.join("sample_resume.pdf");
    render(&document, &output_path)?;

    info!("sample PDF resume created: {}", output_path.display());
    Ok(())
}
