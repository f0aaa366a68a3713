//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blockpage_static::StaticBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = ConfigFile::load(config_path)?.build_config(output, minify);
    let content_dir = config.content_dir.clone();

    let result = StaticBuilder::new(config)
        .build()
        .await
        .with_context(|| format!("Failed to build site from {}", content_dir.display()))?;

    if result.unsupported + result.failed > 0 {
        tracing::warn!(
            "{} blocks were replaced by placeholders",
            result.unsupported + result.failed
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
