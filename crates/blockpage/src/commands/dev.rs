//! Development server command.

use std::path::Path;

use anyhow::Result;
use blockpage_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let file_config = ConfigFile::load(config_path)?;

    let config = DevServerConfig {
        content_dir: file_config.content_dir(),
        public_dir: file_config.public_dir(),
        site: file_config.site(),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
