//! Configuration file (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use blockpage_static::{BuildConfig, SiteConfig};

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub favicon: Option<String>,
    pub logo: Option<String>,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ContentSection {
    #[serde(default = "default_content_dir")]
    pub dir: String,
    #[serde(default = "default_public_dir")]
    pub public: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BuildSection {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            favicon: None,
            logo: None,
            styles: vec![],
        }
    }
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            public: default_public_dir(),
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: default_output(),
            minify: default_minify(),
        }
    }
}

fn default_title() -> String {
    "School Website".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_content_dir() -> String {
    "content".to_string()
}
fn default_public_dir() -> String {
    "public".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn site(&self) -> SiteConfig {
        SiteConfig {
            title: self.site.title.clone(),
            base_url: self.site.base_url.clone(),
            favicon: self.site.favicon.clone(),
            logo: self.site.logo.clone(),
            styles: self.site.styles.clone(),
        }
    }

    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.content.dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.content.public)
    }

    /// Build settings, with command line overrides applied.
    pub fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            content_dir: self.content_dir(),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.build.output)),
            public_dir: self.public_dir(),
            minify: minify.unwrap_or(self.build.minify),
            site: self.site(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = ConfigFile::load(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.content_dir(), PathBuf::from("content"));
        assert!(config.build.minify);
    }

    #[test]
    fn reads_partial_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[site]
title = "SMA Negeri 1"
logo = "/logo.png"
styles = ["styles/site.css"]

[build]
minify = false
"#,
        )
        .unwrap();

        let config = ConfigFile::load(&path).unwrap();

        assert_eq!(config.site.title, "SMA Negeri 1");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.site.logo.as_deref(), Some("/logo.png"));
        assert_eq!(config.content.dir, "content");
        assert!(!config.build.minify);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        assert!(ConfigFile::load(&path).is_err());
    }

    #[test]
    fn command_line_overrides_build_settings() {
        let config = ConfigFile::default();

        let build = config.build_config(Some(PathBuf::from("public_html")), Some(false));

        assert_eq!(build.output_dir, PathBuf::from("public_html"));
        assert!(!build.minify);
        assert_eq!(build.public_dir, PathBuf::from("public"));
        assert_eq!(build.site.title, "School Website");
    }
}
