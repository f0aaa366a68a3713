//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use blockpage_blocks::{BlockRegistry, ComposeSummary};
use blockpage_content::{discover_pages, SourcePage};

use crate::assets::AssetPipeline;
use crate::page::{build_navigation, stylesheet_name, PageRenderer, RenderedPage, SiteConfig};
use crate::templates::NavItem;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source content directory
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Static files (images, media) copied as-is into the output
    pub public_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Site settings
    pub site: SiteConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            public_dir: PathBuf::from("public"),
            minify: true,
            site: SiteConfig::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of blocks rendered by their renderer
    pub blocks: usize,

    /// Number of blocks with no registered renderer
    pub unsupported: usize,

    /// Number of blocks whose renderer failed
    pub failed: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error(transparent)]
    Content(#[from] blockpage_content::ContentError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page rendered and ready to be written.
struct BuiltPage {
    title: String,
    description: String,
    page: RenderedPage,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: PageRenderer,
}

impl StaticBuilder {
    /// Create a new static builder with the built-in block types.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_registry(config, Arc::new(BlockRegistry::builtin()))
    }

    /// Create a builder rendering blocks through `registry`.
    pub fn with_registry(config: BuildConfig, registry: Arc<BlockRegistry>) -> Self {
        let renderer = PageRenderer::new(registry, config.site.clone());
        Self { config, renderer }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = discover_pages(&self.config.content_dir)?;

        // Public files first so generated pages win on a name clash
        self.copy_public()?;

        let nav = build_navigation(&pages, &self.config.site.base());

        // Render pages in parallel
        let results: Vec<Result<BuiltPage, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &nav))
            .collect();

        let mut built = Vec::with_capacity(results.len());
        let mut summary = ComposeSummary::default();

        for result in results {
            let page = result?;
            summary.rendered += page.page.summary.rendered;
            summary.unsupported += page.page.summary.unsupported;
            summary.failed += page.page.summary.failed;
            built.push(page);
        }

        self.generate_not_found(&nav)?;
        self.generate_assets()?;
        self.generate_search_index(&built)?;
        self.generate_sitemap(&built)?;

        let duration = start.elapsed();

        tracing::info!(
            "Built {} pages ({} blocks, {} unsupported, {} failed) in {}ms",
            built.len(),
            summary.rendered,
            summary.unsupported,
            summary.failed,
            duration.as_millis()
        );

        Ok(BuildResult {
            pages: built.len(),
            blocks: summary.rendered,
            unsupported: summary.unsupported,
            failed: summary.failed,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Output path for a page slug.
    fn output_path(&self, slug: &str) -> PathBuf {
        let mut path = self.config.output_dir.clone();
        for segment in slug.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join("index.html")
    }

    /// Render and write a single page.
    fn build_page(&self, page: &SourcePage, nav: &[NavItem]) -> Result<BuiltPage, BuildError> {
        let slug = page.slug();

        let rendered = self
            .renderer
            .render(&page.doc, &slug, nav)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if rendered.summary.unsupported + rendered.summary.failed > 0 {
            tracing::warn!(
                "{}: {} unsupported and {} failed blocks",
                page.relative_path.display(),
                rendered.summary.unsupported,
                rendered.summary.failed
            );
        }

        write_file(&self.output_path(&slug), &rendered.html)?;

        Ok(BuiltPage {
            title: page.doc.meta.title.clone(),
            description: page.doc.meta.description.clone().unwrap_or_default(),
            page: rendered,
        })
    }

    /// Copy the public directory tree into the output directory.
    fn copy_public(&self) -> Result<(), BuildError> {
        let public_dir = &self.config.public_dir;
        if !public_dir.is_dir() {
            tracing::debug!("No public directory at {}", public_dir.display());
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path
                .strip_prefix(public_dir)
                .map_err(|e| BuildError::ReadError(e.to_string()))?;
            let target = self.config.output_dir.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::copy(path, &target)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
            copied += 1;
        }

        tracing::info!("Copied {} public files from {}", copied, public_dir.display());
        Ok(())
    }

    fn generate_not_found(&self, nav: &[NavItem]) -> Result<(), BuildError> {
        let html = self
            .renderer
            .render_not_found(nav)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write_file(&self.config.output_dir.join("404.html"), &html)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("{}", e);
                css
            })
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), &css)?;

        write_file(&assets_dir.join("main.js"), &AssetPipeline::generate_js())?;

        // Copy configured stylesheets
        for style_path in &self.config.site.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                let content = if self.config.minify {
                    AssetPipeline::minify_css(&content).unwrap_or(content)
                } else {
                    content
                };
                write_file(&assets_dir.join(stylesheet_name(style_path)), &content)?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[BuiltPage]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                serde_json::json!({
                    "title": page.title,
                    "description": page.description,
                    "url": page.page.url,
                    "content": page.page.text,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        write_file(&self.config.output_dir.join("search-index.json"), &json)
    }

    /// Generate sitemap and robots.txt.
    ///
    /// Sitemap entries must be absolute, so `sitemap.xml` is only written
    /// when the base URL includes a scheme and host.
    fn generate_sitemap(&self, pages: &[BuiltPage]) -> Result<(), BuildError> {
        let base = self.config.site.base();

        if !is_absolute_url(&base) {
            tracing::info!("Skipping sitemap.xml: base_url {} is not an absolute URL", base);
            return write_file(
                &self.config.output_dir.join("robots.txt"),
                "User-agent: *\nAllow: /\n",
            );
        }

        let urls: Vec<String> = pages
            .iter()
            .map(|page| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    html_escape::encode_text(&page.page.url)
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap)?;

        let robots = format!("User-agent: *\nAllow: /\nSitemap: {}sitemap.xml\n", base);
        write_file(&self.config.output_dir.join("robots.txt"), &robots)
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}
