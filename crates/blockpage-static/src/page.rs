//! Rendering a page document into a full HTML page.
//!
//! Shared by the static builder and the development server.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use blockpage_blocks::composer::to_html;
use blockpage_blocks::{compose, BlockRegistry, ComposeSummary};
use blockpage_content::{PageDoc, SourcePage};

use crate::templates::{Context, NavItem, TemplateEngine};

/// Length of the text excerpt kept for the search index.
const EXCERPT_CHARS: usize = 280;

/// Site-wide settings applied to every page.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site title
    pub title: String,

    /// Base URL, always ending in `/`
    pub base_url: String,

    /// Favicon URL
    pub favicon: Option<String>,

    /// Logo image URL
    pub logo: Option<String>,

    /// Paths to CSS stylesheets copied into `assets/`
    pub styles: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "School Website".to_string(),
            base_url: "/".to_string(),
            favicon: None,
            logo: None,
            styles: vec![],
        }
    }
}

impl SiteConfig {
    /// Base URL with a guaranteed trailing slash.
    pub fn base(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }

    /// URLs of the configured stylesheets once copied into `assets/`.
    pub fn style_urls(&self) -> Vec<String> {
        let base = self.base();
        self.styles
            .iter()
            .map(|s| format!("{}assets/{}", base, stylesheet_name(s)))
            .collect()
    }
}

/// File name a stylesheet is published under.
pub fn stylesheet_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

/// URL of a page with the given slug.
pub fn page_url(base_url: &str, slug: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let slug = slug.trim_matches('/');

    if slug.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}/", base, slug)
    }
}

/// Build navigation structure from pages.
///
/// Top-level pages come first in page order, then one entry per directory
/// holding its pages as children. A directory's own `index` page names
/// the entry.
pub fn build_navigation(pages: &[SourcePage], base_url: &str) -> Vec<NavItem> {
    let mut nav = Vec::new();
    let mut dirs: BTreeMap<String, Vec<(String, NavItem)>> = BTreeMap::new();

    for page in pages {
        if !page.doc.meta.nav {
            continue;
        }

        let slug = page.slug();
        let item = NavItem {
            title: page.doc.meta.title.clone(),
            path: page_url(base_url, &slug),
            children: Vec::new(),
            active: false,
        };

        // Group by parent directory
        let parent = page
            .relative_path
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        if parent.is_empty() {
            nav.push(item);
        } else {
            dirs.entry(parent).or_default().push((slug, item));
        }
    }

    for (dir, items) in dirs {
        let dir_name = dir.rsplit('/').next().unwrap_or("Section");
        let mut title = capitalize(dir_name);
        let mut children = Vec::with_capacity(items.len());

        for (slug, item) in items {
            if slug == dir {
                title = item.title;
            } else {
                children.push(item);
            }
        }

        nav.push(NavItem {
            title,
            path: page_url(base_url, &dir),
            children,
            active: false,
        });
    }

    nav
}

/// Mark the navigation entries leading to `url` as active.
fn mark_active(nav: &mut [NavItem], url: &str) -> bool {
    let mut found = false;
    for item in nav.iter_mut() {
        let child_active = mark_active(&mut item.children, url);
        item.active = item.path == url || child_active;
        found |= item.active;
    }
    found
}

/// A page rendered to HTML.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Full HTML document
    pub html: String,

    /// Block outcome counts
    pub summary: ComposeSummary,

    /// Plain-text excerpt of the rendered blocks
    pub text: String,

    /// Page URL
    pub url: String,
}

/// Renders page documents through the site templates.
pub struct PageRenderer {
    registry: Arc<BlockRegistry>,
    templates: TemplateEngine,
    site: SiteConfig,
    scripts: Vec<String>,
}

impl PageRenderer {
    /// Create a renderer for the given site.
    pub fn new(registry: Arc<BlockRegistry>, site: SiteConfig) -> Self {
        Self {
            registry,
            templates: TemplateEngine::new(),
            site,
            scripts: vec![],
        }
    }

    /// Add inline scripts to every rendered page.
    pub fn with_scripts(mut self, scripts: Vec<String>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Render a page document published under `slug`.
    pub fn render(
        &self,
        doc: &PageDoc,
        slug: &str,
        nav: &[NavItem],
    ) -> Result<RenderedPage, minijinja::Error> {
        let blocks = compose(&self.registry, &doc.blocks);
        let summary = ComposeSummary::of(&blocks);
        let url = page_url(&self.site.base(), slug);

        let text = excerpt(
            &blocks
                .iter()
                .filter(|b| !b.is_placeholder())
                .map(|b| b.node.text_content())
                .filter(|t| !t.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        );

        let mut nav = nav.to_vec();
        mark_active(&mut nav, &url);

        let context = Context {
            title: doc.meta.title.clone(),
            description: doc.meta.description.clone(),
            content: to_html(&blocks),
            nav,
            ..self.context()
        };

        let html = self.templates.render_page("page.html", &context)?;

        Ok(RenderedPage {
            html,
            summary,
            text,
            url,
        })
    }

    /// Render the page shown for unknown paths.
    pub fn render_not_found(&self, nav: &[NavItem]) -> Result<String, minijinja::Error> {
        let context = Context {
            title: "Page not found".to_string(),
            nav: nav.to_vec(),
            ..self.context()
        };

        self.templates.render_page("404.html", &context)
    }

    fn context(&self) -> Context {
        Context {
            title: String::new(),
            site_title: self.site.title.clone(),
            description: None,
            content: String::new(),
            nav: vec![],
            base_url: self.site.base(),
            favicon: self.site.favicon.clone(),
            logo: self.site.logo.clone(),
            styles: self.site.style_urls(),
            scripts: self.scripts.clone(),
        }
    }
}

/// Collapse whitespace and cut to the excerpt length.
fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => collapsed[..idx].to_string(),
        None => collapsed,
    }
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpage_content::{parse_page, Format, PageMeta};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn source(relative: &str, title: &str) -> SourcePage {
        SourcePage {
            source_path: PathBuf::from("content").join(relative),
            relative_path: PathBuf::from(relative),
            doc: PageDoc {
                meta: PageMeta {
                    title: title.to_string(),
                    ..Default::default()
                },
                blocks: vec![],
            },
        }
    }

    fn renderer() -> PageRenderer {
        PageRenderer::new(
            Arc::new(BlockRegistry::builtin()),
            SiteConfig {
                title: "SMA Negeri 1".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn builds_page_urls() {
        assert_eq!(page_url("/", ""), "/");
        assert_eq!(page_url("/", "profil"), "/profil/");
        assert_eq!(page_url("/sekolah", "/profil/guru/"), "/sekolah/profil/guru/");
    }

    #[test]
    fn groups_navigation_by_directory() {
        let mut hidden = source("arsip.yaml", "Arsip");
        hidden.doc.meta.nav = false;

        let pages = vec![
            source("index.yaml", "Beranda"),
            source("profil/index.yaml", "Profil Sekolah"),
            source("profil/guru.yaml", "Guru"),
            source("kontak.yaml", "Kontak"),
            source("berita/pengumuman.yaml", "Pengumuman"),
            hidden,
        ];

        let nav = build_navigation(&pages, "/");
        let titles: Vec<&str> = nav.iter().map(|n| n.title.as_str()).collect();

        assert_eq!(titles, vec!["Beranda", "Kontak", "Berita", "Profil Sekolah"]);
        assert_eq!(nav[3].path, "/profil/");
        assert_eq!(nav[3].children.len(), 1);
        assert_eq!(nav[3].children[0].path, "/profil/guru/");
    }

    #[test]
    fn renders_page_with_active_nav() {
        let renderer = renderer();
        let doc = parse_page(
            "title: Guru\nblocks:\n  - type: quote\n    text: Belajar sepanjang hayat\n  - type: carousel\n",
            Format::Yaml,
        )
        .unwrap();
        let nav = build_navigation(
            &[source("index.yaml", "Beranda"), source("profil/guru.yaml", "Guru")],
            "/",
        );

        let page = renderer.render(&doc, "profil/guru", &nav).unwrap();

        assert_eq!(page.url, "/profil/guru/");
        assert_eq!(page.summary.rendered, 1);
        assert_eq!(page.summary.unsupported, 1);
        assert_eq!(page.text, "Belajar sepanjang hayat");
        assert!(page.html.contains("<title>Guru - SMA Negeri 1</title>"));
        assert!(page.html.contains("block-quote"));
        assert!(page.html.contains("nav-item active"));
    }

    #[test]
    fn excerpt_includes_markdown_text() {
        let doc = parse_page(
            "title: Profil\nblocks:\n  - type: accordion\n    items:\n      - title: Sejarah\n        content: Didirikan pada tahun **1965**\n",
            Format::Yaml,
        )
        .unwrap();

        let page = renderer().render(&doc, "profil", &[]).unwrap();

        assert!(page.text.contains("Didirikan pada tahun 1965"), "{}", page.text);
    }

    #[test]
    fn renders_not_found_page() {
        let html = renderer().render_not_found(&[]).unwrap();

        assert!(html.contains("page-not-found"));
        assert!(html.contains("Page not found"));
    }

    #[test]
    fn publishes_stylesheets_under_assets() {
        let site = SiteConfig {
            base_url: "/sekolah".to_string(),
            styles: vec!["styles/site.css".to_string()],
            ..Default::default()
        };

        assert_eq!(site.base(), "/sekolah/");
        assert_eq!(site.style_urls(), vec!["/sekolah/assets/site.css"]);
    }

    #[test]
    fn truncates_excerpts() {
        let long = "kata ".repeat(200);

        assert_eq!(excerpt(&long).chars().count(), EXCERPT_CHARS);
        assert_eq!(excerpt("  a \n b  "), "a b");
    }
}
