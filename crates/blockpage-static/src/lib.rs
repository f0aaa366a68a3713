//! Static site generator for blockpage sites.
//!
//! Builds a static site from page documents, rendering each page's blocks
//! into HTML templates.

pub mod assets;
pub mod builder;
pub mod page;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use page::{build_navigation, page_url, PageRenderer, RenderedPage, SiteConfig};
pub use templates::{Context, NavItem, TemplateEngine};
