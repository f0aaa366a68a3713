//! Page documents for blockpage sites.
//!
//! A page document carries page metadata and the ordered block list. Pages
//! are authored as YAML or JSON files in a content directory.

pub mod loader;
pub mod page;

pub use loader::{discover_pages, load_page, SourcePage};
pub use page::{parse_page, ContentError, Format, PageDoc, PageMeta};
