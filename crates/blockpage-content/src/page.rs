//! Page document parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use blockpage_blocks::BlockRecord;

/// Metadata of a page.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PageMeta {
    /// Page title
    #[serde(default)]
    pub title: String,

    /// Page description for SEO
    #[serde(default)]
    pub description: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Order in navigation (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Whether to show in navigation
    #[serde(default = "default_true")]
    pub nav: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            slug: None,
            order: None,
            nav: true,
        }
    }
}

/// A page: metadata plus its blocks in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDoc {
    pub meta: PageMeta,
    pub blocks: Vec<BlockRecord>,
}

#[derive(Deserialize)]
struct RawPage {
    #[serde(flatten)]
    meta: PageMeta,
    #[serde(default)]
    blocks: Vec<BlockRecord>,
}

/// Source format of a page document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detect format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a page document.
///
/// The document is either a mapping with page metadata and a `blocks`
/// list, or a bare list of blocks. Malformed entries in the list are kept
/// as invalid records.
pub fn parse_page(source: &str, format: Format) -> Result<PageDoc, ContentError> {
    let value: Value = match format {
        Format::Yaml => serde_yaml::from_str(source)
            .map_err(|e| ContentError::InvalidYaml(e.to_string()))?,
        Format::Json => serde_json::from_str(source)
            .map_err(|e| ContentError::InvalidJson(e.to_string()))?,
    };

    match value {
        // An empty YAML file
        Value::Null => Ok(PageDoc {
            meta: PageMeta::default(),
            blocks: Vec::new(),
        }),
        Value::Array(_) => {
            let blocks: Vec<BlockRecord> = serde_json::from_value(value)
                .map_err(|e| ContentError::InvalidPage(e.to_string()))?;
            Ok(PageDoc {
                meta: PageMeta::default(),
                blocks,
            })
        }
        Value::Object(_) => {
            let raw: RawPage = serde_json::from_value(value)
                .map_err(|e| ContentError::InvalidPage(e.to_string()))?;
            Ok(PageDoc {
                meta: raw.meta,
                blocks: raw.blocks,
            })
        }
        _ => Err(ContentError::InvalidPage(
            "expected a mapping or a list of blocks".to_string(),
        )),
    }
}

/// Errors that can occur when loading page content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid YAML in page: {0}")]
    InvalidYaml(String),

    #[error("Invalid JSON in page: {0}")]
    InvalidJson(String),

    #[error("Invalid page document: {0}")]
    InvalidPage(String),

    #[error("Unsupported page format: {0}")]
    UnsupportedFormat(String),

    #[error("Content directory not found: {0}")]
    DirectoryNotFound(String),
}
