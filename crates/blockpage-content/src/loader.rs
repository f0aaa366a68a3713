//! Loading pages from a content directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::page::{parse_page, ContentError, Format, PageDoc};

/// Pages without an explicit order sort after ordered ones.
const DEFAULT_ORDER: i32 = 999;

/// A page loaded from disk.
#[derive(Debug, Clone)]
pub struct SourcePage {
    /// Source file path
    pub source_path: PathBuf,

    /// Relative path from the content dir
    pub relative_path: PathBuf,

    /// Parsed document
    pub doc: PageDoc,
}

impl SourcePage {
    /// URL slug: the `slug` override, else the relative path without
    /// extension, with `index` pages mapping to their directory.
    pub fn slug(&self) -> String {
        if let Some(slug) = &self.doc.meta.slug {
            return slug.trim_matches('/').to_string();
        }

        let stem = self
            .relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let parent = self.relative_path.parent().unwrap_or(Path::new(""));

        let path = if stem == "index" {
            parent.to_path_buf()
        } else {
            parent.join(stem)
        };

        path.components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn sort_order(&self) -> i32 {
        self.doc.meta.order.unwrap_or(DEFAULT_ORDER)
    }
}

/// Load and parse a single page file.
///
/// A missing title is derived from the file name.
pub fn load_page(path: &Path) -> Result<PageDoc, ContentError> {
    let format = Format::from_path(path)
        .ok_or_else(|| ContentError::UnsupportedFormat(path.display().to_string()))?;

    let source = fs::read_to_string(path).map_err(|e| ContentError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut doc = parse_page(&source, format)?;

    if doc.meta.title.trim().is_empty() {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled");
        doc.meta.title = title_from_stem(stem);
    }

    Ok(doc)
}

/// Discover all page documents under `content_dir`, sorted by order then
/// path.
pub fn discover_pages(content_dir: &Path) -> Result<Vec<SourcePage>, ContentError> {
    if !content_dir.exists() {
        return Err(ContentError::DirectoryNotFound(
            content_dir.display().to_string(),
        ));
    }

    let mut pages = Vec::new();

    for entry in WalkDir::new(content_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || Format::from_path(path).is_none() {
            continue;
        }

        // Skip hidden and draft files
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if filename.starts_with('.') || filename.starts_with('_') {
            continue;
        }

        let doc = load_page(path)?;

        let relative_path = path
            .strip_prefix(content_dir)
            .unwrap_or(path)
            .to_path_buf();

        tracing::debug!(
            "Loaded page {} ({} blocks)",
            relative_path.display(),
            doc.blocks.len()
        );

        pages.push(SourcePage {
            source_path: path.to_path_buf(),
            relative_path,
            doc,
        });
    }

    pages.sort_by(|a, b| {
        a.sort_order()
            .cmp(&b.sort_order())
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });

    Ok(pages)
}

/// "tata-tertib" -> "Tata Tertib"
fn title_from_stem(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discovers_pages_in_order() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(content.join("profil")).unwrap();

        fs::write(content.join("index.yaml"), "title: Beranda\norder: 1\nblocks: []\n").unwrap();
        fs::write(
            content.join("profil/visi-misi.json"),
            r#"{"order": 2, "blocks": [{"type": "list", "items": ["Unggul"]}]}"#,
        )
        .unwrap();
        fs::write(content.join("kontak.yml"), "- type: map\n  address: Bandung\n").unwrap();
        fs::write(content.join("_draft.yaml"), "title: Draft\n").unwrap();
        fs::write(content.join("notes.txt"), "ignored").unwrap();

        let pages = discover_pages(&content).unwrap();
        let slugs: Vec<String> = pages.iter().map(SourcePage::slug).collect();

        assert_eq!(slugs, vec!["", "profil/visi-misi", "kontak"]);
        assert_eq!(pages[1].doc.meta.title, "Visi Misi");
        assert_eq!(pages[2].doc.blocks[0].block_type, "map");
    }

    #[test]
    fn slug_override_wins() {
        let temp = tempdir().unwrap();
        let content = temp.path().to_path_buf();
        fs::write(content.join("about.yaml"), "title: Tentang\nslug: /tentang-kami/\n").unwrap();

        let pages = discover_pages(&content).unwrap();

        assert_eq!(pages[0].slug(), "tentang-kami");
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("page.toml");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            load_page(&path),
            Err(ContentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = tempdir().unwrap();

        assert!(matches!(
            discover_pages(&temp.path().join("nope")),
            Err(ContentError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn derives_titles_from_file_names() {
        assert_eq!(title_from_stem("tata-tertib"), "Tata Tertib");
        assert_eq!(title_from_stem("ekstra_kurikuler"), "Ekstra Kurikuler");
    }
}
