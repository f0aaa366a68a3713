//! Render a single page document.

use std::path::Path;

use anyhow::{Context, Result};
use blockpage_blocks::composer::to_html;
use blockpage_blocks::{builtin_registry, compose, ComposeSummary};
use blockpage_content::load_page;

use crate::OutputFormat;

/// Run the render command.
pub fn run(file: &Path, format: OutputFormat) -> Result<()> {
    println!("{}", render_file(file, format)?);
    Ok(())
}

fn render_file(file: &Path, format: OutputFormat) -> Result<String> {
    let doc = load_page(file).with_context(|| format!("Failed to load {}", file.display()))?;

    let blocks = compose(builtin_registry(), &doc.blocks);
    let summary = ComposeSummary::of(&blocks);

    tracing::info!(
        "Rendered {} blocks ({} unsupported, {} failed)",
        summary.rendered,
        summary.unsupported,
        summary.failed
    );

    match format {
        OutputFormat::Html => Ok(to_html(&blocks)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "title": doc.meta.title,
                "summary": summary,
                "blocks": blocks,
            });
            serde_json::to_string_pretty(&output).context("Failed to serialize blocks")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn page(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("pengumuman.yaml");
        fs::write(
            &path,
            "blocks:\n  - type: marquee\n    text: Libur semester\n  - type: slideshow\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn renders_html() {
        let temp = tempdir().unwrap();

        let html = render_file(&page(temp.path()), OutputFormat::Html).unwrap();

        assert!(html.contains("Libur semester"));
        assert!(html.contains("block-unsupported"));
    }

    #[test]
    fn renders_json_tree() {
        let temp = tempdir().unwrap();

        let json = render_file(&page(temp.path()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Pengumuman");
        assert_eq!(value["summary"]["unsupported"], 1);
        assert_eq!(value["blocks"][0]["block_type"], "marquee");
        assert_eq!(value["blocks"][1]["outcome"]["status"], "unsupported");
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempdir().unwrap();

        assert!(render_file(&temp.path().join("nope.yaml"), OutputFormat::Html).is_err());
    }
}
