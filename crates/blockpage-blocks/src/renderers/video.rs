//! Video embed block.
//!
//! Accepts YouTube and Vimeo links in their common shapes, or a direct
//! media URL when `type` is `direct`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{style, Params, ParamsExt};
use crate::renderers::{block_root, block_title, media_placeholder, object};

pub const TYPE: &str = "video";

const DEFAULT_SOURCE: &str = "auto";
const DEFAULT_ASPECT: &str = "16:9";

const ASPECTS: &[(&str, &str)] = &[
    ("16:9", "aspect-video"),
    ("4:3", "aspect-[4/3]"),
    ("1:1", "aspect-square"),
    ("21:9", "aspect-[21/9]"),
];

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|v/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    )
    .expect("Invalid YouTube regex")
});

static VIMEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"vimeo\.com/(?:video/|channels/[^/]+/)?(\d+)").expect("Invalid Vimeo regex")
});

/// A resolved platform video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEmbed {
    YouTube(String),
    Vimeo(String),
}

impl VideoEmbed {
    /// Platform video ID.
    pub fn id(&self) -> &str {
        match self {
            VideoEmbed::YouTube(id) | VideoEmbed::Vimeo(id) => id,
        }
    }

    /// Player URL for an iframe.
    pub fn embed_url(&self, autoplay: bool) -> String {
        match (self, autoplay) {
            (VideoEmbed::YouTube(id), false) => format!("https://www.youtube.com/embed/{}", id),
            (VideoEmbed::YouTube(id), true) => {
                format!("https://www.youtube.com/embed/{}?autoplay=1&mute=1", id)
            }
            (VideoEmbed::Vimeo(id), false) => format!("https://player.vimeo.com/video/{}", id),
            (VideoEmbed::Vimeo(id), true) => {
                format!("https://player.vimeo.com/video/{}?autoplay=1&muted=1", id)
            }
        }
    }
}

/// Extract a YouTube video ID (11 characters).
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract a numeric Vimeo video ID.
pub fn extract_vimeo_id(url: &str) -> Option<&str> {
    VIMEO_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve a URL to a platform video, trying YouTube then Vimeo.
pub fn extract_id(url: &str) -> Option<VideoEmbed> {
    let url = url.trim();
    if let Some(id) = extract_youtube_id(url) {
        return Some(VideoEmbed::YouTube(id.to_string()));
    }
    extract_vimeo_id(url).map(|id| VideoEmbed::Vimeo(id.to_string()))
}

pub fn defaults() -> Params {
    object(json!({
        "url": "",
        "type": DEFAULT_SOURCE,
        "aspectRatio": DEFAULT_ASPECT,
        "autoplay": false,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let url = params.text("url").trim().to_string();
    if url.is_empty() {
        return Ok(media_placeholder(
            TYPE,
            "No video selected",
            "Add a YouTube or Vimeo link, or a direct video file URL.",
        ));
    }

    // `videoType` lets flat records avoid clashing with the block `type`.
    let source = params
        .str("videoType")
        .or_else(|| params.str("type"))
        .unwrap_or(DEFAULT_SOURCE);
    let autoplay = params.bool("autoplay").unwrap_or(false);

    let player = if source == "direct" {
        direct_player(&url, autoplay)
    } else {
        let embed = match source {
            "youtube" => extract_youtube_id(&url).map(|id| VideoEmbed::YouTube(id.to_string())),
            "vimeo" => extract_vimeo_id(&url).map(|id| VideoEmbed::Vimeo(id.to_string())),
            _ => extract_id(&url),
        };

        let Some(embed) = embed else {
            tracing::debug!("Unresolvable video URL: {}", url);
            return Ok(media_placeholder(
                TYPE,
                "This video link is not supported",
                "Use a YouTube link (youtube.com/watch?v=... or youtu.be/...) or a Vimeo link (vimeo.com/...).",
            ));
        };

        Element::new("iframe")
            .class("video-iframe w-full h-full")
            .attr("src", embed.embed_url(autoplay))
            .attr("title", params.non_empty("title").unwrap_or_else(|| "Video".to_string()))
            .attr(
                "allow",
                "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
            )
            .attr("loading", "lazy")
            .flag("allowfullscreen")
    };

    let frame = Element::new("div")
        .class("video-frame w-full overflow-hidden rounded-lg")
        .class(style(ASPECTS, params, "aspectRatio", DEFAULT_ASPECT))
        .child(player);

    let mut root = block_root("div", TYPE);
    if let Some(title) = block_title(params, "h3") {
        root = root.child(title);
    }
    root = root.child(frame);
    if let Some(caption) = params.non_empty("caption") {
        root = root.child(Element::new("p").class("video-caption").text(caption));
    }

    Ok(root.into())
}

fn direct_player(url: &str, autoplay: bool) -> Element {
    let video = Element::new("video")
        .class("video-player w-full h-full")
        .attr("src", url)
        .attr("preload", "metadata")
        .flag("controls");

    if autoplay {
        video.flag("autoplay").flag("muted").flag("playsinline")
    } else {
        video
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    fn render_json(value: serde_json::Value) -> Node {
        render(&merge_params(&defaults(), &object(value))).unwrap()
    }

    #[test]
    fn youtube_shapes_collapse_to_one_id() {
        for url in [
            "https://youtu.be/abcdefghijk",
            "https://www.youtube.com/watch?v=abcdefghijk",
            "https://www.youtube.com/embed/abcdefghijk",
            "https://youtube.com/shorts/abcdefghijk",
            "https://m.youtube.com/watch?feature=share&v=abcdefghijk&t=10",
        ] {
            let embed = extract_id(url).unwrap();
            assert_eq!(embed.id(), "abcdefghijk", "url {url}");
            assert!(matches!(embed, VideoEmbed::YouTube(_)));
        }
    }

    #[test]
    fn extracts_vimeo_id() {
        assert_eq!(
            extract_id("https://vimeo.com/76979871"),
            Some(VideoEmbed::Vimeo("76979871".to_string()))
        );
        assert_eq!(extract_vimeo_id("https://player.vimeo.com/video/123"), Some("123"));
    }

    #[test]
    fn rejects_unknown_urls() {
        assert_eq!(extract_id("https://example.com/video.mp4"), None);
        assert_eq!(extract_id("https://youtu.be/short"), None);
        assert_eq!(extract_id("https://youtu.be/abcdefghijklmnop"), None);
        assert_eq!(
            extract_youtube_id("https://youtu.be/abcdefghijk?t=42"),
            Some("abcdefghijk")
        );
    }

    #[test]
    fn empty_url_renders_placeholder() {
        let node = render_json(json!({"url": ""}));

        assert!(node.find_by_class("media-placeholder").is_some());
        assert!(node.find_by_class("placeholder-hint").is_some());
        assert!(node.find_by_tag("iframe").is_none());
    }

    #[test]
    fn unresolvable_url_renders_placeholder() {
        let node = render_json(json!({"url": "https://example.com/watch"}));

        assert!(node.find_by_class("media-placeholder").is_some());
    }

    #[test]
    fn embeds_youtube_iframe() {
        let node = render_json(json!({"url": "https://youtu.be/abcdefghijk", "aspectRatio": "3:2"}));

        let iframe = node.find_by_tag("iframe").unwrap();
        assert_eq!(
            iframe.get_attr("src"),
            Some("https://www.youtube.com/embed/abcdefghijk")
        );
        assert!(node.find_by_class("video-frame").unwrap().has_class("aspect-video"));
    }

    #[test]
    fn direct_type_plays_url_as_is() {
        let node = render_json(json!({"url": "https://cdn.example.com/profil.mp4", "type": "direct"}));

        let video = node.find_by_tag("video").unwrap();
        assert_eq!(video.get_attr("src"), Some("https://cdn.example.com/profil.mp4"));
        assert!(video.has_attr("controls"));
    }

    #[test]
    fn platform_type_restricts_extraction() {
        let node = render_json(json!({"url": "https://vimeo.com/123", "videoType": "youtube"}));

        assert!(node.find_by_class("media-placeholder").is_some());
    }
}
