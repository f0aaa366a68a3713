//! Bulleted, numbered and checklist blocks.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{resolve_or_default, Params, ParamsExt};
use crate::renderers::{block_root, block_title, item_object, object};

pub const TYPE: &str = "list";

const DEFAULT_STYLE: &str = "bullet";

/// Markup for one list style.
struct ListStyle {
    tag: &'static str,
    classes: &'static str,
    marker: Option<&'static str>,
}

const STYLES: &[(&str, ListStyle)] = &[
    (
        "bullet",
        ListStyle {
            tag: "ul",
            classes: "list-bullet list-disc pl-6",
            marker: None,
        },
    ),
    (
        "number",
        ListStyle {
            tag: "ol",
            classes: "list-number list-decimal pl-6",
            marker: None,
        },
    ),
    (
        "check",
        ListStyle {
            tag: "ul",
            classes: "list-check list-none",
            marker: Some("✓"),
        },
    ),
    (
        "arrow",
        ListStyle {
            tag: "ul",
            classes: "list-arrow list-none",
            marker: Some("→"),
        },
    ),
];

pub fn defaults() -> Params {
    object(json!({
        "items": [],
        "style": DEFAULT_STYLE,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let Some(list_style) = resolve_or_default(STYLES, params.str("style"), DEFAULT_STYLE) else {
        return Err(RenderError::param("style", "a list style"));
    };

    let mut list = Element::new(list_style.tag).class(list_style.classes);

    for (index, item) in params.list("items")?.iter().enumerate() {
        let item = item_object(item).ok_or_else(|| RenderError::item("items", index, "text"))?;

        let mut li = Element::new("li").class("list-item");
        if let Some(marker) = list_style.marker {
            li = li.child(
                Element::new("span")
                    .class("list-marker")
                    .attr("aria-hidden", "true")
                    .text(marker),
            );
        }
        list = list.child(li.text(item.text("text")));
    }

    let mut root = block_root("div", TYPE);
    if let Some(title) = block_title(params, "h3") {
        root = root.child(title);
    }

    Ok(root.child(list).into())
}
