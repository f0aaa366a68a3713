//! Section divider.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{style, Params, ParamsExt};
use crate::renderers::{block_root, object};

pub const TYPE: &str = "divider";

const DEFAULT_STYLE: &str = "solid";
const DEFAULT_SPACING: &str = "md";

const STYLES: &[(&str, &str)] = &[
    ("solid", "divider-solid border-t border-solid border-gray-300"),
    ("dashed", "divider-dashed border-t border-dashed border-gray-300"),
    ("dotted", "divider-dotted border-t border-dotted border-gray-300"),
    ("gradient", "divider-gradient h-px border-0 bg-gradient-to-r from-transparent via-gray-400 to-transparent"),
];

const SPACINGS: &[(&str, &str)] = &[("sm", "my-4"), ("md", "my-8"), ("lg", "my-16")];

pub fn defaults() -> Params {
    object(json!({
        "style": DEFAULT_STYLE,
        "spacing": DEFAULT_SPACING,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let line_style = style(STYLES, params, "style", DEFAULT_STYLE);
    let root = block_root("div", TYPE).class(style(SPACINGS, params, "spacing", DEFAULT_SPACING));

    let root = match params.non_empty("label") {
        Some(label) => root
            .class("flex items-center gap-4")
            .attr("role", "separator")
            .child(Element::new("hr").class("flex-1").class(line_style))
            .child(Element::new("span").class("divider-label text-sm text-gray-500").text(label))
            .child(Element::new("hr").class("flex-1").class(line_style)),
        None => root.child(Element::new("hr").class(line_style)),
    };

    Ok(root.into())
}
