//! Feature highlights (icon, title, description).

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{column_style, style, Params, ParamsExt};
use crate::renderers::{block_root, item_object, object};

pub const TYPE: &str = "features";

const DEFAULT_COLUMNS: u64 = 3;
const DEFAULT_LAYOUT: &str = "grid";

const COLUMNS: &[(u64, &str)] = &[
    (2, "md:grid-cols-2"),
    (3, "md:grid-cols-2 lg:grid-cols-3"),
    (4, "md:grid-cols-2 lg:grid-cols-4"),
];

const LAYOUTS: &[(&str, &str)] = &[
    ("grid", "features-grid grid grid-cols-1 gap-6"),
    ("list", "features-list flex flex-col gap-4"),
];

pub fn defaults() -> Params {
    object(json!({
        "items": [],
        "columns": DEFAULT_COLUMNS,
        "layout": DEFAULT_LAYOUT,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let layout = style(LAYOUTS, params, "layout", DEFAULT_LAYOUT);

    let mut items = Element::new("div").class("features-items").class(layout);
    // Column classes only apply to the grid layout.
    if layout.starts_with("features-grid") {
        items = items.class(column_style(COLUMNS, params, "columns", DEFAULT_COLUMNS));
    }

    for (index, item) in params.list("items")?.iter().enumerate() {
        let item = item_object(item).ok_or_else(|| RenderError::item("items", index, "an object"))?;

        let mut feature = Element::new("div").class("feature flex gap-3");
        if let Some(icon) = item.non_empty("icon") {
            feature = feature.child(
                Element::new("span")
                    .class("feature-icon text-3xl")
                    .attr("aria-hidden", "true")
                    .text(icon),
            );
        }

        let mut body = Element::new("div").class("feature-body").child(
            Element::new("h4")
                .class("feature-title font-semibold")
                .text(item.non_empty("title").unwrap_or_else(|| item.text("text"))),
        );
        if let Some(description) = item.non_empty("description") {
            body = body.child(Element::new("p").class("feature-description").text(description));
        }

        items = items.child(feature.child(body));
    }

    let mut root = block_root("section", TYPE);
    if let Some(title) = params.non_empty("title") {
        root = root.child(Element::new("h2").class("block-title text-2xl font-bold").text(title));
    }
    if let Some(subtitle) = params.non_empty("subtitle") {
        root = root.child(Element::new("p").class("features-subtitle").text(subtitle));
    }

    Ok(root.child(items).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    fn render_json(value: serde_json::Value) -> Node {
        render(&merge_params(&defaults(), &object(value))).unwrap()
    }

    #[test]
    fn renders_items_with_icons() {
        let node = render_json(json!({
            "title": "Fasilitas",
            "items": [
                {"icon": "🔬", "title": "Laboratorium", "description": "IPA dan komputer"},
                {"title": "Perpustakaan"},
            ],
        }));

        assert_eq!(node.find_all_by_class("feature").len(), 2);
        assert_eq!(node.find_all_by_class("feature-icon").len(), 1);
        assert_eq!(node.find_by_tag("h2").unwrap().text_content(), "Fasilitas");
    }

    #[test]
    fn list_layout_has_no_column_classes() {
        let node = render_json(json!({"layout": "list", "columns": 4}));
        let items = node.find_by_class("features-items").unwrap();

        assert!(items.has_class("features-list"));
        assert!(!items.has_class("lg:grid-cols-4"));
    }

    #[test]
    fn unknown_layout_uses_grid_columns() {
        let node = render_json(json!({"layout": "masonry", "columns": 4}));
        let items = node.find_by_class("features-items").unwrap();

        assert!(items.has_class("features-grid"));
        assert!(items.has_class("lg:grid-cols-4"));
    }

    #[test]
    fn items_must_be_a_list() {
        let params = object(json!({"items": {"title": "x"}}));

        assert_eq!(
            render(&params).unwrap_err(),
            RenderError::param("items", "a list")
        );
    }
}
