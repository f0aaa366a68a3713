//! Card grid block.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{column_style, style, Params, ParamsExt};
use crate::renderers::{block_root, block_title, item_object, object};

pub const TYPE: &str = "grid";

const DEFAULT_COLUMNS: u64 = 3;
const DEFAULT_GAP: &str = "md";

const COLUMNS: &[(u64, &str)] = &[
    (1, "grid-cols-1"),
    (2, "grid-cols-1 md:grid-cols-2"),
    (3, "grid-cols-1 md:grid-cols-2 lg:grid-cols-3"),
    (4, "grid-cols-1 md:grid-cols-2 lg:grid-cols-4"),
    (5, "grid-cols-2 md:grid-cols-3 lg:grid-cols-5"),
    (6, "grid-cols-2 md:grid-cols-3 lg:grid-cols-6"),
];

const GAPS: &[(&str, &str)] = &[("sm", "gap-2"), ("md", "gap-6"), ("lg", "gap-10")];

pub fn defaults() -> Params {
    object(json!({
        "items": [],
        "columns": DEFAULT_COLUMNS,
        "gap": DEFAULT_GAP,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let mut grid = Element::new("div")
        .class("grid-items grid")
        .class(column_style(COLUMNS, params, "columns", DEFAULT_COLUMNS))
        .class(style(GAPS, params, "gap", DEFAULT_GAP));

    for (index, item) in params.list("items")?.iter().enumerate() {
        let item = item_object(item).ok_or_else(|| RenderError::item("items", index, "an object"))?;
        grid = grid.child(card(&item));
    }

    let mut root = block_root("div", TYPE);
    if let Some(title) = block_title(params, "h3") {
        root = root.child(title);
    }

    Ok(root.child(grid).into())
}

fn card(item: &Params) -> Element {
    let mut card = Element::new("div").class("grid-card rounded-lg border overflow-hidden");

    if let Some(image) = item.non_empty("image") {
        card = card.child(
            Element::new("img")
                .class("grid-card-image w-full object-cover")
                .attr("src", image)
                .attr("alt", item.text("title"))
                .attr("loading", "lazy"),
        );
    }

    let mut body = Element::new("div").class("grid-card-body p-4");
    if let Some(title) = item.non_empty("title").or_else(|| item.non_empty("text")) {
        body = body.child(Element::new("h4").class("grid-card-title font-semibold").text(title));
    }
    if let Some(description) = item.non_empty("description") {
        body = body.child(Element::new("p").class("grid-card-description").text(description));
    }
    card = card.child(body);

    match item.non_empty("link") {
        Some(link) => Element::new("a")
            .class("grid-card-link")
            .attr("href", link)
            .child(card),
        None => card,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    fn render_json(value: serde_json::Value) -> Node {
        render(&merge_params(&defaults(), &object(value))).unwrap()
    }

    fn grid_classes(node: &Node) -> Vec<String> {
        node.find_by_class("grid-items").unwrap().classes.clone()
    }

    #[test]
    fn default_is_three_columns() {
        let node = render_json(json!({}));

        assert!(grid_classes(&node).contains(&"lg:grid-cols-3".to_string()));
    }

    #[test]
    fn unlisted_column_count_applies_no_column_class() {
        let node = render_json(json!({"columns": 7}));

        assert!(!grid_classes(&node).iter().any(|c| c.contains("grid-cols")));
    }

    #[test]
    fn renders_linked_cards() {
        let node = render_json(json!({
            "columns": 2,
            "items": [
                {"title": "OSIS", "description": "Organisasi siswa", "link": "/osis"},
                {"title": "Pramuka", "image": "/img/pramuka.jpg"},
            ],
        }));

        assert_eq!(node.find_all_by_class("grid-card").len(), 2);
        assert_eq!(node.find_by_class("grid-card-link").unwrap().get_attr("href"), Some("/osis"));
        assert_eq!(
            node.find_by_class("grid-card-image").unwrap().get_attr("alt"),
            Some("Pramuka")
        );
        assert!(grid_classes(&node).contains(&"md:grid-cols-2".to_string()));
    }
}
