//! Call-to-action banner.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{style, Params, ParamsExt};
use crate::renderers::{block_root, object};

pub const TYPE: &str = "cta";

const DEFAULT_VARIANT: &str = "primary";
const DEFAULT_ALIGN: &str = "center";

const VARIANTS: &[(&str, &str)] = &[
    ("primary", "cta-primary bg-blue-600 text-white"),
    ("secondary", "cta-secondary bg-gray-100 text-gray-900"),
    ("dark", "cta-dark bg-gray-900 text-white"),
    ("light", "cta-light bg-white text-gray-900 border"),
    ("gradient", "cta-gradient bg-gradient-to-r from-blue-600 to-indigo-600 text-white"),
];

const BUTTONS: &[(&str, &str)] = &[
    ("primary", "bg-white text-blue-700"),
    ("secondary", "bg-blue-600 text-white"),
    ("dark", "bg-white text-gray-900"),
    ("light", "bg-blue-600 text-white"),
    ("gradient", "bg-white text-indigo-700"),
];

const ALIGNS: &[(&str, &str)] = &[
    ("left", "text-left items-start"),
    ("center", "text-center items-center"),
    ("right", "text-right items-end"),
];

pub fn defaults() -> Params {
    object(json!({
        "title": "",
        "description": "",
        "buttonText": "Learn more",
        "buttonLink": "#",
        "variant": DEFAULT_VARIANT,
        "align": DEFAULT_ALIGN,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let mut root = block_root("section", TYPE)
        .class("flex flex-col gap-4 rounded-xl p-8")
        .class(style(VARIANTS, params, "variant", DEFAULT_VARIANT))
        .class(style(ALIGNS, params, "align", DEFAULT_ALIGN));

    if let Some(title) = params.non_empty("title") {
        root = root.child(Element::new("h2").class("cta-title text-2xl font-bold").text(title));
    }
    if let Some(description) = params.non_empty("description") {
        root = root.child(Element::new("p").class("cta-description").text(description));
    }

    let mut actions = Element::new("div").class("cta-actions flex gap-3");

    if let Some(text) = params.non_empty("buttonText") {
        let href = params.non_empty("buttonLink").unwrap_or_else(|| "#".to_string());
        actions = actions.child(
            Element::new("a")
                .class("cta-button rounded-lg px-6 py-3 font-semibold")
                .class(style(BUTTONS, params, "variant", DEFAULT_VARIANT))
                .attr("href", href)
                .text(text),
        );
    }

    if let Some(text) = params.non_empty("secondaryText") {
        let href = params.non_empty("secondaryLink").unwrap_or_else(|| "#".to_string());
        actions = actions.child(
            Element::new("a")
                .class("cta-button-secondary rounded-lg px-6 py-3 underline")
                .attr("href", href)
                .text(text),
        );
    }

    if !actions.children.is_empty() {
        root = root.child(actions);
    }

    Ok(root.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    fn render_json(value: serde_json::Value) -> Node {
        render(&merge_params(&defaults(), &object(value))).unwrap()
    }

    #[test]
    fn renders_button_with_link() {
        let node = render_json(json!({
            "title": "Pendaftaran Dibuka",
            "buttonText": "Daftar",
            "buttonLink": "/ppdb",
        }));

        let button = node.find_by_class("cta-button").unwrap();
        assert_eq!(button.get_attr("href"), Some("/ppdb"));
        assert_eq!(button.text_content(), "Daftar");
        assert_eq!(node.find_by_tag("h2").unwrap().text_content(), "Pendaftaran Dibuka");
    }

    #[test]
    fn invalid_variant_and_align_fall_back() {
        let node = render_json(json!({"variant": "neon", "align": "middle"}));
        let root = node.as_element().unwrap();

        assert!(root.has_class("cta-primary"));
        assert!(root.has_class("text-center"));
    }

    #[test]
    fn empty_button_text_hides_actions() {
        let node = render_json(json!({"buttonText": ""}));

        assert!(node.find_by_class("cta-actions").is_none());
    }

    #[test]
    fn renders_secondary_action() {
        let node = render_json(json!({"secondaryText": "Brosur", "secondaryLink": "/brosur.pdf"}));

        let link = node.find_by_class("cta-button-secondary").unwrap();
        assert_eq!(link.get_attr("href"), Some("/brosur.pdf"));
    }
}
