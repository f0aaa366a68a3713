//! Built-in block renderers.
//!
//! Every renderer is a pure function of its (already defaulted) parameters.

pub mod accordion;
pub mod cta;
pub mod divider;
pub mod features;
pub mod grid;
pub mod list;
pub mod map;
pub mod marquee;
pub mod quote;
pub mod table;
pub mod testimonial;
pub mod video;

use serde_json::Value;

use crate::node::{Element, Node};
use crate::params::{Params, ParamsExt};
use crate::registry::BlockRegistry;

/// Register all built-in renderers.
pub fn register_all(registry: &mut BlockRegistry) {
    registry.register(accordion::TYPE, accordion::defaults(), accordion::render);
    registry.register(cta::TYPE, cta::defaults(), cta::render);
    registry.register(divider::TYPE, divider::defaults(), divider::render);
    registry.register(features::TYPE, features::defaults(), features::render);
    registry.register(grid::TYPE, grid::defaults(), grid::render);
    registry.register(list::TYPE, list::defaults(), list::render);
    registry.register(map::TYPE, map::defaults(), map::render);
    registry.register(marquee::TYPE, marquee::defaults(), marquee::render);
    registry.register(quote::TYPE, quote::defaults(), quote::render);
    registry.register(table::TYPE, table::defaults(), table::render);
    registry.register(testimonial::TYPE, testimonial::defaults(), testimonial::render);
    registry.register(video::TYPE, video::defaults(), video::render);
}

/// Build a `Params` map from a `json!` object literal.
pub(crate) fn object(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Root element shared by all blocks: `block block-{type}`.
pub(crate) fn block_root(tag: &str, block_type: &str) -> Element {
    Element::new(tag).class(&format!("block block-{}", block_type))
}

/// Optional heading from the `title` parameter.
pub(crate) fn block_title(params: &Params, tag: &str) -> Option<Node> {
    params
        .non_empty("title")
        .map(|title| Element::new(tag).class("block-title").text(title).into())
}

/// Informational placeholder for media that cannot be embedded.
pub(crate) fn media_placeholder(block_type: &str, message: &str, hint: &str) -> Node {
    block_root("div", block_type)
        .class("media-placeholder")
        .child(Element::new("p").class("placeholder-message").text(message))
        .child(Element::new("p").class("placeholder-hint").text(hint))
        .into()
}

/// Render Markdown to an HTML node.
///
/// Embedded HTML is escaped as text.
pub(crate) fn markdown(source: &str) -> Node {
    use pulldown_cmark::{html, Event, Options, Parser, TagEnd};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events: Vec<Event> = Parser::new_ext(source, options)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        })
        .collect();

    let mut text = String::new();
    for event in &events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell) => {
                text.push(' ')
            }
            _ => {}
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    Node::Raw {
        html: html_output,
        text: text.trim_end().to_string(),
    }
}

/// Item of a list parameter as an object; scalars become `{text: value}`.
pub(crate) fn item_object(item: &Value) -> Option<Params> {
    match item {
        Value::Object(map) => Some(map.clone()),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            let mut map = Params::new();
            map.insert("text".to_string(), item.clone());
            Some(map)
        }
        _ => None,
    }
}
