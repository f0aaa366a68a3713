//! Testimonial card with avatar and star rating.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{style, Params, ParamsExt};
use crate::renderers::{block_root, object};

pub const TYPE: &str = "testimonial";

const DEFAULT_VARIANT: &str = "card";
const DEFAULT_RATING: u64 = 5;
const MAX_RATING: u64 = 5;

const VARIANTS: &[(&str, &str)] = &[
    ("card", "testimonial-card rounded-xl border p-6 shadow-sm"),
    ("minimal", "testimonial-minimal p-2"),
];

pub fn defaults() -> Params {
    object(json!({
        "name": "",
        "content": "",
        "rating": DEFAULT_RATING,
        "variant": DEFAULT_VARIANT,
    }))
}

/// Fallback avatar text: the first character of the name, uppercased.
pub fn initial(name: &str) -> String {
    match name.trim().chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => "?".to_string(),
    }
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let name = params.text("name");
    let rating = params.u64("rating").unwrap_or(DEFAULT_RATING).min(MAX_RATING);

    let avatar: Node = match params.non_empty("avatar") {
        Some(src) => Element::new("img")
            .class("testimonial-avatar rounded-full")
            .attr("src", src)
            .attr("alt", name.clone())
            .into(),
        None => Element::new("div")
            .class("testimonial-avatar avatar-fallback rounded-full")
            .attr("aria-hidden", "true")
            .text(initial(&name))
            .into(),
    };

    let stars = Element::new("div")
        .class("testimonial-rating")
        .attr("aria-label", format!("{} of {}", rating, MAX_RATING))
        .children((0..MAX_RATING).map(|i| {
            let star = Element::new("span").class("star");
            if i < rating {
                star.class("star-filled").text("★")
            } else {
                star.text("☆")
            }
        }));

    let mut person = Element::new("div")
        .class("testimonial-person")
        .child(Element::new("p").class("testimonial-name font-semibold").text(name.clone()));
    if let Some(role) = params.non_empty("role") {
        person = person.child(Element::new("p").class("testimonial-role").text(role));
    }

    let content = params
        .non_empty("content")
        .or_else(|| params.non_empty("quote"))
        .unwrap_or_default();

    let root = block_root("figure", TYPE)
        .class(style(VARIANTS, params, "variant", DEFAULT_VARIANT))
        .child(stars)
        .child(Element::new("blockquote").class("testimonial-content").text(content))
        .child(
            Element::new("figcaption")
                .class("testimonial-author flex items-center gap-3")
                .child(avatar)
                .child(person),
        );

    Ok(root.into())
}
