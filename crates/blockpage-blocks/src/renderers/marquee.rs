//! Scrolling announcement strip.
//!
//! The caption is repeated three times so the CSS animation loops without a
//! visible gap.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{resolve_or_default, style, Params, ParamsExt};
use crate::renderers::{block_root, object};

pub const TYPE: &str = "marquee";

const REPEAT: usize = 3;

const DEFAULT_SPEED: &str = "normal";
const DEFAULT_DIRECTION: &str = "left";
const DEFAULT_VARIANT: &str = "primary";

const SPEEDS: &[(&str, &str)] = &[("slow", "30s"), ("normal", "20s"), ("fast", "10s")];

const DIRECTIONS: &[(&str, &str)] = &[("left", "normal"), ("right", "reverse")];

const VARIANTS: &[(&str, &str)] = &[
    ("primary", "marquee-primary bg-blue-600 text-white"),
    ("secondary", "marquee-secondary bg-yellow-400 text-gray-900"),
    ("dark", "marquee-dark bg-gray-900 text-white"),
    ("light", "marquee-light bg-gray-100 text-gray-900"),
];

pub fn defaults() -> Params {
    object(json!({
        "text": "",
        "speed": DEFAULT_SPEED,
        "direction": DEFAULT_DIRECTION,
        "pauseOnHover": true,
        "variant": DEFAULT_VARIANT,
    }))
}

/// Animation duration for a speed token.
pub fn duration(speed: Option<&str>) -> &'static str {
    resolve_or_default(SPEEDS, speed, DEFAULT_SPEED)
        .copied()
        .unwrap_or("20s")
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let text = params.text("text");
    let direction = style(DIRECTIONS, params, "direction", DEFAULT_DIRECTION);

    let track = Element::new("div")
        .class("marquee-track flex whitespace-nowrap")
        .attr(
            "style",
            format!(
                "animation-duration: {}; animation-direction: {};",
                duration(params.str("speed")),
                direction
            ),
        )
        .children((0..REPEAT).map(|i| {
            let item = Element::new("span").class("marquee-item px-8").text(text.clone());
            // Copies after the first are decorative.
            if i > 0 {
                item.attr("aria-hidden", "true")
            } else {
                item
            }
        }));

    let mut root = block_root("div", TYPE)
        .class("overflow-hidden py-2")
        .class(style(VARIANTS, params, "variant", DEFAULT_VARIANT));
    if params.bool("pauseOnHover").unwrap_or(true) {
        root = root.class("marquee-pause-on-hover");
    }

    Ok(root.child(track).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    fn render_json(value: serde_json::Value) -> Node {
        render(&merge_params(&defaults(), &object(value))).unwrap()
    }

    fn track_style(node: &Node) -> String {
        node.find_by_class("marquee-track")
            .and_then(|el| el.get_attr("style"))
            .unwrap()
            .to_string()
    }

    #[test]
    fn repeats_text_three_times() {
        let node = render_json(json!({"text": "Selamat datang siswa baru"}));

        let items = node.find_all_by_class("marquee-item");
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.text_content() == "Selamat datang siswa baru"));
    }

    #[test]
    fn speeds_map_to_durations() {
        assert_eq!(duration(Some("slow")), "30s");
        assert_eq!(duration(Some("normal")), "20s");
        assert_eq!(duration(Some("fast")), "10s");
        assert_eq!(duration(Some("warp")), "20s");
        assert_eq!(duration(None), "20s");
    }

    #[test]
    fn direction_flips_animation() {
        assert!(track_style(&render_json(json!({}))).contains("animation-direction: normal"));
        assert!(
            track_style(&render_json(json!({"direction": "right", "speed": "fast"})))
                .contains("animation-duration: 10s; animation-direction: reverse")
        );
    }

    #[test]
    fn pause_on_hover_toggles_class() {
        let paused = render_json(json!({}));
        let running = render_json(json!({"pauseOnHover": false}));

        assert!(paused.as_element().unwrap().has_class("marquee-pause-on-hover"));
        assert!(!running.as_element().unwrap().has_class("marquee-pause-on-hover"));
    }
}
