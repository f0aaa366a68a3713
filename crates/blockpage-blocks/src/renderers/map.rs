//! Embedded map block.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{style, Params, ParamsExt};
use crate::renderers::{block_root, block_title, media_placeholder, object};

pub const TYPE: &str = "map";

const DEFAULT_ZOOM: u64 = 15;
const DEFAULT_HEIGHT: &str = "md";

const HEIGHTS: &[(&str, &str)] = &[("sm", "h-64"), ("md", "h-96"), ("lg", "h-[32rem]")];

/// Where the map points.
#[derive(Debug, Clone, PartialEq)]
pub enum MapLocation {
    Coordinates { lat: f64, lng: f64 },
    Address(String),
}

impl MapLocation {
    /// Resolve from params; coordinates win over an address.
    pub fn from_params(params: &Params) -> Option<Self> {
        if let (Some(lat), Some(lng)) = (params.f64("lat"), params.f64("lng")) {
            return Some(MapLocation::Coordinates { lat, lng });
        }
        params.non_empty("address").map(MapLocation::Address)
    }

    /// Embed URL for an iframe.
    pub fn embed_url(&self, zoom: u64) -> String {
        match self {
            MapLocation::Coordinates { lat, lng } => format!(
                "https://maps.google.com/maps?q={},{}&z={}&output=embed",
                lat, lng, zoom
            ),
            MapLocation::Address(address) => format!(
                "https://maps.google.com/maps?q={}&t=m&z={}&ie=UTF8&iwloc=&output=embed",
                urlencoding::encode(address),
                zoom
            ),
        }
    }
}

pub fn defaults() -> Params {
    object(json!({
        "address": "",
        "zoom": DEFAULT_ZOOM,
        "height": DEFAULT_HEIGHT,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let Some(location) = MapLocation::from_params(params) else {
        return Ok(media_placeholder(
            TYPE,
            "No location set",
            "Enter the school address, or latitude and longitude coordinates.",
        ));
    };

    let zoom = params.u64("zoom").unwrap_or(DEFAULT_ZOOM);

    let iframe = Element::new("iframe")
        .class("map-iframe w-full h-full border-0")
        .attr("src", location.embed_url(zoom))
        .attr("title", params.non_empty("title").unwrap_or_else(|| "Map".to_string()))
        .attr("loading", "lazy")
        .attr("referrerpolicy", "no-referrer-when-downgrade")
        .flag("allowfullscreen");

    let frame = Element::new("div")
        .class("map-frame w-full overflow-hidden rounded-lg")
        .class(style(HEIGHTS, params, "height", DEFAULT_HEIGHT))
        .child(iframe);

    let mut root = block_root("div", TYPE);
    if let Some(title) = block_title(params, "h3") {
        root = root.child(title);
    }
    root = root.child(frame);
    if let MapLocation::Address(address) = &location {
        root = root.child(Element::new("p").class("map-address").text(address.clone()));
    }

    Ok(root.into())
}
