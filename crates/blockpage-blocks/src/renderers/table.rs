//! Table block with plain and rich cells.

use serde_json::{json, Value};

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{resolve_or_default, style, value_text, Params, ParamsExt};
use crate::renderers::{block_root, block_title, object};

pub const TYPE: &str = "table";

const DEFAULT_VARIANT: &str = "default";
const DEFAULT_BADGE_COLOR: &str = "blue";

const VARIANTS: &[(&str, &str)] = &[
    ("default", "table-default w-full text-left"),
    ("striped", "table-striped w-full text-left"),
    ("bordered", "table-bordered w-full text-left border"),
    ("compact", "table-compact w-full text-left text-sm"),
];

const BADGE_COLORS: &[(&str, &str)] = &[
    ("green", "badge-green bg-green-100 text-green-800"),
    ("red", "badge-red bg-red-100 text-red-800"),
    ("yellow", "badge-yellow bg-yellow-100 text-yellow-800"),
    ("blue", "badge-blue bg-blue-100 text-blue-800"),
];

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A bare string
    PlainText(String),
    /// A cell with optional icon, emphasis and badge
    Rich(RichCell),
}

/// Structured cell content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichCell {
    /// Label, from `text` or else `value`
    pub text: Option<String>,
    pub icon: Option<String>,
    pub bold: bool,
    pub badge: Option<String>,
    pub badge_color: Option<String>,
}

impl Cell {
    /// Interpret a JSON cell value.
    ///
    /// Objects are rich cells; scalars are plain text; anything else is an
    /// empty cell.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let text = map
                    .get("text")
                    .and_then(value_text)
                    .or_else(|| map.get("value").and_then(value_text));

                Cell::Rich(RichCell {
                    text,
                    icon: map.non_empty("icon"),
                    bold: map.bool("bold").unwrap_or(false),
                    badge: map.non_empty("badge"),
                    badge_color: map.str("badgeColor").map(str::to_string),
                })
            }
            other => Cell::PlainText(value_text(other).unwrap_or_default()),
        }
    }

    /// Render the cell content into a `td`.
    fn render(&self) -> Element {
        let td = Element::new("td").class("table-cell");

        match self {
            Cell::PlainText(text) => td.text(text.clone()),
            Cell::Rich(rich) => {
                let mut td = td;

                if let Some(icon) = &rich.icon {
                    td = td.child(Element::new("span").class("cell-icon").text(icon.clone()));
                }

                let label = rich.text.clone().unwrap_or_default();
                td = if rich.bold {
                    td.child(Element::new("strong").class("cell-text font-bold").text(label))
                } else {
                    td.child(Element::new("span").class("cell-text").text(label))
                };

                if let Some(badge) = &rich.badge {
                    td = td.child(
                        Element::new("span")
                            .class("badge")
                            .class(badge_style(rich.badge_color.as_deref()))
                            .text(badge.clone()),
                    );
                }

                td
            }
        }
    }
}

/// Badge classes for a color token; unknown colors use blue.
pub fn badge_style(color: Option<&str>) -> &'static str {
    resolve_or_default(BADGE_COLORS, color, DEFAULT_BADGE_COLOR)
        .copied()
        .unwrap_or("")
}

pub fn defaults() -> Params {
    object(json!({
        "headers": [],
        "rows": [],
        "variant": DEFAULT_VARIANT,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let headers: Vec<String> = params
        .list("headers")?
        .iter()
        .map(|h| value_text(h).unwrap_or_default())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (index, row) in params.list("rows")?.iter().enumerate() {
        let Value::Array(cells) = row else {
            return Err(RenderError::item("rows", index, "a list of cells"));
        };
        rows.push(fit_row(cells.iter().map(Cell::from_value).collect(), headers.len()));
    }

    let mut table = Element::new("table").class(style(VARIANTS, params, "variant", DEFAULT_VARIANT));

    if let Some(caption) = params.non_empty("caption") {
        table = table.child(Element::new("caption").class("table-caption").text(caption));
    }

    if !headers.is_empty() {
        let head_row = Element::new("tr").children(
            headers
                .iter()
                .map(|h| Element::new("th").class("table-header").text(h.clone())),
        );
        table = table.child(Element::new("thead").child(head_row));
    }

    let body = Element::new("tbody").children(
        rows.iter()
            .map(|row| Element::new("tr").children(row.iter().map(Cell::render))),
    );
    table = table.child(body);

    let mut root = block_root("div", TYPE).class("overflow-x-auto");
    if let Some(title) = block_title(params, "h3") {
        root = root.child(title);
    }

    Ok(root.child(table).into())
}

/// Pad short rows with empty cells and truncate long ones to the header
/// count. Without headers the row is kept as-is.
fn fit_row(mut cells: Vec<Cell>, width: usize) -> Vec<Cell> {
    if width == 0 {
        return cells;
    }
    cells.truncate(width);
    while cells.len() < width {
        cells.push(Cell::PlainText(String::new()));
    }
    cells
}
