//! Accordion block and its open-panel state.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{Params, ParamsExt};
use crate::renderers::{block_root, block_title, item_object, markdown, object};

pub const TYPE: &str = "accordion";

/// Which panels of one accordion instance are expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccordionState {
    open: BTreeSet<usize>,
}

impl AccordionState {
    /// Initial state: the first panel open.
    pub fn initial() -> Self {
        Self {
            open: BTreeSet::from([0]),
        }
    }

    /// State with every panel closed.
    pub fn closed() -> Self {
        Self {
            open: BTreeSet::new(),
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    /// Open panel indices in ascending order.
    pub fn open_indices(&self) -> Vec<usize> {
        self.open.iter().copied().collect()
    }
}

impl Default for AccordionState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Toggle a panel.
///
/// With `allow_multiple` the panel flips independently. Otherwise opening a
/// panel closes all others and toggling the open panel closes it.
pub fn toggle(state: &AccordionState, index: usize, allow_multiple: bool) -> AccordionState {
    let was_open = state.is_open(index);

    let mut open = if allow_multiple {
        state.open.clone()
    } else {
        BTreeSet::new()
    };

    if was_open {
        open.remove(&index);
    } else {
        open.insert(index);
    }

    AccordionState { open }
}

pub fn defaults() -> Params {
    object(json!({
        "items": [],
        "allowMultiple": false,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    render_with_state(params, &AccordionState::initial())
}

/// Render with an explicit open-panel state.
pub fn render_with_state(params: &Params, state: &AccordionState) -> Result<Node, RenderError> {
    let allow_multiple = params.bool("allowMultiple").unwrap_or(false);

    let mut root = block_root("div", TYPE).attr("data-allow-multiple", allow_multiple.to_string());
    if let Some(title) = block_title(params, "h3") {
        root = root.child(title);
    }

    for (index, item) in params.list("items")?.iter().enumerate() {
        let item = item_object(item).ok_or_else(|| RenderError::item("items", index, "an object"))?;

        let title = item.non_empty("title").unwrap_or_else(|| item.text("text"));
        let content = item.text("content");

        let mut panel = Element::new("details")
            .class("accordion-item")
            .attr("data-index", index.to_string());
        if state.is_open(index) {
            panel = panel.flag("open");
        }

        panel = panel
            .child(Element::new("summary").class("accordion-title").text(title))
            .child(Element::new("div").class("accordion-content").child(markdown(&content)));

        root = root.child(panel);
    }

    Ok(root.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    #[test]
    fn starts_with_first_panel_open() {
        assert_eq!(AccordionState::initial().open_indices(), vec![0]);
    }

    #[test]
    fn exclusive_mode_keeps_only_latest() {
        let state = AccordionState::initial();

        let state = toggle(&state, 2, false);
        let state = toggle(&state, 1, false);

        assert_eq!(state.open_indices(), vec![1]);
    }

    #[test]
    fn exclusive_mode_closes_open_panel() {
        let state = toggle(&AccordionState::initial(), 0, false);

        assert_eq!(state, AccordionState::closed());
        assert!(state.open_indices().is_empty());
    }

    #[test]
    fn multiple_mode_opens_independently() {
        let mut state = AccordionState::closed();
        for index in [0, 1, 2] {
            state = toggle(&state, index, true);
        }

        assert_eq!(state.open_indices(), vec![0, 1, 2]);

        let state = toggle(&state, 1, true);
        assert_eq!(state.open_indices(), vec![0, 2]);
    }

    #[test]
    fn renders_first_panel_open_with_markdown() {
        let params = merge_params(
            &defaults(),
            &object(json!({
                "items": [
                    {"title": "Jadwal", "content": "Senin **07.00**"},
                    {"title": "Seragam", "content": "Putih abu-abu"},
                ],
            })),
        );

        let node = render(&params).unwrap();
        let panels = node.find_all_by_class("accordion-item");

        assert_eq!(panels.len(), 2);
        assert!(panels[0].has_attr("open"));
        assert!(!panels[1].has_attr("open"));
        assert!(node.to_html().contains("<strong>07.00</strong>"));
        assert_eq!(
            node.as_element().unwrap().get_attr("data-allow-multiple"),
            Some("false")
        );
    }

    #[test]
    fn escapes_html_in_content() {
        let params = object(json!({
            "items": [{"title": "A", "content": "Halo <script>alert(1)</script> *semua*"}],
        }));

        let html = render(&params).unwrap().to_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<em>semua</em>"));
    }

    #[test]
    fn content_text_is_searchable() {
        let params = object(json!({
            "items": [{"title": "Sejarah", "content": "Didirikan tahun **1965**.\n\n- Lab\n- Masjid"}],
        }));

        let node = render(&params).unwrap();
        let content = node.find_by_class("accordion-content").unwrap();

        assert_eq!(content.text_content(), "Didirikan tahun 1965. Lab Masjid");
    }

    #[test]
    fn renders_given_state() {
        let params = object(json!({"items": [{"title": "A"}, {"title": "B"}]}));
        let state = toggle(&AccordionState::initial(), 1, true);

        let node = render_with_state(&params, &state).unwrap();
        let panels = node.find_all_by_class("accordion-item");

        assert!(panels[0].has_attr("open"));
        assert!(panels[1].has_attr("open"));
    }
}
