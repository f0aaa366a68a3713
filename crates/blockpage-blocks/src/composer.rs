//! Page composer.
//!
//! Turns an ordered list of block records into rendered output. One bad
//! block never aborts the page: unknown types and renderer errors are
//! replaced by placeholders in the same position.

use serde::Serialize;

use crate::node::{Element, Node};
use crate::registry::BlockRegistry;
use crate::schema::BlockRecord;

/// How a block was rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum BlockOutcome {
    /// Rendered by its registered renderer
    Rendered,
    /// No renderer for the type; placeholder emitted
    Unsupported,
    /// The renderer reported an error; placeholder emitted
    Failed(String),
}

/// Output for one block, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBlock {
    /// Position in the input sequence
    pub index: usize,

    /// Block type as authored
    pub block_type: String,

    pub outcome: BlockOutcome,

    /// Rendered tree or placeholder
    pub node: Node,
}

impl RenderedBlock {
    pub fn is_placeholder(&self) -> bool {
        self.outcome != BlockOutcome::Rendered
    }
}

/// Counts of block outcomes for a composed page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComposeSummary {
    pub rendered: usize,
    pub unsupported: usize,
    pub failed: usize,
}

impl ComposeSummary {
    /// Tally outcomes of composed blocks.
    pub fn of(blocks: &[RenderedBlock]) -> Self {
        let mut summary = Self::default();
        for block in blocks {
            match block.outcome {
                BlockOutcome::Rendered => summary.rendered += 1,
                BlockOutcome::Unsupported => summary.unsupported += 1,
                BlockOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.rendered + self.unsupported + self.failed
    }
}

/// Render every block in order.
pub fn compose(registry: &BlockRegistry, blocks: &[BlockRecord]) -> Vec<RenderedBlock> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, record)| compose_block(registry, index, record))
        .collect()
}

/// Render blocks and join them into page HTML.
///
/// Each block is wrapped in `<section class="page-block">`.
pub fn compose_html(registry: &BlockRegistry, blocks: &[BlockRecord]) -> String {
    to_html(&compose(registry, blocks))
}

/// Join composed blocks into page HTML.
pub fn to_html(blocks: &[RenderedBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            let section = Element::new("section")
                .class("page-block")
                .attr("data-block-type", block.block_type.clone())
                .attr("data-block-index", block.index.to_string())
                .child(block.node.clone());
            Node::from(section).to_html()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn compose_block(registry: &BlockRegistry, index: usize, record: &BlockRecord) -> RenderedBlock {
    let block_type = record.block_type.clone();

    if let Some(error) = &record.error {
        tracing::warn!("Block {} could not be read: {}", index, error);
        return RenderedBlock {
            index,
            node: failed_placeholder(&block_type),
            block_type,
            outcome: BlockOutcome::Failed(error.to_string()),
        };
    }

    let definition = match registry.resolve(&record.block_type) {
        Ok(definition) => definition,
        Err(e) => {
            tracing::warn!("Block {} skipped: {}", index, e);
            return RenderedBlock {
                index,
                node: unsupported_placeholder(&block_type),
                block_type,
                outcome: BlockOutcome::Unsupported,
            };
        }
    };

    match definition.render(&record.params) {
        Ok(node) => {
            tracing::debug!("Rendered block {} ({})", index, block_type);
            RenderedBlock {
                index,
                block_type,
                outcome: BlockOutcome::Rendered,
                node,
            }
        }
        Err(e) => {
            tracing::warn!("Block {} ({}) could not be rendered: {}", index, block_type, e);
            RenderedBlock {
                index,
                node: failed_placeholder(&block_type),
                block_type,
                outcome: BlockOutcome::Failed(e.to_string()),
            }
        }
    }
}

/// Neutral output for a block type with no renderer.
pub fn unsupported_placeholder(block_type: &str) -> Node {
    Element::new("div")
        .class("block-placeholder block-unsupported")
        .attr("data-block-type", block_type)
        .child(
            Element::new("p")
                .class("placeholder-message")
                .text(format!("Unsupported block: {}", block_type)),
        )
        .into()
}

/// Neutral output for a block whose renderer reported an error.
pub fn failed_placeholder(block_type: &str) -> Node {
    let message = if block_type.is_empty() {
        "This block could not be displayed".to_string()
    } else {
        format!("This {} block could not be displayed", block_type)
    };

    Element::new("div")
        .class("block-placeholder block-failed")
        .attr("data-block-type", block_type)
        .child(
            Element::new("p")
                .class("placeholder-message")
                .text(message),
        )
        .into()
}
