//! Content blocks for school website pages.
//!
//! A page is an ordered list of typed, parameterized blocks. This crate
//! holds the block schema, the renderer registry, the built-in renderers
//! and the composer that turns a page into an output tree.

pub mod composer;
pub mod error;
pub mod node;
pub mod params;
pub mod registry;
pub mod renderers;
pub mod schema;

pub use composer::{compose, compose_html, BlockOutcome, ComposeSummary, RenderedBlock};
pub use error::RenderError;
pub use node::{Element, Node};
pub use params::{merge_params, resolve_or_default, Params, ParamsExt};
pub use registry::{builtin_registry, BlockRegistry, RegistryError, RendererDefinition};
pub use renderers::accordion::{toggle, AccordionState};
pub use renderers::table::{Cell, RichCell};
pub use renderers::video::{extract_id, VideoEmbed};
pub use schema::{BlockRecord, SchemaError};
