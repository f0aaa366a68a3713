//! Block renderer registry.
//!
//! Maps a block type name to its renderer and default parameters. The
//! built-in registry is created once per process and only read afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::error::RenderError;
use crate::node::Node;
use crate::params::{merge_params, Params};
use crate::renderers;

/// Render function for one block type.
pub type RenderFn = Arc<dyn Fn(&Params) -> Result<Node, RenderError> + Send + Sync>;

/// A registered renderer with its defaults.
#[derive(Clone)]
pub struct RendererDefinition {
    /// Block type name as registered
    pub block_type: String,

    /// Default parameters merged under supplied ones
    pub defaults: Params,

    render: RenderFn,
}

impl RendererDefinition {
    /// Render with `params` merged over the defaults.
    pub fn render(&self, params: &Params) -> Result<Node, RenderError> {
        let merged = merge_params(&self.defaults, params);
        (self.render)(&merged)
    }
}

impl fmt::Debug for RendererDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererDefinition")
            .field("block_type", &self.block_type)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// A registry of block renderers.
#[derive(Debug, Default, Clone)]
pub struct BlockRegistry {
    /// Definitions by type name (lowercase)
    definitions: HashMap<String, RendererDefinition>,
}

static BUILTIN: LazyLock<BlockRegistry> = LazyLock::new(BlockRegistry::builtin);

/// The process-wide registry holding the built-in renderers.
pub fn builtin_registry() -> &'static BlockRegistry {
    &BUILTIN
}

impl BlockRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in block type.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        renderers::register_all(&mut registry);
        registry
    }

    /// Register a renderer, replacing any previous one for the same type.
    ///
    /// Returns the replaced definition.
    pub fn register<F>(
        &mut self,
        block_type: &str,
        defaults: Params,
        render: F,
    ) -> Option<RendererDefinition>
    where
        F: Fn(&Params) -> Result<Node, RenderError> + Send + Sync + 'static,
    {
        let definition = RendererDefinition {
            block_type: block_type.to_string(),
            defaults,
            render: Arc::new(render),
        };

        let previous = self
            .definitions
            .insert(block_type.to_lowercase(), definition);

        if previous.is_some() {
            tracing::debug!("Replaced renderer for block type '{}'", block_type);
        }

        previous
    }

    /// Look up a renderer by type name (case-insensitive).
    pub fn resolve(&self, block_type: &str) -> Result<&RendererDefinition, RegistryError> {
        self.definitions
            .get(&block_type.to_lowercase())
            .ok_or_else(|| RegistryError::NotFound(block_type.to_string()))
    }

    /// Check if a type is registered.
    pub fn contains(&self, block_type: &str) -> bool {
        self.definitions.contains_key(&block_type.to_lowercase())
    }

    /// Registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .definitions
            .values()
            .map(|d| d.block_type.as_str())
            .collect();
        types.sort_unstable();
        types
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Errors that can occur with the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("Block type not found: {0}")]
    NotFound(String),
}
