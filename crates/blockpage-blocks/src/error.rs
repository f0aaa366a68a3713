//! Error types for block rendering.

/// Errors a renderer can report for its own block.
///
/// The composer turns these into a placeholder; they never abort a page.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid parameter '{name}': expected {expected}")]
    InvalidParam {
        name: String,
        expected: &'static str,
    },

    #[error("Invalid item {index} in '{name}': expected {expected}")]
    InvalidItem {
        name: String,
        index: usize,
        expected: &'static str,
    },
}

impl RenderError {
    pub(crate) fn param(name: &str, expected: &'static str) -> Self {
        Self::InvalidParam {
            name: name.to_string(),
            expected,
        }
    }

    pub(crate) fn item(name: &str, index: usize, expected: &'static str) -> Self {
        Self::InvalidItem {
            name: name.to_string(),
            index,
            expected,
        }
    }
}
