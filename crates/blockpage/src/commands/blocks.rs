//! List the available block types.

use anyhow::{Context, Result};
use blockpage_blocks::{builtin_registry, BlockRegistry};
use serde_json::{Map, Value};

/// Run the blocks command.
pub fn run() -> Result<()> {
    let listing = serde_json::to_string_pretty(&block_listing(builtin_registry()))
        .context("Failed to serialize block listing")?;
    println!("{}", listing);
    Ok(())
}

/// Block types mapped to their default parameters.
fn block_listing(registry: &BlockRegistry) -> Value {
    let mut listing = Map::new();
    for block_type in registry.types() {
        if let Ok(definition) = registry.resolve(block_type) {
            listing.insert(block_type.to_string(), Value::Object(definition.defaults.clone()));
        }
    }
    Value::Object(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_builtin_type() {
        let listing = block_listing(builtin_registry());
        let types: Vec<&String> = listing.as_object().unwrap().keys().collect();

        assert_eq!(types.len(), 12);
        assert_eq!(listing["marquee"]["speed"], "normal");
        assert_eq!(listing["accordion"]["allowMultiple"], false);
    }
}
