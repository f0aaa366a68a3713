//! Quotation block.

use serde_json::json;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::params::{style, Params, ParamsExt};
use crate::renderers::{block_root, object};

pub const TYPE: &str = "quote";

const DEFAULT_VARIANT: &str = "default";

const VARIANTS: &[(&str, &str)] = &[
    ("default", "quote-default border-l-4 border-gray-300 pl-4 italic"),
    ("large", "quote-large text-2xl font-serif text-center"),
    ("bordered", "quote-bordered border rounded-lg p-6"),
    ("highlight", "quote-highlight bg-yellow-50 border-l-4 border-yellow-400 p-4"),
];

pub fn defaults() -> Params {
    object(json!({
        "text": "",
        "variant": DEFAULT_VARIANT,
    }))
}

pub fn render(params: &Params) -> Result<Node, RenderError> {
    let mut quote = Element::new("blockquote")
        .class(style(VARIANTS, params, "variant", DEFAULT_VARIANT))
        .child(Element::new("p").class("quote-text").text(params.text("text")));

    let author = params.non_empty("author");
    let source = params.non_empty("source");

    if author.is_some() || source.is_some() {
        let mut footer = Element::new("footer").class("quote-attribution");
        if let Some(author) = author {
            footer = footer.child(Element::new("span").class("quote-author").text(author));
        }
        if let Some(source) = source {
            footer = footer.child(Element::new("cite").class("quote-source").text(source));
        }
        quote = quote.child(footer);
    }

    Ok(block_root("figure", TYPE).child(quote).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_params;

    #[test]
    fn renders_attribution() {
        let params = merge_params(
            &defaults(),
            &object(json!({
                "text": "Ing ngarsa sung tuladha",
                "author": "Ki Hajar Dewantara",
                "source": "Semboyan pendidikan",
                "variant": "large",
            })),
        );

        let node = render(&params).unwrap();

        assert_eq!(node.find_by_class("quote-text").unwrap().text_content(), "Ing ngarsa sung tuladha");
        assert_eq!(node.find_by_tag("cite").unwrap().text_content(), "Semboyan pendidikan");
        assert!(node.find_by_tag("blockquote").unwrap().has_class("quote-large"));
    }

    #[test]
    fn omits_footer_without_attribution() {
        let node = render(&defaults()).unwrap();

        assert!(node.find_by_tag("footer").is_none());
        assert!(node.find_by_tag("blockquote").unwrap().has_class("quote-default"));
    }
}
