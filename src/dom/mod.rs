//! Mutable HTML tree for article content.
//!
//! Content is parsed with html5ever into an arena ([`ArenaDom`]), mutated in
//! place by the transform passes, and serialized back to markup.
//!
//! ```
//! use instant_markup::dom::{parse_fragment, serialize_tree};
//!
//! let dom = parse_fragment("<p>Hello <b>world", None).unwrap();
//! assert_eq!(serialize_tree(&dom), "<p>Hello <b>world</b></p>");
//! ```

mod arena;
mod parse;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter, Descendants};
pub use parse::parse_fragment;
pub use serialize::{serialize_children, serialize_node, serialize_tree};

/// Parse a fragment and return only its text, with all markup removed.
///
/// Entities are decoded, so the result is plain text ready for escaping.
pub fn strip_tags(html: &str) -> String {
    match parse_fragment(html, None) {
        Ok(dom) => dom.collect_text(dom.root()),
        Err(_) => html.to_string(),
    }
}
