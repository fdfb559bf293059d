//! HTML serialization of arena subtrees.
//!
//! The arena implements html5ever's [`Serialize`] trait so escaping, void
//! elements and raw-text elements (`script`, `style`, `iframe`, …) follow
//! the HTML fragment serialization algorithm. Re-parsing the output yields
//! the same tree.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// A node paired with the DOM that owns it.
struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: ArenaNodeId,
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(self.dom, self.id, serializer),
            TraversalScope::ChildrenOnly(_) => write_children(self.dom, self.id, serializer),
        }
    }
}

fn write_children<S: Serializer>(dom: &ArenaDom, id: ArenaNodeId, serializer: &mut S) -> io::Result<()> {
    for child in dom.children(id) {
        write_node(dom, child, serializer)?;
    }
    Ok(())
}

fn write_node<S: Serializer>(dom: &ArenaDom, id: ArenaNodeId, serializer: &mut S) -> io::Result<()> {
    let Some(node) = dom.get(id) else {
        return Ok(());
    };

    match &node.data {
        ArenaNodeData::Element { name, attrs } => {
            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|a| (&a.name, a.value.as_str())),
            )?;
            write_children(dom, id, serializer)?;
            serializer.end_elem(name.clone())
        }
        ArenaNodeData::Text(text) => serializer.write_text(text),
        ArenaNodeData::Comment(text) => serializer.write_comment(text),
        ArenaNodeData::Doctype { name } => serializer.write_doctype(name),
        ArenaNodeData::Document | ArenaNodeData::Fragment => write_children(dom, id, serializer),
    }
}

fn to_string(dom: &ArenaDom, id: ArenaNodeId, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let node = SerializableNode { dom, id };
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };

    // Writing into a Vec cannot fail.
    if let Err(e) = serialize(&mut bytes, &node, opts) {
        log::error!("HTML serialization failed: {e}");
    }

    String::from_utf8(bytes).unwrap_or_default()
}

/// Serialize the children of a node, in document order.
///
/// This is the inner HTML of `id`.
pub fn serialize_children(dom: &ArenaDom, id: ArenaNodeId) -> String {
    to_string(dom, id, TraversalScope::ChildrenOnly(None))
}

/// Serialize a node together with its children (outer HTML).
pub fn serialize_node(dom: &ArenaDom, id: ArenaNodeId) -> String {
    to_string(dom, id, TraversalScope::IncludeNode)
}

/// Serialize everything under the content root.
pub fn serialize_tree(dom: &ArenaDom) -> String {
    serialize_children(dom, dom.root())
}
