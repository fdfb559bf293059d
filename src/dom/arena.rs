//! Arena-based DOM for article content.
//!
//! Every node lives in one contiguous vector owned by [`ArenaDom`]; links
//! between nodes are indices into that vector. A node detached from the tree
//! stays in the arena but is unreachable from the root, so it is never
//! visited by queries or serialized again.

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Sentinel value for no node.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    /// Document root created by the parser.
    Document,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    /// Comment.
    Comment(String),
    /// Document type declaration.
    Doctype { name: String },
    /// Tagless ordered list of nodes.
    ///
    /// Appending or inserting a fragment moves its children instead of the
    /// fragment itself, leaving it empty.
    Fragment,
}

/// HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    /// Create an attribute in the null namespace.
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        }
    }
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
///
/// The tree has two distinguished nodes: the document node the parser
/// builds into, and the content root (the `body` element for parsed
/// content). Queries and serialization start at the content root.
#[derive(Debug)]
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: ArenaNodeId,
    root: ArenaNodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document node acting as root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: ArenaNodeId::NONE,
            root: ArenaNodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(ArenaNodeData::Document));
        dom.root = dom.document;
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document node ID.
    pub fn document(&self) -> ArenaNodeId {
        self.document
    }

    /// Get the content root ID.
    pub fn root(&self) -> ArenaNodeId {
        self.root
    }

    /// Make `id` the content root.
    pub fn set_root(&mut self, id: ArenaNodeId) {
        self.root = id;
    }

    /// Get a node by ID.
    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Element { name, attrs }))
    }

    /// Create a new element in the HTML namespace.
    pub fn create_html_element(&mut self, tag: &str, attrs: Vec<Attribute>) -> ArenaNodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        self.create_element(name, attrs)
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Doctype { name }))
    }

    /// Create an empty fragment.
    pub fn create_fragment(&mut self) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Fragment))
    }

    fn is_fragment(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Fragment))
    }

    /// Append a child to a parent node.
    ///
    /// The child is detached from its current position first. Appending a
    /// fragment appends each of its children in order.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        if self.is_fragment(child) {
            for grandchild in self.child_ids(child) {
                self.append(parent, grandchild);
            }
            return;
        }

        self.detach(child);

        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    ///
    /// Like [`append`](Self::append), the new node is detached first and
    /// fragments are spliced in child by child.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        if self.is_fragment(new_node) {
            for child in self.child_ids(new_node) {
                self.insert_before(sibling, child);
            }
            return;
        }

        self.detach(new_node);

        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Remove a node from its parent. The node keeps its own children.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Put `new_node` where `old` is and detach `old`.
    pub fn replace(&mut self, old: ArenaNodeId, new_node: ArenaNodeId) {
        if old == new_node {
            return;
        }
        self.insert_before(old, new_node);
        self.detach(old);
    }

    /// Insert a node after a sibling.
    pub fn insert_after(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let (parent, next) = match self.get(sibling) {
            Some(n) => (n.parent, n.next_sibling),
            None => return,
        };
        if next == new_node {
            return;
        }
        if next.is_some() {
            self.insert_before(next, new_node);
        } else if parent.is_some() {
            self.append(parent, new_node);
        }
    }

    /// Create a detached copy of a node without its children.
    pub fn shallow_clone(&mut self, id: ArenaNodeId) -> ArenaNodeId {
        let data = match self.get(id) {
            Some(node) => node.data.clone(),
            None => ArenaNodeData::Fragment,
        };
        self.alloc(ArenaNode::new(data))
    }

    /// Snapshot of the siblings after a node, in order.
    pub fn following_siblings(&self, id: ArenaNodeId) -> Vec<ArenaNodeId> {
        let next = self
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(ArenaNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: next,
        }
        .collect()
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let ArenaNodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Copy a subtree of another DOM into this one, returning the detached copy.
    pub fn import(&mut self, other: &ArenaDom, id: ArenaNodeId) -> ArenaNodeId {
        let data = match other.get(id) {
            Some(node) => match &node.data {
                // A foreign document or root element is imported as its children.
                ArenaNodeData::Document => ArenaNodeData::Fragment,
                data => data.clone(),
            },
            None => return self.create_fragment(),
        };
        let copy = self.alloc(ArenaNode::new(data));
        for child in other.children(id) {
            let child_copy = self.import(other, child);
            self.append(copy, child_copy);
        }
        copy
    }

    /// Copy the children of `id` in another DOM into a new fragment.
    pub fn import_children(&mut self, other: &ArenaDom, id: ArenaNodeId) -> ArenaNodeId {
        let fragment = self.create_fragment();
        for child in other.children(id) {
            let copy = self.import(other, child);
            self.append(fragment, copy);
        }
        fragment
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(ArenaNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Snapshot of a node's children, safe to hold across mutation.
    pub fn child_ids(&self, parent: ArenaNodeId) -> Vec<ArenaNodeId> {
        self.children(parent).collect()
    }

    /// Iterate over all descendants of a node in document order.
    pub fn descendants(&self, id: ArenaNodeId) -> Descendants<'_> {
        let next = self
            .get(id)
            .map(|n| n.first_child)
            .unwrap_or(ArenaNodeId::NONE);
        Descendants {
            dom: self,
            scope: id,
            next,
        }
    }

    /// Collect every node under the content root matching a predicate.
    ///
    /// The result is a document-order snapshot, so callers may mutate the
    /// tree while walking it.
    pub fn select<F>(&self, predicate: F) -> Vec<ArenaNodeId>
    where
        F: Fn(&ArenaDom, ArenaNodeId) -> bool,
    {
        self.descendants(self.root)
            .filter(|&id| predicate(self, id))
            .collect()
    }

    /// Find the first descendant of `scope` matching a predicate.
    pub fn find_descendant<F>(&self, scope: ArenaNodeId, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaDom, ArenaNodeId) -> bool,
    {
        self.descendants(scope).find(|&id| predicate(self, id))
    }

    /// Find element by tag name under the document node (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.find_descendant(self.document, |dom, id| dom.is_element_named(id, tag))
    }

    /// Check whether a node is reachable from the content root.
    pub fn is_attached(&self, id: ArenaNodeId) -> bool {
        let mut current = id;
        while current.is_some() {
            if current == self.root {
                return true;
            }
            current = self
                .get(current)
                .map(|n| n.parent)
                .unwrap_or(ArenaNodeId::NONE);
        }
        false
    }

    /// Get a node's parent, if it has one.
    pub fn parent(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_some())
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl<'a> Iterator for ChildrenIter<'a> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(ArenaNodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    scope: ArenaNodeId,
    next: ArenaNodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_none() {
            return None;
        }
        let id = self.next;
        let node = self.dom.get(id)?;

        self.next = if node.first_child.is_some() {
            node.first_child
        } else {
            // Climb until a node with a next sibling, stopping at the scope.
            let mut current = id;
            loop {
                if current == self.scope {
                    break ArenaNodeId::NONE;
                }
                match self.dom.get(current) {
                    Some(n) if n.next_sibling.is_some() => break n.next_sibling,
                    Some(n) => current = n.parent,
                    None => break ArenaNodeId::NONE,
                }
                if current.is_none() || current == self.scope {
                    break ArenaNodeId::NONE;
                }
            }
        };
        Some(id)
    }
}

/// Convenience methods for element nodes.
impl ArenaDom {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Check if node is an element with the given tag name.
    pub fn is_element_named(&self, id: ArenaNodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }

    /// Get an element's attributes.
    pub fn attrs(&self, id: ArenaNodeId) -> &[Attribute] {
        self.get(id)
            .and_then(|n| match &n.data {
                ArenaNodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Keep only the attributes accepted by `keep`.
    pub fn retain_attrs<F>(&mut self, id: ArenaNodeId, mut keep: F)
    where
        F: FnMut(&Attribute) -> bool,
    {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Element { attrs, .. } = &mut node.data
        {
            attrs.retain(|a| keep(a));
        }
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenate all descendant text of a node.
    pub fn collect_text(&self, id: ArenaNodeId) -> String {
        let mut text = String::new();
        if let Some(t) = self.text_content(id) {
            text.push_str(t);
        }
        for child in self.descendants(id) {
            if let Some(t) = self.text_content(child) {
                text.push_str(t);
            }
        }
        text
    }
}
