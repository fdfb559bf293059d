//! Pass 2: Wrap Images in Figures

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};

use super::TransformPass;

/// Elements that stop the search for an enclosing paragraph. A `figure`
/// start tag cannot close a `p` across any of these.
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

/// Elements that carry content even when they have no text.
const CONTENTFUL: &[&str] = &[
    "audio", "br", "canvas", "embed", "hr", "iframe", "img", "input", "object", "picture", "svg",
    "video",
];

/// Wrap every `img` whose parent is not a `figure` in a new `figure`.
///
/// A `figure` cannot live inside a `p`, so when the image sits in a
/// paragraph the paragraph is split around the new figure. Halves left
/// without content are dropped.
///
/// Before: `div > [text, img]`
/// After:  `div > [text, figure > [img]]`
///
/// Before: `p > [a, span > [img, b]]`
/// After:  `[p > [a], figure > [img], p > [span > [b]]]`
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapImages;

impl TransformPass for WrapImages {
    fn name(&self) -> &str {
        "wrap-images"
    }

    fn apply(&self, dom: &mut ArenaDom) {
        for img in dom.select(|dom, id| dom.is_element_named(id, "img")) {
            let in_figure = dom
                .parent(img)
                .is_some_and(|parent| dom.is_element_named(parent, "figure"));
            if in_figure {
                continue;
            }

            log::trace!("wrapping image {:?}", dom.get_attr(img, "src"));
            let figure = dom.create_html_element("figure", Vec::new());
            dom.replace(img, figure);
            dom.append(figure, img);

            if let Some(paragraph) = enclosing_paragraph(dom, figure) {
                hoist_out_of(dom, paragraph, figure);
            }
        }
    }
}

fn enclosing_paragraph(dom: &ArenaDom, id: ArenaNodeId) -> Option<ArenaNodeId> {
    let mut current = dom.parent(id)?;
    loop {
        let boundary = SCOPE_BOUNDARIES
            .iter()
            .any(|tag| dom.is_element_named(current, tag));
        if current == dom.root() || boundary {
            return None;
        }
        if dom.is_element_named(current, "p") {
            return Some(current);
        }
        current = dom.parent(current)?;
    }
}

/// Move `block` out of `paragraph` to sit right after it.
///
/// Everything after `block` inside the paragraph moves into copies of its
/// ancestors, which become a second paragraph following `block`.
fn hoist_out_of(dom: &mut ArenaDom, paragraph: ArenaNodeId, block: ArenaNodeId) {
    let mut tail: Option<ArenaNodeId> = None;
    let mut emptied = Vec::new();
    let mut node = block;

    while let Some(parent) = dom.parent(node) {
        let following = dom.following_siblings(node);
        let copy = dom.shallow_clone(parent);
        dom.retain_attrs(copy, |attr| attr.name.local.as_ref() != "id");
        if let Some(tail) = tail {
            dom.append(copy, tail);
        }
        for sibling in following {
            dom.append(copy, sibling);
        }

        if parent == paragraph {
            tail = Some(copy);
            break;
        }
        tail = (!is_blank(dom, copy)).then_some(copy);
        emptied.push(parent);
        node = parent;
    }

    dom.insert_after(paragraph, block);
    for ancestor in emptied {
        if is_blank(dom, ancestor) {
            dom.detach(ancestor);
        }
    }
    if let Some(tail) = tail.filter(|&tail| !is_blank(dom, tail)) {
        dom.insert_after(block, tail);
    }
    if is_blank(dom, paragraph) {
        dom.detach(paragraph);
    }
}

/// True when nothing under `id` would render: whitespace, comments and
/// empty inline wrappers only.
fn is_blank(dom: &ArenaDom, id: ArenaNodeId) -> bool {
    dom.descendants(id).all(|child| match dom.get(child).map(|n| &n.data) {
        Some(ArenaNodeData::Text(text)) => text.trim().is_empty(),
        Some(ArenaNodeData::Element { name, .. }) => !CONTENTFUL.contains(&&*name.local),
        _ => true,
    })
}
