//! Allow-list sanitization of markup fragments.
//!
//! Disallowed elements are unwrapped (their children stay in place),
//! disallowed attributes are dropped, and comments are removed. Elements
//! whose content is never prose (`script`, `style`, …) are dropped together
//! with their content. Nothing is reported: violations are simply stripped.

use std::collections::{BTreeMap, BTreeSet};

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId, parse_fragment, serialize_tree};
use crate::escape::has_allowed_scheme;

/// Elements removed together with their content.
const DROP_WITH_CONTENT: &[&str] = &[
    "script", "style", "template", "noscript", "iframe", "object", "embed", "textarea", "select",
];

/// Attributes whose values are URLs and must pass the scheme check.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite", "action"];

/// Elements and attributes permitted by a sanitizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct AllowList {
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl AllowList {
    /// An allow-list that permits nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline markup kept in pull quotes: `em`, `i`, `b`, `strong`,
    /// `a[href]`, and attribute-less `p` to keep paragraph breaks.
    pub fn pull_quote() -> Self {
        Self::new()
            .allow("em", &[])
            .allow("i", &[])
            .allow("b", &[])
            .allow("strong", &[])
            .allow("a", &["href"])
            .allow("p", &[])
    }

    /// Permit a tag with the given attributes.
    pub fn allow(mut self, tag: &str, attrs: &[&str]) -> Self {
        let entry = self.tags.entry(tag.to_ascii_lowercase()).or_default();
        entry.extend(attrs.iter().map(|a| a.to_ascii_lowercase()));
        self
    }

    /// Forbid a tag that was previously allowed.
    pub fn deny(mut self, tag: &str) -> Self {
        self.tags.remove(&tag.to_ascii_lowercase());
        self
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn allows_attr(&self, tag: &str, attr: &str) -> bool {
        self.tags.get(tag).is_some_and(|attrs| attrs.contains(attr))
    }
}

/// Reduces markup to an allow-listed subset.
pub trait Sanitizer: Send + Sync {
    /// Return `html` with everything outside `allow_list` removed.
    fn sanitize(&self, html: &str, allow_list: &AllowList) -> String;
}

/// Tree-based sanitizer built on the crate's own parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListSanitizer;

impl Sanitizer for AllowListSanitizer {
    fn sanitize(&self, html: &str, allow_list: &AllowList) -> String {
        let Ok(mut dom) = parse_fragment(html, None) else {
            // Unparseable input: keep nothing rather than unsanitized markup.
            return String::new();
        };
        let root = dom.root();
        sanitize_children(&mut dom, root, allow_list);
        serialize_tree(&dom)
    }
}

fn sanitize_children(dom: &mut ArenaDom, parent: ArenaNodeId, allow_list: &AllowList) {
    for child in dom.child_ids(parent) {
        let tag = match dom.get(child).map(|n| &n.data) {
            Some(ArenaNodeData::Element { name, .. }) => name.local.to_string(),
            Some(ArenaNodeData::Text(_)) => continue,
            _ => {
                dom.detach(child);
                continue;
            }
        };

        if DROP_WITH_CONTENT.contains(&tag.as_str()) {
            dom.detach(child);
            continue;
        }

        sanitize_children(dom, child, allow_list);

        if allow_list.allows_tag(&tag) {
            dom.retain_attrs(child, |attr| {
                let name = attr.name.local.as_ref();
                allow_list.allows_attr(&tag, name)
                    && (!URL_ATTRIBUTES.contains(&name) || has_allowed_scheme(&attr.value))
            });
        } else {
            // Unwrap: splice the (already sanitized) children in place of the element.
            for grandchild in dom.child_ids(child) {
                dom.insert_before(child, grandchild);
            }
            dom.detach(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        AllowListSanitizer.sanitize(html, &AllowList::pull_quote())
    }

    #[test]
    fn test_keeps_allowed_inline_markup() {
        assert_eq!(
            clean(r#"<em>a</em> <strong>b</strong> <a href="/x">c</a>"#),
            r#"<em>a</em> <strong>b</strong> <a href="/x">c</a>"#
        );
    }

    #[test]
    fn test_unwraps_disallowed_elements() {
        assert_eq!(clean("<div><span>text</span> <u>more</u></div>"), "text more");
    }

    #[test]
    fn test_strips_disallowed_attributes() {
        assert_eq!(
            clean(r#"<a href="/x" onclick="evil()" class="c">link</a><p class="lead">p</p>"#),
            r#"<a href="/x">link</a><p>p</p>"#
        );
    }

    #[test]
    fn test_drops_dangerous_hrefs() {
        assert_eq!(clean(r#"<a href="javascript:alert(1)">x</a>"#), "<a>x</a>");
    }

    #[test]
    fn test_drops_script_content_and_comments() {
        assert_eq!(clean("a<script>alert(1)</script><!-- note -->b"), "ab");
    }

    #[test]
    fn test_nested_disallowed_inside_allowed() {
        assert_eq!(clean("<b>x<span>y<i>z</i></span></b>"), "<b>xy<i>z</i></b>");
    }

    #[test]
    fn test_custom_allow_list() {
        let allow = AllowList::new().allow("cite", &["class"]);
        assert_eq!(
            AllowListSanitizer.sanitize(r#"<cite class="c" id="i">Jane</cite><b>x</b>"#, &allow),
            r#"<cite class="c">Jane</cite>x"#
        );
        assert!(!AllowList::pull_quote().deny("p").allows_tag("p"));
    }
}
