//! Tolerant HTML parsing into an [`ArenaDom`].

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use super::arena::ArenaDom;
use super::tree_sink::ArenaSink;
use crate::error::{Error, Result};

/// Parse an HTML fragment into a tree rooted at its `body` element.
///
/// The fragment is wrapped in `<html><body>…</body></html>` before parsing so
/// that content which would otherwise be hoisted into `<head>` (`<style>`,
/// `<meta>`, …) stays in the body. html5ever applies browser error recovery:
/// unclosed tags are closed, misnested formatting is repaired, unknown tags
/// become ordinary elements and stray text is preserved.
///
/// `max_len` bounds the input size; `None` disables the check.
pub fn parse_fragment(html: &str, max_len: Option<usize>) -> Result<ArenaDom> {
    if let Some(max) = max_len
        && html.len() > max
    {
        return Err(Error::InputTooLarge {
            len: html.len(),
            max,
        });
    }

    let wrapped = format!("<html><body>{html}</body></html>");
    let sink = parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes());

    if sink.error_count() > 0 {
        log::trace!("recovered from {} HTML parse errors", sink.error_count());
    }

    let mut dom = sink.into_dom();
    let body = dom
        .find_by_tag("body")
        .ok_or_else(|| Error::Parse("document has no body element".to_string()))?;
    dom.set_root(body);
    Ok(dom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_body() {
        let dom = parse_fragment("<p>one</p><p>two</p>", None).unwrap();
        assert!(dom.is_element_named(dom.root(), "body"));
        assert_eq!(dom.children(dom.root()).count(), 2);
    }

    #[test]
    fn test_bare_text_is_preserved() {
        let dom = parse_fragment("just text", None).unwrap();
        let children = dom.child_ids(dom.root());
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("just text"));
    }

    #[test]
    fn test_unclosed_tags_are_closed() {
        let dom = parse_fragment("<div><p>open <em>emphasis", None).unwrap();
        let em = dom.find_by_tag("em").expect("em should exist");
        assert_eq!(dom.collect_text(em), "emphasis");
        let div = dom.find_by_tag("div").expect("div should exist");
        assert!(dom.is_attached(div));
    }

    #[test]
    fn test_unknown_tags_are_opaque_elements() {
        let dom = parse_fragment("<x-widget data-id=\"3\">inner</x-widget>", None).unwrap();
        let widget = dom.find_by_tag("x-widget").expect("custom element kept");
        assert_eq!(dom.get_attr(widget, "data-id"), Some("3"));
    }

    #[test]
    fn test_head_only_elements_stay_in_body() {
        let dom = parse_fragment("<style>p{}</style><p>x</p>", None).unwrap();
        let style = dom.find_by_tag("style").expect("style kept");
        assert!(dom.is_attached(style));
    }

    #[test]
    fn test_stray_end_tags_are_ignored() {
        let dom = parse_fragment("</div>text</span><p>para</p>", None).unwrap();
        assert_eq!(dom.collect_text(dom.root()), "textpara");
    }

    #[test]
    fn test_input_limit() {
        let err = parse_fragment("<p>too long</p>", Some(4)).unwrap_err();
        assert!(matches!(err, Error::InputTooLarge { max: 4, .. }));
    }
}
