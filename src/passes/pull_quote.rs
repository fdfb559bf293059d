//! Pass 1: Blockquotes to Pull Quotes

use std::sync::Arc;

use crate::dom::{ArenaDom, parse_fragment, serialize_children};
use crate::sanitize::{AllowList, Sanitizer};

use super::TransformPass;

/// Turn every `blockquote` into an `aside` pull quote.
///
/// ```html
/// <blockquote><p>Hello <span>there</span></p><cite>Jane</cite> said</blockquote>
/// ```
///
/// The first `cite` under the quote is taken out, the remaining content is
/// reduced to the allow-listed markup, and the citation is appended last:
///
/// ```html
/// <aside><p>Hello there</p> said<cite>Jane</cite></aside>
/// ```
///
/// Only the first `cite` moves; any others go through the sanitizer with
/// the rest of the content.
pub struct PullQuotes {
    sanitizer: Arc<dyn Sanitizer>,
    allow_list: AllowList,
}

impl PullQuotes {
    pub fn new(sanitizer: Arc<dyn Sanitizer>, allow_list: AllowList) -> Self {
        Self {
            sanitizer,
            allow_list,
        }
    }
}

impl TransformPass for PullQuotes {
    fn name(&self) -> &str {
        "pull-quotes"
    }

    fn apply(&self, dom: &mut ArenaDom) {
        for quote in dom.select(|dom, id| dom.is_element_named(id, "blockquote")) {
            // Nested quotes are flattened into their outer quote's body.
            if !dom.is_attached(quote) {
                continue;
            }

            let cite = dom.find_descendant(quote, |dom, id| dom.is_element_named(id, "cite"));
            if let Some(cite) = cite {
                dom.detach(cite);
            }

            let body = self.sanitizer.sanitize(&serialize_children(dom, quote), &self.allow_list);
            let aside = dom.create_html_element("aside", Vec::new());
            match parse_fragment(&body, None) {
                Ok(parsed) => {
                    let fragment = dom.import_children(&parsed, parsed.root());
                    dom.append(aside, fragment);
                }
                Err(err) => log::debug!("dropping pull quote body: {err}"),
            }

            if let Some(cite) = cite {
                dom.append(aside, cite);
            }
            dom.replace(quote, aside);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::serialize_tree;
    use crate::sanitize::AllowListSanitizer;

    fn run(html: &str) -> String {
        let pass = PullQuotes::new(Arc::new(AllowListSanitizer), AllowList::pull_quote());
        let mut dom = parse_fragment(html, None).unwrap();
        pass.apply(&mut dom);
        serialize_tree(&dom)
    }

    #[test]
    fn test_cite_moves_last() {
        assert_eq!(
            run("<blockquote><p>Hello</p><cite>Jane</cite></blockquote>"),
            "<aside><p>Hello</p><cite>Jane</cite></aside>"
        );
        assert_eq!(
            run("<blockquote><cite>Jane</cite><p>Hello</p></blockquote>"),
            "<aside><p>Hello</p><cite>Jane</cite></aside>"
        );
    }

    #[test]
    fn test_no_cite_keeps_order() {
        assert_eq!(
            run("<blockquote><p>One</p><p>Two</p></blockquote>"),
            "<aside><p>One</p><p>Two</p></aside>"
        );
    }

    #[test]
    fn test_nested_cite_found() {
        assert_eq!(
            run("<blockquote><p>Hi <cite>Bo</cite> there</p></blockquote>"),
            "<aside><p>Hi  there</p><cite>Bo</cite></aside>"
        );
    }

    #[test]
    fn test_body_sanitized() {
        assert_eq!(
            run(r#"<blockquote class="q"><p style="x"><span>a</span> <em>b</em></p><script>x()</script></blockquote>"#),
            "<aside><p>a <em>b</em></p></aside>"
        );
    }

    #[test]
    fn test_second_cite_not_relocated() {
        assert_eq!(
            run("<blockquote><cite>A</cite><p>x</p><cite>B</cite></blockquote>"),
            "<aside><p>x</p>B<cite>A</cite></aside>"
        );
    }

    #[test]
    fn test_position_kept_among_siblings() {
        assert_eq!(
            run("<p>before</p><blockquote>q</blockquote><p>after</p>"),
            "<p>before</p><aside>q</aside><p>after</p>"
        );
    }

    #[test]
    fn test_nested_quotes_flatten() {
        assert_eq!(
            run("<blockquote>a<blockquote>b</blockquote></blockquote>"),
            "<aside>ab</aside>"
        );
    }
}
