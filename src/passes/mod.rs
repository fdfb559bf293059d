//! Structural passes over the parsed content tree.
//!
//! Each pass mutates the shared [`ArenaDom`] in place and sees the output of
//! the passes before it.
//!
//! ## Pipeline Order
//!
//! 1. **Pull quotes** - `blockquote` becomes a sanitized `aside` with its
//!    citation moved last
//! 2. **Images** - every `img` not already in a `figure` gets wrapped in one,
//!    splitting any paragraph around it
//!
//! Passes registered by the caller run after these, in registration order.

mod images;
mod pull_quote;

pub use images::WrapImages;
pub use pull_quote::PullQuotes;

use std::sync::Arc;

use crate::config::Options;
use crate::dom::ArenaDom;
use crate::sanitize::Sanitizer;

/// A structural rewrite of the content tree.
pub trait TransformPass: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Rewrite the tree in place.
    fn apply(&self, dom: &mut ArenaDom);
}

/// The built-in passes, in pipeline order.
pub fn default_passes(sanitizer: Arc<dyn Sanitizer>, options: &Options) -> Vec<Box<dyn TransformPass>> {
    vec![
        Box::new(PullQuotes::new(sanitizer, options.pull_quote_allow_list.clone())),
        Box::new(WrapImages),
    ]
}

/// Run passes over the tree in order.
pub fn run_passes(passes: &[Box<dyn TransformPass>], dom: &mut ArenaDom) {
    for pass in passes {
        log::trace!("running pass {}", pass.name());
        pass.apply(dom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_fragment, serialize_tree};
    use crate::sanitize::AllowListSanitizer;

    fn run_default(html: &str) -> String {
        let passes = default_passes(Arc::new(AllowListSanitizer), &Options::default());
        let mut dom = parse_fragment(html, None).unwrap();
        run_passes(&passes, &mut dom);
        serialize_tree(&dom)
    }

    struct DropCitations;

    impl TransformPass for DropCitations {
        fn name(&self) -> &str {
            "drop-citations"
        }

        fn apply(&self, dom: &mut ArenaDom) {
            for cite in dom.select(|dom, id| dom.is_element_named(id, "cite")) {
                dom.detach(cite);
            }
        }
    }

    #[test]
    fn test_full_pipeline() {
        assert_eq!(
            run_default(r#"<blockquote><p>Quote</p><cite>Ann</cite></blockquote><img src="a.jpg">"#),
            r#"<aside><p>Quote</p><cite>Ann</cite></aside><figure><img src="a.jpg"></figure>"#
        );
    }

    #[test]
    fn test_custom_pass_sees_previous_output() {
        let mut passes = default_passes(Arc::new(AllowListSanitizer), &Options::default());
        passes.push(Box::new(DropCitations));

        let mut dom = parse_fragment("<blockquote><p>Q</p><cite>A</cite></blockquote>", None).unwrap();
        run_passes(&passes, &mut dom);
        assert_eq!(serialize_tree(&dom), "<aside><p>Q</p></aside>");
    }

    #[test]
    fn test_pipeline_idempotent() {
        let once = run_default(r#"<blockquote><em>a</em><cite>b</cite></blockquote><p>t<img src="x.png">u</p>"#);
        assert_eq!(run_default(&once), once);
    }
}
