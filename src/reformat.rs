//! The reformatting pipeline: shortcodes, tree passes, serialization.

use std::sync::Arc;

use crate::config::Options;
use crate::dom::{parse_fragment, serialize_tree};
use crate::embed::wrap_embed;
use crate::media::{GalleryLookup, ImageResolver, NoMedia};
use crate::passes::{TransformPass, default_passes, run_passes};
use crate::sanitize::{AllowListSanitizer, Sanitizer};
use crate::shortcode::ShortcodeExpander;
use crate::util::{decode_text, sniff_charset};

/// One article body to reformat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    id: String,
    body: String,
}

impl ContentUnit {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    /// Build a unit from raw bytes in UTF-8 or a legacy charset.
    ///
    /// A `charset=` declaration in the markup is used when the bytes are not
    /// valid UTF-8; Windows-1252 is the last resort.
    pub fn from_bytes(id: impl Into<String>, bytes: &[u8]) -> Self {
        let body = decode_text(bytes, sniff_charset(bytes)).into_owned();
        Self::new(id, body)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Converts article HTML into instant-article markup.
///
/// A `Reformatter` holds no per-call state and can be shared across threads.
///
/// ```
/// use instant_markup::Reformatter;
///
/// let reformatter = Reformatter::default();
/// assert_eq!(
///     reformatter.reformat(r#"<blockquote><p>Hello</p><cite>Jane</cite></blockquote>"#),
///     "<aside><p>Hello</p><cite>Jane</cite></aside>"
/// );
/// ```
pub struct Reformatter {
    images: Arc<dyn ImageResolver>,
    galleries: Arc<dyn GalleryLookup>,
    sanitizer: Arc<dyn Sanitizer>,
    options: Options,
    builtin: Vec<Box<dyn TransformPass>>,
    extra: Vec<Box<dyn TransformPass>>,
}

impl Default for Reformatter {
    fn default() -> Self {
        Self::new(Arc::new(NoMedia), Arc::new(NoMedia))
    }
}

impl Reformatter {
    /// Create a reformatter with the given media lookups and default options.
    pub fn new(images: Arc<dyn ImageResolver>, galleries: Arc<dyn GalleryLookup>) -> Self {
        let sanitizer: Arc<dyn Sanitizer> = Arc::new(AllowListSanitizer);
        let options = Options::default();
        Self {
            builtin: default_passes(sanitizer.clone(), &options),
            images,
            galleries,
            sanitizer,
            options,
            extra: Vec::new(),
        }
    }

    /// Create a reformatter backed by a single store serving both lookups.
    pub fn from_library<L>(library: L) -> Self
    where
        L: ImageResolver + GalleryLookup + 'static,
    {
        let library = Arc::new(library);
        Self::new(library.clone(), library)
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self.rebuild_builtin();
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self.rebuild_builtin();
        self
    }

    /// Register a pass to run after the built-in passes.
    pub fn with_pass(mut self, pass: impl TransformPass + 'static) -> Self {
        self.extra.push(Box::new(pass));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn rebuild_builtin(&mut self) {
        self.builtin = default_passes(self.sanitizer.clone(), &self.options);
    }

    /// Expand registered shortcodes, leaving all other text untouched.
    pub fn expand_shortcodes(&self, content: &str) -> String {
        ShortcodeExpander::new(&self.options, self.images.as_ref(), self.galleries.as_ref())
            .expand(content)
    }

    /// Run the full pipeline over an article body.
    ///
    /// If the expanded content cannot be turned into a tree, it is returned
    /// as-is and a warning is logged.
    pub fn reformat(&self, content: &str) -> String {
        self.reformat_labeled(content, None)
    }

    /// Run the full pipeline over a content unit, logging with its id.
    pub fn reformat_unit(&self, unit: &ContentUnit) -> String {
        self.reformat_labeled(unit.body(), Some(unit.id()))
    }

    /// Wrap resolved embed markup in the social-embed container.
    pub fn reformat_embed(&self, html: &str) -> String {
        wrap_embed(html, &self.options.social_embed_class)
    }

    fn reformat_labeled(&self, content: &str, id: Option<&str>) -> String {
        let label = id.unwrap_or("content");
        let expanded = self.expand_shortcodes(content);

        let mut dom = match parse_fragment(&expanded, self.options.max_input_len) {
            Ok(dom) => dom,
            Err(err) => {
                log::warn!("{label}: returning unformatted content: {err}");
                return expanded;
            }
        };

        run_passes(&self.builtin, &mut dom);
        run_passes(&self.extra, &mut dom);
        log::debug!("{label}: reformatted {} bytes", content.len());
        serialize_tree(&dom)
    }
}
