//! Shortcode expansion.
//!
//! Three shortcodes are registered (names come from [`Options`]):
//!
//! | Shortcode | Output |
//! |-----------|--------|
//! | `gallery ids="1,2"` | slideshow `<figure>` of captioned images |
//! | `caption id="attachment_N"` | `<figure><img …/>CAPTION</figure>` |
//! | `custom-gallery id="…" title="…"` | slideshow built from an API gallery |
//!
//! Everything else, including unknown shortcodes, is left untouched.
//! Lookups that fail produce empty output for that shortcode.

mod parse;

pub use parse::{Attrs, Shortcode, parse_attrs, replace_shortcodes};

use std::fmt::Write;

use crate::config::Options;
use crate::escape::{esc_html, esc_url, strip_tags};
use crate::media::{GalleryLookup, ImageResolver};

/// Expands registered shortcodes against a pair of media lookups.
pub struct ShortcodeExpander<'a> {
    options: &'a Options,
    images: &'a dyn ImageResolver,
    galleries: &'a dyn GalleryLookup,
}

impl<'a> ShortcodeExpander<'a> {
    pub fn new(
        options: &'a Options,
        images: &'a dyn ImageResolver,
        galleries: &'a dyn GalleryLookup,
    ) -> Self {
        Self {
            options,
            images,
            galleries,
        }
    }

    /// Whether `tag` names one of the registered shortcodes.
    pub fn is_registered(&self, tag: &str) -> bool {
        tag == self.options.gallery_tag
            || tag == self.options.caption_tag
            || tag == self.options.custom_gallery_tag
    }

    /// Replace every registered shortcode in `content`.
    pub fn expand(&self, content: &str) -> String {
        replace_shortcodes(content, |tag| self.is_registered(tag), |code| self.render(code))
    }

    fn render(&self, code: &Shortcode<'_>) -> String {
        let tag = code.tag;
        log::trace!("expanding [{tag}] with {} attributes", code.attrs.named().len());
        if tag == self.options.gallery_tag {
            self.gallery(&code.attrs)
        } else if tag == self.options.caption_tag {
            self.caption(&code.attrs)
        } else if tag == self.options.custom_gallery_tag {
            self.custom_gallery(&code.attrs)
        } else {
            String::new()
        }
    }

    /// Slideshow of the images listed in `ids` (or `include`), in order.
    pub fn gallery(&self, attrs: &Attrs) -> String {
        let Some(ids) = attrs.get("ids").or_else(|| attrs.get("include")) else {
            log::debug!("gallery shortcode without ids");
            return String::new();
        };

        let figures: String = ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| self.image_figure(id))
            .collect();

        if figures.is_empty() {
            return String::new();
        }
        format!(
            r#"<figure class="{}">{figures}</figure>"#,
            esc_html(&self.options.slideshow_class)
        )
    }

    /// A single captioned image.
    pub fn caption(&self, attrs: &Attrs) -> String {
        match attrs.get("id") {
            Some(id) => self.image_figure(id),
            None => {
                log::debug!("caption shortcode without id");
                String::new()
            }
        }
    }

    /// Slideshow built from a gallery fetched by id, with an optional title.
    pub fn custom_gallery(&self, attrs: &Attrs) -> String {
        let id = attrs.get("id").map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return String::new();
        }
        let Some(gallery) = self.galleries.lookup(id) else {
            log::debug!("gallery {id:?} not found");
            return String::new();
        };

        let mut html = format!(
            r#"<figure class="{}">"#,
            esc_html(&self.options.slideshow_class)
        );
        for image in &gallery.images {
            let _ = write!(html, r#"<figure><img src="{}" />"#, esc_url(&image.url));
            if let Some(caption) = image.custom_caption.as_deref().filter(|c| !c.is_empty()) {
                let _ = write!(
                    html,
                    "<figcaption><h1>{}</h1></figcaption>",
                    esc_html(&strip_tags(caption))
                );
            }
            html.push_str("</figure>");
        }
        if let Some(title) = attrs.get("title").filter(|t| !t.is_empty()) {
            let _ = write!(html, "<figcaption><h1>{}</h1></figcaption>", esc_html(title));
        }
        html.push_str("</figure>");
        html
    }

    fn image_figure(&self, id: &str) -> String {
        let Some(attachment_id) = attachment_number(id, &self.options.attachment_prefix) else {
            log::debug!("unreadable attachment id {id:?}");
            return String::new();
        };
        let Some(image) = self.images.resolve(attachment_id) else {
            log::debug!("attachment {attachment_id} not resolved");
            return String::new();
        };
        let url = esc_url(&image.url);
        if url.is_empty() {
            log::debug!("attachment {attachment_id} has no usable URL");
            return String::new();
        }
        format!(
            r#"<figure><img src="{url}" />{}</figure>"#,
            image.caption.as_deref().unwrap_or_default()
        )
    }
}

/// Read the attachment number from an id such as `attachment_42`.
///
/// The prefix is optional; leading decimal digits after it are the number.
pub fn attachment_number(id: &str, prefix: &str) -> Option<u64> {
    let id = id.trim();
    let id = id.strip_prefix(prefix).unwrap_or(id).trim_start();
    let digits = id.len() - id.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    id[..digits].parse().ok()
}
