//! Reformatting options.

use crate::sanitize::AllowList;

/// Default input limit for tree building (8 MiB).
pub const DEFAULT_MAX_INPUT_LEN: usize = 8 * 1024 * 1024;

/// Options controlling shortcode names, emitted classes and parsing limits.
///
/// ```
/// use instant_markup::Options;
///
/// let options = Options::default()
///     .with_custom_gallery_tag("sigallery")
///     .with_attachment_prefix("media-");
/// assert_eq!(options.custom_gallery_tag, "sigallery");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct Options {
    /// Prefix stripped from `caption` ids before reading the attachment number.
    pub attachment_prefix: String,
    /// Shortcode name of the native image gallery.
    pub gallery_tag: String,
    /// Shortcode name of the captioned image.
    pub caption_tag: String,
    /// Shortcode name of the API-backed gallery.
    pub custom_gallery_tag: String,
    /// Class of the slideshow container `<figure>`.
    pub slideshow_class: String,
    /// Class of the `<figure>` wrapping social embeds.
    pub social_embed_class: String,
    /// Elements and attributes kept inside pull quotes.
    pub pull_quote_allow_list: AllowList,
    /// Inputs longer than this are not parsed; `None` disables the limit.
    pub max_input_len: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            attachment_prefix: "attachment_".to_string(),
            gallery_tag: "gallery".to_string(),
            caption_tag: "caption".to_string(),
            custom_gallery_tag: "custom-gallery".to_string(),
            slideshow_class: "op-slideshow".to_string(),
            social_embed_class: "op-social".to_string(),
            pull_quote_allow_list: AllowList::pull_quote(),
            max_input_len: Some(DEFAULT_MAX_INPUT_LEN),
        }
    }
}

impl Options {
    pub fn with_attachment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attachment_prefix = prefix.into();
        self
    }

    pub fn with_gallery_tag(mut self, tag: impl Into<String>) -> Self {
        self.gallery_tag = tag.into();
        self
    }

    pub fn with_caption_tag(mut self, tag: impl Into<String>) -> Self {
        self.caption_tag = tag.into();
        self
    }

    pub fn with_custom_gallery_tag(mut self, tag: impl Into<String>) -> Self {
        self.custom_gallery_tag = tag.into();
        self
    }

    pub fn with_slideshow_class(mut self, class: impl Into<String>) -> Self {
        self.slideshow_class = class.into();
        self
    }

    pub fn with_social_embed_class(mut self, class: impl Into<String>) -> Self {
        self.social_embed_class = class.into();
        self
    }

    pub fn with_pull_quote_allow_list(mut self, allow_list: AllowList) -> Self {
        self.pull_quote_allow_list = allow_list;
        self
    }

    pub fn with_max_input_len(mut self, max: Option<usize>) -> Self {
        self.max_input_len = max;
        self
    }

    /// Load options from a JSON document. Missing fields keep their defaults.
    #[cfg(feature = "cli")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.attachment_prefix, "attachment_");
        assert_eq!(options.slideshow_class, "op-slideshow");
        assert_eq!(options.social_embed_class, "op-social");
        assert!(options.pull_quote_allow_list.allows_tag("strong"));
        assert!(!options.pull_quote_allow_list.allows_tag("div"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_from_json_partial() {
        let options = Options::from_json(r#"{"custom_gallery_tag": "sigallery", "max_input_len": null}"#).unwrap();
        assert_eq!(options.custom_gallery_tag, "sigallery");
        assert_eq!(options.max_input_len, None);
        assert_eq!(options.gallery_tag, "gallery");
    }
}
