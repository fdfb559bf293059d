//! Media lookups consumed by shortcode expansion.
//!
//! The reformatter never talks to a media store directly; it asks an
//! [`ImageResolver`] for attachments and a [`GalleryLookup`] for API
//! galleries. [`MediaLibrary`] is an in-memory implementation of both.

use std::collections::HashMap;

/// An attachment resolved to a display URL.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
pub struct ResolvedImage {
    pub url: String,
    /// Ready-made caption markup (usually a `<figcaption>`), inserted verbatim.
    #[cfg_attr(feature = "cli", serde(default))]
    pub caption: Option<String>,
}

impl ResolvedImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// One image of an API gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
pub struct GalleryImage {
    pub url: String,
    /// Free-form caption; may contain markup, which is stripped on output.
    #[cfg_attr(feature = "cli", serde(default))]
    pub custom_caption: Option<String>,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            custom_caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.custom_caption = Some(caption.into());
        self
    }
}

/// An ordered set of images fetched from the gallery API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
pub struct Gallery {
    pub images: Vec<GalleryImage>,
}

impl Gallery {
    pub fn new(images: Vec<GalleryImage>) -> Self {
        Self { images }
    }
}

/// Resolves attachment numbers to image URLs and caption markup.
pub trait ImageResolver: Send + Sync {
    /// `None` when the attachment does not exist or is not an image.
    fn resolve(&self, attachment_id: u64) -> Option<ResolvedImage>;
}

/// Fetches galleries by identifier.
pub trait GalleryLookup: Send + Sync {
    /// `None` when the lookup fails or the gallery does not exist.
    fn lookup(&self, gallery_id: &str) -> Option<Gallery>;
}

/// A resolver that knows no images and no galleries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMedia;

impl ImageResolver for NoMedia {
    fn resolve(&self, _attachment_id: u64) -> Option<ResolvedImage> {
        None
    }
}

impl GalleryLookup for NoMedia {
    fn lookup(&self, _gallery_id: &str) -> Option<Gallery> {
        None
    }
}

/// In-memory media store implementing both lookups.
///
/// With the `cli` feature it can be loaded from JSON:
///
/// ```json
/// {
///   "images": { "12": { "url": "https://cdn/a.jpg", "caption": "<figcaption>A</figcaption>" } },
///   "galleries": { "g1": { "images": [ { "url": "https://cdn/b.jpg", "custom_caption": "B" } ] } }
/// }
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct MediaLibrary {
    images: HashMap<u64, ResolvedImage>,
    galleries: HashMap<String, Gallery>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_image(&mut self, attachment_id: u64, image: ResolvedImage) {
        self.images.insert(attachment_id, image);
    }

    pub fn insert_gallery(&mut self, gallery_id: impl Into<String>, gallery: Gallery) {
        self.galleries.insert(gallery_id.into(), gallery);
    }

    pub fn with_image(mut self, attachment_id: u64, image: ResolvedImage) -> Self {
        self.insert_image(attachment_id, image);
        self
    }

    pub fn with_gallery(mut self, gallery_id: impl Into<String>, gallery: Gallery) -> Self {
        self.insert_gallery(gallery_id, gallery);
        self
    }

    /// Load a library from a JSON document.
    #[cfg(feature = "cli")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a library from a JSON file.
    #[cfg(feature = "cli")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl ImageResolver for MediaLibrary {
    fn resolve(&self, attachment_id: u64) -> Option<ResolvedImage> {
        self.images.get(&attachment_id).cloned()
    }
}

impl GalleryLookup for MediaLibrary {
    fn lookup(&self, gallery_id: &str) -> Option<Gallery> {
        self.galleries.get(gallery_id).cloned()
    }
}
