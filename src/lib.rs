//! # instant-markup
//!
//! Reformat article HTML from a publishing system into instant-article
//! markup.
//!
//! ## Pipeline
//!
//! 1. Shortcodes (`[gallery]`, `[caption]`, custom galleries) are expanded
//!    into figures using an [`ImageResolver`] and a [`GalleryLookup`]
//! 2. The result is parsed into a tree with html5ever's error recovery
//! 3. Transform passes run in order: blockquotes become `aside` pull quotes,
//!    images are wrapped in `figure`
//! 4. The tree is serialized back to HTML
//!
//! ## Quick Start
//!
//! ```
//! use instant_markup::{MediaLibrary, Reformatter, ResolvedImage};
//!
//! let library = MediaLibrary::new()
//!     .with_image(12, ResolvedImage::new("https://cdn.example.com/12.jpg"));
//! let reformatter = Reformatter::from_library(library);
//!
//! let html = reformatter.reformat(
//!     r#"<p>Intro</p>[caption id="attachment_12"]<img src="old.jpg">[/caption]<img src="b.jpg">"#,
//! );
//! assert_eq!(
//!     html,
//!     r#"<p>Intro</p><figure><img src="https://cdn.example.com/12.jpg"></figure><figure><img src="b.jpg"></figure>"#
//! );
//! ```
//!
//! ## Social Embeds
//!
//! Embed markup resolved elsewhere is wrapped without inspection:
//!
//! ```
//! use instant_markup::Reformatter;
//!
//! let html = Reformatter::default().reformat_embed("<blockquote>tweet</blockquote>");
//! assert_eq!(html, r#"<figure class="op-social"><iframe><blockquote>tweet</blockquote></iframe></figure>"#);
//! ```

pub mod config;
pub mod dom;
pub mod embed;
pub mod error;
pub mod escape;
pub mod media;
pub mod passes;
pub mod reformat;
pub mod sanitize;
pub mod shortcode;
pub(crate) mod util;

pub use config::Options;
pub use error::{Error, Result};
pub use media::{Gallery, GalleryImage, GalleryLookup, ImageResolver, MediaLibrary, NoMedia, ResolvedImage};
pub use passes::TransformPass;
pub use reformat::{ContentUnit, Reformatter};
pub use sanitize::{AllowList, AllowListSanitizer, Sanitizer};
