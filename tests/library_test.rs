//! Loading media libraries and options from JSON files.

#![cfg(feature = "cli")]

use std::fs;

use instant_markup::{GalleryLookup, ImageResolver, MediaLibrary, Options, Reformatter};

const LIBRARY_JSON: &str = r#"{
    "images": {
        "31": {"url": "https://cdn.example.com/31.jpg", "caption": "<figcaption>Pier</figcaption>"},
        "32": {"url": "https://cdn.example.com/32.jpg"}
    },
    "galleries": {
        "g-7": {"images": [
            {"url": "https://img.example.com/1.jpg", "custom_caption": "One &amp; only"},
            {"url": "https://img.example.com/2.jpg"}
        ]}
    }
}"#;

#[test]
fn test_library_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("media.json");
    fs::write(&path, LIBRARY_JSON).unwrap();

    let library = MediaLibrary::from_json_file(&path).unwrap();
    assert_eq!(library.resolve(32).unwrap().caption, None);
    assert_eq!(library.lookup("g-7").unwrap().images.len(), 2);
    assert!(library.resolve(33).is_none());
}

#[test]
fn test_missing_library_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MediaLibrary::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, instant_markup::Error::Io(_)));
}

#[test]
fn test_invalid_library_json_is_json_error() {
    let err = MediaLibrary::from_json(r#"{"images": {"x": 1}}"#).unwrap_err();
    assert!(matches!(err, instant_markup::Error::Json(_)));
}

#[test]
fn test_options_file_renames_shortcode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"{"custom_gallery_tag": "sigallery", "slideshow_class": "slides", "pull_quote_allow_list": {"b": []}}"#,
    )
    .unwrap();

    let options = Options::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    let reformatter = Reformatter::from_library(MediaLibrary::from_json(LIBRARY_JSON).unwrap())
        .with_options(options);

    assert_eq!(
        reformatter.reformat(r#"[sigallery id="g-7"]"#),
        concat!(
            r#"<figure class="slides">"#,
            r#"<figure><img src="https://img.example.com/1.jpg"><figcaption><h1>One &amp; only</h1></figcaption></figure>"#,
            r#"<figure><img src="https://img.example.com/2.jpg"></figure>"#,
            "</figure>"
        )
    );
    assert_eq!(
        reformatter.reformat("<blockquote><p><b>x</b> <em>y</em></p></blockquote>"),
        "<aside><b>x</b> y</aside>"
    );
}

#[test]
fn test_gallery_from_library_json() {
    let reformatter = Reformatter::from_library(MediaLibrary::from_json(LIBRARY_JSON).unwrap());
    assert_eq!(
        reformatter.reformat(r#"[gallery ids="31,32"]"#),
        concat!(
            r#"<figure class="op-slideshow">"#,
            r#"<figure><img src="https://cdn.example.com/31.jpg"><figcaption>Pier</figcaption></figure>"#,
            r#"<figure><img src="https://cdn.example.com/32.jpg"></figure>"#,
            "</figure>"
        )
    );
}
