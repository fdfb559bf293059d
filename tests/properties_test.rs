//! Property tests over generated article bodies.

use proptest::prelude::*;

use instant_markup::Reformatter;
use instant_markup::dom::{parse_fragment, serialize_tree};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn inline() -> impl Strategy<Value = String> {
    prop_oneof![
        word(),
        word().prop_map(|w| format!("<em>{w}</em>")),
        word().prop_map(|w| format!("<strong>{w}</strong>")),
        word().prop_map(|w| format!(r#"<a href="/{w}">{w}</a>"#)),
        word().prop_map(|w| format!(r#"<span class="s">{w}</span>"#)),
    ]
}

fn inlines() -> impl Strategy<Value = String> {
    prop::collection::vec(inline(), 1..4).prop_map(|parts| parts.join(" "))
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        inlines().prop_map(|s| format!("<p>{s}</p>")),
        word().prop_map(|w| format!(r#"<img src="{w}.jpg">"#)),
        (inlines(), word(), inlines())
            .prop_map(|(a, w, b)| format!(r#"<p>{a} <img src="{w}.jpg"> {b}</p>"#)),
        (inlines(), word(), inlines()).prop_map(|(a, w, b)| {
            format!(r#"<p>{a} <a href="/{w}"><img src="{w}.jpg"></a> {b}</p>"#)
        }),
        word().prop_map(|w| format!(r#"<figure><img src="{w}.jpg"></figure>"#)),
        prop::collection::vec(word(), 1..3).prop_map(|ws| {
            let images: String = ws.iter().map(|w| format!(r#"<img src="{w}.png">"#)).collect();
            format!("<div>{images}</div>")
        }),
        (prop::collection::vec(inlines(), 1..3), prop::option::of(word())).prop_map(
            |(paragraphs, cite)| {
                let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
                let cite = cite.map(|c| format!("<cite>{c}</cite>")).unwrap_or_default();
                format!("<blockquote>{body}{cite}</blockquote>")
            }
        ),
    ]
}

fn article() -> impl Strategy<Value = String> {
    prop::collection::vec(block(), 0..6).prop_map(|blocks| blocks.concat())
}

proptest! {
    #[test]
    fn prop_reformat_is_idempotent(html in article()) {
        let reformatter = Reformatter::default();
        let once = reformatter.reformat(&html);
        prop_assert_eq!(reformatter.reformat(&once), once);
    }

    #[test]
    fn prop_output_survives_reparse(html in article()) {
        let output = Reformatter::default().reformat(&html);
        let dom = parse_fragment(&output, None).unwrap();
        prop_assert_eq!(serialize_tree(&dom), output);
    }

    #[test]
    fn prop_every_image_in_figure(html in article()) {
        let output = Reformatter::default().reformat(&html);
        let dom = parse_fragment(&output, None).unwrap();
        for img in dom.select(|dom, id| dom.is_element_named(id, "img")) {
            let parent = dom.parent(img).unwrap();
            prop_assert!(dom.is_element_named(parent, "figure"));
        }
    }

    #[test]
    fn prop_no_blockquote_remains(html in article()) {
        let output = Reformatter::default().reformat(&html);
        prop_assert!(!output.contains("<blockquote"));
        prop_assert_eq!(output.matches("<aside>").count(), html.matches("<blockquote>").count());
    }

    #[test]
    fn prop_text_without_brackets_not_expanded(text in "[^\\[]{0,64}") {
        prop_assert_eq!(Reformatter::default().expand_shortcodes(&text), text);
    }

    #[test]
    fn prop_unregistered_shortcodes_pass_through(name in "[a-z]{1,10}", attr in "[a-z0-9 =\"]{0,20}") {
        prop_assume!(!matches!(name.as_str(), "gallery" | "caption"));
        let text = format!("[{name} {attr}]body[/{name}]");
        prop_assert_eq!(Reformatter::default().expand_shortcodes(&text), text);
    }
}
