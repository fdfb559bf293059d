//! Social embed wrapping.

use crate::escape::esc_html;

/// Wrap resolved embed markup in a social-embed container.
///
/// The markup is not inspected: it becomes the raw content of an `iframe`
/// inside `<figure class="CLASS">`.
///
/// ```
/// use instant_markup::embed::wrap_embed;
///
/// assert_eq!(
///     wrap_embed("<blockquote>tweet</blockquote>", "op-social"),
///     r#"<figure class="op-social"><iframe><blockquote>tweet</blockquote></iframe></figure>"#
/// );
/// ```
pub fn wrap_embed(html: &str, class: &str) -> String {
    format!(
        r#"<figure class="{}"><iframe>{html}</iframe></figure>"#,
        esc_html(class)
    )
}
