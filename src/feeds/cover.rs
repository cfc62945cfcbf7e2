//! Cover image lookup in item HTML.
//!
//! Contract: find the first `<img` tag in the document and return the value
//! of its `src` attribute. Attribute order does not matter, values may be
//! double-quoted, single-quoted or bare, and the tag may be self-closing or
//! never closed. Quoted values are opaque: a `>` or a `src=` inside one is
//! just text. If the first `<img` tag has no usable `src`, there is no
//! cover image; later tags are not consulted. This is deliberately not an
//! HTML parser.

use regex::Regex;
use std::sync::OnceLock;

static IMG_TAG: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();

/// Returns the `src` of the first `<img>` tag in `html`, if any.
pub fn first_img_src(html: &str) -> Option<&str> {
    let img_tag = IMG_TAG.get_or_init(|| {
        // `<img` followed by whitespace, `/` or `>`, up to the first `>` outside
        // quotes or end of input. An unbalanced quote is read as plain text.
        Regex::new(r#"(?i)<img(?:[\s/](?:"[^"]*"|'[^']*'|[^>])*)?(?:>|$)"#).unwrap()
    });
    let attribute = ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap()
    });

    let tag = img_tag.find(html)?;
    // Skip the `<img` prefix so attribute scanning starts after the tag name.
    let attrs = &tag.as_str()[4..];
    let caps = attribute
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case("src"))?;
    let value = caps
        .get(2)
        .or_else(|| caps.get(3))
        .or_else(|| caps.get(4))?
        .as_str()
        .trim();

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
