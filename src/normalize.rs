//! Inline markdown and HTML stripping.
//!
//! Content files carry light inline formatting (links, code spans, emphasis, the odd HTML tag)
//! that has no place in a plain-text PDF run. [`normalize`] removes it with a fixed sequence of
//! regular expression substitutions.
//!
//! The substitutions are not recursive: a link nested inside emphasis, or emphasis nested inside
//! emphasis, is only partially unwrapped. The source content avoids nesting, so this is a known
//! limitation rather than something the passes try to resolve.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

// One alternative per delimiter; leftmost-first alternation tries `**` before `*`, and each
// alternative closes on the same delimiter it opened with.
static RE_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__|\*(.*?)\*|_(.*?)_").unwrap());

static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Strips inline markdown and HTML from `text` and trims the result.
///
/// Passes run in this order:
///
/// 1. `[label](target)` becomes `label`
/// 2. `` `code` `` becomes `code`
/// 3. `**x**`, `__x__`, `*x*` and `_x_` become `x` (shortest match)
/// 4. `<tag ...>` is removed
/// 5. surrounding whitespace is trimmed
///
/// Unmatched syntax passes through as literal text.
pub fn normalize(text: &str) -> String {
    let text = RE_LINK.replace_all(text, "$1");
    let text = RE_CODE.replace_all(&text, "$1");
    let text = RE_EMPHASIS.replace_all(&text, |caps: &Captures<'_>| {
        (1..=4)
            .find_map(|group| caps.get(group))
            .map(|inner| inner.as_str().to_owned())
            .unwrap_or_default()
    });
    let text = strip_html_tags(&text);
    text.trim().to_owned()
}

/// Removes every `<...>` tag from `text` without touching anything else.
pub fn strip_html_tags(text: &str) -> String {
    RE_HTML_TAG.replace_all(text, "").into_owned()
}
