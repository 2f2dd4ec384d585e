//! Bullet list extraction with multi-line items.

use crate::normalize::normalize;

const BULLET_PREFIX: &str = "- ";

/// Collects the physical lines of one bullet item until it is flushed.
#[derive(Debug, Default)]
struct PendingItem {
    parts: Vec<String>,
}

impl PendingItem {
    fn is_active(&self) -> bool {
        !self.parts.is_empty()
    }

    fn start(&mut self, text: &str) {
        if !text.is_empty() {
            self.parts.push(text.to_owned());
        }
    }

    fn continue_with(&mut self, text: &str) {
        self.parts.push(text.to_owned());
    }

    fn flush_into(&mut self, items: &mut Vec<String>) {
        if !self.is_active() {
            return;
        }
        let text = normalize(&std::mem::take(&mut self.parts).join(" "));
        if keep_item(&text) {
            items.push(text);
        }
    }
}

/// Drops empty items and bare `[link]` call-to-action bullets.
fn keep_item(text: &str) -> bool {
    !text.is_empty() && !text.eq_ignore_ascii_case("link")
}

/// Groups body lines into normalized bullet items.
///
/// A line starting with `- ` (after leading whitespace) opens an item. Following non-blank lines
/// that are not bullets continue it, joined with single spaces. A blank line closes the current
/// item. Text before the first bullet is ignored.
pub fn extract_bullets<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut items = Vec::new();
    let mut pending = PendingItem::default();

    for line in lines {
        let line = line.as_ref().trim_end();

        if line.is_empty() {
            pending.flush_into(&mut items);
            continue;
        }

        if let Some(rest) = line.trim_start().strip_prefix(BULLET_PREFIX) {
            pending.flush_into(&mut items);
            pending.start(rest.trim());
        } else if pending.is_active() {
            pending.continue_with(line.trim());
        }
    }

    pending.flush_into(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_continuation_lines() {
        assert_eq!(
            extract_bullets(&["- a", "cont", "", "- b"]),
            vec!["a cont".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn drops_link_only_items() {
        assert!(extract_bullets(&["- link", ""]).is_empty());
        assert!(extract_bullets(&["- [Link](https://example.org)"]).is_empty());
        assert!(extract_bullets(&["- LINK"]).is_empty());
    }

    #[test]
    fn drops_items_that_normalize_to_nothing() {
        assert!(extract_bullets(&["- <img src=\"logo.png\">"]).is_empty());
    }

    #[test]
    fn ignores_text_before_first_bullet() {
        assert_eq!(
            extract_bullets(&["Intro paragraph", "more intro", "- first"]),
            vec!["first".to_string()]
        );
    }

    #[test]
    fn text_after_blank_line_is_not_a_continuation() {
        assert_eq!(
            extract_bullets(&["- first", "", "stray text", "- second"]),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn new_bullet_closes_previous_item() {
        assert_eq!(
            extract_bullets(&["- one", "  - two", "   wrapped  "]),
            vec!["one".to_string(), "two wrapped".to_string()]
        );
    }

    #[test]
    fn dash_without_space_is_continuation() {
        assert_eq!(
            extract_bullets(&["- range", "-5 to 5"]),
            vec!["range -5 to 5".to_string()]
        );
    }

    #[test]
    fn normalizes_inline_markup() {
        assert_eq!(
            extract_bullets(&["- Led **Project X** at [ACME](https://acme.test)"]),
            vec!["Led Project X at ACME".to_string()]
        );
    }

    #[test]
    fn whitespace_only_lines_close_items() {
        assert_eq!(
            extract_bullets(&["- a", "   ", "b", "- c"]),
            vec!["a".to_string(), "c".to_string()]
        );
    }
}
