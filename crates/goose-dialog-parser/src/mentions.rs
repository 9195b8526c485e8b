//! Stand-alone mention extraction over a complete string.
//!
//! This is the helper other subsystems reach for when they have a whole
//! string in hand and just need the mentions in it — an access-control
//! warning, a UI hint — without instantiating the streaming parser, the
//! same relationship `goose-tui::at_mention::extract_mentions` has to its
//! own char-stream scan.

use crate::classify::{self, is_mention_char, Class};
use crate::fence::FenceTracker;

/// Returns the ordered list of mention names (without the leading `@`,
/// trailing dots stripped) in `text`, skipping any that fall inside an
/// inline `` `single-backtick` `` span.
///
/// Triple-fenced regions are treated as prose for this helper: a mention
/// inside a triple-fenced block embedded in plain text is still reported,
/// since a triple fence's only effect on an inline latch is that it does not
/// toggle it (see [`FenceTracker::end_run`]).
pub fn extract_mentions(text: &str) -> Vec<String> {
    extract_mentions_iter(text).collect()
}

/// Same as [`extract_mentions`], but returns an iterator rather than an
/// eagerly-allocated `Vec`, for callers that only need to `.filter()` or
/// `.any()` over the result.
pub fn extract_mentions_iter(text: &str) -> std::vec::IntoIter<String> {
    let mut fence = FenceTracker::new();
    let mut mentions = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if classify::class(ch) == Class::Backtick {
            fence.backtick();
            continue;
        }
        fence.end_run();

        if ch != '@' || fence.in_single_backtick() {
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if is_mention_char(next) {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if name.ends_with('.') {
            name.pop();
        }
        if !name.is_empty() {
            mentions.push(name);
        }
    }

    mentions.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_mentions_in_prose() {
        assert_eq!(extract_mentions("hello @alice, please see @bob."), vec!["alice", "bob"]);
    }

    #[test]
    fn skips_mentions_inside_inline_code() {
        assert_eq!(extract_mentions("call `@not-a-mention` please, but @real works"), vec!["real"]);
    }

    #[test]
    fn reports_mentions_inside_triple_fenced_prose() {
        assert_eq!(extract_mentions("```\n@inside\n```"), vec!["inside"]);
    }

    #[test]
    fn trailing_dot_is_punctuation() {
        assert_eq!(extract_mentions("ping @alice."), vec!["alice"]);
    }

    #[test]
    fn bare_at_with_no_name_is_not_a_mention() {
        assert_eq!(extract_mentions("just an @ sign").len(), 0);
        assert_eq!(extract_mentions("@.").len(), 0);
    }
}
