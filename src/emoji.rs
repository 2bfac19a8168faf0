//! Emoji membership table used by the emoji frequency aggregate.

use regex::Regex;
use std::sync::OnceLock;

pub trait EmojiTable: Send + Sync {
    fn is_emoji(&self, c: char) -> bool;
}

/// Emoji membership from the Unicode `Emoji` property. Keycap bases (digits, `#`, `*`),
/// skin-tone modifiers, variation selectors and the zero-width joiner never
/// count as emoji on their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeEmojiTable;

static EMOJI_CHAR: OnceLock<Regex> = OnceLock::new();

fn emoji_char_regex() -> &'static Regex {
    EMOJI_CHAR.get_or_init(|| Regex::new(r"^[\p{Emoji}--[0-9#*\p{Emoji_Modifier}]]$").expect("valid emoji pattern"))
}

impl EmojiTable for UnicodeEmojiTable {
    fn is_emoji(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        emoji_char_regex().is_match(c.encode_utf8(&mut buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_emoji_are_members() {
        let t = UnicodeEmojiTable;
        for c in ['😂', '❤', '👍', '🔥', '🙏', '🚀', '🥳', '🫠'] {
            assert!(t.is_emoji(c), "{c} should be an emoji");
        }
    }

    #[test]
    fn text_and_joiners_are_not() {
        let t = UnicodeEmojiTable;
        for c in ['a', '1', '#', '*', '!', ':', '\u{200D}', '\u{FE0F}', '\u{1F3FB}', 'é'] {
            assert!(!t.is_emoji(c), "{:?} should not be an emoji", c);
        }
    }

    #[test]
    fn stars_boxes_and_dingbats_are_not() {
        let t = UnicodeEmojiTable;
        for c in ['\u{2605}', '\u{2606}', '\u{2610}', '\u{2701}'] {
            assert!(!t.is_emoji(c), "{:?} should not be an emoji", c);
        }
        assert!(t.is_emoji('\u{2614}'), "umbrella with rain drops is an emoji");
    }
}
