use std::sync::OnceLock;

use regex::Regex;

use crate::unicode::capitalize_first_letter;

const SEPARATOR: &str = "-";

/// One syllable: leading letters/apostrophes, exactly one tone vowel, trailing letters.
fn syllable_regex() -> &'static Regex {
    static INSTANCE: OnceLock<Regex> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        Regex::new(r"[A-Za-z']*[āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ][A-Za-z]*")
            .expect("syllable pattern must compile")
    })
}

/// Split `text` into tone-anchored syllable chunks.
///
/// Each match is one segment; text after the last match is appended to it.
/// Text before the first match and between matches is not part of any
/// segment. Returns an empty list when `text` has no tone vowel.
pub fn split_syllables(text: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut last_end = 0;

    for m in syllable_regex().find_iter(text) {
        segments.push(m.as_str().to_string());
        last_end = m.end();
    }

    if let Some(last) = segments.last_mut() {
        last.push_str(&text[last_end..]);
    }
    segments
}

/// Hyphenate on tone vowels and capitalize the final syllable.
///
/// Text without any tone vowel, and text forming a single syllable, come back
/// unchanged, so leading text such as `(y)` in `(y)ēe` survives there.
pub fn segment_and_capitalize(text: &str) -> String {
    let mut segments = split_syllables(text);
    if segments.len() <= 1 {
        return text.to_string();
    }
    if let Some(last) = segments.last_mut() {
        *last = capitalize_first_letter(last);
    }
    segments.join(SEPARATOR)
}
