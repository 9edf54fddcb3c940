//! Character-level Unicode helpers for tone-marked Pinyin text.

use std::borrow::Cow;

use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Precomposed tone-marked vowels, four tones each for a e i o u ü.
pub const TONE_VOWELS: &str = "āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ";

pub fn is_tone_vowel(c: char) -> bool {
    TONE_VOWELS.contains(c)
}

/// Plain or tone-marked vowel, including ü.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'ü') || is_tone_vowel(c)
}

/// Canonical composed form (NFC).
///
/// Text that is already NFC is borrowed as is, so normalizing twice is free
/// and never changes the result.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}

/// Upper-case the first alphabetic character, leaving everything else as is.
///
/// Leading punctuation such as `(` is skipped, so `(y)ēe` becomes `(Y)ēe`.
pub fn capitalize_first_letter(s: &str) -> String {
    let Some((idx, c)) = s.char_indices().find(|(_, c)| c.is_alphabetic()) else {
        return s.to_string();
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push_str(&s[..idx]);
    out.extend(c.to_uppercase());
    out.push_str(&s[idx + c.len_utf8()..]);
    out
}
