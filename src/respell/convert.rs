use tracing::debug_span;

use crate::unicode::normalize;

use super::rules::run_rules;
use super::segment::segment_and_capitalize;

/// Convert tone-marked Pinyin into its New English Approximation respelling.
///
/// Normalize → rewrite rules → segment. Pure and deterministic; malformed
/// Pinyin is rewritten mechanically rather than rejected.
///
/// ```
/// assert_eq!(nea_pinyin::respell::convert("shi"), "shrr(ì)");
/// assert_eq!(nea_pinyin::respell::convert("yī"), "(y)ēe");
/// ```
pub fn convert(text: &str) -> String {
    let _span = debug_span!("convert", len = text.len()).entered();
    let normalized = normalize(text);
    let rewritten = run_rules(&normalized);
    segment_and_capitalize(&rewritten)
}

/// [`convert`] for a possibly missing value. A missing value is returned
/// unchanged so that a whole column can be mapped without special-casing
/// empty cells.
pub fn convert_value<S: AsRef<str>>(value: Option<S>) -> Option<String> {
    value.map(|v| convert(v.as_ref()))
}
