//! Pinyin-to-NEA respelling engine.
//!
//! Normalizes input to NFC, folds an ordered list of regex rewrites over it,
//! then hyphenates on tone-marked vowels and capitalizes the final syllable.

mod convert;
pub mod explain;
pub mod rules;
mod segment;
mod table;

#[cfg(test)]
mod tests;

pub use convert::{convert, convert_value};
pub use explain::{explain, format_text, ExplainResult, ExplainStep};
pub use rules::{rules, run_rules, Rule, Stage};
pub use segment::{segment_and_capitalize, split_syllables};
pub use table::VowelTable;
