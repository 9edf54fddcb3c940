//! New English Approximation (NEA) respelling of tone-marked Hanyu Pinyin.
//!
//! [`respell::convert`] is the core: NFC normalization, an ordered list of
//! regex rewrites, then tone-anchored syllable segmentation. [`csv_io`]
//! applies it to a column of a CSV table.

pub mod csv_io;
pub mod respell;
pub mod settings;
mod trace_init;
pub mod unicode;

pub use respell::{convert, convert_value};
pub use trace_init::init_tracing;
