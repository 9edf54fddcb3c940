use std::collections::HashMap;
use std::sync::OnceLock;

/// Respelling of each vowel that can follow a word-initial `y`.
///
/// After `y`, `u` is pronounced `ü`, so both share one row.
pub(crate) const VOWEL_MAPPINGS: &[(char, &str)] = &[
    ('a', "ah"),
    ('ā', "āh"),
    ('á', "áh"),
    ('ǎ', "ǎh"),
    ('à', "àh"),
    ('e', "eh"),
    ('ē', "ēh"),
    ('é', "éh"),
    ('ě', "ěh"),
    ('è', "èh"),
    ('i', "ee"),
    ('ī', "ēe"),
    ('í', "ée"),
    ('ǐ', "ěe"),
    ('ì', "èe"),
    ('o', "oh"),
    ('ō', "ōh"),
    ('ó', "óh"),
    ('ǒ', "ǒh"),
    ('ò', "òh"),
    ('u', "ü"),
    ('ū', "ǖ"),
    ('ú', "ǘ"),
    ('ǔ', "ǚ"),
    ('ù', "ǜ"),
    ('ü', "ü"),
    ('ǖ', "ǖ"),
    ('ǘ', "ǘ"),
    ('ǚ', "ǚ"),
    ('ǜ', "ǜ"),
];

pub struct VowelTable {
    map: HashMap<char, &'static str>,
}

impl VowelTable {
    /// Get or initialize the global singleton.
    pub fn global() -> &'static VowelTable {
        static INSTANCE: OnceLock<VowelTable> = OnceLock::new();
        INSTANCE.get_or_init(|| VowelTable {
            map: VOWEL_MAPPINGS.iter().copied().collect(),
        })
    }

    pub fn lookup(&self, vowel: char) -> Option<&'static str> {
        self.map.get(&vowel).copied()
    }

    /// Append the respelling of every character in `vowels` to `out`.
    /// Characters without an entry are copied unchanged.
    pub fn respell_into(&self, vowels: &str, out: &mut String) {
        for c in vowels.chars() {
            match self.lookup(c) {
                Some(mapped) => out.push_str(mapped),
                None => out.push(c),
            }
        }
    }
}
