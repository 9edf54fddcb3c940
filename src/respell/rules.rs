//! The ordered rewrite grammar.
//!
//! Every rule is a regex rewrite over the whole current string; the output of
//! one rule is the input of the next. Several rules deliberately match text
//! produced by earlier ones (`z → dz` feeds the `dz(i)` rule), so the list
//! must only ever be applied front to back.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::table::VowelTable;

/// How a match is rewritten.
#[derive(Clone, Copy)]
enum Replacement {
    /// `regex` replacement template (`${1}` group references allowed).
    Template(&'static str),
    /// Replacement computed from the match.
    With(fn(&Captures<'_>) -> String),
}

struct RuleDef {
    stage: Stage,
    name: &'static str,
    pattern: &'static str,
    replacement: Replacement,
}

/// The pipeline stage a rule belongs to, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    YInitial,
    Shi,
    Retroflex,
    Aspiration,
    Q,
    Consonants,
    Diphthongs,
    OpenA,
    Unvoiced,
    Er,
    NeutralTone,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::YInitial => "y-initial",
            Stage::Shi => "shi",
            Stage::Retroflex => "retroflex",
            Stage::Aspiration => "aspiration",
            Stage::Q => "q",
            Stage::Consonants => "consonants",
            Stage::Diphthongs => "diphthongs",
            Stage::OpenA => "open-a",
            Stage::Unvoiced => "unvoiced",
            Stage::Er => "er",
            Stage::NeutralTone => "neutral-tone",
        }
    }
}

use Replacement::{Template, With};

const DEFINITIONS: &[RuleDef] = &[
    RuleDef {
        stage: Stage::YInitial,
        name: "y+vowels",
        pattern: r"\by([aeiouüāáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ]+)",
        replacement: With(expand_y_initial),
    },
    RuleDef {
        stage: Stage::Shi,
        name: "shi",
        pattern: r"sh([iìíǐ])\b",
        replacement: With(respell_shi),
    },
    // A digraph already followed by `rr` came from the shi rule.
    RuleDef {
        stage: Stage::Retroflex,
        name: "zh",
        pattern: r"zh(?:rr)?",
        replacement: Template("zhrr"),
    },
    RuleDef {
        stage: Stage::Retroflex,
        name: "ch",
        pattern: r"ch(?:rr)?",
        replacement: Template("chrr"),
    },
    RuleDef {
        stage: Stage::Retroflex,
        name: "sh",
        pattern: r"sh(?:rr)?",
        replacement: Template("shrr"),
    },
    RuleDef {
        stage: Stage::Retroflex,
        name: "initial r",
        pattern: r"\br",
        replacement: Template("rr"),
    },
    RuleDef {
        stage: Stage::Aspiration,
        name: "initial p",
        pattern: r"\bp",
        replacement: Template("p'"),
    },
    RuleDef {
        stage: Stage::Aspiration,
        name: "initial t",
        pattern: r"\bt",
        replacement: Template("t'"),
    },
    RuleDef {
        stage: Stage::Aspiration,
        name: "initial k",
        pattern: r"\bk",
        replacement: Template("k'"),
    },
    RuleDef {
        stage: Stage::Aspiration,
        name: "initial c",
        pattern: r"\bc",
        replacement: Template("ts'"),
    },
    RuleDef {
        stage: Stage::Q,
        name: "q",
        pattern: r"q",
        replacement: Template("tsyh'"),
    },
    RuleDef {
        stage: Stage::Consonants,
        name: "x",
        pattern: r"x",
        replacement: Template("ssy"),
    },
    RuleDef {
        stage: Stage::Consonants,
        name: "j",
        pattern: r"j",
        replacement: Template("jy"),
    },
    RuleDef {
        stage: Stage::Consonants,
        name: "z",
        pattern: r"z",
        replacement: Template("dz"),
    },
    RuleDef {
        stage: Stage::Diphthongs,
        name: "ao",
        pattern: r"ao",
        replacement: Template("ahw"),
    },
    RuleDef {
        stage: Stage::Diphthongs,
        name: "ai",
        pattern: r"ai",
        replacement: Template("ahì"),
    },
    RuleDef {
        stage: Stage::Diphthongs,
        name: "ei",
        pattern: r"ei",
        replacement: Template("ey"),
    },
    RuleDef {
        stage: Stage::Diphthongs,
        name: "ou",
        pattern: r"ou",
        replacement: Template("ow"),
    },
    // Matching an existing `h` and writing it back leaves `ah` untouched.
    RuleDef {
        stage: Stage::OpenA,
        name: "a+h",
        pattern: r"([aàáǎā])h?",
        replacement: Template("${1}h"),
    },
    RuleDef {
        stage: Stage::Unvoiced,
        name: "dz+i",
        pattern: r"(dz)([iìíǐ])",
        replacement: Template("${1}(${2})"),
    },
    RuleDef {
        stage: Stage::Unvoiced,
        name: "ts'+i",
        pattern: r"(ts')([iìíǐ])",
        replacement: Template("${1}(${2})"),
    },
    RuleDef {
        stage: Stage::Unvoiced,
        name: "s+i",
        pattern: r"(s)([iìíǐ])",
        replacement: Template("${1}(${2})"),
    },
    RuleDef {
        stage: Stage::Er,
        name: "final er",
        pattern: r"er\b",
        replacement: Template("arr"),
    },
    RuleDef {
        stage: Stage::NeutralTone,
        name: "standalone syllable",
        pattern: r"\b([bpmfdtnlgkhjqxrzcsyw])e\b",
        replacement: Template("${1}uh"),
    },
    RuleDef {
        stage: Stage::NeutralTone,
        name: "attached syllable",
        pattern: r"(\p{L})([bpmfdtnlgkhjqxrzcsyw])e\b",
        replacement: Template("${1}-${2}uh"),
    },
    RuleDef {
        stage: Stage::NeutralTone,
        name: "standalone e",
        pattern: r"\be\b",
        replacement: Template("uh"),
    },
];

/// `y` + vowel run → `(y)` + the respelling of each vowel.
fn expand_y_initial(caps: &Captures<'_>) -> String {
    let mut out = String::from("(y)");
    VowelTable::global().respell_into(&caps[1], &mut out);
    out
}

/// `shi` keeps its tone-marked vowel in parentheses; an untoned `shi` reads as fourth tone.
fn respell_shi(caps: &Captures<'_>) -> String {
    let vowel = match &caps[1] {
        "i" => "ì",
        toned => toned,
    };
    format!("shrr({vowel})")
}

/// A compiled rewrite rule.
pub struct Rule {
    stage: Stage,
    name: &'static str,
    regex: Regex,
    replacement: Replacement,
}

impl Rule {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Rewrite every non-overlapping match. Borrows `text` when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.replacement {
            Template(template) => self.regex.replace_all(text, template),
            With(f) => self.regex.replace_all(text, |caps: &Captures<'_>| f(caps)),
        }
    }
}

/// The full rule list in application order, compiled once per process.
pub fn rules() -> &'static [Rule] {
    static INSTANCE: OnceLock<Vec<Rule>> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        DEFINITIONS
            .iter()
            .map(|def| Rule {
                stage: def.stage,
                name: def.name,
                regex: Regex::new(def.pattern).expect("built-in rule pattern must compile"),
                replacement: def.replacement,
            })
            .collect()
    })
}

/// Fold every rule over `text`, front to back.
pub fn run_rules(text: &str) -> String {
    let mut current = text.to_string();
    for rule in rules() {
        if let Cow::Owned(next) = rule.apply(&current) {
            trace!(stage = rule.stage.label(), rule = rule.name, output = %next, "rule applied");
            current = next;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static Rule {
        rules()
            .iter()
            .find(|r| r.name() == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(rules().len(), DEFINITIONS.len());
    }

    #[test]
    fn test_stages_in_order() {
        let stages: Vec<Stage> = rules().iter().map(|r| r.stage()).collect();
        let mut deduped = stages.clone();
        deduped.dedup();
        // Each stage is one contiguous block.
        assert_eq!(deduped.len(), 11);
        assert_eq!(deduped.first(), Some(&Stage::YInitial));
        assert_eq!(deduped.last(), Some(&Stage::NeutralTone));
        let shi = stages.iter().position(|s| *s == Stage::Shi).unwrap();
        let retroflex = stages.iter().position(|s| *s == Stage::Retroflex).unwrap();
        assert!(shi < retroflex);
    }

    #[test]
    fn test_y_initial() {
        assert_eq!(rule("y+vowels").apply("yī"), "(y)ēe");
        assert_eq!(rule("y+vowels").apply("yuè"), "(y)üèh");
        assert_eq!(rule("y+vowels").apply("yīng"), "(y)ēeng");
        // not at a word boundary
        assert_eq!(rule("y+vowels").apply("dàye"), "dàye");
    }

    #[test]
    fn test_shi_tone() {
        assert_eq!(rule("shi").apply("shi"), "shrr(ì)");
        assert_eq!(rule("shi").apply("shí"), "shrr(í)");
        assert_eq!(rule("shi").apply("shǐ"), "shrr(ǐ)");
        // first tone is left to the generic sh rule
        assert_eq!(rule("shi").apply("shī"), "shī");
        assert_eq!(rule("shi").apply("shian"), "shian");
    }

    #[test]
    fn test_retroflex_does_not_refire() {
        assert_eq!(rule("sh").apply("shrr(ì)"), "shrr(ì)");
        assert_eq!(rule("sh").apply("shū"), "shrrū");
        assert_eq!(rule("zh").apply("zhōng"), "zhrrōng");
    }

    #[test]
    fn test_initial_r_only_at_boundary() {
        assert_eq!(rule("initial r").apply("rén"), "rrén");
        assert_eq!(rule("initial r").apply("ér"), "ér");
    }

    #[test]
    fn test_open_a() {
        let r = rule("a+h");
        assert_eq!(r.apply("mā"), "māh");
        assert_eq!(r.apply("ah"), "ah");
        assert_eq!(r.apply("aah"), "ahah");
        assert_eq!(r.apply("ē"), "ē");
    }

    #[test]
    fn test_unvoiced_wraps() {
        assert_eq!(rule("dz+i").apply("dzì"), "dz(ì)");
        assert_eq!(rule("ts'+i").apply("ts'í"), "ts'(í)");
        assert_eq!(rule("s+i").apply("sī"), "sī");
        assert_eq!(rule("s+i").apply("sǐ"), "s(ǐ)");
    }

    #[test]
    fn test_final_er() {
        assert_eq!(rule("final er").apply("er"), "arr");
        assert_eq!(rule("final er").apply("ert"), "ert");
    }

    #[test]
    fn test_neutral_tone() {
        assert_eq!(rule("standalone syllable").apply("hǎho de"), "hǎho duh");
        assert_eq!(rule("attached syllable").apply("hǎhode"), "hǎho-duh");
        assert_eq!(rule("attached syllable").apply("zhrre"), "zhr-ruh");
        assert_eq!(rule("attached syllable").apply("dzé"), "dzé");
        assert_eq!(rule("attached syllable").apply("hǎho-de"), "hǎho-de");
        assert_eq!(rule("attached syllable").apply("dzhōngge"), "dzhōng-guh");
        assert_eq!(rule("standalone e").apply("e"), "uh");
        assert_eq!(rule("standalone e").apply("ne"), "ne");
    }

    #[test]
    fn test_run_rules_unchanged_borrow_path() {
        assert_eq!(run_rules(""), "");
        assert_eq!(run_rules("123"), "123");
    }
}
