use proptest::prelude::*;

use super::*;
use crate::unicode::{is_tone_vowel, normalize};

#[test]
fn test_shi_not_generic_sh() {
    assert_eq!(convert("shi"), "shrr(ì)");
    assert_eq!(convert("shí"), "shrr(í)");
    assert_ne!(convert("shi"), "shrri");
}

#[test]
fn test_y_initial_before_other_rules() {
    assert_eq!(convert("yī"), "(y)ēe");
    assert_eq!(convert("yǒu"), "(y)ǒhü");
    assert_eq!(convert("yě"), "(y)ěh");
}

#[test]
fn test_unvoiced_after_z_c_s() {
    assert!(convert("zi").contains("dz(i)"));
    assert_eq!(convert("zì"), "dz(ì)");
    assert_eq!(convert("cí"), "ts'(í)");
    assert_eq!(convert("sì"), "s(ì)");
}

#[test]
fn test_two_tone_vowels_two_segments() {
    assert_eq!(convert("xièxiè"), "ssyièssyi-È");
    assert_eq!(convert("nǐhǎo"), "nǐh-Ǎho");
    assert_eq!(convert("nǐ hǎo"), "nǐ-Hǎho");
}

#[test]
fn test_untoned_words_between_syllables_dropped() {
    assert_eq!(convert("tāde péngyou"), "t'āh-P'éngyow");
    assert_eq!(convert("hǎode mā"), "hǎho-Māh");
    assert_eq!(convert("nǐ de shū"), "nǐ-Shrrū");
}

#[test]
fn test_single_tone_vowel_not_hyphenated() {
    assert_eq!(convert("māma"), "māhmah");
    assert_eq!(convert("xiè xie"), "ssyiè ssyie");
}

#[test]
fn test_aspiration() {
    assert_eq!(convert("tā"), "t'āh");
    assert_eq!(convert("kàn"), "k'àhn");
    assert_eq!(convert("péngyou"), "p'éngyow");
    assert_eq!(convert("qù"), "tsyh'ù");
}

#[test]
fn test_initial_c_after_retroflex() {
    // `ch` is rewritten first, and its `c` is still word-initial.
    assert_eq!(convert("chī"), "ts'hrrī");
}

#[test]
fn test_consonant_remaps_fire_inside_rewrites() {
    assert_eq!(convert("zhōng"), "dzhrrōng");
    assert_eq!(convert("jīn"), "jyīn");
}

#[test]
fn test_er_final() {
    assert_eq!(convert("er"), "arr");
    assert_eq!(convert("ér"), "ér");
}

#[test]
fn test_neutral_tone() {
    assert_eq!(convert("e"), "uh");
    assert_eq!(convert("de"), "duh");
    assert_eq!(convert("hǎode"), "hǎho-duh");
    assert_eq!(convert("wǒmende"), "wǒmen-duh");
    assert_eq!(convert("hǎo de"), "hǎho duh");
    assert_eq!(convert("zhe"), "dzhr-ruh");
}

#[test]
fn test_decomposed_input_matches_composed() {
    let decomposed = "ni\u{030C}ha\u{030C}o";
    assert_eq!(convert(decomposed), convert("nǐhǎo"));
}

#[test]
fn test_uppercase_input_passes_through_rules() {
    assert_eq!(convert("Běijīng"), "Běijy-Īng");
}

#[test]
fn test_missing_value_passes_through() {
    assert_eq!(convert_value(None::<&str>), None);
    assert_eq!(convert_value(Some("shi")), Some("shrr(ì)".to_string()));
    assert_eq!(convert_value(Some(String::new())), Some(String::new()));
}

#[test]
fn test_deterministic() {
    let first = convert("zhōngguó rén");
    let second = convert("zhōngguó rén");
    assert_eq!(first, second);
}

const PINYIN_CHARS: &str = "[a-z' āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜü]{0,24}";

proptest! {
    #[test]
    fn prop_deterministic(s in PINYIN_CHARS) {
        prop_assert_eq!(convert(&s), convert(&s));
    }

    #[test]
    fn prop_normalize_idempotent(s in "\\PC{0,24}") {
        let once = normalize(&s).into_owned();
        prop_assert_eq!(normalize(&once).into_owned(), once);
    }

    #[test]
    fn prop_no_tone_vowel_no_segmentation(s in PINYIN_CHARS) {
        let rewritten = run_rules(&normalize(&s));
        if !rewritten.chars().any(is_tone_vowel) {
            prop_assert_eq!(convert(&s), rewritten);
        }
    }

    #[test]
    fn prop_one_segment_per_tone_vowel(s in PINYIN_CHARS) {
        let rewritten = run_rules(&normalize(&s));
        let tone_vowels = rewritten.chars().filter(|c| is_tone_vowel(*c)).count();
        prop_assert_eq!(split_syllables(&rewritten).len(), tone_vowels);
    }

    #[test]
    fn prop_explain_agrees_with_convert(s in PINYIN_CHARS) {
        prop_assert_eq!(explain(&s).output, convert(&s));
    }
}
