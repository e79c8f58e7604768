//! Lithuanian alphabetic collation.
//!
//! # Responsibility
//! - Order names the way a Lithuanian reader expects, not by code point.
//!
//! # Invariants
//! - Every letter of the Lithuanian alphabet has its own primary weight in
//!   alphabet order (`a < ą < b < c < č < ... < z < ž`, `y` right after `į`).
//! - Inputs are compared in NFC, so a decomposed `c` + U+030C weighs as `č`.
//! - Comparison is a total order: strings that tie on every collation level
//!   fall back to code-point order, so only equal strings compare `Equal`.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Lithuanian alphabet plus `q w x` at their usual Latin positions.
const ALPHABET: &[char] = &[
    'a', 'ą', 'b', 'c', 'č', 'd', 'e', 'ę', 'ė', 'f', 'g', 'h', 'i', 'į', 'y', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 'š', 't', 'u', 'ų', 'ū', 'v', 'w', 'x', 'z', 'ž',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
    OtherLetter,
}

/// Compares two strings under Lithuanian alphabetic collation.
///
/// Levels: letter identity (case-insensitive), then case (lowercase first),
/// then raw code points.
pub fn lithuanian_cmp(left: &str, right: &str) -> Ordering {
    let left_nfc = left.nfc().collect::<String>();
    let right_nfc = right.nfc().collect::<String>();

    left_nfc
        .chars()
        .map(primary_weight)
        .cmp(right_nfc.chars().map(primary_weight))
        .then_with(|| {
            left_nfc
                .chars()
                .map(char::is_uppercase)
                .cmp(right_nfc.chars().map(char::is_uppercase))
        })
        .then_with(|| left.cmp(right))
}

fn primary_weight(value: char) -> (CharClass, u32) {
    let lower = value.to_lowercase().next().unwrap_or(value);

    if lower.is_whitespace() {
        return (CharClass::Whitespace, 0);
    }
    if let Some(position) = ALPHABET.iter().position(|letter| *letter == lower) {
        return (CharClass::Letter, position as u32);
    }
    if let Some(digit) = lower.to_digit(10) {
        return (CharClass::Digit, digit);
    }
    if lower.is_alphabetic() {
        return (CharClass::OtherLetter, u32::from(lower));
    }
    (CharClass::Punctuation, u32::from(lower))
}

#[cfg(test)]
mod tests {
    use super::lithuanian_cmp;
    use std::cmp::Ordering;

    fn sorted(values: &[&str]) -> Vec<String> {
        let mut values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        values.sort_by(|a, b| lithuanian_cmp(a, b));
        values
    }

    #[test]
    fn caron_letters_follow_their_base_letter() {
        assert_eq!(
            sorted(&["čiurlys", "dainius", "celis"]),
            ["celis", "čiurlys", "dainius"]
        );
        assert_eq!(sorted(&["žemaitis", "zigmas"]), ["zigmas", "žemaitis"]);
        assert_eq!(
            sorted(&["šarūnas", "tomas", "saulius"]),
            ["saulius", "šarūnas", "tomas"]
        );
    }

    #[test]
    fn ogonek_and_dot_vowels_take_alphabet_positions() {
        assert_eq!(
            sorted(&["ąžuolas", "azuolas", "bronius"]),
            ["azuolas", "ąžuolas", "bronius"]
        );
        assert_eq!(
            sorted(&["ėglė", "ęsa", "eva", "fausta"]),
            ["eva", "ęsa", "ėglė", "fausta"]
        );
        assert_eq!(
            sorted(&["ūla", "ųsa", "uzas", "vytas"]),
            ["uzas", "ųsa", "ūla", "vytas"]
        );
    }

    #[test]
    fn y_sorts_between_i_ogonek_and_j() {
        assert_eq!(
            sorted(&["jonas", "ygnas", "įvaras", "iza"]),
            ["iza", "įvaras", "ygnas", "jonas"]
        );
    }

    #[test]
    fn code_point_order_would_differ() {
        // 'č' (U+010D) is after every ASCII letter by code point.
        assert_eq!("čia".cmp("dar"), Ordering::Greater);
        assert_eq!(lithuanian_cmp("čia", "dar"), Ordering::Less);
    }

    #[test]
    fn decomposed_diacritics_sort_like_precomposed_letters() {
        assert_eq!(lithuanian_cmp("c\u{030C}ia", "cb"), Ordering::Greater);
        assert_eq!(lithuanian_cmp("c\u{030C}ia", "dar"), Ordering::Less);
        assert_eq!(lithuanian_cmp("S\u{030C}arūnas", "Saulius"), Ordering::Greater);
        assert_eq!(
            sorted(&["e\u{0307}glė", "e\u{0328}sa", "eva"]),
            ["eva", "e\u{0328}sa", "e\u{0307}glė"]
        );
    }

    #[test]
    fn composed_and_decomposed_forms_stay_distinct() {
        assert_ne!(lithuanian_cmp("\u{010D}ia", "c\u{030C}ia"), Ordering::Equal);
    }

    #[test]
    fn space_sorts_before_letters_so_shorter_first_names_lead() {
        assert_eq!(lithuanian_cmp("ana kazlauskienė", "anastasija a"), Ordering::Less);
    }

    #[test]
    fn case_only_differences_are_ordered_but_not_equal() {
        assert_eq!(lithuanian_cmp("Ana", "ana"), Ordering::Greater);
        assert_eq!(lithuanian_cmp("ana", "ana"), Ordering::Equal);
        assert_eq!(lithuanian_cmp("Ana", "anb"), Ordering::Less);
    }
}
