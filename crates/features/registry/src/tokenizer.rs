//! Line tokenizer for manifest entries.
//!
//! Each line becomes zero or more [`Token`]s. The rules are independent of the registry
//! invariants; [`crate::manifest`] folds the stream back into entries.

use crate::manifest::Slot;
use regex::Regex;
use std::sync::LazyLock;

const ENTRY_OPEN: &str = "GameManifestEntry(";
const ENTRY_CLOSE: &str = "),";

static ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id:\s*'([^']+)'").expect("valid id pattern"));
static SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Subject\.(\w+),\s*trinn:\s*(\d+),\s*level:\s*(\d+)").expect("valid slot pattern")
});
static FACTORY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"factoryKey:\s*'([^']+)'").expect("valid factory key pattern"));
static ENABLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"enabled:\s*(true|false)").expect("valid enabled pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    EntryOpen,
    Field(FieldMatch),
    EntryClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMatch {
    Id(String),
    Slot(Slot),
    FactoryKey(String),
    Enabled(bool),
}

/// Tokenizes a single line.
///
/// An opening line yields only [`Token::EntryOpen`]; whatever follows the opener on that
/// line is ignored. Otherwise field matches come first, then a closing token if the
/// trimmed line is exactly `),`.
#[must_use]
pub fn tokenize_line(raw: &str) -> Vec<Token> {
    let line = raw.trim();
    if line.contains(ENTRY_OPEN) {
        return vec![Token::EntryOpen];
    }

    let mut tokens = Vec::new();
    if let Some(caps) = ID.captures(line) {
        tokens.push(Token::Field(FieldMatch::Id(caps[1].to_owned())));
    }
    if let Some(slot) = SLOT.captures(line).and_then(|caps| {
        Some(Slot { subject: caps[1].to_owned(), tier: caps[2].parse().ok()?, level: caps[3].parse().ok()? })
    }) {
        tokens.push(Token::Field(FieldMatch::Slot(slot)));
    }
    if let Some(caps) = FACTORY_KEY.captures(line) {
        tokens.push(Token::Field(FieldMatch::FactoryKey(caps[1].to_owned())));
    }
    if let Some(caps) = ENABLED.captures(line) {
        tokens.push(Token::Field(FieldMatch::Enabled(&caps[1] == "true")));
    }
    if line == ENTRY_CLOSE {
        tokens.push(Token::EntryClose);
    }
    tokens
}

/// Tokenizes every line in order.
pub fn tokenize<'a, I>(lines: I) -> impl Iterator<Item = Token> + 'a
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: 'a,
{
    lines.into_iter().flat_map(|line| tokenize_line(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_line_swallows_rest() {
        assert_eq!(tokenize_line("  GameManifestEntry(id: 'x',"), vec![Token::EntryOpen]);
    }

    #[test]
    fn test_field_lines() {
        assert_eq!(
            tokenize_line("    id: 'math_trinn2_level1_fraction_race',"),
            vec![Token::Field(FieldMatch::Id("math_trinn2_level1_fraction_race".into()))]
        );
        assert_eq!(
            tokenize_line("    slot: GameSlot(subject: Subject.math, trinn: 2, level: 1),"),
            vec![Token::Field(FieldMatch::Slot(Slot { subject: "math".into(), tier: 2, level: 1 }))]
        );
        assert_eq!(
            tokenize_line("    factoryKey: 'fraction_race',"),
            vec![Token::Field(FieldMatch::FactoryKey("fraction_race".into()))]
        );
        assert_eq!(tokenize_line("    enabled: false,"), vec![Token::Field(FieldMatch::Enabled(false))]);
    }

    #[test]
    fn test_several_fields_on_one_line() {
        let tokens = tokenize_line("id: 'a', factoryKey: 'b', enabled: true,");
        assert_eq!(
            tokens,
            vec![
                Token::Field(FieldMatch::Id("a".into())),
                Token::Field(FieldMatch::FactoryKey("b".into())),
                Token::Field(FieldMatch::Enabled(true)),
            ]
        );
    }

    #[test]
    fn test_close_requires_exact_line() {
        assert_eq!(tokenize_line("  ),"), vec![Token::EntryClose]);
        assert!(tokenize_line("  ),  // trailing").is_empty());
        assert!(tokenize_line(");").is_empty());
    }

    #[test]
    fn test_overflowing_tier_is_not_a_slot() {
        assert!(tokenize_line("slot: GameSlot(subject: Subject.math, trinn: 99999999999, level: 1),").is_empty());
    }
}
