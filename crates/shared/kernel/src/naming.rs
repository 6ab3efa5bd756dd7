//! Deterministic naming rules shared by the registry engine and the scaffolder.
//!
//! Case conversions are delegated to `heck`; the format checks are anchored regexes
//! compiled once per process.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use regex::Regex;
use std::sync::LazyLock;

static SNAKE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid snake identifier regex"));
static LOWER_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid lower identifier regex"));
static PASCAL_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid pascal identifier regex"));

/// Converts `fraction_race` into `FractionRace`.
#[must_use]
pub fn snake_to_pascal(value: &str) -> String {
    value.to_upper_camel_case()
}

/// Converts `fraction_race` into `fractionRace`.
#[must_use]
pub fn snake_to_camel(value: &str) -> String {
    value.to_lower_camel_case()
}

/// `true` for identifiers like `fraction_race`: lowercase start, then `[a-z0-9_]`.
#[must_use]
pub fn is_snake_identifier(value: &str) -> bool {
    SNAKE_IDENT.is_match(value)
}

/// `true` for non-empty strings made of `[a-z0-9_]`.
#[must_use]
pub fn is_lower_identifier(value: &str) -> bool {
    LOWER_IDENT.is_match(value)
}

/// `true` for `PascalCase` names starting with an uppercase ASCII letter.
#[must_use]
pub fn is_pascal_identifier(value: &str) -> bool {
    PASCAL_IDENT.is_match(value)
}

/// Drops a trailing `Game` suffix, so `FractionRaceGame` becomes `FractionRace`.
#[must_use]
pub fn class_base_name(class_name: &str) -> &str {
    class_name.strip_suffix("Game").unwrap_or(class_name)
}
