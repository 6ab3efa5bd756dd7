//! Factory key constants (`const fractionRaceFactoryKey = 'fraction_race';`).

use crate::error::{RegistryError, Result};
use crate::marker::MarkerPair;
use fxhash::FxHashMap;
use mgkit_kernel::naming::snake_to_camel;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Region holding the key constant declarations.
pub const FACTORY_KEYS: MarkerPair =
    MarkerPair::new("// [MINIGAME_FACTORY_KEYS_START]", "// [MINIGAME_FACTORY_KEYS_END]");

const CONST_SUFFIX: &str = "FactoryKey";

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*const\s+([A-Za-z0-9_]+)\s*=\s*'([^']+)';\s*$").expect("valid const pattern")
});

/// Both directions of the constant name ↔ key value mapping.
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    by_name: FxHashMap<String, String>,
    by_value: FxHashMap<String, String>,
}

impl KeyTable {
    /// Collects every single-line `const` declaration. Later declarations win.
    #[must_use]
    pub fn parse(lines: &[String]) -> Self {
        let mut table = Self::default();
        for caps in lines.iter().filter_map(|line| DECLARATION.captures(line)) {
            let (name, value) = (caps[1].to_owned(), caps[2].to_owned());
            table.by_name.insert(name.clone(), value.clone());
            table.by_value.insert(value, name);
        }
        table
    }

    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn name_of(&self, value: &str) -> Option<&str> {
        self.by_value.get(value).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Picks the constant that should reference `value`.
    ///
    /// An already declared value keeps its constant. Otherwise a name is derived with
    /// [`constant_name_for`] and must not already be bound to a different value.
    ///
    /// # Errors
    /// [`RegistryError::InvalidGeneratedName`] or [`RegistryError::KeyNameCollision`].
    pub fn resolve(&self, value: &str) -> Result<KeyResolution> {
        if let Some(name) = self.name_of(value) {
            debug!(name, value, "Reusing existing factory key constant");
            return Ok(KeyResolution { name: name.to_owned(), value: value.to_owned(), declare: false });
        }

        let name = constant_name_for(value)?;
        if let Some(existing) = self.value_of(&name).filter(|existing| *existing != value) {
            return Err(RegistryError::KeyNameCollision {
                name,
                existing: existing.to_owned(),
                context: None,
            });
        }

        Ok(KeyResolution { name, value: value.to_owned(), declare: true })
    }
}

/// Outcome of [`KeyTable::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolution {
    pub name: String,
    pub value: String,
    /// `false` when the constant is already declared and is reused as is.
    pub declare: bool,
}

impl KeyResolution {
    #[must_use]
    pub fn declaration_line(&self) -> String {
        format!("const {} = '{}';", self.name, self.value)
    }
}

/// `fraction_race` → `fractionRaceFactoryKey`.
///
/// # Errors
/// [`RegistryError::InvalidGeneratedName`] when the camel-case stem is empty or starts with a digit.
pub fn constant_name_for(value: &str) -> Result<String> {
    let stem = snake_to_camel(value);
    if stem.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        return Err(RegistryError::InvalidGeneratedName { value: value.to_owned(), context: None });
    }
    Ok(format!("{stem}{CONST_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> KeyTable {
        KeyTable::parse(&text.lines().map(str::to_owned).collect::<Vec<_>>())
    }

    #[test]
    fn test_parse_builds_both_directions() {
        let keys = table("const aFactoryKey = 'a';\n  const bFactoryKey='b';  \nfinal x = 'y';");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.value_of("bFactoryKey"), Some("b"));
        assert_eq!(keys.name_of("a"), Some("aFactoryKey"));
        assert_eq!(keys.name_of("y"), None);
    }

    #[test]
    fn test_last_declaration_wins() {
        let keys = table("const k = 'one';\nconst k = 'two';");
        assert_eq!(keys.value_of("k"), Some("two"));
        assert_eq!(keys.name_of("two"), Some("k"));
    }

    #[test]
    fn test_resolve_reuses_existing_value() {
        let keys = table("const legacyName = 'fraction_race';");
        let resolved = keys.resolve("fraction_race").unwrap();
        assert_eq!(resolved.name, "legacyName");
        assert!(!resolved.declare);
    }

    #[test]
    fn test_resolve_derives_new_name() {
        let keys = table("");
        let resolved = keys.resolve("fraction_race").unwrap();
        assert_eq!(resolved.name, "fractionRaceFactoryKey");
        assert!(resolved.declare);
        assert_eq!(resolved.declaration_line(), "const fractionRaceFactoryKey = 'fraction_race';");
    }

    #[test]
    fn test_resolve_detects_name_collision() {
        let keys = table("const fractionRaceFactoryKey = 'something_else';");
        let err = keys.resolve("fraction_race").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::KeyNameCollision { ref name, ref existing, .. }
                if name == "fractionRaceFactoryKey" && existing == "something_else"
        ));
    }

    #[test]
    fn test_invalid_generated_names() {
        assert!(matches!(constant_name_for("2fast"), Err(RegistryError::InvalidGeneratedName { .. })));
        assert!(matches!(constant_name_for(""), Err(RegistryError::InvalidGeneratedName { .. })));
        assert!(matches!(constant_name_for("___"), Err(RegistryError::InvalidGeneratedName { .. })));
    }
}
