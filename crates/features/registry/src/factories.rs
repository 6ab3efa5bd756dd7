//! Import lines and the key → widget map of `game_factories.dart`.

use crate::error::Result;
use crate::marker::{MarkerPair, TextBuffer};
use crate::resolver::{Conflict, Resolution};

/// Region holding the presentation imports.
pub const FACTORY_IMPORTS: MarkerPair =
    MarkerPair::new("// [MINIGAME_IMPORTS_START]", "// [MINIGAME_IMPORTS_END]");

/// Region holding the factory map entries.
pub const FACTORY_MAP: MarkerPair =
    MarkerPair::new("// [MINIGAME_FACTORIES_START]", "// [MINIGAME_FACTORIES_END]");

/// Import of a game's presentation file, relative to the bootstrap directory.
#[must_use]
pub fn import_line(subject: &str, tier: u32, slug: &str) -> String {
    format!("import '../games/{subject}/trinn{tier}/{slug}/presentation/{slug}_game.dart';")
}

/// A `constName: ({required onComplete}) => ClassName(...)` map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryMapping {
    pub const_name: String,
    pub class_name: String,
}

impl FactoryMapping {
    #[must_use]
    pub fn identity_line(&self) -> String {
        format!("{}:", self.const_name)
    }

    #[must_use]
    pub fn render(&self) -> Vec<String> {
        vec![
            format!("  {}: ({{required onComplete}}) =>", self.const_name),
            format!("      {}(onComplete: onComplete),", self.class_name),
        ]
    }

    /// Looks for an existing entry keyed by the same constant.
    ///
    /// An entry counts as targeting the same class when its key line or the line after
    /// it constructs `ClassName(`.
    ///
    /// # Errors
    /// Propagates marker lookup failures.
    pub fn resolve(&self, buffer: &TextBuffer) -> Result<Resolution> {
        let key = self.identity_line();
        let Some(idx) = buffer.find_in_region(FACTORY_MAP, |line| line.trim().starts_with(&key))?
        else {
            return Ok(Resolution::Insert);
        };

        let constructor = format!("{}(", self.class_name);
        let targets_class = buffer.lines()[idx..].iter().take(2).any(|line| line.contains(&constructor));
        if targets_class {
            Ok(Resolution::NoOp)
        } else {
            Ok(Resolution::Conflict(Conflict::Mapping {
                name: self.const_name.clone(),
                class_name: self.class_name.clone(),
            }))
        }
    }
}
