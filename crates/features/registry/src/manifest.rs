//! Slot-assignment entries of `game_manifest.dart`.

use crate::marker::MarkerPair;
use crate::tokenizer::{FieldMatch, Token, tokenize};
use std::fmt;
use tracing::trace;

/// Region holding the `GameManifestEntry(...)` list.
pub const MANIFEST_ENTRIES: MarkerPair =
    MarkerPair::new("// [MINIGAME_MANIFEST_START]", "// [MINIGAME_MANIFEST_END]");

/// The `(subject, trinn, level)` place a game occupies.
///
/// `subject` is kept as written in the file so that entries with subjects this tool does
/// not know about still take part in the identity and slot checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub subject: String,
    pub tier: u32,
    pub level: u32,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/trinn{}/level{}", self.subject, self.tier, self.level)
    }
}

/// One registered game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub id: String,
    pub slot: Slot,
    pub factory_key: String,
    pub enabled: bool,
}

impl ManifestEntry {
    /// The line that fingerprints this entry inside the manifest region.
    #[must_use]
    pub fn identity_line(&self) -> String {
        format!("id: '{}',", self.id)
    }

    /// Source lines for this entry, in the manifest's indentation.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        vec![
            "  GameManifestEntry(".to_owned(),
            format!("    {}", self.identity_line()),
            format!(
                "    slot: GameSlot(subject: Subject.{}, trinn: {}, level: {}),",
                self.slot.subject, self.slot.tier, self.slot.level
            ),
            format!("    factoryKey: '{}',", self.factory_key),
            format!("    enabled: {},", self.enabled),
            "  ),".to_owned(),
        ]
    }
}

#[derive(Debug, Default)]
struct PartialEntry {
    id: Option<String>,
    slot: Option<Slot>,
    factory_key: Option<String>,
    enabled: Option<bool>,
}

impl PartialEntry {
    fn apply(&mut self, field: FieldMatch) {
        match field {
            FieldMatch::Id(id) => self.id = Some(id),
            FieldMatch::Slot(slot) => self.slot = Some(slot),
            FieldMatch::FactoryKey(key) => self.factory_key = Some(key),
            FieldMatch::Enabled(enabled) => self.enabled = Some(enabled),
        }
    }

    fn finish(self) -> Option<ManifestEntry> {
        Some(ManifestEntry {
            id: self.id?,
            slot: self.slot?,
            factory_key: self.factory_key?,
            enabled: self.enabled.unwrap_or(true),
        })
    }
}

/// Rebuilds every complete entry in `lines`.
///
/// Field lines outside an entry are ignored; entries closed before `id`, slot and
/// `factoryKey` were all seen are dropped without error.
#[must_use]
pub fn parse_entries(lines: &[String]) -> Vec<ManifestEntry> {
    let mut entries = Vec::new();
    let mut current: Option<PartialEntry> = None;

    for token in tokenize(lines) {
        match token {
            Token::EntryOpen => current = Some(PartialEntry::default()),
            Token::Field(field) => {
                if let Some(partial) = current.as_mut() {
                    partial.apply(field);
                }
            },
            Token::EntryClose => {
                let Some(partial) = current.take() else { continue };
                match partial.finish() {
                    Some(entry) => entries.push(entry),
                    None => trace!("Skipping incomplete manifest entry"),
                }
            },
        }
    }

    entries
}
