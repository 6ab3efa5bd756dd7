//! # Registry
//!
//! Treats the two game registry sources (`game_factories.dart` and `game_manifest.dart`)
//! as small databases embedded in text.
//!
//! ## Architecture
//!
//! 1.  **Regions ([`marker`]):** Locates `// [..._START]` / `// [..._END]` sentinel lines
//!     and inserts lines or blocks right before the end marker, at most once.
//! 2.  **Parsing ([`tokenizer`], [`manifest`], [`keys`]):** Rebuilds manifest entries and
//!     factory key constants from pattern-matched lines.
//! 3.  **Resolution ([`resolver`], [`keys`], [`factories`]):** Classifies a requested record
//!     as a no-op, an insertion, or a conflict before anything is edited.
//!
//! ## Example
//!
//! ```rust
//! use mgkit_registry::manifest::{MANIFEST_ENTRIES, ManifestEntry, Slot, parse_entries};
//! use mgkit_registry::marker::TextBuffer;
//! use mgkit_registry::resolver::{Resolution, resolve_slot_insertion};
//!
//! let mut buffer = TextBuffer::parse("// [MINIGAME_MANIFEST_START]\n// [MINIGAME_MANIFEST_END]\n");
//! let entry = ManifestEntry {
//!     id: "math_trinn2_level1_fraction_race".into(),
//!     slot: Slot { subject: "math".into(), tier: 2, level: 1 },
//!     factory_key: "fraction_race".into(),
//!     enabled: true,
//! };
//!
//! let existing = parse_entries(buffer.lines());
//! assert_eq!(resolve_slot_insertion(&existing, &entry), Resolution::Insert);
//! buffer.insert_block(MANIFEST_ENTRIES, &entry.render(), &entry.identity_line()).unwrap();
//! assert_eq!(parse_entries(buffer.lines()), vec![entry]);
//! ```

mod error;
pub mod factories;
pub mod keys;
pub mod manifest;
pub mod marker;
pub mod resolver;
pub mod tokenizer;

pub use crate::error::{RegistryError, RegistryErrorExt, Result};
