//! Classification of a requested registry record against the records already present.

use crate::error::RegistryError;
use crate::manifest::{ManifestEntry, Slot};

/// What to do with a requested record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An identical record is already registered.
    NoOp,
    /// The record is new and may be appended.
    Insert,
    Conflict(Conflict),
}

/// Why a request cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The id is taken by an entry with different fields.
    Identity { id: String },
    /// An enabled entry already claims the slot.
    Slot { slot: Slot, owner: String },
    /// The factory constant is mapped to another class.
    Mapping { name: String, class_name: String },
}

impl From<Conflict> for RegistryError {
    fn from(conflict: Conflict) -> Self {
        match conflict {
            Conflict::Identity { id } => Self::IdentityConflict {
                message: format!("Existing manifest id \"{id}\" conflicts with requested values")
                    .into(),
                context: None,
            },
            Conflict::Slot { slot, owner } => {
                Self::SlotCollision { slot: slot.to_string(), owner, context: None }
            },
            Conflict::Mapping { name, class_name } => Self::IdentityConflict {
                message: format!(
                    "Factory map entry for \"{name}\" exists but does not target \"{class_name}\""
                )
                .into(),
                context: None,
            },
        }
    }
}

impl Resolution {
    /// `Ok(true)` for [`Resolution::Insert`], `Ok(false)` for [`Resolution::NoOp`].
    ///
    /// # Errors
    /// The conflict, converted into a [`RegistryError`].
    pub fn into_result(self) -> Result<bool, RegistryError> {
        match self {
            Self::NoOp => Ok(false),
            Self::Insert => Ok(true),
            Self::Conflict(conflict) => Err(conflict.into()),
        }
    }
}

/// Decides whether `candidate` can be appended to `existing`.
///
/// The id check runs first so that replaying an identical request is always a no-op.
/// Only enabled entries hold their slot; disabled entries never block an insertion.
#[must_use]
pub fn resolve_slot_insertion(existing: &[ManifestEntry], candidate: &ManifestEntry) -> Resolution {
    if let Some(same_id) = existing.iter().find(|entry| entry.id == candidate.id) {
        return if same_id == candidate {
            Resolution::NoOp
        } else {
            Resolution::Conflict(Conflict::Identity { id: candidate.id.clone() })
        };
    }

    if candidate.enabled {
        if let Some(owner) =
            existing.iter().find(|entry| entry.enabled && entry.slot == candidate.slot)
        {
            return Resolution::Conflict(Conflict::Slot {
                slot: candidate.slot.clone(),
                owner: owner.id.clone(),
            });
        }
    }

    Resolution::Insert
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, level: u32, enabled: bool) -> ManifestEntry {
        ManifestEntry {
            id: id.into(),
            slot: Slot { subject: "math".into(), tier: 2, level },
            factory_key: format!("{id}_key"),
            enabled,
        }
    }

    #[test]
    fn test_identical_request_is_noop() {
        let existing = vec![entry("a", 1, true)];
        assert_eq!(resolve_slot_insertion(&existing, &entry("a", 1, true)), Resolution::NoOp);
    }

    #[test]
    fn test_same_id_different_fields_conflicts() {
        let existing = vec![entry("a", 1, true)];
        let mut changed = entry("a", 1, true);
        changed.enabled = false;
        assert_eq!(
            resolve_slot_insertion(&existing, &changed),
            Resolution::Conflict(Conflict::Identity { id: "a".into() })
        );

        let mut moved = entry("a", 2, true);
        moved.factory_key = "a_key".into();
        assert!(matches!(
            resolve_slot_insertion(&existing, &moved),
            Resolution::Conflict(Conflict::Identity { .. })
        ));
    }

    #[test]
    fn test_enabled_slot_collision() {
        let existing = vec![entry("a", 1, true)];
        let resolution = resolve_slot_insertion(&existing, &entry("b", 1, true));
        assert_eq!(
            resolution,
            Resolution::Conflict(Conflict::Slot {
                slot: Slot { subject: "math".into(), tier: 2, level: 1 },
                owner: "a".into()
            })
        );
        let err = resolution.into_result().unwrap_err();
        assert!(matches!(err, RegistryError::SlotCollision { .. }));
    }

    #[test]
    fn test_disabled_entries_never_block() {
        let existing = vec![entry("a", 1, false)];
        assert_eq!(resolve_slot_insertion(&existing, &entry("b", 1, true)), Resolution::Insert);

        let existing = vec![entry("a", 1, true)];
        assert_eq!(resolve_slot_insertion(&existing, &entry("b", 1, false)), Resolution::Insert);
    }

    #[test]
    fn test_free_slot_is_inserted() {
        let existing = vec![entry("a", 1, true)];
        assert_eq!(resolve_slot_insertion(&existing, &entry("b", 2, true)), Resolution::Insert);
        assert_eq!(resolve_slot_insertion(&[], &entry("b", 2, true)).into_result(), Ok(true));
    }
}
