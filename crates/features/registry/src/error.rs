use std::borrow::Cow;

/// Errors raised while reading or editing registry buffers.
///
/// Every variant carries an optional `context` (usually the file being edited), attached
/// through [`RegistryErrorExt::context`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A marker line is absent from the buffer.
    #[error("Marker \"{marker}\" not found{}", format_context(.context))]
    MarkerNotFound { marker: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The start marker does not come before the end marker.
    #[error("Invalid marker order{}: {start} must be before {end}", format_context(.context))]
    MalformedRegion {
        start: Cow<'static, str>,
        end: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Same identity (game id or factory constant), different attributes.
    #[error("Identity conflict{}: {message}", format_context(.context))]
    IdentityConflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An enabled entry already occupies the requested slot.
    #[error("Enabled slot already registered for {slot} by id {owner}{}", format_context(.context))]
    SlotCollision { slot: String, owner: String, context: Option<Cow<'static, str>> },

    /// The generated constant name is already bound to another key.
    #[error(
        "Factory const \"{name}\" already exists with key \"{existing}\"{}",
        format_context(.context)
    )]
    KeyNameCollision { name: String, existing: String, context: Option<Cow<'static, str>> },

    /// No usable constant name can be derived from the key.
    #[error("Cannot generate factory const name from \"{value}\"{}", format_context(.context))]
    InvalidGeneratedName { value: String, context: Option<Cow<'static, str>> },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

pub trait RegistryErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> RegistryErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                RegistryError::MarkerNotFound { context: c, .. }
                | RegistryError::MalformedRegion { context: c, .. }
                | RegistryError::IdentityConflict { context: c, .. }
                | RegistryError::SlotCollision { context: c, .. }
                | RegistryError::KeyNameCollision { context: c, .. }
                | RegistryError::InvalidGeneratedName { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" in {c}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_rendered_after_marker() {
        let err: Result<()> = Err(RegistryError::MarkerNotFound {
            marker: "// [MINIGAME_IMPORTS_START]".into(),
            context: None,
        });
        let err = err.context("lib/game_factories.dart").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Marker \"// [MINIGAME_IMPORTS_START]\" not found in lib/game_factories.dart"
        );
    }

    #[test]
    fn test_message_without_context() {
        let err = RegistryError::SlotCollision {
            slot: "math/trinn2/level1".into(),
            owner: "math_trinn2_level1_a".into(),
            context: None,
        };
        assert_eq!(
            err.to_string(),
            "Enabled slot already registered for math/trinn2/level1 by id math_trinn2_level1_a"
        );
    }
}
