use strum_macros::{AsRefStr, Display, EnumIter, EnumString, VariantNames};

/// School subject a game belongs to; the first component of a slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum Subject {
    Reading,
    Math,
    English,
    Science,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{IntoEnumIterator, VariantNames};

    #[test]
    fn test_round_trips_through_lowercase_names() {
        for subject in Subject::iter() {
            assert_eq!(Subject::from_str(subject.as_ref()).unwrap(), subject);
        }
        assert_eq!(Subject::VARIANTS, &["reading", "math", "english", "science"]);
        assert!(Subject::from_str("history").is_err());
    }
}
