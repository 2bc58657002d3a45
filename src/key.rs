use std::fmt;

/// A namespaced key addressing one entry in either storage tier.
///
/// Flags, segments, and the environment-scoped collections of each share a
/// single key space in both tiers, so every key carries one of four fixed
/// prefixes in its rendered form. The `Display` form is what durable stores
/// see as the persisted key.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum DataKey {
    /// A single flag definition, keyed by feature identifier.
    Flag(String),
    /// The flag collection for an environment.
    Flags(String),
    /// A single segment definition, keyed by identifier.
    Segment(String),
    /// The segment collection for an environment.
    Segments(String),
}

impl DataKey {
    pub fn flag(identifier: &str) -> Self {
        DataKey::Flag(identifier.to_string())
    }

    pub fn flags(env_id: &str) -> Self {
        DataKey::Flags(env_id.to_string())
    }

    pub fn segment(identifier: &str) -> Self {
        DataKey::Segment(identifier.to_string())
    }

    pub fn segments(env_id: &str) -> Self {
        DataKey::Segments(env_id.to_string())
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKey::Flag(identifier) => write!(f, "flag/{}", identifier),
            DataKey::Flags(env_id) => write!(f, "flags/{}", env_id),
            DataKey::Segment(identifier) => write!(f, "target-segment/{}", identifier),
            DataKey::Segments(env_id) => write!(f, "target-segments/{}", env_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataKey;
    use test_case::test_case;

    #[test_case(DataKey::flag("dark-mode"), "flag/dark-mode")]
    #[test_case(DataKey::flags("production"), "flags/production")]
    #[test_case(DataKey::segment("beta-users"), "target-segment/beta-users")]
    #[test_case(DataKey::segments("production"), "target-segments/production")]
    fn renders_fixed_prefix(key: DataKey, expected: &str) {
        assert_eq!(key.to_string(), expected);
    }

    #[test]
    fn same_identifier_in_different_namespaces_does_not_collide() {
        assert_ne!(DataKey::flag("x"), DataKey::segment("x"));
        assert_ne!(DataKey::flags("x"), DataKey::segments("x"));
        assert_ne!(DataKey::flag("x"), DataKey::flags("x"));
        assert_ne!(DataKey::flag("x").to_string(), DataKey::segment("x").to_string());
    }
}
