use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A feature flag definition as delivered by the evaluation service.
///
/// The repository interprets only the identifier and the version; the rule
/// and variation payload is carried opaquely in [Flag::payload] and handed
/// through to the evaluation engine untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    /// Identifier of the feature this definition belongs to.
    pub feature: String,

    /// Monotonically increasing version assigned by the evaluation service.
    /// An unversioned definition is always accepted by the write path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// Everything else the service sent: rules, variations, serve state.
    /// Opaque to this component.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl Flag {
    pub fn new(feature: impl Into<String>, version: Option<u64>) -> Self {
        Self {
            feature: feature.into(),
            version,
            payload: serde_json::Map::new(),
        }
    }

    /// Whether this definition may replace `stored` under the version
    /// ordering rule: it must be strictly newer, except that a missing
    /// version on either side always allows the write.
    pub fn supersedes(&self, stored: &Flag) -> bool {
        match (stored.version, self.version) {
            (Some(stored), Some(incoming)) => incoming > stored,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;
    use spectral::prelude::*;
    use test_case::test_case;

    #[test_case(Some(1), Some(2), true; "strictly newer wins")]
    #[test_case(Some(2), Some(2), false; "equal version loses")]
    #[test_case(Some(3), Some(2), false; "older version loses")]
    #[test_case(None, Some(2), true; "unversioned stored always replaced")]
    #[test_case(Some(3), None, true; "unversioned incoming always accepted")]
    #[test_case(None, None, true; "both unversioned accepted")]
    fn supersedes_follows_version_ordering(
        stored: Option<u64>,
        incoming: Option<u64>,
        expected: bool,
    ) {
        let stored = Flag::new("feature", stored);
        let incoming = Flag::new("feature", incoming);
        assert_eq!(incoming.supersedes(&stored), expected);
    }

    #[test]
    fn unknown_payload_fields_survive_a_round_trip() {
        let json = r#"{
            "feature": "dark-mode",
            "version": 3,
            "state": "on",
            "kind": "boolean",
            "variations": [{"identifier": "true", "value": "true"}]
        }"#;

        let flag: Flag = serde_json::from_str(json).unwrap();
        assert_eq!(flag.feature, "dark-mode");
        assert_eq!(flag.version, Some(3));
        asserting!("rule payload is preserved opaquely")
            .that(&flag.payload.contains_key("variations"))
            .is_true();

        let reserialized = serde_json::to_value(&flag).unwrap();
        assert_eq!(reserialized["state"], "on");
        assert_eq!(reserialized["version"], 3);
    }

    #[test]
    fn missing_version_deserializes_as_none() {
        let flag: Flag = serde_json::from_str(r#"{"feature": "no-version"}"#).unwrap();
        assert_that!(flag.version).is_none();
    }
}
