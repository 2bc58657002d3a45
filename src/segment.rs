use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A target segment definition as delivered by the evaluation service.
///
/// Versioning works exactly as for [crate::Flag]; the targeting-rule payload
/// is opaque to the repository.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub identifier: String,

    /// Monotonically increasing version assigned by the evaluation service.
    /// An unversioned definition is always accepted by the write path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// Included/excluded targets and rules, opaque to this component.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl Segment {
    pub fn new(identifier: impl Into<String>, version: Option<u64>) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            payload: serde_json::Map::new(),
        }
    }

    /// Whether this definition may replace `stored` under the version
    /// ordering rule: it must be strictly newer, except that a missing
    /// version on either side always allows the write.
    pub fn supersedes(&self, stored: &Segment) -> bool {
        match (stored.version, self.version) {
            (Some(stored), Some(incoming)) => incoming > stored,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Segment;
    use test_case::test_case;

    #[test_case(Some(1), Some(2), true)]
    #[test_case(Some(2), Some(2), false)]
    #[test_case(None, Some(1), true)]
    #[test_case(Some(1), None, true)]
    fn supersedes_follows_version_ordering(
        stored: Option<u64>,
        incoming: Option<u64>,
        expected: bool,
    ) {
        let stored = Segment::new("beta-users", stored);
        let incoming = Segment::new("beta-users", incoming);
        assert_eq!(incoming.supersedes(&stored), expected);
    }

    #[test]
    fn targeting_payload_is_preserved() {
        let json = r#"{
            "identifier": "beta-users",
            "version": 7,
            "included": ["user-1", "user-2"],
            "rules": []
        }"#;

        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.identifier, "beta-users");
        assert_eq!(segment.version, Some(7));
        assert!(segment.payload.contains_key("included"));
    }
}
