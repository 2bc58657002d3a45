use serde::{Deserialize, Serialize};

use crate::flag::Flag;
use crate::segment::Segment;

/// The value stored against a [crate::DataKey] in either tier.
///
/// Both tiers hold heterogeneous data behind one key space; modelling the
/// value as a sum type keyed by the same namespaces makes retrieval
/// exhaustive instead of relying on runtime casts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum StoreItem {
    Flag(Flag),
    Segment(Segment),
    Flags(Vec<Flag>),
    Segments(Vec<Segment>),
}

impl StoreItem {
    pub fn into_flag(self) -> Option<Flag> {
        match self {
            StoreItem::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    pub fn into_segment(self) -> Option<Segment> {
        match self {
            StoreItem::Segment(segment) => Some(segment),
            _ => None,
        }
    }
}
