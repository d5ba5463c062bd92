use serde::{Deserialize, Serialize};

use crate::item::Item;

/// A change notification pushed to every connected observer.
///
/// Each variant carries a full snapshot of the affected record: the state
/// after the mutation for `Created`/`Updated`, the last stored state for
/// `Deleted`. Events are values, not live references, so observers can
/// apply them without touching the store.
///
/// The wire form is `{"event": "created", "payload": {"item": {...}}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "lowercase")]
pub enum ChangeEvent {
    Created { item: Item },
    Updated { item: Item },
    Deleted { item: Item },
}

impl ChangeEvent {
    /// The record snapshot this event carries.
    pub fn item(&self) -> &Item {
        match self {
            Self::Created { item } | Self::Updated { item } | Self::Deleted { item } => item,
        }
    }

    /// The wire name of this event's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_item() -> Item {
        Item {
            id: "7".to_string(),
            marca: "Dacia".to_string(),
            model: "Logan".to_string(),
            an: 2020,
            culoare: "alb".to_string(),
            nr_inmatriculare: "CJ-01-ABC".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            version: 3,
        }
    }

    #[test]
    fn wire_shape_matches_channel_contract() {
        let event = ChangeEvent::Created { item: test_item() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "created");
        assert_eq!(json["payload"]["item"]["id"], "7");
        assert_eq!(json["payload"]["item"]["nrInmatriculare"], "CJ-01-ABC");
    }

    #[test]
    fn all_kinds_have_lowercase_tags() {
        let item = test_item();
        let cases = [
            (ChangeEvent::Created { item: item.clone() }, "created"),
            (ChangeEvent::Updated { item: item.clone() }, "updated"),
            (ChangeEvent::Deleted { item }, "deleted"),
        ];
        for (event, expected) in cases {
            assert_eq!(event.kind(), expected);
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], expected);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let event = ChangeEvent::Deleted { item: test_item() };
        let text = serde_json::to_string(&event).unwrap();
        let decoded: ChangeEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(event, decoded);
        assert_eq!(decoded.item().version, 3);
    }
}
