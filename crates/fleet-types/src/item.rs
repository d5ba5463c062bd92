use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered vehicle record.
///
/// The `version` counter implements optimistic concurrency control: it
/// starts at 1 on creation and increments by exactly 1 on every accepted
/// update. `date` is the time of the last accepted mutation, never read
/// time. Identifiers are assigned by the store and are unique for the
/// store's whole lifetime, even across deletions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub marca: String,
    pub model: String,
    pub an: i32,
    pub culoare: String,
    pub nr_inmatriculare: String,
    pub date: DateTime<Utc>,
    pub version: u64,
}

/// Incoming payload for create and update requests.
///
/// Every field is optional so the server can distinguish "absent" from
/// "empty" and report exactly which required fields are missing. On update,
/// provided fields replace the stored values and omitted fields are kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub an: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culoare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nr_inmatriculare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl ItemDraft {
    /// Names of required fields that are absent or blank, in wire spelling.
    ///
    /// An empty result means the draft is complete enough to create a record.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().map_or(true, |s| s.trim().is_empty())
        }

        let mut missing = Vec::new();
        if blank(&self.marca) {
            missing.push("marca");
        }
        if blank(&self.model) {
            missing.push("model");
        }
        if self.an.is_none() {
            missing.push("an");
        }
        if blank(&self.culoare) {
            missing.push("culoare");
        }
        if blank(&self.nr_inmatriculare) {
            missing.push("nrInmatriculare");
        }
        missing
    }
}
