use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Deserialize};

use super::record::Record;

/// A record captured by the user, stored as the record's own fields plus `savedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub record: Record,
    pub saved_at: String,
}

impl FavoriteEntry {
    pub fn new(record: Record, saved_at: DateTime<Utc>) -> Self {
        FavoriteEntry {
            record,
            saved_at: saved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
