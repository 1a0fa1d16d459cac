use serde::{Deserialize, Serialize};
use time::Date;

/// One book parsed from a reading-tracker export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedBook {
    pub title: String,
    pub creator: String,
    pub consumed_date: Date,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}
