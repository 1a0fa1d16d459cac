use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Profile columns embedded into another table's rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSummaryRow {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
