use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub url: String,
    #[serde(default)]
    pub total_clicks: u64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// A freshly created link: no clicks yet.
    pub fn new(code: impl Into<String>, url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
            total_clicks: 0,
            last_clicked: None,
            created_at,
        }
    }

    /// Short URL for this link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.code)
    }
}
