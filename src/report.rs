use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::RepoSlug;
use crate::normalize::Summary;

#[derive(serde::Serialize, Debug)]
pub struct Report {
    pub repository: String,
    pub started_at: String,
    pub finished_at: String,
    #[serde(flatten)]
    pub summary: Summary,
}

impl Report {
    pub fn new(
        repository: &RepoSlug,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        summary: Summary,
    ) -> Self {
        Self {
            repository: repository.to_string(),
            started_at: started_at.to_rfc3339(),
            finished_at: finished_at.to_rfc3339(),
            summary,
        }
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
