use crate::config::Config;
use crate::directory::CollaboratorDirectory;
use crate::error::Result;
use crate::Permission;

/// Outcome of one pass over every page of collaborators.
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Fetch calls issued, including the final empty page.
    pub pages_fetched: u32,
    /// Collaborator records seen on all pages.
    pub total: usize,
    pub downgraded: Vec<String>,
    /// Users whose record carried no permission flag at all.
    pub anomalies: Vec<String>,
    pub dry_run: bool,
}

/// Downgrades every collaborator holding push access to pull.
pub struct Normalizer<D> {
    directory: D,
    dry_run: bool,
}

impl<D: CollaboratorDirectory> Normalizer<D> {
    pub fn new(directory: D, config: &Config) -> Self {
        Self {
            directory,
            dry_run: config.dry_run,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Walk pages from 1 until one comes back empty. The first error aborts the walk.
    pub async fn normalize(&self) -> Result<Summary> {
        let mut summary = Summary {
            dry_run: self.dry_run,
            ..Summary::default()
        };
        let mut page = 1u32;

        loop {
            println!("Fetching page {page}");
            let collaborators = self.directory.list_page(page).await?;
            summary.pages_fetched += 1;

            if collaborators.is_empty() {
                break;
            }

            for collaborator in &collaborators {
                if collaborator.is_anomalous() {
                    tracing::warn!(
                        username = %collaborator.username,
                        page,
                        "collaborator has no permission flag set, leaving it alone"
                    );
                    summary.anomalies.push(collaborator.username.clone());
                    continue;
                }
                if collaborator.permission != Permission::Push {
                    continue;
                }

                if self.dry_run {
                    println!("Would downgrade {} to pull", collaborator.username);
                } else {
                    println!("Downgrading {} to pull", collaborator.username);
                    self.directory
                        .set_permission(&collaborator.username, Permission::Pull)
                        .await?;
                }
                summary.downgraded.push(collaborator.username.clone());
            }

            summary.total += collaborators.len();
            tracing::debug!(page, count = collaborators.len(), total = summary.total, "page done");
            page += 1;
        }

        Ok(summary)
    }
}
