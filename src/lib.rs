pub mod config;
pub mod directory;
pub mod error;
pub mod normalize;
pub mod permission;
pub mod report;
pub mod retry;

pub use config::{Config, RepoSlug};
pub use directory::{CollaboratorDirectory, GitHubDirectory};
pub use error::{Error, Result};
pub use normalize::{Normalizer, Summary};
pub use permission::Permission;

/// One user's access record on the target repository, as seen on a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collaborator {
    pub username: String,
    pub permission: Permission,
}

impl Collaborator {
    pub fn new(username: impl Into<String>, permission: Permission) -> Self {
        Self {
            username: username.into(),
            permission,
        }
    }

    /// GitHub returned no permission flag at all for this user.
    pub fn is_anomalous(&self) -> bool {
        self.permission == Permission::None
    }
}

impl From<octocrab::models::Collaborator> for Collaborator {
    fn from(collaborator: octocrab::models::Collaborator) -> Self {
        let perm = &collaborator.permissions;
        Self {
            permission: Permission::from_flags(perm.admin, perm.push, perm.pull),
            username: collaborator.author.login,
        }
    }
}
