use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{FromResponse, Octocrab, Page};

use crate::config::{Config, RepoSlug};
use crate::error::{Error, Result};
use crate::retry::with_retries;
use crate::{Collaborator, Permission};

/// The two collaborator operations the normalizer needs from a hosting service.
#[async_trait]
pub trait CollaboratorDirectory: Send + Sync {
    /// Collaborators on page `page` (1-based). Past the last page this is empty.
    async fn list_page(&self, page: u32) -> Result<Vec<Collaborator>>;

    /// Overwrite the stored permission of `username`.
    async fn set_permission(&self, username: &str, level: Permission) -> Result<()>;
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Collaborator directory backed by the GitHub REST API.
pub struct GitHubDirectory {
    client: Octocrab,
    repository: RepoSlug,
    page_size: u8,
    retries: u32,
}

impl GitHubDirectory {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = octocrab::OctocrabBuilder::new().personal_token(config.token.clone());
        // `with_retries` is the only retry policy.
        builder.add_retry_config(RetryConfig::None);
        if let Some(api_base) = &config.api_base {
            builder = builder.base_uri(api_base.as_str())?;
        }

        Ok(Self {
            client: builder.build()?,
            repository: config.repository.clone(),
            page_size: config.page_size,
            retries: config.retries,
        })
    }

    fn collaborators_route(&self) -> String {
        format!(
            "/repos/{}/{}/collaborators",
            self.repository.owner, self.repository.name
        )
    }

    /// Turn a non-2xx response into `Error::Protocol`, keeping GitHub's message when it sent one.
    async fn ensure_success(
        &self,
        response: http::Response<hyper::Body>,
    ) -> Result<http::Response<hyper::Body>> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = self.client.body_to_string(response).await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
        Err(Error::Protocol {
            status: Some(status.as_u16()),
            message,
        })
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<Collaborator>> {
        let route = format!(
            "{}?per_page={}&page={}",
            self.collaborators_route(),
            self.page_size,
            page
        );
        let response = self.ensure_success(self.client._get(route).await?).await?;
        let mut collaborators =
            Page::<octocrab::models::Collaborator>::from_response(response).await?;

        Ok(collaborators
            .take_items()
            .into_iter()
            .map(Collaborator::from)
            .collect())
    }

    async fn put_permission(&self, username: &str, level: &str) -> Result<()> {
        let route = format!("{}/{}", self.collaborators_route(), username);
        let body = serde_json::json!({ "permission": level });

        self.ensure_success(self.client._put(route, Some(&body)).await?)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CollaboratorDirectory for GitHubDirectory {
    async fn list_page(&self, page: u32) -> Result<Vec<Collaborator>> {
        tracing::debug!(repo = %self.repository, page, per_page = self.page_size, "listing collaborators");
        with_retries("listing collaborators", self.retries, move || {
            self.fetch_page(page)
        })
        .await
    }

    async fn set_permission(&self, username: &str, level: Permission) -> Result<()> {
        let level = level
            .as_api_str()
            .ok_or(Error::UnassignablePermission(level))?;

        tracing::debug!(repo = %self.repository, username, level, "updating collaborator");
        with_retries("updating collaborator", self.retries, move || {
            self.put_permission(username, level)
        })
        .await
    }
}
