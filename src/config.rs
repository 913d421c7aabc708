use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// `owner/name` of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub repository: RepoSlug,
    pub page_size: u8,
    pub api_base: Option<String>,
    pub dry_run: bool,
    pub retries: u32,
}

impl Config {
    pub fn new(token: String, repository: RepoSlug) -> Self {
        Self {
            token,
            repository,
            page_size: DEFAULT_PAGE_SIZE,
            api_base: None,
            dry_run: false,
            retries: 0,
        }
    }

    /// Read the token through `lookup`, failing before anything touches the network.
    pub fn from_lookup(
        repository: RepoSlug,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(Error::MissingToken)?;
        Ok(Self::new(token, repository))
    }

    pub fn from_env(repository: RepoSlug) -> Result<Self> {
        Self::from_lookup(repository, |key| std::env::var(key).ok())
    }

    pub fn with_page_size(mut self, page_size: u8) -> Result<Self> {
        if page_size == 0 || page_size > DEFAULT_PAGE_SIZE {
            return Err(Error::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

// Keeps the token out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("page_size", &self.page_size)
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .field("retries", &self.retries)
            .finish()
    }
}
