use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use collaborator_normalizer::config::DEFAULT_PAGE_SIZE;
use collaborator_normalizer::report::Report;
use collaborator_normalizer::{Config, GitHubDirectory, Normalizer, RepoSlug};

/// Downgrade every collaborator with write access on a repository to read access.
#[derive(Parser, Debug)]
#[command(name = "normalize-collaborators", version)]
struct Args {
    /// Target repository as `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: RepoSlug,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u8,

    /// API root, for GitHub Enterprise.
    #[arg(long)]
    api_base: Option<String>,

    /// List who would be downgraded without changing anything.
    #[arg(long)]
    dry_run: bool,

    /// Extra attempts for requests that fail to reach the API.
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Write a TOML summary of the run here.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env(args.repo.clone())?
        .with_page_size(args.page_size)?
        .with_api_base(args.api_base)
        .with_dry_run(args.dry_run)
        .with_retries(args.retries);
    tracing::debug!(?config, "starting");

    let directory = GitHubDirectory::new(&config).context("cannot build GitHub client")?;
    let started_at = chrono::Utc::now();
    let summary = Normalizer::new(directory, &config)
        .normalize()
        .await
        .with_context(|| format!("normalizing collaborators of {}", config.repository))?;

    println!("Found {} collaborator(s)", summary.total);
    if !summary.anomalies.is_empty() {
        tracing::warn!(count = summary.anomalies.len(), "collaborators without any permission flag");
    }

    if let Some(path) = args.report {
        Report::new(&config.repository, started_at, chrono::Utc::now(), summary)
            .write(&path)
            .with_context(|| format!("cannot write report to {}", path.display()))?;
    }

    Ok(())
}
