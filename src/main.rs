use anyhow::{Context, Result};
use clap::Parser;
use relscout::config::{Config, SystemEnv};
use std::path::PathBuf;

/// relscout - find the release a GitHub-hosted application should update to
///
/// Prints the selected release as JSON. If no access token is given on the
/// command line, the GITHUB_TOKEN environment variable is used when set.
///
/// Examples:
///   relscout https://github.com/owner/repo
///   relscout https://ghe.example.com/team/tool --prerelease
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Root URL of the repository, e.g. https://github.com/owner/repo
    #[arg(value_name = "REPO_URL")]
    repo_url: String,

    /// Consider prereleases as update candidates
    #[arg(long)]
    prerelease: bool,

    /// Access token (falls back to GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// API root to query instead of the one derived from the repository host
    #[arg(long = "api-url", value_name = "URL")]
    api_url: Option<String>,

    /// Application name handed to the update manager
    #[arg(long = "app-name", value_name = "NAME")]
    app_name: Option<String>,

    /// Install root directory handed to the update manager
    #[arg(long = "root", short = 'r', value_name = "PATH")]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = Config::load(
        &SystemEnv,
        Config {
            token: cli.token,
            api_url: cli.api_url,
            root_directory: cli.root,
            application_name: cli.app_name,
            prerelease: cli.prerelease,
        },
    );

    let manager = relscout::github_update_manager(&cli.repo_url, config.discovery_options())
        .await
        .with_context(|| format!("Failed to discover releases for {}", cli.repo_url))?;

    match manager {
        Some(manager) => {
            let json = serde_json::to_string_pretty(manager.release())
                .context("Failed to encode release")?;
            println!("{}", json);
        }
        None => eprintln!("No release found for {}", cli.repo_url),
    }

    Ok(())
}
