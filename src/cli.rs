//! CLI argument parsing and run configuration.
//!
//! Every flag can also be supplied through the environment variable GitHub
//! Actions sets for the matching action input (`INPUT_<NAME>`).
use clap::Parser;
use secrecy::SecretString;
use std::{convert::Infallible, env, path::PathBuf};

use crate::{
    Result,
    changelog::{FilterMode, RenderOptions},
    config::DEFAULT_RELEASE_FILE,
    dispatch::DispatchConfig,
    error::GhReleaserError,
    event::Event,
    forge::config::{DEFAULT_API_URL, RemoteConfig},
    repo::DEFAULT_MAX_COMMITS,
};

/// Action inputs arrive as free-form strings: only a case-insensitive "true"
/// turns a flag on, anything else (including an empty input) leaves it off.
fn input_flag(value: &str) -> std::result::Result<bool, Infallible> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

fn max_commits(value: &str) -> std::result::Result<usize, Infallible> {
    match value.trim().parse::<i64>() {
        Ok(count) if count > 0 => Ok(count as usize),
        _ => Ok(DEFAULT_MAX_COMMITS),
    }
}

/// Publishes a GitHub release from a release file on push and previews the
/// changelog on pull requests.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        long,
        env = "INPUT_RELEASE_FILE",
        default_value = DEFAULT_RELEASE_FILE
    )]
    /// Path of the release file relative to the repository root.
    pub release_file: String,

    #[arg(
        long,
        env = "INPUT_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    /// GitHub token. Falls back to GITHUB_TOKEN env var.
    pub token: String,

    #[arg(long, env = "INPUT_BODY", default_value = "")]
    /// Release body used when the release file does not set one.
    pub body: String,

    #[arg(
        long,
        env = "INPUT_CHANGELOG_SHOW_ABBREV_HASH",
        value_parser = input_flag
    )]
    /// Prefix each changelog line with the abbreviated commit hash.
    pub changelog_show_abbrev_hash: bool,

    #[arg(
        long,
        env = "INPUT_CHANGELOG_SHOW_COMMITTER",
        value_parser = input_flag
    )]
    /// Append the committer name to each changelog line.
    pub changelog_show_committer: bool,

    #[arg(
        long,
        env = "INPUT_CHANGELOG_ONLY_USE_MERGE_COMMIT",
        value_parser = input_flag
    )]
    /// Only list pull request merge commits.
    pub changelog_only_use_merge_commit: bool,

    #[arg(
        long,
        env = "INPUT_CHANGELOG_IGNORE_MERGE_COMMIT",
        value_parser = input_flag
    )]
    /// Leave pull request merge commits out of the changelog.
    pub changelog_ignore_merge_commit: bool,

    #[arg(
        long,
        env = "INPUT_CHANGELOG_MAX_COMMITS_NUMBER",
        default_value_t = DEFAULT_MAX_COMMITS,
        value_parser = max_commits
    )]
    /// Maximum number of commits to include in the changelog. Empty or
    /// non-positive values fall back to the default.
    pub changelog_max_commits_number: usize,

    #[arg(long, env = "GITHUB_WORKSPACE")]
    /// Path of the checked out repository.
    pub workspace: PathBuf,

    #[arg(long, env = "GITHUB_REPOSITORY")]
    /// "owner/repo", used when the event payload does not name the repository.
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    /// GitHub REST API base URL.
    pub api_url: String,

    #[arg(long, env = "INPUT_DRY_RUN", value_parser = input_flag)]
    /// Log release and comment mutations instead of performing them.
    pub dry_run: bool,

    #[arg(long, env = "INPUT_DEBUG", value_parser = input_flag)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            show_abbrev_hash: self.changelog_show_abbrev_hash,
            show_committer: self.changelog_show_committer,
            filter: FilterMode::from_flags(
                self.changelog_only_use_merge_commit,
                self.changelog_ignore_merge_commit,
            )?,
        })
    }

    pub fn dispatch_config(&self) -> Result<DispatchConfig> {
        let body_override = if self.body.trim().is_empty() {
            None
        } else {
            Some(self.body.clone())
        };

        Ok(DispatchConfig {
            release_file: self.release_file.clone(),
            body_override,
            render_options: self.render_options()?,
            max_commits: self.changelog_max_commits_number,
        })
    }

    /// Configure the API connection for the repository named by the event,
    /// or by `--repository` when the payload has none.
    pub fn remote_config(&self, event: &Event) -> Result<RemoteConfig> {
        let (owner, repo) = match (&event.owner, &event.repo) {
            (Some(owner), Some(repo)) => (owner.clone(), repo.clone()),
            _ => self.repository_from_args()?,
        };

        Ok(RemoteConfig {
            api_url: self.api_url.clone(),
            owner,
            repo,
            token: self.resolve_token()?,
            dry_run: self.dry_run,
        })
    }

    fn repository_from_args(&self) -> Result<(String, String)> {
        let repository = self.repository.as_deref().ok_or_else(|| {
            GhReleaserError::invalid_config(
                "unable to determine repository: set GITHUB_REPOSITORY",
            )
        })?;

        match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok((owner.to_string(), repo.to_string()))
            }
            _ => Err(GhReleaserError::invalid_config(format!(
                "repository must be in owner/repo form: {repository}"
            ))),
        }
    }

    fn resolve_token(&self) -> Result<SecretString> {
        let mut token = self.token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(GhReleaserError::invalid_config(
                "token argument must be set",
            ));
        }

        Ok(SecretString::from(token))
    }
}
