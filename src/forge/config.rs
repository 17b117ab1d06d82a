//! Configuration for the GitHub API connection.
use secrecy::SecretString;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Remote repository connection configuration for authenticating and
/// interacting with the release API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL (e.g., "https://api.github.com").
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Log mutations instead of performing them.
    pub dry_run: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}

impl RemoteConfig {
    /// "owner/repo"
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_remote_config() {
        let remote = RemoteConfig::default();
        assert_eq!(remote.api_url, DEFAULT_API_URL);
        assert!(!remote.dry_run);
    }

    #[test]
    fn test_path() {
        let remote = RemoteConfig {
            owner: "octo".into(),
            repo: "widgets".into(),
            ..Default::default()
        };
        assert_eq!(remote.path(), "octo/widgets");
    }
}
