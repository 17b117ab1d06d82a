//! Release config loading and parsing.
//!
//! The release file is a small YAML document checked into the repository.
//! It is read twice per run, once at the base commit and once at the head
//! commit, and the two instances are never merged.
use log::*;
use serde::{Deserialize, Serialize};

use crate::{Result, error::GhReleaserError, file_loader::FileLoader};

/// Default release config filename.
pub const DEFAULT_RELEASE_FILE: &str = "RELEASE";

/// Declarative release intent read from the release file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct ReleaseConfig {
    /// Release tag, e.g. "v1.2.0". Required.
    pub tag: String,
    /// Release title. Defaults to "Release <tag>" when empty.
    pub title: Option<String>,
    /// Target reference for the release.
    pub commitish: Option<String>,
    /// Release body. Overrides the generated changelog when non-empty.
    pub body: Option<String>,
    /// Marks the release as a prerelease (default: false)
    pub prerelease: bool,
}

impl ReleaseConfig {
    /// Parse and validate release config content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: ReleaseConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load release config from `path` as it existed at `revision`.
    pub fn load(
        loader: &dyn FileLoader,
        revision: &str,
        path: &str,
    ) -> Result<Self> {
        let content = loader
            .load_file(revision, path)
            .map_err(|err| GhReleaserError::config_read(revision, path, err))?;

        let config = Self::parse(&content)
            .map_err(|err| GhReleaserError::config_read(revision, path, err))?;

        debug!("loaded release config at {revision}: {config:?}");

        Ok(config)
    }

    /// Title to publish: the configured title or "Release <tag>".
    pub fn release_title(&self) -> String {
        match non_empty(self.title.as_deref()) {
            Some(title) => title.to_string(),
            None => format!("Release {}", self.tag),
        }
    }

    /// Configured body when it is present and non-empty.
    pub fn release_body(&self) -> Option<&str> {
        non_empty(self.body.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            return Err(GhReleaserError::invalid_config(
                "tag must be specified",
            ));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
