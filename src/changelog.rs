//! Changelog rendering from extracted commit records.
//!
//! A single filter pass decides which commits are part of the release. Both
//! the text changelog and the ChangeJSON payload are rendered from that one
//! filtered sequence.
use log::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Result, error::GhReleaserError};

/// Subject prefix of commits created by merging a pull request.
pub const MERGE_COMMIT_PREFIX: &str = "Merge pull request #";

/// One git commit's projection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author: String,
    pub committer: String,
    #[serde(rename = "hash")]
    pub full_hash: String,
    #[serde(rename = "abbrevHash")]
    pub abbrev_hash: String,
    /// First line of the commit message.
    pub subject: String,
    /// Remaining message text, empty when the commit has no body.
    pub body: String,
}

impl CommitRecord {
    pub fn is_merge_commit(&self) -> bool {
        is_merge_commit_subject(&self.subject)
    }
}

pub fn is_merge_commit_subject(subject: &str) -> bool {
    subject.starts_with(MERGE_COMMIT_PREFIX)
}

/// Which commits make it into the changelog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    /// Only merge commits, each rendered as "<body line> #<pr>".
    MergeOnly,
    /// Everything except merge commits.
    ExcludeMerge,
}

impl FilterMode {
    /// Build the mode from the two merge-commit input flags.
    pub fn from_flags(
        only_use_merge_commit: bool,
        ignore_merge_commit: bool,
    ) -> Result<Self> {
        match (only_use_merge_commit, ignore_merge_commit) {
            (true, true) => Err(GhReleaserError::invalid_config(
                "changelog_only_use_merge_commit and \
                 changelog_ignore_merge_commit cannot both be enabled",
            )),
            (true, false) => Ok(Self::MergeOnly),
            (false, true) => Ok(Self::ExcludeMerge),
            (false, false) => Ok(Self::All),
        }
    }

    pub fn keep(&self, commit: &CommitRecord) -> bool {
        match self {
            Self::All => true,
            Self::MergeOnly => commit.is_merge_commit(),
            Self::ExcludeMerge => !commit.is_merge_commit(),
        }
    }
}

/// Options controlling how each changelog line is rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_abbrev_hash: bool,
    pub show_committer: bool,
    pub filter: FilterMode,
}

/// Structured change record emitted alongside the text changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeJson {
    pub from_tag: String,
    pub to_tag: String,
    pub commits: Vec<CommitRecord>,
}

impl ChangeJson {
    /// Serialize with 4-space indentation.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(std::str::from_utf8(&buf)?.to_string())
    }
}

/// Renders changelog text and ChangeJSON for a set of commits.
pub struct ChangelogRenderer {
    options: RenderOptions,
    pr_number_re: Regex,
}

impl ChangelogRenderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        let pr_number_re = Regex::new(r"^Merge pull request #(?<number>\d+)")?;
        Ok(Self {
            options,
            pr_number_re,
        })
    }

    /// Apply the filter once and hold the surviving commits.
    pub fn changelog(&self, commits: Vec<CommitRecord>) -> Changelog<'_> {
        let total = commits.len();

        let commits = commits
            .into_iter()
            .filter(|c| self.options.filter.keep(c))
            .collect::<Vec<CommitRecord>>();

        info!(
            "keeping {} of {total} commits for the changelog (filter: {:?})",
            commits.len(),
            self.options.filter
        );

        Changelog {
            renderer: self,
            commits,
        }
    }

    fn render_line(&self, commit: &CommitRecord) -> String {
        let mut fields = vec!["*".to_string()];

        if self.options.show_abbrev_hash {
            fields.push(commit.abbrev_hash.clone());
        }

        match self.options.filter {
            FilterMode::MergeOnly => {
                let message = commit.body.lines().next().unwrap_or("");
                let number = self.pr_number(&commit.subject);
                fields.push(format!("{message} #{number}"));
            }
            _ => fields.push(commit.subject.clone()),
        }

        if self.options.show_committer {
            fields.push(format!("- by {}", commit.committer));
        }

        fields.join(" ")
    }

    /// Pull-request number of a merge commit subject. Falls back to the first
    /// token after the prefix when no digits follow it.
    fn pr_number<'s>(&self, subject: &'s str) -> &'s str {
        if let Some(captures) = self.pr_number_re.captures(subject)
            && let Some(number) = captures.name("number")
        {
            return number.as_str();
        }

        subject
            .strip_prefix(MERGE_COMMIT_PREFIX)
            .unwrap_or(subject)
            .split_whitespace()
            .next()
            .unwrap_or("")
    }
}

/// Filtered commits ready to be rendered.
pub struct Changelog<'r> {
    renderer: &'r ChangelogRenderer,
    commits: Vec<CommitRecord>,
}

impl Changelog<'_> {
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// One line per commit, most recent first, no trailing newline.
    pub fn render_changelog(&self) -> String {
        self.commits
            .iter()
            .map(|c| {
                let line = self.renderer.render_line(c);
                debug!("changelog line: {line}");
                line
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn change_json(&self, from_tag: &str, to_tag: &str) -> ChangeJson {
        ChangeJson {
            from_tag: from_tag.to_string(),
            to_tag: to_tag.to_string(),
            commits: self.commits.clone(),
        }
    }

    /// Pretty-printed ChangeJSON over the same filtered commits.
    pub fn render_change_json(
        &self,
        from_tag: &str,
        to_tag: &str,
    ) -> Result<String> {
        self.change_json(from_tag, to_tag).to_pretty_string()
    }
}

#[cfg(test)]
#[path = "./changelog_tests.rs"]
mod tests;
