//! Parsing of the CI event that triggered the run.
use log::*;
use serde::Deserialize;
use std::{env, fs};

use crate::{Result, error::GhReleaserError};

pub const EVENT_PUSH: &str = "push";
pub const EVENT_PULL_REQUEST: &str = "pull_request";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    /// Any event this tool does not handle.
    Other(String),
}

impl EventKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Push => EVENT_PUSH,
            Self::PullRequest => EVENT_PULL_REQUEST,
            Self::Other(name) => name,
        }
    }
}

/// Triggering event reduced to what the release workflow needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub head_sha: String,
    pub base_sha: String,
    /// Pull request number, set for pull_request events.
    pub pr_number: Option<u64>,
    pub owner: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    before: String,
    after: String,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct CommitRefPayload {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestData {
    number: Option<u64>,
    head: CommitRefPayload,
    base: CommitRefPayload,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: Option<u64>,
    pull_request: Option<PullRequestData>,
    repository: Option<RepositoryPayload>,
}

fn owner_and_repo(
    repository: Option<RepositoryPayload>,
) -> (Option<String>, Option<String>) {
    match repository {
        Some(r) => (Some(r.owner.login), Some(r.name)),
        None => (None, None),
    }
}

impl Event {
    /// Read the event from `GITHUB_EVENT_NAME` and the payload file named
    /// by `GITHUB_EVENT_PATH`.
    pub fn from_env() -> Result<Self> {
        let name = env::var("GITHUB_EVENT_NAME").map_err(|_| {
            GhReleaserError::invalid_event("GITHUB_EVENT_NAME was not defined")
        })?;

        if name != EVENT_PUSH && name != EVENT_PULL_REQUEST {
            return Ok(Self::other(name));
        }

        let path = env::var("GITHUB_EVENT_PATH").map_err(|_| {
            GhReleaserError::invalid_event("GITHUB_EVENT_PATH was not defined")
        })?;

        let payload = fs::read_to_string(&path).map_err(|err| {
            GhReleaserError::invalid_event(format!(
                "failed to read event payload {path}: {err}"
            ))
        })?;

        Self::from_payload(&name, &payload)
    }

    /// Build an event from its name and JSON payload.
    pub fn from_payload(name: &str, payload: &str) -> Result<Self> {
        let event = match name {
            EVENT_PUSH => {
                let push: PushPayload =
                    serde_json::from_str(payload).map_err(|err| {
                        GhReleaserError::invalid_event(format!(
                            "failed to parse push payload: {err}"
                        ))
                    })?;

                let (owner, repo) = owner_and_repo(push.repository);

                Self {
                    kind: EventKind::Push,
                    head_sha: push.after,
                    base_sha: push.before,
                    pr_number: None,
                    owner,
                    repo,
                }
            }
            EVENT_PULL_REQUEST => {
                let pr: PullRequestPayload = serde_json::from_str(payload)
                    .map_err(|err| {
                        GhReleaserError::invalid_event(format!(
                            "failed to parse pull_request payload: {err}"
                        ))
                    })?;

                let data = pr.pull_request.ok_or_else(|| {
                    GhReleaserError::invalid_event(
                        "Missing pull request data in webhook event",
                    )
                })?;

                let (owner, repo) = owner_and_repo(pr.repository);

                Self {
                    kind: EventKind::PullRequest,
                    head_sha: data.head.sha,
                    base_sha: data.base.sha,
                    pr_number: pr.number.or(data.number),
                    owner,
                    repo,
                }
            }
            other => Self::other(other.to_string()),
        };

        debug!("parsed event: {event:?}");

        Ok(event)
    }

    /// Fails for any event other than push and pull_request.
    pub fn ensure_supported(&self) -> Result<()> {
        match &self.kind {
            EventKind::Other(name) => {
                Err(GhReleaserError::UnsupportedEvent(name.clone()))
            }
            _ => Ok(()),
        }
    }

    fn other(name: String) -> Self {
        Self {
            kind: EventKind::Other(name),
            head_sha: "".into(),
            base_sha: "".into(),
            pr_number: None,
            owner: None,
            repo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_push_event() {
        let payload = r#"{
            "before": "1111111111111111111111111111111111111111",
            "after": "2222222222222222222222222222222222222222",
            "repository": { "name": "widgets", "owner": { "login": "octo" } }
        }"#;

        let event = Event::from_payload("push", payload).unwrap();

        assert_eq!(event.kind, EventKind::Push);
        assert_eq!(event.base_sha, "1111111111111111111111111111111111111111");
        assert_eq!(event.head_sha, "2222222222222222222222222222222222222222");
        assert_eq!(event.pr_number, None);
        assert_eq!(event.owner.as_deref(), Some("octo"));
        assert_eq!(event.repo.as_deref(), Some("widgets"));
    }

    #[test]
    fn parses_pull_request_event() {
        let payload = r#"{
            "number": 17,
            "pull_request": {
                "number": 17,
                "head": { "sha": "headsha" },
                "base": { "sha": "basesha" }
            }
        }"#;

        let event = Event::from_payload("pull_request", payload).unwrap();

        assert_eq!(event.kind, EventKind::PullRequest);
        assert_eq!(event.head_sha, "headsha");
        assert_eq!(event.base_sha, "basesha");
        assert_eq!(event.pr_number, Some(17));
        assert!(event.owner.is_none());
    }

    #[test]
    fn pull_request_without_data_is_invalid() {
        let result = Event::from_payload("pull_request", r#"{"number": 3}"#);
        assert!(matches!(result, Err(GhReleaserError::InvalidEvent(_))));
    }

    #[test]
    fn malformed_payload_is_invalid() {
        let result = Event::from_payload("push", "{not json");
        assert!(matches!(result, Err(GhReleaserError::InvalidEvent(_))));
    }

    #[test]
    fn other_events_need_no_payload() {
        let event = Event::from_payload("release", "").unwrap();
        assert_eq!(event.kind, EventKind::Other("release".into()));
        assert_eq!(event.kind.name(), "release");
        assert!(matches!(
            event.ensure_supported(),
            Err(GhReleaserError::UnsupportedEvent(_))
        ));
    }
}
