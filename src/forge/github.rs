//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, models::repos::Release};
use reqwest::StatusCode;

use crate::{
    Result,
    error::GhReleaserError,
    forge::{
        config::RemoteConfig,
        request::{
            CommentRecord, CreateCommentRequest, ReleaseInput, ReleaseLookup,
            ReleaseRecord,
        },
        traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for release and issue comment
/// API interactions.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?
            .build()?;

        Ok(Self { config, instance })
    }
}

/// HTTP status of an error response from the API, if the request got one.
fn response_status(err: &octocrab::Error) -> Option<StatusCode> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code),
        _ => None,
    }
}

/// Only a 404 means the tag has no release; any other failure aborts.
fn classify_lookup(
    tag: &str,
    result: std::result::Result<Release, (Option<StatusCode>, String)>,
) -> Result<ReleaseLookup> {
    match result {
        Ok(release) => Ok(ReleaseLookup::Found(release.into())),
        Err((Some(status), _)) if status == StatusCode::NOT_FOUND => {
            debug!("no release found for tag: {tag}");
            Ok(ReleaseLookup::Absent)
        }
        Err((_, reason)) => Err(GhReleaserError::lookup(tag, reason)),
    }
}

impl From<Release> for ReleaseRecord {
    fn from(release: Release) -> Self {
        Self {
            id: release.id.into_inner(),
            tag_name: release.tag_name,
            upload_url: release.upload_url,
            html_url: release.html_url.to_string(),
            body: release.body,
            target_commitish: release.target_commitish,
        }
    }
}

#[async_trait]
impl Forge for Github {
    fn dry_run(&self) -> bool {
        self.config.dry_run
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<ReleaseLookup> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_by_tag(tag)
            .await
            .map_err(|err| (response_status(&err), err.to_string()));

        classify_lookup(tag, result)
    }

    async fn create_release(
        &self,
        input: ReleaseInput,
    ) -> Result<ReleaseRecord> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&input.tag_name)
            .name(&input.name)
            .body(&input.body)
            .target_commitish(&input.target_commitish)
            .draft(input.draft)
            .prerelease(input.prerelease)
            .send()
            .await
            .map_err(|err| GhReleaserError::create(&input.tag_name, err))?;

        Ok(release.into())
    }

    async fn update_release(
        &self,
        release_id: u64,
        input: ReleaseInput,
    ) -> Result<ReleaseRecord> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .update(release_id)
            .tag_name(&input.tag_name)
            .name(&input.name)
            .body(&input.body)
            .target_commitish(&input.target_commitish)
            .draft(input.draft)
            .prerelease(input.prerelease)
            .send()
            .await
            .map_err(|err| GhReleaserError::update(&input.tag_name, err))?;

        Ok(release.into())
    }

    async fn create_comment(
        &self,
        req: CreateCommentRequest,
    ) -> Result<CommentRecord> {
        let comment = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(req.issue_number, &req.body)
            .await
            .map_err(|err| GhReleaserError::comment(req.issue_number, err))?;

        Ok(CommentRecord {
            id: comment.id.into_inner(),
            html_url: comment.html_url.to_string(),
        })
    }
}
