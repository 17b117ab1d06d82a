//! Routes the triggering event to a release publish or a changelog preview.
use log::*;

use crate::{
    Result,
    changelog::{Changelog, ChangelogRenderer, RenderOptions},
    config::ReleaseConfig,
    error::GhReleaserError,
    event::{Event, EventKind},
    file_loader::FileLoader,
    forge::{manager::ForgeManager, request::ReleaseInput},
    output::Outputs,
    repo::HistoryReader,
};

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Path of the release file relative to the repository root.
    pub release_file: String,
    /// Release body used when the head release file has none.
    pub body_override: Option<String>,
    pub render_options: RenderOptions,
    pub max_commits: usize,
}

pub struct Dispatcher<'a> {
    config: DispatchConfig,
    files: &'a dyn FileLoader,
    history: &'a dyn HistoryReader,
    forge: &'a ForgeManager,
}

/// Pull request comment previewing the release.
pub fn comment_body(
    head_tag: &str,
    base_tag: &str,
    changelog: &str,
) -> String {
    format!(
        "A GitHub release with `{head_tag}` tag will be created once this \
         pull request got merged.\n\n\
         ## Changelog since {base_tag}\n\
         {changelog}"
    )
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        config: DispatchConfig,
        files: &'a dyn FileLoader,
        history: &'a dyn HistoryReader,
        forge: &'a ForgeManager,
    ) -> Self {
        Self {
            config,
            files,
            history,
            forge,
        }
    }

    pub async fn run(&self, event: &Event) -> Result<Outputs> {
        event.ensure_supported()?;

        info!("start handling for {} event", event.kind.name());

        let release_file = &self.config.release_file;

        let head_config =
            ReleaseConfig::load(self.files, &event.head_sha, release_file)?;
        info!(
            "loaded release config from {release_file} at the HEAD commit ({})",
            event.head_sha
        );

        let base_config =
            ReleaseConfig::load(self.files, &event.base_sha, release_file)?;
        info!(
            "loaded release config from {release_file} at the BASE commit ({})",
            event.base_sha
        );

        let renderer = ChangelogRenderer::new(self.config.render_options)?;

        let commits = self.history.commits(
            &base_config.tag,
            &event.head_sha,
            self.config.max_commits,
        )?;

        let changelog = renderer.changelog(commits);

        let change_json =
            changelog.render_change_json(&base_config.tag, &head_config.tag)?;
        info!("successfully generated change list\n{change_json}");

        let body = self.resolve_body(&head_config, &changelog);

        match event.kind {
            EventKind::Push => {
                self.publish(event, &head_config, body, change_json).await
            }
            _ => {
                self.preview(
                    event,
                    &head_config,
                    &base_config,
                    body,
                    change_json,
                )
                .await
            }
        }
    }

    /// Head release file body, then the override input, then the generated
    /// changelog.
    fn resolve_body(
        &self,
        head_config: &ReleaseConfig,
        changelog: &Changelog,
    ) -> String {
        if let Some(body) = head_config.release_body() {
            debug!("using release body from release file");
            return body.to_string();
        }

        if let Some(body) = self
            .config
            .body_override
            .as_deref()
            .filter(|b| !b.trim().is_empty())
        {
            debug!("using release body from body input");
            return body.to_string();
        }

        let generated = changelog.render_changelog();
        info!("successfully generated changelog\n{generated}");
        generated
    }

    async fn publish(
        &self,
        event: &Event,
        head_config: &ReleaseConfig,
        body: String,
        change_json: String,
    ) -> Result<Outputs> {
        let input = ReleaseInput::builder()
            .tag_name(head_config.tag.clone())
            .name(head_config.release_title())
            .target_commitish(event.head_sha.clone())
            .body(body.clone())
            .draft(false)
            .prerelease(head_config.prerelease)
            .build()?;

        let release = self.forge.upsert_release(input).await?;

        let mut outputs = Outputs::default();
        outputs.set("id", release.id);
        outputs.set("tag", &release.tag_name);
        outputs.set("html_url", &release.html_url);
        outputs.set("upload_url", &release.upload_url);
        outputs.set("changelog", body);
        outputs.set("change_json", change_json);

        info!(
            "successfully released {}. See {}",
            head_config.tag, release.html_url
        );

        Ok(outputs)
    }

    async fn preview(
        &self,
        event: &Event,
        head_config: &ReleaseConfig,
        base_config: &ReleaseConfig,
        body: String,
        change_json: String,
    ) -> Result<Outputs> {
        let pr_number = event.pr_number.ok_or_else(|| {
            GhReleaserError::invalid_event(
                "Missing pull request number in webhook event",
            )
        })?;

        let message = comment_body(&head_config.tag, &base_config.tag, &body);

        self.forge.post_comment(pr_number, &message).await?;

        let mut outputs = Outputs::default();
        outputs.set("changelog", body);
        outputs.set("change_json", change_json);

        info!(
            "successfully commented the changelog to pull request {pr_number}"
        );

        Ok(outputs)
    }
}

#[cfg(test)]
#[path = "./dispatch_tests.rs"]
mod tests;
