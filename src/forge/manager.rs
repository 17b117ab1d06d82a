//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        request::{
            CommentRecord, CreateCommentRequest, ReleaseInput, ReleaseLookup,
            ReleaseRecord,
        },
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        Self { forge }
    }

    pub fn dry_run(&self) -> bool {
        self.forge.dry_run()
    }

    /// Create the release for `input.tag_name`, or update it when it already
    /// exists. Only a missing release leads to creation; any other lookup
    /// failure aborts before anything is written.
    pub async fn upsert_release(
        &self,
        input: ReleaseInput,
    ) -> Result<ReleaseRecord> {
        let tag = input.tag_name.clone();

        let lookup = self.forge.get_release_by_tag(&tag).await.inspect_err(
            |err| error!("failed to look up release for tag {tag}: {err}"),
        )?;

        match lookup {
            ReleaseLookup::Found(existing) => {
                info!(
                    "updating existing release {} for tag {tag}",
                    existing.id
                );

                if self.dry_run() {
                    warn!("dry_run: would update release: input: {:#?}", input);
                    return Ok(dry_run_record(&input, existing.id));
                }

                let release = self
                    .forge
                    .update_release(existing.id, input)
                    .await
                    .inspect_err(|err| {
                        error!("failed to update release for tag {tag}: {err}")
                    })?;

                info!("updated release for tag {tag}: {}", release.html_url);

                Ok(release)
            }
            ReleaseLookup::Absent => {
                info!("creating new release for tag {tag}");

                if self.dry_run() {
                    warn!("dry_run: would create release: input: {:#?}", input);
                    return Ok(dry_run_record(&input, 0));
                }

                let release =
                    self.forge.create_release(input).await.inspect_err(
                        |err| {
                            error!(
                                "failed to create release for tag {tag}: {err}"
                            )
                        },
                    )?;

                info!("created release for tag {tag}: {}", release.html_url);

                Ok(release)
            }
        }
    }

    pub async fn post_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<CommentRecord> {
        let req = CreateCommentRequest {
            issue_number,
            body: body.to_string(),
        };

        if self.dry_run() {
            warn!("dry_run: would create comment: req: {:#?}", req);
            return Ok(CommentRecord {
                id: 0,
                html_url: "".into(),
            });
        }

        let comment = self.forge.create_comment(req).await?;

        info!(
            "commented on pull request #{issue_number}: {}",
            comment.html_url
        );

        Ok(comment)
    }
}

fn dry_run_record(input: &ReleaseInput, id: u64) -> ReleaseRecord {
    ReleaseRecord {
        id,
        tag_name: input.tag_name.clone(),
        upload_url: "".into(),
        html_url: "".into(),
        body: Some(input.body.clone()),
        target_commitish: input.target_commitish.clone(),
    }
}
