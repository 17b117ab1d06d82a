//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::request::{
        CommentRecord, CreateCommentRequest, ReleaseInput, ReleaseLookup,
        ReleaseRecord,
    },
};

/// Release store operations consumed by the release workflow. Owner and
/// repository are fixed by the implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn dry_run(&self) -> bool;
    /// Look a release up by tag. A missing release is `Absent`, not an
    /// error; any other failure is an error.
    async fn get_release_by_tag(&self, tag: &str) -> Result<ReleaseLookup>;
    async fn create_release(
        &self,
        input: ReleaseInput,
    ) -> Result<ReleaseRecord>;
    async fn update_release(
        &self,
        release_id: u64,
        input: ReleaseInput,
    ) -> Result<ReleaseRecord>;
    async fn create_comment(
        &self,
        req: CreateCommentRequest,
    ) -> Result<CommentRecord>;
}
