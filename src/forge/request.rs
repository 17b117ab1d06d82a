use derive_builder::Builder;

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
/// Payload used to create or update a release.
pub struct ReleaseInput {
    pub tag_name: String,
    pub name: String,
    pub target_commitish: String,
    pub body: String,
    #[builder(default)]
    pub draft: bool,
    #[builder(default)]
    pub prerelease: bool,
}

impl ReleaseInput {
    pub fn builder() -> ReleaseInputBuilder {
        ReleaseInputBuilder::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Release as returned by the forge after lookup, creation or update.
pub struct ReleaseRecord {
    pub id: u64,
    pub tag_name: String,
    /// Handle for attaching release assets.
    pub upload_url: String,
    pub html_url: String,
    pub body: Option<String>,
    pub target_commitish: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of looking a release up by its tag.
pub enum ReleaseLookup {
    Found(ReleaseRecord),
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Comment left on an issue or pull request.
pub struct CommentRecord {
    pub id: u64,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to comment on an issue or pull request.
pub struct CreateCommentRequest {
    pub issue_number: u64,
    pub body: String,
}
