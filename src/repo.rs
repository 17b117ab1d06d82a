//! Git repository operations.
//!
//! Read-only access to the checked out repository: loading files as they
//! existed at a revision and extracting the commit log between two
//! references.
use git2::{ErrorCode, Oid, Sort};
use log::*;
use std::path::Path;

use crate::{
    Result, changelog::CommitRecord, error::GhReleaserError,
    file_loader::FileLoader,
};

/// Default cap on the number of commits returned by a history walk.
pub const DEFAULT_MAX_COMMITS: usize = 100;

/// Reads commit history between two revisions.
pub trait HistoryReader {
    /// Commits in the symmetric range `to_ref...from_ref`, most recent first,
    /// capped at `max_count` records.
    fn commits(
        &self,
        from_ref: &str,
        to_ref: &str,
        max_count: usize,
    ) -> Result<Vec<CommitRecord>>;
}

/// Local git repository backed by libgit2.
pub struct Repository {
    repo: git2::Repository,
}

fn history_error(err: git2::Error) -> GhReleaserError {
    GhReleaserError::CommandExecution(err.message().to_string())
}

impl Repository {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::open(path)?;
        info!("opened repository at {}", path.display());
        Ok(Self { repo })
    }

    fn resolve_commit(&self, revision: &str) -> Result<git2::Commit<'_>> {
        self.repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|source| GhReleaserError::RevisionResolution {
                revision: revision.to_string(),
                source,
            })
    }

    fn to_record(&self, commit: &git2::Commit) -> Result<CommitRecord> {
        let short_id = commit.as_object().short_id().map_err(history_error)?;

        Ok(CommitRecord {
            author: commit.author().name().unwrap_or("").to_string(),
            committer: commit.committer().name().unwrap_or("").to_string(),
            full_hash: commit.id().to_string(),
            abbrev_hash: short_id.as_str().unwrap_or("").to_string(),
            subject: commit.summary().unwrap_or("").to_string(),
            body: commit.body().unwrap_or("").trim().to_string(),
        })
    }

    fn hide_merge_bases(
        &self,
        revwalk: &mut git2::Revwalk,
        one: Oid,
        two: Oid,
    ) -> Result<()> {
        match self.repo.merge_bases(one, two) {
            Ok(bases) => {
                for base in bases.iter() {
                    revwalk.hide(*base).map_err(history_error)?;
                }
                Ok(())
            }
            // unrelated histories: the whole of both sides is in range
            Err(err) if err.code() == ErrorCode::NotFound => Ok(()),
            Err(err) => Err(history_error(err)),
        }
    }
}

impl FileLoader for Repository {
    fn load_file(&self, revision: &str, path: &str) -> Result<String> {
        let commit = self.resolve_commit(revision)?;
        let tree = commit.tree()?;
        let entry = tree.get_path(Path::new(path))?;
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        let content = std::str::from_utf8(blob.content())?;

        debug!("read {path} at {revision} ({} bytes)", content.len());

        Ok(content.trim().to_string())
    }
}

impl HistoryReader for Repository {
    fn commits(
        &self,
        from_ref: &str,
        to_ref: &str,
        max_count: usize,
    ) -> Result<Vec<CommitRecord>> {
        let to = self.resolve_commit(to_ref)?.id();
        let from = self.resolve_commit(from_ref)?.id();

        info!("listing commits in range {to_ref}...{from_ref}");

        let mut revwalk = self.repo.revwalk().map_err(history_error)?;
        revwalk.set_sorting(Sort::TIME).map_err(history_error)?;
        revwalk.push(to).map_err(history_error)?;
        revwalk.push(from).map_err(history_error)?;
        self.hide_merge_bases(&mut revwalk, to, from)?;

        let mut records = vec![];

        for oid in revwalk.take(max_count) {
            let oid = oid.map_err(history_error)?;
            let commit = self.repo.find_commit(oid).map_err(history_error)?;
            let record = self.to_record(&commit)?;
            debug!("found commit {}: {}", record.abbrev_hash, record.subject);
            records.push(record);
        }

        info!("found {} commits", records.len());

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs};

    use git2::{Signature, Time};
    use tempfile::TempDir;

    use super::*;

    struct TestRepo {
        tmp: TempDir,
        repo: git2::Repository,
        clock: Cell<i64>,
    }

    impl TestRepo {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let repo = git2::Repository::init(tmp.path()).unwrap();
            Self {
                tmp,
                repo,
                clock: Cell::new(1_700_000_000),
            }
        }

        fn commit(
            &self,
            file: &str,
            content: &str,
            message: &str,
            committer: &str,
            parents: &[Oid],
            update_head: bool,
        ) -> Oid {
            fs::write(self.tmp.path().join(file), content).unwrap();

            let mut index = self.repo.index().unwrap();
            index.add_path(Path::new(file)).unwrap();
            index.write().unwrap();
            let tree_id = index.write_tree().unwrap();
            let tree = self.repo.find_tree(tree_id).unwrap();

            // strictly increasing commit times keep the walk order stable
            let now = self.clock.get() + 60;
            self.clock.set(now);
            let author = Signature::new(
                "author",
                "author@example.com",
                &Time::new(now, 0),
            )
            .unwrap();
            let committer = Signature::new(
                committer,
                "committer@example.com",
                &Time::new(now, 0),
            )
            .unwrap();

            let parents = parents
                .iter()
                .map(|id| self.repo.find_commit(*id).unwrap())
                .collect::<Vec<git2::Commit>>();
            let parent_refs = parents.iter().collect::<Vec<&git2::Commit>>();

            self.repo
                .commit(
                    update_head.then_some("HEAD"),
                    &author,
                    &committer,
                    message,
                    &tree,
                    &parent_refs,
                )
                .unwrap()
        }

        fn tag(&self, name: &str, id: Oid) {
            let object = self.repo.find_object(id, None).unwrap();
            self.repo.tag_lightweight(name, &object, false).unwrap();
        }

        fn open(&self) -> Repository {
            Repository::open(self.tmp.path()).unwrap()
        }
    }

    /// v0.1.0 -> fix on main, feature on a side branch, merged back.
    fn history() -> (TestRepo, Vec<Oid>) {
        let test_repo = TestRepo::new();

        let init = test_repo.commit(
            "RELEASE",
            "tag: v0.1.0\n",
            "Initial commit",
            "alice",
            &[],
            true,
        );
        test_repo.tag("v0.1.0", init);

        let feature = test_repo.commit(
            "feature.txt",
            "feature",
            "Add feature\n\nWith a longer explanation.\n",
            "bob",
            &[init],
            false,
        );

        let fix = test_repo.commit(
            "RELEASE",
            "tag: v0.2.0\n",
            "Fix typo",
            "carol",
            &[init],
            true,
        );

        let merge = test_repo.commit(
            "merge.txt",
            "merge",
            "Merge pull request #7 from octo/feature\n\nAdd feature",
            "github",
            &[fix, feature],
            true,
        );

        (test_repo, vec![init, feature, fix, merge])
    }

    #[test]
    fn lists_commits_most_recent_first() {
        let (test_repo, ids) = history();
        let repo = test_repo.open();

        let commits = repo
            .commits("v0.1.0", &ids[3].to_string(), DEFAULT_MAX_COMMITS)
            .unwrap();

        let subjects = commits
            .iter()
            .map(|c| c.subject.as_str())
            .collect::<Vec<&str>>();

        assert_eq!(
            subjects,
            vec![
                "Merge pull request #7 from octo/feature",
                "Fix typo",
                "Add feature"
            ]
        );
    }

    #[test]
    fn populates_every_record_field() {
        let (test_repo, ids) = history();
        let repo = test_repo.open();

        let commits =
            repo.commits("v0.1.0", "HEAD", DEFAULT_MAX_COMMITS).unwrap();

        let merge = &commits[0];
        assert_eq!(merge.full_hash, ids[3].to_string());
        assert!(merge.full_hash.starts_with(&merge.abbrev_hash));
        assert!(merge.abbrev_hash.len() >= 7);
        assert_eq!(merge.author, "author");
        assert_eq!(merge.committer, "github");
        assert_eq!(merge.body, "Add feature");

        let fix = &commits[1];
        assert_eq!(fix.committer, "carol");
        assert_eq!(fix.body, "");

        let feature = &commits[2];
        assert_eq!(feature.subject, "Add feature");
        assert_eq!(feature.body, "With a longer explanation.");
    }

    #[test]
    fn caps_number_of_commits() {
        let (test_repo, _) = history();
        let repo = test_repo.open();

        let commits = repo.commits("v0.1.0", "HEAD", 2).unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].subject, "Fix typo");
    }

    #[test]
    fn same_revision_yields_no_commits() {
        let (test_repo, _) = history();
        let repo = test_repo.open();

        let commits = repo.commits("v0.1.0", "v0.1.0", 10).unwrap();

        assert!(commits.is_empty());
    }

    #[test]
    fn unknown_revision_is_a_resolution_error() {
        let (test_repo, _) = history();
        let repo = test_repo.open();

        let result = repo.commits("v9.9.9", "HEAD", 10);

        assert!(matches!(
            result,
            Err(GhReleaserError::RevisionResolution { ref revision, .. })
                if revision == "v9.9.9"
        ));
    }

    #[test]
    fn loads_file_at_revision() {
        let (test_repo, ids) = history();
        let repo = test_repo.open();

        let base = repo.load_file(&ids[0].to_string(), "RELEASE").unwrap();
        let head = repo.load_file("HEAD", "RELEASE").unwrap();

        assert_eq!(base, "tag: v0.1.0");
        assert_eq!(head, "tag: v0.2.0");
    }

    #[test]
    fn missing_file_is_an_error() {
        let (test_repo, _) = history();
        let repo = test_repo.open();

        assert!(repo.load_file("v0.1.0", "feature.txt").is_err());
        assert!(repo.load_file("nope", "RELEASE").is_err());
    }
}
