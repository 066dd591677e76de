use crate::error::{GitcalError, Result};
use crate::model::CommitSignature;
use chrono::{DateTime, FixedOffset};
use gix::{ObjectId, Repository};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "git";

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`. Unlike discovery, parent
    /// directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tip of the current branch, or `None` when HEAD is unborn.
    pub fn head_commit(&self) -> Result<Option<ObjectId>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(None);
        }
        let commit = head.peel_to_commit_in_place()?;
        Ok(Some(commit.id))
    }

    /// Author email and time of every commit reachable from the branch tip.
    pub fn signatures(&self) -> Result<Vec<CommitSignature>> {
        let Some(tip) = self.head_commit()? else {
            log::debug!(target: LOG_TARGET, "{} has no commits yet", self.path.display());
            return Ok(Vec::new());
        };

        // The rev walk visits each commit once and stops at shallow boundaries.
        let walk = self
            .repo
            .rev_walk([tip])
            .all()
            .map_err(|e| walk_error(&self.path, e))?;

        let mut signatures = Vec::new();
        for info in walk {
            let info = info.map_err(|e| walk_error(&self.path, e))?;
            let commit = info.object().map_err(|e| walk_error(&self.path, e))?;
            let author = commit.author()?;
            let time = author
                .time()
                .map_err(|e| GitcalError::GitRepo(format!("Bad author time in {}: {e}", info.id)))?;

            signatures.push(CommitSignature::new(
                author.email.to_string(),
                to_datetime(time.seconds, time.offset)?,
            ));
        }

        log::debug!(
            target: LOG_TARGET,
            "Read {} commits from {}",
            signatures.len(),
            self.path.display()
        );
        Ok(signatures)
    }
}

fn walk_error(path: &Path, err: impl std::fmt::Display) -> GitcalError {
    GitcalError::GitRepo(format!("Cannot walk history of {}: {err}", path.display()))
}

/// Seconds since the epoch plus the author's UTC offset (seconds east).
fn to_datetime(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let tz = FixedOffset::east_opt(offset)
        .ok_or_else(|| GitcalError::InvalidDate(format!("Invalid UTC offset: {offset}")))?;
    let utc = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| GitcalError::InvalidDate(format!("Invalid timestamp: {seconds}")))?;
    Ok(utc.with_timezone(&tz))
}
