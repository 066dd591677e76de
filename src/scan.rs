use crate::cli::CommonArgs;
use crate::error::{GitcalError, Result};
use crate::store::RepoStore;
use anyhow::Context;
use console::style;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_IGNORE_FILE: &str = ".gitcalignore";

const LOG_TARGET: &str = "scan";

/// Directory-name patterns (gitignore syntax) the scanner never enters.
pub struct IgnoreList {
    matcher: Gitignore,
}

impl IgnoreList {
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// Build from pattern lines. `#` comments and blank lines are skipped;
    /// a malformed glob is rejected with the file it came from.
    pub fn from_patterns<'a, I>(source: &Path, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let root = source.parent().unwrap_or_else(|| Path::new(""));
        let mut builder = GitignoreBuilder::new(root);
        for line in lines {
            builder
                .add_line(Some(source.to_path_buf()), line)
                .map_err(|e| GitcalError::IgnorePattern {
                    path: source.to_path_buf(),
                    message: e.to_string(),
                })?;
        }
        let matcher = builder.build().map_err(|e| GitcalError::IgnorePattern {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { matcher })
    }

    /// Load patterns from `path`; a missing file means nothing is ignored.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let list = Self::from_patterns(path, content.lines())?;
                log::debug!(target: LOG_TARGET, "Loaded {} ignore patterns from {}", list.len(), path.display());
                Ok(list)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::empty()),
            Err(e) => Err(GitcalError::path(path, e)),
        }
    }

    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Whether a directory called `name` should be skipped.
    pub fn is_ignored(&self, name: &Path) -> bool {
        self.matcher.matched(name, true).is_ignore()
    }
}

pub fn is_repository(dir: &Path) -> bool {
    dir.join(".git").is_dir()
}

/// Walks a directory tree collecting git working directories.
pub struct Scanner<'a> {
    ignore: &'a IgnoreList,
    progress: ProgressBar,
}

impl<'a> Scanner<'a> {
    pub fn new(ignore: &'a IgnoreList) -> Self {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { ignore, progress }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        if !enabled {
            self.progress = ProgressBar::hidden();
        }
        self
    }

    /// Absolute paths of every repository under `root`, in directory order.
    /// Repositories are not descended into and symlinks are not followed.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = fs::canonicalize(root).map_err(|e| GitcalError::path(root, e))?;
        // Fail early on an unreadable root; deeper errors only skip a branch.
        fs::read_dir(&root).map_err(|e| GitcalError::path(&root, e))?;

        let mut found = Vec::new();
        let mut walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e));

        while let Some(next) = walker.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Cannot read {e}");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            if is_repository(entry.path()) {
                log::info!(target: LOG_TARGET, "Found repository {}", entry.path().display());
                found.push(entry.path().to_path_buf());
                walker.skip_current_dir();
                continue;
            }

            self.progress
                .set_message(format!("Scanning {}", entry.path().display()));
            self.progress.tick();
        }

        self.progress
            .finish_with_message(format!("Found {} repositories", found.len()));
        Ok(found)
    }

    /// Ignored directories below the root are never entered.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let ignored = self.ignore.is_ignored(Path::new(entry.file_name()));
        if ignored {
            log::debug!(target: LOG_TARGET, "Ignoring {}", entry.path().display());
        }
        ignored
    }
}

pub fn exec(common: &CommonArgs, folder: &Path) -> anyhow::Result<()> {
    let ignore_path = common.ignore_file_path()?;
    let ignore = IgnoreList::load(&ignore_path).context("Failed to load ignore patterns")?;

    let found = Scanner::new(&ignore)
        .scan(folder)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;

    let store = RepoStore::new(common.dotfile_path()?);
    let added = store
        .add(&found)
        .with_context(|| format!("Failed to update {}", store.path().display()))?;

    println!("{}", style(format!("Repositories under {}", folder.display())).bold());
    for path in &found {
        println!("  {}", path.display());
    }
    println!(
        "{} new, list saved to {}",
        style(added).green().bold(),
        store.path().display()
    );
    Ok(())
}
