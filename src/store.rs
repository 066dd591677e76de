use crate::error::{GitcalError, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOTFILE: &str = ".gogitlocalstatus";

const LOG_TARGET: &str = "store";

/// Flat list of known repositories, one path per line.
pub struct RepoStore {
    path: PathBuf,
}

impl RepoStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored paths in file order. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<PathBuf>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "{} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(GitcalError::path(&self.path, e)),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Append `found` to the stored list, drop duplicates and write it back.
    /// Returns how many paths were new.
    ///
    /// The file is UTF-8 text, so paths that are not valid UTF-8 are skipped
    /// with a warning instead of being written back mangled.
    pub fn add(&self, found: &[PathBuf]) -> Result<usize> {
        let existing = merge_paths(self.load()?, &[]);
        let before = existing.len();
        let storable: Vec<PathBuf> = found
            .iter()
            .filter(|path| {
                let ok = path.to_str().is_some();
                if !ok {
                    log::warn!(
                        target: LOG_TARGET,
                        "Not storing {}: path is not valid UTF-8",
                        path.display()
                    );
                }
                ok
            })
            .cloned()
            .collect();
        let merged = merge_paths(existing, &storable);
        let added = merged.len() - before;

        self.save(&merged)?;
        log::info!(
            target: LOG_TARGET,
            "{added} new repositories, {} total in {}",
            merged.len(),
            self.path.display()
        );
        Ok(added)
    }

    fn save(&self, paths: &[PathBuf]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GitcalError::path(parent, e))?;
        }

        let mut content = String::new();
        for path in paths.iter().filter_map(|path| path.to_str()) {
            content.push_str(path);
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|e| GitcalError::path(&self.path, e))
    }
}

/// Append then dedupe: the first occurrence of a path keeps its position.
pub fn merge_paths(existing: Vec<PathBuf>, found: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    existing
        .into_iter()
        .chain(found.iter().cloned())
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
