use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single reviewable unit: one raw recording paired with its preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// File name without extension, shared by both files
    pub stem: String,
    /// Raw camera recording
    pub raw_path: PathBuf,
    /// Transcoded file used for playback
    pub preview_path: PathBuf,
    /// Size of the preview file at discovery time (0 if unreadable)
    pub preview_size_bytes: u64,
    /// Whether the clip has been launched in the player this session
    pub played: bool,
    /// Deferred deletion flag, applied by `Model::commit_deletions`
    pub marked_for_deletion: bool,
}

impl Clip {
    /// Create an unplayed, unmarked clip
    pub fn new(stem: String, raw_path: PathBuf, preview_path: PathBuf, preview_size_bytes: u64) -> Self {
        Clip {
            stem,
            raw_path,
            preview_path,
            preview_size_bytes,
            played: false,
            marked_for_deletion: false,
        }
    }
}

/// Failure to remove one of a clip's files
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("failed to delete {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A marked clip that could not be fully removed
#[derive(Debug)]
pub struct CommitFailure {
    pub stem: String,
    pub error: DeleteError,
}

/// Outcome of a commit: stems removed from disk and list, plus per-clip failures
#[derive(Debug, Default)]
pub struct CommitReport {
    pub removed: Vec<String>,
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match self.failures.first() {
            None if self.removed.is_empty() => "Nothing to delete".to_string(),
            None => format!("{} clip(s) deleted", self.removed.len()),
            Some(first) => format!(
                "{} deleted, {} failed ({}: {})",
                self.removed.len(),
                self.failures.len(),
                first.stem,
                first.error
            ),
        }
    }
}

/// Authoritative clip list plus the directories it was discovered from
#[derive(Debug)]
pub struct Model {
    clips: Vec<Clip>,
    raw_dir: PathBuf,
    preview_dir: PathBuf,
    read_only: bool,
}

impl Model {
    pub fn new(clips: Vec<Clip>, raw_dir: PathBuf, preview_dir: PathBuf, read_only: bool) -> Self {
        Model {
            clips,
            raw_dir,
            preview_dir,
            read_only,
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn preview_dir(&self) -> &Path {
        &self.preview_dir
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn marked_count(&self) -> usize {
        self.clips.iter().filter(|c| c.marked_for_deletion).count()
    }

    pub fn has_pending_deletions(&self) -> bool {
        self.clips.iter().any(|c| c.marked_for_deletion)
    }

    /// Flip the deletion mark on the clip at `index`
    ///
    /// Returns the new mark, or `None` when the session is read-only or the
    /// index is out of range.
    pub fn toggle_deletion_mark(&mut self, index: usize) -> Option<bool> {
        if self.read_only {
            return None;
        }
        let clip = self.clips.get_mut(index)?;
        clip.marked_for_deletion = !clip.marked_for_deletion;
        log::debug!(
            "Clip {} marked_for_deletion={}",
            clip.stem,
            clip.marked_for_deletion
        );
        Some(clip.marked_for_deletion)
    }

    pub fn mark_played(&mut self, index: usize) {
        if let Some(clip) = self.clips.get_mut(index) {
            clip.played = true;
        }
    }

    /// Delete both files of every marked clip and drop those clips from the list
    ///
    /// A clip leaves the list only when neither of its files remains on disk.
    /// Clips that fail stay in place, still marked, so a later commit retries them.
    pub fn commit_deletions(&mut self) -> CommitReport {
        let mut report = CommitReport::default();
        if self.read_only {
            return report;
        }

        let clips = std::mem::take(&mut self.clips);
        for clip in clips {
            if !clip.marked_for_deletion {
                self.clips.push(clip);
                continue;
            }

            let result = remove_file(&clip.raw_path).and_then(|_| remove_file(&clip.preview_path));
            match result {
                Ok(()) => {
                    log::info!("Deleted clip {}", clip.stem);
                    report.removed.push(clip.stem);
                }
                Err(error) => {
                    log::warn!("Could not delete clip {}: {}", clip.stem, error);
                    report.failures.push(CommitFailure {
                        stem: clip.stem.clone(),
                        error,
                    });
                    self.clips.push(clip);
                }
            }
        }

        log::info!(
            "Commit finished: {} removed, {} failed, {} remaining",
            report.removed.len(),
            report.failures.len(),
            self.clips.len()
        );
        report
    }
}

/// Remove a file, treating an already-missing file as removed
fn remove_file(path: &Path) -> Result<(), DeleteError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{:?} already gone", path);
            Ok(())
        }
        Err(source) => Err(DeleteError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
