use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::clip::Clip;

/// Extension of raw camera recordings
pub const RAW_EXTENSION: &str = ".MTS";

/// Extension of transcoded preview files
pub const PREVIEW_EXTENSION: &str = ".mov";

/// Suffix appended to the raw directory name by the transcoder's sharing output
pub const PREVIEW_DIR_SUFFIX: &str = "_s";

/// The pair of directories a review session works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipDirs {
    pub raw: PathBuf,
    pub preview: PathBuf,
}

impl ClipDirs {
    /// Infer both directories from whichever one the user passed
    ///
    /// A trailing `_s` marks the preview directory; anything else is taken as
    /// the raw directory.
    pub fn from_argument(dir: &Path) -> Self {
        let text = dir.to_string_lossy();
        let trimmed = text.trim_end_matches('/');
        match trimmed.strip_suffix(PREVIEW_DIR_SUFFIX) {
            Some(raw) if !raw.is_empty() => ClipDirs {
                raw: PathBuf::from(raw),
                preview: PathBuf::from(trimmed),
            },
            _ => ClipDirs {
                raw: PathBuf::from(trimmed),
                preview: PathBuf::from(format!("{trimmed}{PREVIEW_DIR_SUFFIX}")),
            },
        }
    }
}

/// Result of scanning both directories
#[derive(Debug, Default)]
pub struct Discovery {
    /// Paired clips, sorted by preview path
    pub clips: Vec<Clip>,
    /// Preview files with no raw counterpart
    pub unmatched: Vec<PathBuf>,
    /// Raw files ignored because an earlier raw file had the same stem
    pub duplicates: Vec<PathBuf>,
    /// Directories that did not exist at scan time
    pub missing_dirs: Vec<PathBuf>,
}

impl Discovery {
    /// Human-readable problems found during discovery, one per line
    pub fn problems(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for dir in &self.missing_dirs {
            lines.push(format!("Directory {} does not exist.", dir.display()));
        }
        for path in &self.unmatched {
            lines.push(format!("Could not find raw clip for {}.", path.display()));
        }
        for path in &self.duplicates {
            lines.push(format!("Ignoring duplicate raw clip {}.", path.display()));
        }
        lines
    }
}

/// Recursively collect files under `dir` whose name ends with `extension`
///
/// Returns `None` when the directory does not exist.
fn find_files(dir: &Path, extension: &str) -> Option<Vec<PathBuf>> {
    if !dir.is_dir() {
        return None;
    }

    let files = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("Skipping unreadable entry under {:?}: {}", dir, err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(extension))
        })
        .collect();
    Some(files)
}

/// File name with `extension` cut off
fn stem_of(path: &Path, extension: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(extension).map(str::to_string)
}

/// Pair raw recordings with preview files by stem
pub fn discover(dirs: &ClipDirs) -> Discovery {
    let mut discovery = Discovery::default();

    let raw_files = find_files(&dirs.raw, RAW_EXTENSION).unwrap_or_else(|| {
        log::warn!("Raw directory {:?} does not exist", dirs.raw);
        discovery.missing_dirs.push(dirs.raw.clone());
        Vec::new()
    });
    let mut preview_files = find_files(&dirs.preview, PREVIEW_EXTENSION).unwrap_or_else(|| {
        log::warn!("Preview directory {:?} does not exist", dirs.preview);
        discovery.missing_dirs.push(dirs.preview.clone());
        Vec::new()
    });

    let mut raw_by_stem: HashMap<String, PathBuf> = HashMap::new();
    for path in raw_files {
        let Some(stem) = stem_of(&path, RAW_EXTENSION) else {
            continue;
        };
        if raw_by_stem.contains_key(&stem) {
            log::warn!("Duplicate raw clip {:?}, keeping the first", path);
            discovery.duplicates.push(path);
        } else {
            raw_by_stem.insert(stem, path);
        }
    }

    // Plain string order of the whole path, not component-wise `Path` order
    preview_files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    for preview_path in preview_files {
        let Some(stem) = stem_of(&preview_path, PREVIEW_EXTENSION) else {
            continue;
        };
        match raw_by_stem.get(&stem) {
            Some(raw_path) => {
                let size = fs::metadata(&preview_path).map(|m| m.len()).unwrap_or(0);
                discovery
                    .clips
                    .push(Clip::new(stem, raw_path.clone(), preview_path, size));
            }
            None => {
                log::warn!("Could not find raw clip for {:?}", preview_path);
                discovery.unmatched.push(preview_path);
            }
        }
    }

    log::info!(
        "Discovered {} clips ({} unmatched previews)",
        discovery.clips.len(),
        discovery.unmatched.len()
    );
    discovery
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, len: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![0u8; len]).unwrap();
    }

    fn setup() -> (TempDir, ClipDirs) {
        let tmp = TempDir::new().unwrap();
        let dirs = ClipDirs::from_argument(&tmp.path().join("day1"));
        fs::create_dir_all(&dirs.raw).unwrap();
        fs::create_dir_all(&dirs.preview).unwrap();
        (tmp, dirs)
    }

    #[test]
    fn test_dirs_from_raw_argument() {
        let dirs = ClipDirs::from_argument(Path::new("/footage/day1"));
        assert_eq!(dirs.raw, PathBuf::from("/footage/day1"));
        assert_eq!(dirs.preview, PathBuf::from("/footage/day1_s"));
    }

    #[test]
    fn test_dirs_from_preview_argument() {
        let dirs = ClipDirs::from_argument(Path::new("/footage/day1_s/"));
        assert_eq!(dirs.raw, PathBuf::from("/footage/day1"));
        assert_eq!(dirs.preview, PathBuf::from("/footage/day1_s"));
    }

    #[test]
    fn test_pairs_by_stem_in_preview_order() {
        let (_tmp, dirs) = setup();
        for stem in ["C", "A", "B"] {
            touch(&dirs.raw.join("PRIVATE/STREAM").join(format!("{stem}.MTS")), 1);
            touch(&dirs.preview.join(format!("{stem}.mov")), 10);
        }

        let found = discover(&dirs);

        let stems: Vec<&str> = found.clips.iter().map(|c| c.stem.as_str()).collect();
        assert_eq!(stems, vec!["A", "B", "C"]);
        assert!(found.unmatched.is_empty());
        assert_eq!(found.clips[0].preview_size_bytes, 10);
        assert!(!found.clips[0].played);
        assert!(!found.clips[0].marked_for_deletion);
        assert!(found.clips[0].raw_path.ends_with("PRIVATE/STREAM/A.MTS"));
    }

    #[test]
    fn test_nested_previews_sorted_as_path_strings() {
        let (_tmp, dirs) = setup();
        touch(&dirs.raw.join("X.MTS"), 1);
        touch(&dirs.raw.join("Y.MTS"), 1);
        touch(&dirs.preview.join("a/X.mov"), 1);
        touch(&dirs.preview.join("a-Y.mov"), 1);

        let found = discover(&dirs);

        // '-' sorts before '/'
        let previews: Vec<PathBuf> = found.clips.iter().map(|c| c.preview_path.clone()).collect();
        assert_eq!(
            previews,
            vec![dirs.preview.join("a-Y.mov"), dirs.preview.join("a/X.mov")]
        );
    }

    #[test]
    fn test_preview_without_raw_is_reported() {
        let (_tmp, dirs) = setup();
        touch(&dirs.raw.join("A.MTS"), 1);
        touch(&dirs.preview.join("A.mov"), 1);
        touch(&dirs.preview.join("orphan.mov"), 1);

        let found = discover(&dirs);

        assert_eq!(found.clips.len(), 1);
        assert_eq!(found.unmatched, vec![dirs.preview.join("orphan.mov")]);
        assert_eq!(found.problems().len(), 1);
    }

    #[test]
    fn test_other_extensions_ignored() {
        let (_tmp, dirs) = setup();
        touch(&dirs.raw.join("A.mts"), 1);
        touch(&dirs.raw.join("B.MTS"), 1);
        touch(&dirs.preview.join("A.mov"), 1);
        touch(&dirs.preview.join("B.mp4"), 1);

        let found = discover(&dirs);

        assert!(found.clips.is_empty());
        assert_eq!(found.unmatched, vec![dirs.preview.join("A.mov")]);
    }

    #[test]
    fn test_duplicate_raw_keeps_first() {
        let (_tmp, dirs) = setup();
        touch(&dirs.raw.join("a/X.MTS"), 1);
        touch(&dirs.raw.join("b/X.MTS"), 1);
        touch(&dirs.preview.join("X.mov"), 1);

        let found = discover(&dirs);

        assert_eq!(found.clips.len(), 1);
        assert!(found.clips[0].raw_path.ends_with("a/X.MTS"));
        assert_eq!(found.duplicates, vec![dirs.raw.join("b/X.MTS")]);
    }

    #[test]
    fn test_missing_directories_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let dirs = ClipDirs::from_argument(&tmp.path().join("nowhere"));

        let found = discover(&dirs);

        assert!(found.clips.is_empty());
        assert_eq!(found.missing_dirs, vec![dirs.raw.clone(), dirs.preview.clone()]);
    }
}
