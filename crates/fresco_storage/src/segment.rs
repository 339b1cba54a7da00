//! Ordered, numbered job artifacts.

use fresco_error::{FrescoError, FrescoResult, MediaError, MediaErrorKind, StorageError, StorageErrorKind};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Which family of artifacts to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SegmentKind {
    /// Generated still images
    Image,
    /// Synthesized narration clips
    Audio,
}

impl SegmentKind {
    /// Accepted file extensions, lowercase.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SegmentKind::Image => &["jpg", "jpeg", "png", "webp"],
            SegmentKind::Audio => &["wav", "mp3"],
        }
    }

    /// Whether `path` has one of this kind's extensions (case-insensitive).
    pub fn accepts(self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions().contains(&e.as_str())
            })
            .unwrap_or(false)
    }
}

/// Sequence number extracted from an artifact's file stem.
///
/// Indexed artifacts sort numerically and all come before unindexed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentIndex {
    /// Stem carried a sequence number
    At(u64),
    /// Stem carried no digits
    Unindexed,
}

impl SegmentIndex {
    /// The number, if any.
    pub fn value(self) -> Option<u64> {
        match self {
            SegmentIndex::At(n) => Some(n),
            SegmentIndex::Unindexed => None,
        }
    }
}

/// Extract the sequence number from a file stem.
///
/// `<prefix>_<n>` and `<prefix>_<n>-<suffix>` yield `n`. Any other stem
/// with digits yields its first run of digits. Stems without digits are
/// [`SegmentIndex::Unindexed`].
pub fn segment_index(stem: &str) -> SegmentIndex {
    // Rightmost underscore whose tail is `<digits>` or `<digits>-...`
    for (pos, _) in stem.rmatch_indices('_') {
        let tail = &stem[pos + 1..];
        let digits = leading_digits(tail);
        if digits.is_empty() {
            continue;
        }
        let rest = &tail[digits.len()..];
        if (rest.is_empty() || rest.starts_with('-'))
            && let Ok(n) = digits.parse()
        {
            return SegmentIndex::At(n);
        }
    }

    stem.find(|c: char| c.is_ascii_digit())
        .and_then(|start| leading_digits(&stem[start..]).parse().ok())
        .map(SegmentIndex::At)
        .unwrap_or(SegmentIndex::Unindexed)
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}

/// One artifact with its extracted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Sequence number from the file stem
    pub index: SegmentIndex,
    /// Full path to the artifact
    pub path: PathBuf,
}

impl Segment {
    fn from_path(path: PathBuf) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            index: segment_index(&stem),
            path,
        }
    }

    fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Total order: by index, equal indices by file name. Unindexed
    /// artifacts compare equal so a stable sort keeps discovery order.
    fn order(&self, other: &Self) -> Ordering {
        match (self.index, other.index) {
            (SegmentIndex::Unindexed, SegmentIndex::Unindexed) => Ordering::Equal,
            (a, b) => a.cmp(&b).then_with(|| self.file_name().cmp(other.file_name())),
        }
    }
}

/// List artifacts of `kind` in `folder` with their indices, in sequence order.
///
/// # Errors
///
/// Returns `MediaError::NotFound` if `folder` does not exist, or a
/// `StorageError` if it cannot be read.
#[tracing::instrument(skip(folder), fields(folder = %folder.display()))]
pub async fn list_segments(kind: SegmentKind, folder: &Path) -> FrescoResult<Vec<Segment>> {
    let mut entries = tokio::fs::read_dir(folder).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FrescoError::from(MediaError::new(MediaErrorKind::NotFound(
                folder.display().to_string(),
            )))
        } else {
            FrescoError::from(StorageError::new(StorageErrorKind::FileRead(
                format!("{}: {}", folder.display(), e),
            )))
        }
    })?;

    let mut segments = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StorageError::read(folder, e))?
    {
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        let path = entry.path();
        if is_file && kind.accepts(&path) {
            segments.push(Segment::from_path(path));
        }
    }

    segments.sort_by(Segment::order);
    tracing::debug!(count = segments.len(), %kind, "Listed segments");
    Ok(segments)
}

/// List artifact paths of `kind` in `folder`, in sequence order.
///
/// # Errors
///
/// See [`list_segments`].
pub async fn list(kind: SegmentKind, folder: &Path) -> FrescoResult<Vec<PathBuf>> {
    Ok(list_segments(kind, folder)
        .await?
        .into_iter()
        .map(|s| s.path)
        .collect())
}
