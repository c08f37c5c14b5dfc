//! Alert clip catalog
//!
//! The catalog maps each [`Category`] to the clips available for it. It is
//! built once at startup by a [`CatalogLoader`] and is read-only afterwards.

pub mod descriptions;
mod error;
mod loader;

pub use error::CatalogError;
pub use loader::{CatalogLoader, ClipSource, DirectorySource, LoadedCatalog};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::Category;

/// Identifier of one clip within its category (the clip's filename)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, Default)]
struct CategoryClips {
    dir: PathBuf,
    clips: Vec<ClipId>,
}

/// Available clips per category, in presentation order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: [CategoryClips; 3],
}

impl Catalog {
    pub(crate) fn set_category(&mut self, category: Category, dir: PathBuf, clips: Vec<ClipId>) {
        self.categories[category.index()] = CategoryClips { dir, clips };
    }

    pub fn clips(&self, category: Category) -> &[ClipId] {
        &self.categories[category.index()].clips
    }

    /// Directory the category's clips were listed from
    pub fn directory(&self, category: Category) -> &Path {
        &self.categories[category.index()].dir
    }

    pub fn contains(&self, category: Category, clip: &ClipId) -> bool {
        self.clips(category).contains(clip)
    }

    /// Find a clip by filename, or by 1-based position in the category listing
    pub fn find(&self, category: Category, name: &str) -> Option<&ClipId> {
        let clips = self.clips(category);
        if let Ok(position) = name.parse::<usize>() {
            return position.checked_sub(1).and_then(|i| clips.get(i));
        }
        clips.iter().find(|clip| {
            clip.as_str() == name
                || Path::new(clip.as_str())
                    .file_stem()
                    .is_some_and(|stem| stem.eq_ignore_ascii_case(name))
        })
    }

    /// Filesystem path of a clip
    pub fn clip_path(&self, category: Category, clip: &ClipId) -> PathBuf {
        self.directory(category).join(clip.as_str())
    }

    /// Human-readable label for a clip
    pub fn description(&self, category: Category, clip: &ClipId) -> Result<&'static str, CatalogError> {
        descriptions::describe(category, clip.as_str()).ok_or_else(|| {
            CatalogError::MissingDescription {
                category,
                clip: clip.to_string(),
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.clips.is_empty())
    }

    /// Total number of clips across all categories
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.clips.len()).sum()
    }
}
