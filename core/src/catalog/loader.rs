use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use klaxon_types::{AppConfig, CategoryDirectories};

use super::{Catalog, CatalogError, ClipId, descriptions};
use crate::Category;

/// Where the clips of each category come from
pub trait ClipSource {
    /// Directory (or other location) a category's clips are resolved against
    fn location(&self, category: Category) -> PathBuf;

    /// List the clip filenames available for a category
    fn list(&self, category: Category) -> Result<Vec<String>, CatalogError>;
}

/// Lists clips from one sub-directory per category under a root directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    dirs: CategoryDirectories,
    extension: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, dirs: CategoryDirectories, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            dirs,
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.audio_directory,
            config.category_dirs.clone(),
            config.clip_extension.trim_start_matches('.'),
        )
    }

    fn has_clip_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension)
    }
}

impl ClipSource for DirectorySource {
    fn location(&self, category: Category) -> PathBuf {
        self.root.join(self.dirs.get(category))
    }

    fn list(&self, category: Category) -> Result<Vec<String>, CatalogError> {
        let path = self.location(category);
        let entries = fs::read_dir(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CatalogError::DirectoryNotFound {
                    category,
                    path: path.clone(),
                }
            } else {
                CatalogError::ReadDir {
                    category,
                    path: path.clone(),
                    source,
                }
            }
        })?;

        Ok(entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && self.has_clip_extension(p))
            .filter_map(|p| p.file_name().and_then(|f| f.to_str()).map(String::from))
            .collect())
    }
}

/// Result of a catalog load: the catalog plus any recoverable problems
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// Problems to surface to the user. None of them stop the load.
    pub warnings: Vec<CatalogError>,
}

pub struct CatalogLoader<S> {
    source: S,
}

impl<S: ClipSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Build the catalog. A category whose source is unavailable degrades to
    /// an empty listing and contributes a warning.
    pub fn load(&self) -> LoadedCatalog {
        let mut loaded = LoadedCatalog::default();

        for category in Category::ALL {
            let dir = self.source.location(category);
            let mut names = match self.source.list(category) {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!(%category, error = %e, "clip source unavailable");
                    loaded.warnings.push(e);
                    loaded.catalog.set_category(category, dir, Vec::new());
                    continue;
                }
            };
            names.sort();

            // Only described clips are listed, so description lookup stays total
            let mut clips = Vec::with_capacity(names.len());
            for name in names {
                if descriptions::describe(category, &name).is_some() {
                    clips.push(ClipId::new(name));
                } else {
                    tracing::warn!(%category, clip = %name, "clip has no description, skipping");
                    loaded.warnings.push(CatalogError::MissingDescription { category, clip: name });
                }
            }

            tracing::debug!(%category, count = clips.len(), dir = %dir.display(), "listed clips");
            loaded.catalog.set_category(category, dir, clips);
        }

        tracing::info!(clips = loaded.catalog.len(), warnings = loaded.warnings.len(), "catalog loaded");
        loaded
    }
}
