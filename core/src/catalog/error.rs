//! Error types for catalog operations

use std::path::PathBuf;
use thiserror::Error;

use crate::Category;

/// Errors while listing or resolving alert clips
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { category: Category, path: PathBuf },

    #[error("failed to read {category} directory {}", path.display())]
    ReadDir {
        category: Category,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no description for {category} clip '{clip}'")]
    MissingDescription { category: Category, clip: String },

    #[error("'{clip}' is not an available {category} clip")]
    UnknownClip { category: Category, clip: String },
}

impl CatalogError {
    pub fn category(&self) -> Category {
        match self {
            CatalogError::DirectoryNotFound { category, .. }
            | CatalogError::ReadDir { category, .. }
            | CatalogError::MissingDescription { category, .. }
            | CatalogError::UnknownClip { category, .. } => *category,
        }
    }
}
