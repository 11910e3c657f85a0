use crate::catalog::CategoryNode;
use crate::error::{CatalogError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supplies the component library tree to the walker.
pub trait TypeProvider {
    fn library(&self) -> Result<CategoryNode>;
}

impl TypeProvider for CategoryNode {
    fn library(&self) -> Result<CategoryNode> {
        Ok(self.clone())
    }
}

/// Reads component library exports (`*.json`, one category tree each) from a
/// directory and merges them.
///
/// Files that do not parse as a category tree are skipped, so a directory
/// holding unrelated JSON still yields whatever loaded.
#[derive(Debug, Clone)]
pub struct JsonCatalogProvider {
    dir: PathBuf,
}

impl JsonCatalogProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn export_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some("json")
            {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }
}

impl TypeProvider for JsonCatalogProvider {
    fn library(&self) -> Result<CategoryNode> {
        let mut library = CategoryNode::default();
        let mut loaded = 0;

        for path in self.export_files()? {
            match load_export(&path) {
                Ok(tree) => {
                    library.merge(tree);
                    loaded += 1;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping catalog export");
                }
            }
        }

        tracing::info!(
            files = loaded,
            types = library.type_count(),
            dir = %self.dir.display(),
            "loaded component library"
        );
        Ok(library)
    }
}

fn load_export(path: &Path) -> Result<CategoryNode> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
