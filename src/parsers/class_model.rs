//! Class model loading
//!
//! The class model is exported by the host toolchain as JSON. A model path
//! is either a single file or a directory whose `*.json` files (at any
//! depth) are merged in path order.

use glob::Pattern;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ModulithError, Result};
use crate::models::type_ref::{ClassModel, ClassModelData};

/// Loader for exported class models
#[derive(Debug, Clone, Default)]
pub struct ClassModelLoader {
    exclude_patterns: Vec<Pattern>,
}

impl ClassModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip model files whose name or path matches one of the globs
    pub fn with_exclude_patterns(patterns: &[String]) -> Result<Self> {
        let exclude_patterns = patterns
            .iter()
            .map(|pattern| Pattern::new(pattern).map_err(|source| ModulithError::GlobPattern { source }))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { exclude_patterns })
    }

    /// Load and validate the model at `path`
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ClassModel> {
        let data = self.load_data(path)?;
        let model = ClassModel::new(data)?;

        tracing::info!(types = model.len(), "loaded class model");

        Ok(model)
    }

    /// Read the raw model parts without validating them
    pub fn load_data<P: AsRef<Path>>(&self, path: P) -> Result<ClassModelData> {
        let path = path.as_ref();

        if path.is_file() {
            return Self::parse_file(path);
        }

        if !path.is_dir() {
            return Err(ModulithError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let files = self.model_files(path)?;
        if files.is_empty() {
            return Err(ModulithError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), files = files.len(), "reading class model files");

        let parts = files
            .par_iter()
            .map(|file| Self::parse_file(file))
            .collect::<Result<Vec<_>>>()?;

        let mut data = ClassModelData::default();
        for part in parts {
            data.extend(part);
        }

        Ok(data)
    }

    /// JSON files below `dir`, sorted by path
    pub fn model_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                ModulithError::io_error(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory loop while reading class model")),
                )
            })?;

            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

            if entry.file_type().is_file() && is_json && !self.is_excluded(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Whether the file name or the full path matches an exclude pattern
    pub fn is_excluded(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let full_path = path.to_string_lossy();

        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&file_name) || pattern.matches(&full_path))
    }

    fn parse_file(path: &Path) -> Result<ClassModelData> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse one JSON document
    pub fn parse<P: AsRef<Path>>(content: &str, path: P) -> Result<ClassModelData> {
        serde_json::from_str(content).map_err(|e| ModulithError::json_parse_error(path.as_ref(), e))
    }
}
