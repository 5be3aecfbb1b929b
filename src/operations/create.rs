//! Create operation: generate a new package skeleton from the barclamp model

use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::fs::{FileSystem, visible_entries};
use crate::config::Settings;
use crate::error::{self, BarclampError, Result};
use crate::installer::{SubstitutionContext, TreeCloner};

/// Options for skeleton generation
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// New package identifier
    pub name: String,
    /// Owner stamped into copyright lines
    pub entity: String,
    /// Directory to create; defaults to `<barclamp_path>/<name>`
    pub target: Option<PathBuf>,
}

/// Generated skeleton
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub target: PathBuf,
    pub files: Vec<PathBuf>,
}

/// High-level create operation
pub struct CreateOperation<'a> {
    fs: &'a dyn FileSystem,
    settings: &'a Settings,
}

impl<'a> CreateOperation<'a> {
    pub fn new(fs: &'a dyn FileSystem, settings: &'a Settings) -> Self {
        Self { fs, settings }
    }

    pub fn execute(&self, options: &CreateOptions) -> Result<CreateReport> {
        let ctx = SubstitutionContext::now(options.name.as_str(), options.entity.as_str());
        self.execute_with(options, &ctx)
    }

    /// Generate with an explicit substitution context
    pub fn execute_with(
        &self,
        options: &CreateOptions,
        ctx: &SubstitutionContext,
    ) -> Result<CreateReport> {
        let model = self.settings.model_source();
        if !self.fs.is_dir(&model) {
            return Err(BarclampError::ModelNotFound {
                path: model.display().to_string(),
            });
        }
        let target = options
            .target
            .clone()
            .unwrap_or_else(|| self.settings.barclamp_path().join(&options.name));
        info!(
            "creating barclamp {} in {} from {}",
            options.name,
            target.display(),
            model.display()
        );
        create_dir_all(self.fs, &target)?;

        let cloner = TreeCloner::new(self.fs, ctx);
        let mut files = Vec::new();
        for entry in visible_entries(self.fs, &model).map_err(|e| error::fs::read_failed(&model, &e))? {
            files.extend(cloner.clone_tree(&entry, &model, &target, true)?);
        }
        Ok(CreateReport { target, files })
    }
}

fn create_dir_all(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    fs.create_dir_all(path)
        .map_err(|e| error::fs::write_failed(path, &e))
}
