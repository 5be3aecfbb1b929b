//! Host settings for one install/uninstall invocation
//!
//! Every path the installer writes to is derived from three inputs: the base
//! installation directory (`/opt/dell` on an admin node), the file system
//! root (`/`, overridable for staging and tests), and an optional
//! development checkout named by `CROWBAR_DIR`.
//!
//! ```text
//! <base>/
//! ├── barclamps/                     # <name>-filelist.txt (unless CROWBAR_DIR)
//! ├── bin/
//! ├── crowbar_framework/
//! │   ├── barclamp_model/            # skeleton source (unless CROWBAR_DIR)
//! │   └── barclamps/                 # installed <name>.yml, templates/, schemas/
//! ├── doc/<name>/
//! └── setup/<name>/                  # staged *.install / *.remove hooks
//! <root>/
//! ├── tftpboot/
//! ├── updates/
//! └── var/log/barclamps/
//! ```

use std::path::{Path, PathBuf};

/// Default base installation directory on an admin node
pub const DEFAULT_BASE_DIR: &str = "/opt/dell";

/// Immutable snapshot of where and how to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base installation directory
    pub base_dir: PathBuf,

    /// File system root for `updates`, `tftpboot` and logs
    pub root_dir: PathBuf,

    /// Development checkout containing `barclamps/`
    pub crowbar_dir: Option<PathBuf>,

    /// Emit debug logging
    pub debug: bool,

    /// Skip application components (deploy mode)
    pub deploy: bool,

    /// Skip lifecycle actions
    pub no_install_actions: bool,

    /// Skip `updates` and cache files
    pub no_files: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

impl Settings {
    /// Settings rooted at `base_dir` with every toggle off
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            root_dir: PathBuf::from("/"),
            crowbar_dir: None,
            debug: false,
            deploy: false,
            no_install_actions: false,
            no_files: false,
        }
    }

    /// Override the file system root
    #[must_use]
    pub fn with_root(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    /// Use a development checkout for the package store and model
    #[must_use]
    pub fn with_crowbar_dir(mut self, crowbar_dir: Option<PathBuf>) -> Self {
        self.crowbar_dir = crowbar_dir;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_dir
    }

    /// `<base>/crowbar_framework`
    pub fn crowbar_path(&self) -> PathBuf {
        self.base_dir.join("crowbar_framework")
    }

    /// Where file lists are kept and new skeletons are generated
    pub fn barclamp_path(&self) -> PathBuf {
        match &self.crowbar_dir {
            Some(dir) => dir.join("barclamps"),
            None => self.base_dir.join("barclamps"),
        }
    }

    /// Source tree for skeleton generation
    pub fn model_source(&self) -> PathBuf {
        match &self.crowbar_dir {
            Some(dir) => dir
                .join("barclamps")
                .join("crowbar")
                .join("crowbar_framework")
                .join("barclamp_model"),
            None => self.crowbar_path().join("barclamp_model"),
        }
    }

    pub fn bin_path(&self) -> PathBuf {
        self.base_dir.join("bin")
    }

    /// Staging root for lifecycle actions
    pub fn setup_path(&self) -> PathBuf {
        self.base_dir.join("setup")
    }

    pub fn doc_path(&self) -> PathBuf {
        self.base_dir.join("doc")
    }

    pub fn update_path(&self) -> PathBuf {
        self.root_dir.join("updates")
    }

    pub fn tftpboot_path(&self) -> PathBuf {
        self.root_dir.join("tftpboot")
    }

    /// Where failed action output is captured
    pub fn log_path(&self) -> PathBuf {
        self.root_dir.join("var").join("log").join("barclamps")
    }

    /// Installed manifests, templates and schemas
    pub fn registry_path(&self) -> PathBuf {
        self.crowbar_path().join("barclamps")
    }

    /// The shared stylesheet packages inject their partials into
    pub fn application_sass(&self) -> PathBuf {
        self.crowbar_path()
            .join("app")
            .join("assets")
            .join("stylesheets")
            .join("application.sass")
    }

    /// `<barclamp_path>/<name>-filelist.txt`
    pub fn filelist_path(&self, name: &str) -> PathBuf {
        self.barclamp_path().join(format!("{name}-filelist.txt"))
    }
}
