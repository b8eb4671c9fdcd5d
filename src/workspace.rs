use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::tfvars::TFVARS_FILE;

pub const PLAN_FILE: &str = "tfplan";
pub const LOCK_FILE: &str = ".terraform.lock.hcl";
pub const CACHE_DIR: &str = ".terraform";

/// Directory holding the Terraform sources and the files this tool
/// generates next to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tfvars_path(&self) -> PathBuf {
        self.root.join(TFVARS_FILE)
    }

    pub fn plan_path(&self) -> PathBuf {
        self.root.join(PLAN_FILE)
    }

    /// Removes generated files and the provider cache. Missing entries are
    /// skipped. Returns what was actually removed.
    pub fn cleanup(&self) -> io::Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for name in [TFVARS_FILE, PLAN_FILE, LOCK_FILE] {
            let path = self.root.join(name);
            if path.is_file() {
                fs::remove_file(&path)?;
                tracing::debug!(path = %path.display(), "removed file");
                removed.push(path);
            }
        }

        let cache = self.root.join(CACHE_DIR);
        if cache.is_dir() {
            fs::remove_dir_all(&cache)?;
            tracing::debug!(path = %cache.display(), "removed directory");
            removed.push(cache);
        }

        Ok(removed)
    }
}
