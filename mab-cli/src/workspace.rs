//! Per-run scratch directory. Staged statements and converted text live here and are
//! removed when the workspace is dropped, whichever way the run ends.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

pub struct ScopedWorkspace {
    dir: TempDir,
}

impl ScopedWorkspace {
    pub fn create(base: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("mab-");

        let dir = match base {
            Some(base) => {
                fs::create_dir_all(base).with_context(|| format!("create {}", base.display()))?;
                builder.tempdir_in(base)
            }
            None => builder.tempdir(),
        }
        .context("create scratch directory")?;

        debug!(path = %dir.path().display(), "scratch workspace created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy `source` into the workspace under `name`
    pub fn stage(&self, source: &Path, name: &str) -> Result<PathBuf> {
        let target = self.dir.path().join(name);
        fs::copy(source, &target)
            .with_context(|| format!("copy {} to {}", source.display(), target.display()))?;
        Ok(target)
    }

    /// Remove the workspace now, reporting any cleanup failure
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .with_context(|| format!("remove {}", path.display()))
    }
}
