//! PDF → text via the external `pdftotext` binary (poppler-utils).

use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::ExtractSection;
use crate::workspace::ScopedWorkspace;

pub async fn pdf_to_text(pdf: &Path, cfg: &ExtractSection, ws: &ScopedWorkspace) -> Result<String> {
    let bin = which::which(&cfg.pdftotext_command).with_context(|| {
        format!(
            "{} not found on PATH (install poppler-utils or set extract.pdftotext_command)",
            cfg.pdftotext_command
        )
    })?;

    let staged = ws.stage(pdf, "statement.pdf")?;
    let out = ws.path().join("statement.txt");

    let mut cmd = tokio::process::Command::new(&bin);
    cmd.arg("-layout").arg(&staged).arg(&out).kill_on_drop(true);

    let status = tokio::time::timeout(Duration::from_secs(cfg.timeout_secs), cmd.status())
        .await
        .map_err(|_| anyhow!("{} timed out after {}s", bin.display(), cfg.timeout_secs))?
        .with_context(|| format!("running {}", bin.display()))?;

    if !status.success() {
        bail!("{} failed with status: {}", bin.display(), status);
    }

    let text = fs::read_to_string(&out).with_context(|| format!("read {}", out.display()))?;
    info!(pdf = %pdf.display(), chars = text.len(), "pdf converted to text");
    Ok(text)
}
