use anyhow::{Context, Result};
use mab_core::Currency;
use mab_ingest::KeywordClassifier;
use mab_ingest::classify::DEFAULT_DEBIT_KEYWORDS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_mab_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tracing filter used when neither RUST_LOG nor --verbose is given
    pub log_level: Option<String>,
    pub analysis: AnalysisSection,
    pub extract: ExtractSection,
    pub classify: ClassifySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Used when `analyze` is run without --target
    pub target_balance: Option<f64>,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    pub pdftotext_command: String,
    pub timeout_secs: u64,
    /// Parent directory for per-run scratch space (default: system temp dir)
    pub work_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifySection {
    pub debit_keywords: Vec<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            target_balance: None,
            currency_symbol: Currency::default().symbol,
        }
    }
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            pdftotext_command: "pdftotext".to_string(),
            timeout_secs: 60,
            work_dir: None,
        }
    }
}

impl Default for ClassifySection {
    fn default() -> Self {
        Self {
            debit_keywords: DEFAULT_DEBIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn currency(&self) -> Currency {
        Currency::new(&self.analysis.currency_symbol)
    }

    pub fn classifier(&self) -> KeywordClassifier {
        KeywordClassifier::new(&self.classify.debit_keywords)
    }
}

pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(ensure_mab_home()?.join("config.toml")),
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config, explicit: Option<&Path>) -> Result<PathBuf> {
    let p = config_path(explicit)?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit)?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default(), explicit)?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config(
            r#"
[analysis]
target_balance = 25000.0

[classify]
debit_keywords = ["WDL", "transfer to"]
"#,
        )
        .unwrap();

        assert_eq!(cfg.analysis.target_balance, Some(25000.0));
        assert_eq!(cfg.analysis.currency_symbol, "₹");
        assert_eq!(cfg.extract.pdftotext_command, "pdftotext");
        assert_eq!(cfg.extract.timeout_secs, 60);
        assert!(cfg.classifier().is_debit("ATM wdl"));
        assert!(!cfg.classifier().is_debit("paid to grocer"));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.log_level = Some("debug".to_string());
        cfg.analysis.currency_symbol = "$".to_string();
        save_config(&cfg, Some(&path)).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.currency().format(5.0), "$5.00");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
