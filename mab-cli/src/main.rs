use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mab_analytics::{ExtractionSummary, StatementReport, build_report};
use mab_core::{TracingSink, Transaction};
use mab_ingest::{Extraction, ExtractionOutcome, parse_sbi_text_with};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod pdf;
mod render;
mod state;
mod workspace;

use config::Config;
use workspace::ScopedWorkspace;

#[derive(Parser, Debug)]
#[command(name = "mab", version, about = "Bank statement extraction and balance analytics")]
struct Cli {
    /// Config file (default: ~/.mab/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement
    Extract {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = ExtractFormat::Json)]
        format: ExtractFormat,
    },

    /// Extract transactions and compute balance analytics
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Target balance to check maintenance against (overrides config)
        #[arg(long)]
        target: Option<f64>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Manage ~/.mab/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Statement PDF, extracted text file, or "-" for text on stdin
    input: String,

    /// Treat the input as already-extracted text even if it ends in .pdf
    #[arg(long)]
    text: bool,

    /// Fail when the transaction table header is not found
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExtractFormat {
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Json,
    Text,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    outcome: ExtractionOutcome,
    transactions: &'a [Transaction],
    summary: ExtractionSummary,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    outcome: ExtractionOutcome,
    transactions: &'a [Transaction],
    #[serde(flatten)]
    report: &'a StatementReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    // Priority: RUST_LOG env var > --verbose flag > config log_level > info
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(cfg.log_level.as_deref().unwrap_or("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    match cli.command {
        Command::Extract { input, format } => {
            let extraction = extract(&input, &cfg).await?;
            match format {
                ExtractFormat::Json => {
                    let out = ExtractOutput {
                        outcome: extraction.outcome,
                        transactions: &extraction.transactions,
                        summary: ExtractionSummary::from_transactions(&extraction.transactions),
                    };
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                ExtractFormat::Csv => {
                    render::write_transactions_csv(std::io::stdout().lock(), &extraction.transactions)?;
                }
            }
        }

        Command::Analyze {
            input,
            target,
            format,
        } => {
            let extraction = extract(&input, &cfg).await?;
            let currency = cfg.currency();
            let target = target.or(cfg.analysis.target_balance);
            let report = build_report(&extraction.transactions, target, &currency)?;

            match format {
                ReportFormat::Json => {
                    let out = AnalyzeOutput {
                        outcome: extraction.outcome,
                        transactions: &extraction.transactions,
                        report: &report,
                    };
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                ReportFormat::Text => {
                    print!("{}", render::render_report_text(&report, &currency));
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let path = config::config_path(cli.config.as_deref())?;
                println!("# {}", path.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Read the statement (converting PDFs in a scratch workspace) and parse it.
async fn extract(args: &InputArgs, cfg: &Config) -> Result<Extraction> {
    let text = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read statement text from stdin")?;
        buf
    } else {
        let path = Path::new(&args.input);
        if !path.exists() {
            bail!("input not found: {}", path.display());
        }

        if !args.text && is_pdf(path) {
            let ws = ScopedWorkspace::create(cfg.extract.work_dir.as_deref())?;
            let text = pdf::pdf_to_text(path, &cfg.extract, &ws).await?;
            ws.close()?;
            text
        } else {
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
    };

    let mut extraction = parse_sbi_text_with(&text, cfg.classifier(), &TracingSink)?;
    if args.strict {
        extraction = extraction.require_header()?;
    }

    match extraction.outcome {
        ExtractionOutcome::HeaderNotFound => {
            warn!("no transaction table header found; is this an SBI statement?")
        }
        ExtractionOutcome::NoTransactions => info!("header found but no transactions listed"),
        ExtractionOutcome::Parsed => {}
    }

    Ok(extraction)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
