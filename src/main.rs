use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use docsieve_core::Validator;
use docsieve_core::config::{Config, ReportFormat};
use docsieve_core::report;
use docsieve_loader::DirectoryLoader;

/// Report extraction-quality problems in a corpus of extracted text.
#[derive(Debug, Parser)]
#[command(name = "docsieve", version, about)]
struct Cli {
    /// File or directory to validate.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Configuration file (defaults to $DOCSIEVE_CONFIG, then config/default.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Glob pattern, relative to PATH, selecting files to load.
    #[arg(long, value_name = "PATTERN")]
    glob: Option<String>,

    /// Report format: text or json.
    #[arg(long, value_name = "FORMAT")]
    format: Option<ReportFormat>,

    /// Print the document at this index after the report. Repeatable.
    #[arg(long = "show", value_name = "INDEX")]
    show: Vec<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(glob) = cli.glob {
        config.loader.glob = glob;
    }
    if let Some(format) = cli.format {
        config.report.format = format;
    }
    config.validate()?;

    let loader = DirectoryLoader::with_defaults(&config.loader.glob, config.loader.max_file_size);
    let documents = loader
        .load_all(&cli.path)
        .await
        .with_context(|| format!("failed to load documents from {}", cli.path.display()))?;
    tracing::info!(
        "loaded {} documents from {}",
        documents.len(),
        cli.path.display()
    );

    let outcome = Validator::from_config(&config).validate(documents.as_slice());
    let rendered = report::render(&outcome, config.report.format)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !cli.show.is_empty() {
        stdout.write_all(report::render_inspection(&documents, &cli.show).as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}

fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("DOCSIEVE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
