use anyhow::Context;
use clap::Parser;
use emoji_scraper::config::Config;
use emoji_scraper::infra::http_client::ReqwestHttp;
use emoji_scraper::logging;
use emoji_scraper::pipeline::Pipeline;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, info_span};

#[derive(Parser)]
#[command(name = "emoji_scraper")]
#[command(about = "Build the emoji lookup table and print it as JSON")]
#[command(version)]
struct Cli {
    /// Config file (default: ./emoji_scraper.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum image probes in flight
    #[arg(long, conflicts_with = "sequential")]
    concurrency: Option<usize>,

    /// Probe one identifier at a time
    #[arg(long)]
    sequential: bool,

    /// Write the table to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Single-line JSON instead of indented
    #[arg(long)]
    compact: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply_env().context("reading EMOJI_* environment")?;
    if let Some(n) = cli.concurrency {
        config.validation.concurrency = n;
    }
    if cli.sequential {
        config.validation.concurrency = 1;
    }
    config.validate()?;
    Ok(config)
}

fn emit(document: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let _guard = logging::init_logging(&config.logging);

    let http = Arc::new(ReqwestHttp::new(config.timeout()).context("building HTTP client")?);
    let pipeline = Pipeline::new(config.pipeline_config(), http)
        .with_span(info_span!("emoji_scraper", concurrency = config.validation.concurrency));

    let result = match pipeline.run().await {
        Ok(result) => result,
        Err(e) => {
            error!("Run failed, no table written: {}", e);
            return Err(e.into());
        }
    };

    // Rendered in full before anything reaches the output
    let document = result.to_json(cli.compact)?;
    emit(&document, cli.output.as_ref())?;
    info!(entries = result.table.len(), "Emoji table written");
    Ok(())
}
