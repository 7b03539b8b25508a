use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use esgscope_cli::analysis::Analyst;
use esgscope_cli::settings::{build_scope, load_config};
use esgscope_cli::App;
use esgscope_providers::{ProviderSettings, Providers};
use tracing_subscriber::EnvFilter;

/// Look up, export and compare ESG data across stock exchanges.
#[derive(Debug, Parser)]
#[command(name = "esgscope", version, about)]
struct Cli {
    /// YAML file listing supported countries, provider timeout and fetch strategy.
    #[arg(long, env = "ESGSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the per-provider timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// File offered by the export prompt when left blank.
    #[arg(long, default_value = "esg_report.csv")]
    export_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Suggested: RUST_LOG=info,esgscope=debug,esgscope_providers=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();

    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(ms) = cli.timeout_ms {
        cfg.provider_timeout_ms = ms;
    }

    let providers = Providers::new(&ProviderSettings::from_env())?;
    let scope = build_scope(&cfg, &providers).context("assembling provider chain")?;
    let analyst = Analyst::from_env()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let stdin = io::stdin();
    let mut app = App::new(scope, stdin.lock(), io::stdout())
        .with_analyst(analyst)
        .default_export(cli.export_path);
    runtime.block_on(app.run())
}
