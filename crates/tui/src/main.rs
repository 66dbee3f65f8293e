mod page;
mod renderer;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use folio_core::state::{JsonFileSettings, SettingsStore};
use folio_core::{Portfolio, SiteConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const USAGE: &str = "Usage: folio [--config <path>]";

struct Args {
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }
    Ok(Args { config })
}

fn data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("folio.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio_core=info,folio_tui=info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let dir = data_dir();
    init_logging(&dir)?;

    let config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SiteConfig::from_env().context("loading config from FOLIO_CONFIG")?,
    };
    let settings: Box<dyn SettingsStore> =
        Box::new(JsonFileSettings::new(dir.join("settings.json")));
    let portfolio = Portfolio::new(config, settings);
    info!(theme = %portfolio.theme(), "starting folio");

    let (width, height) = crossterm::terminal::size()?;
    let page = page::TerminalPage::new(portfolio, width, height.saturating_sub(2));
    renderer::run_tui(page)
}
