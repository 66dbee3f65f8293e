#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use folio_core::state::JsonFileSettings;
    use folio_core::{Portfolio, SiteConfig};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio_core=info,folio_ui=info")),
        )
        .init();

    let config = SiteConfig::from_env().context("loading config from FOLIO_CONFIG")?;
    let settings_path = dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
        .join("settings.json");
    tracing::info!(path = %settings_path.display(), "theme preference file");
    let portfolio = Portfolio::new(config, Box::new(JsonFileSettings::new(settings_path)));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Simón Lavdorenko Shyn")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "folio",
        options,
        Box::new(|cc| Ok(Box::new(folio_ui::FolioApp::new(cc, portfolio)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}

// The browser build starts from `folio_ui::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
