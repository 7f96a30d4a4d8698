use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use nimbus::app::App;
use nimbus::host::RuntimeFlags;
use nimbus::prefs::{PrefKey, Preferences};
use nimbus::services::regions::{RegionDirectory, ServerRegion};
use nimbus::services::time_source::RealTimeSource;
use nimbus::services::tracing_setup;
use nimbus::services::translations::{HttpTranslationFetcher, TranslationFetcher, Translations};

const TRANSLATIONS_URL: &str = "https://nimbus-locales.pages.dev";

/// Terminal companion for tuning cloud game-streaming sessions
#[derive(Parser, Debug)]
#[command(name = "nimbus")]
#[command(version)]
struct Args {
    /// Path to the preferences file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the locale (e.g. 'en-US', 'ja-JP')
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Path to the diagnostics log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Don't fetch translation updates over the network
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("nimbus.log"));
    tracing_setup::init_global(&log_path);
    tracing::info!("Nimbus {} starting", env!("CARGO_PKG_VERSION"));

    let prefs_path = match args.config {
        Some(path) => path,
        None => Preferences::default_path().context("could not determine config directory")?,
    };
    let prefs = Preferences::load(&prefs_path)
        .with_context(|| format!("loading preferences from {}", prefs_path.display()))?;

    let locale = args.locale.unwrap_or_else(|| {
        prefs
            .get(PrefKey::AppLocale)
            .as_str()
            .unwrap_or("en-US")
            .to_string()
    });
    let fetcher: Option<Arc<dyn TranslationFetcher>> = if args.offline {
        None
    } else {
        Some(Arc::new(HttpTranslationFetcher::new(TRANSLATIONS_URL)))
    };
    let translations = Translations::new(
        &locale,
        dirs::cache_dir().map(|dir| dir.join("nimbus")),
        fetcher,
    );

    let mut app = App::new(
        prefs,
        translations,
        bootstrap_regions(),
        None,
        RuntimeFlags {
            has_touch_support: std::env::var_os("NIMBUS_TOUCH").is_some(),
            is_android_host: false,
        },
        RealTimeSource::shared(),
    );

    enable_raw_mode().context("enabling raw mode")?;
    crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let result = app.run(&mut terminal).await;

    restore_terminal();
    result
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Region directory as reported at session bootstrap.
///
/// The live list comes from the streaming service once a session is
/// negotiated; until then the well-known regions stand in so the panel is
/// usable offline.
fn bootstrap_regions() -> RegionDirectory {
    let mut regions = RegionDirectory::new();
    for (name, short_name, is_default) in [
        ("East US", "EUS", false),
        ("West US", "WUS", false),
        ("West Europe", "WEU", true),
        ("Southeast Asia", "SEA", false),
        ("Australia East", "AUE", false),
    ] {
        regions.insert(
            name,
            ServerRegion {
                short_name: short_name.to_string(),
                is_default,
            },
        );
    }
    regions
}
