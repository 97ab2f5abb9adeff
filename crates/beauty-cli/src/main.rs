use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// beauty: terminal beauty-product assistant.
///
/// Walks you from a product category through a few preference questions
/// to a recommended product, and offers a chat assistant, a store
/// inventory check and a two-product comparer on the side.
#[derive(Parser, Debug)]
#[command(name = "beauty", version, about)]
struct Cli {
    /// Base URL of the assistant API (overrides the config file).
    #[arg(long, env = "BEAUTY_API_URL")]
    api_url: Option<String>,

    /// Store id used for chat, inventory and compare requests.
    #[arg(short, long)]
    store_id: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file so the alternate screen stays clean. If the log file
    // can't be opened, discard logs instead.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("beauty-assistant");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("beauty.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config.
    let mut config = beauty_core::AssistantConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        beauty_core::AssistantConfig::default()
    });

    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(store_id) = cli.store_id {
        config.store.store_id = store_id;
    }

    tracing::info!(
        "Starting beauty v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url()
    );

    let mut app = beauty_tui::App::new(&config);
    app.run().await?;

    tracing::info!("beauty exited cleanly");
    Ok(())
}
