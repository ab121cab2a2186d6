mod action;
mod app;
mod app_state;
mod component;
mod components;
mod navigation;
mod overlay;
mod text;
mod theme;
mod viewport;
mod widgets;
mod worker;

use std::sync::Arc;

use music_proto::{platform, Config, Osascript, PlaybackClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_file();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let log_filter = log_filter(std::env::var("RUST_LOG").ok());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("amtui log: {}", log_path.display());

    tracing::info!("amtui starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config: {:#}; using defaults", e);
            Config::default()
        }
    };

    // ── Player client + work queue ───────────────────────────────────────────
    let automation = Arc::new(Osascript::from_config(&config.automation));
    let client = Arc::new(
        PlaybackClient::new(automation, config.script_context())
            .with_search_limit(config.ui.search_limit),
    );
    let (work, _worker) = worker::spawn_worker(Arc::clone(&client));

    // ── Run TUI ──────────────────────────────────────────────────────────────
    app::install_panic_hook();
    app::App::new(client, work, config.ui).run().await?;

    Ok(())
}

/// RUST_LOG wins; per-call latency lines need `debug`.
fn log_filter(env: Option<String>) -> String {
    env.filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None), "info");
        assert_eq!(log_filter(Some(String::new())), "info");
        assert_eq!(log_filter(Some("music_proto=debug".into())), "music_proto=debug");
    }
}
