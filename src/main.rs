#![deny(dead_code)] // DO NOT REMOVE THIS EVER
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use std::io;
use std::path::{Path, PathBuf};

mod ui;
mod utils;

use crate::ui::{ChatUI, UiAction};
use neonchat::settings::{self, Settings};
use neonchat::ThemeName;

/// Command line arguments for NeonChat
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "NeonChat: a terminal chat client running entirely on mock data.",
    long_about = "NeonChat shows a fixed contact list and a conversation screen backed by \
    in-memory sample history. Every message you send gets a canned reply after a short delay.\n\n\
    Command line options override values from the settings file."
)]
struct Args {
    /// Settings file to read and write
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Colour theme: neon, white, blue, purple, sunset or ocean
    #[arg(long, value_name = "NAME")]
    theme: Option<ThemeName>,

    /// Delay before the simulated reply, in milliseconds
    #[arg(long, value_name = "MS")]
    reply_delay_ms: Option<u64>,

    /// Where to write the log (the terminal itself is used by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments FIRST
    let args = Args::parse();

    if let Some(path) = args.config.clone() {
        settings::set_settings_path_override(path);
    }
    let settings_path = settings::settings_path()?;
    let settings = settings::load_settings(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?
        .with_overrides(args.theme, args.reply_delay_ms, args.log_file, args.log_level);

    let log_file_path = settings
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from("neonchat.log"));
    utils::setup_logging(&log_file_path, utils::parse_level(&settings.log_level))
        .with_context(|| format!("Failed to open log file {}", log_file_path.display()))?;

    info!("NeonChat starting up");
    info!("System information: {} {}", std::env::consts::OS, std::env::consts::ARCH);
    info!("Logging to file: {}", log_file_path.display());
    info!("Settings file: {}", settings_path.display());

    let mut terminal = ui::setup_terminal()?;
    let mut chat_ui = ChatUI::new(settings.theme, settings.reply_delay());

    // Restore the terminal even when the loop fails, then report the error
    let result = run_main_loop(&mut chat_ui, &mut terminal, settings, &settings_path);
    let restored = ui::restore_terminal(terminal);
    shutdown_result(result, restored)
}

/// Logs how the session ended. When both the loop and the terminal restore
/// fail, the loop's error is the one returned.
fn shutdown_result(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        error!("NeonChat exited with error: {:#}", e);
    }
    match restored {
        Err(e) => {
            error!("Failed to restore terminal: {:#}", e);
            result.and(Err(e))
        }
        Ok(()) => {
            if result.is_ok() {
                info!("NeonChat shut down cleanly");
            }
            result
        }
    }
}

fn run_main_loop(
    chat_ui: &mut ChatUI,
    terminal: &mut ui::Terminal<ui::CrosstermBackend<io::Stdout>>,
    mut settings: Settings,
    settings_path: &Path,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|f| chat_ui.draw(f))?;

        let delivered = chat_ui.deliver_replies();
        if delivered > 0 {
            debug!("Delivered {} auto-replies", delivered);
        }

        match chat_ui.poll_input()? {
            UiAction::Quit => {
                info!("Quit requested");
                return Ok(());
            }
            UiAction::ThemeChanged(theme) => {
                settings.theme = theme;
                if let Err(e) = settings::save_settings(settings_path, &settings) {
                    warn!("Failed to save theme {}: {}", theme, e);
                }
            }
            UiAction::None => {}
        }
    }
}
