// Summit Ridge Roofing lead capture wizard
// Main library entry point

pub mod config;
pub mod engagement;
pub mod models;
pub mod source;
pub mod submission;
pub mod tui;
pub mod utils;
pub mod validation;
pub mod wizard;

use anyhow::Result;
use log::error;

/// Initialize logging system with dual format (JSON + human-readable)
pub fn init_logging(with_stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = utils::paths::resolve_log_folder()?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("lead-wizard-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("lead-wizard-{}.txt", timestamp));

    // Configure dual-format logging:
    // - JSON format to .log file
    // - Human-readable format to .txt file
    // - Optional: human-readable to stdout (disabled for TUI to avoid corrupting the terminal UI)
    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &format!("{}", message),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &format!("{}", message),
                    );
                    out.finish(format_args!("{}\n", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &format!("{}", message),
                    );
                    out.finish(format_args!("{}\n", txt_line));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    log::info!("Logging initialized, log directory: {:?}", log_dir);
    Ok(())
}

/// Run the interactive terminal wizard.
pub fn run_tui(cfg: config::WizardConfig) -> Result<()> {
    if let Err(e) = tui::run(cfg) {
        error!("TUI wizard failed: {}", e);
        return Err(e);
    }
    Ok(())
}

/// Render a single wizard page on a test backend and exit. Non-interactive;
/// used by automated smoke checks.
pub fn run_tui_smoke(cfg: config::WizardConfig, target: Option<String>) -> Result<()> {
    tui::smoke(cfg, target)
}
