use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Print the effective default configuration as TOML and exit 0.
    // Useful as a starting point for a `lead-wizard.toml`.
    if args.iter().any(|a| a == "--print-config") {
        let cfg = lead_wizard::config::WizardConfig::default();
        match toml::to_string_pretty(&cfg) {
            Ok(text) => {
                print!("{}", text);
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("Failed to render configuration: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    // Optional explicit config file: --config <path>
    let explicit_config: Option<PathBuf> = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let cfg = match lead_wizard::config::load(explicit_config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = lead_wizard::init_logging(false) {
        eprintln!("Failed to initialize logging: {}", e);
        // Not fatal; the wizard still works without log files.
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Renders a single frame for a specific page and exits 0.
    // Usage: --tui-smoke or --tui-smoke=project|details|contact|complete
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        return match lead_wizard::run_tui_smoke(cfg, target) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("TUI smoke failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match lead_wizard::run_tui(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Wizard error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
