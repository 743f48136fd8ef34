use anyhow::Result;
use std::path::PathBuf;

/// Resolve the log folder (absolute path), creating it if needed.
/// Prefers the per-user data directory; falls back to `./logs` when the
/// platform offers none (containers, stripped-down environments).
pub fn resolve_log_folder() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    let log_dir = base.join("lead-wizard").join("logs");
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
    Ok(log_dir)
}
