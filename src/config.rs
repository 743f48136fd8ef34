// Runtime configuration
//
// Layered sources, lowest to highest precedence: built-in defaults, an
// optional `lead-wizard.toml` next to the working directory, then
// `LEAD_WIZARD_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::submission::DEFAULT_REQUEST_TIMEOUT;

pub const DEFAULT_ENDPOINT_URL: &str = "https://leads.summitridgeroofing.example/api/leads";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Lead-capture endpoint receiving the submission POST.
    pub endpoint_url: String,
    /// Hosting variant string (display/copy selection, not wire data).
    pub variant: String,
    /// Attribution channel written to `source.channel`.
    pub source: String,
    /// Attribution campaign written to `source.campaign`.
    pub campaign: String,
    /// Submission request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Landing URL whose query string carries UTM parameters, if known.
    pub landing_url: Option<String>,
    /// Referrer to attribute the lead to, if known.
    pub referrer: Option<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            variant: "standard".to_string(),
            source: "website".to_string(),
            campaign: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            landing_url: None,
            referrer: None,
        }
    }
}

impl WizardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load configuration. An explicit `--config` path must exist; the implicit
/// `lead-wizard.toml` is optional.
pub fn load(explicit_path: Option<&Path>) -> Result<WizardConfig> {
    let mut builder = Config::builder();
    builder = match explicit_path {
        Some(path) => builder.add_source(File::from(path)),
        None => builder.add_source(File::with_name("lead-wizard").required(false)),
    };
    builder = builder.add_source(Environment::with_prefix("LEAD_WIZARD"));

    builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize::<WizardConfig>()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let cfg = WizardConfig::default();
        assert_eq!(cfg.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(cfg.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert!(cfg.landing_url.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wizard.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "endpoint_url = \"https://staging.example/api/leads\"\ncampaign = \"spring-2026\"\nrequest_timeout_secs = 5"
        )
        .unwrap();

        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.endpoint_url, "https://staging.example/api/leads");
        assert_eq!(cfg.campaign, "spring-2026");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
        // Untouched keys keep their defaults.
        assert_eq!(cfg.source, "website");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = WizardConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: WizardConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
