// Lead source capture
//
// Attribution fields are read from the hosting environment at submit time,
// not at wizard mount, so a lead carries whatever referrer/UTM context is
// current when the user actually submits.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::WizardConfig;

/// Hosting environment view consumed by source capture.
/// Production uses [`EnvContext`]; tests use a stub.
pub trait BrowsingContext: Send + Sync {
    /// Referrer string, empty when unavailable.
    fn referrer(&self) -> String;

    /// The landing URL whose query string carries UTM parameters, if known.
    fn landing_url(&self) -> Option<Url>;
}

/// Channel/campaign/referrer/UTM attribution attached to a submission.
/// Every field is an empty string when unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSource {
    pub channel: String,
    pub campaign: String,
    pub referrer: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
}

impl LeadSource {
    /// Capture attribution from the hosting config strings plus the browsing
    /// context. Called once per submission attempt.
    pub fn capture(channel: &str, campaign: &str, browser: &dyn BrowsingContext) -> Self {
        let mut source = LeadSource {
            channel: channel.to_string(),
            campaign: campaign.to_string(),
            referrer: browser.referrer(),
            ..LeadSource::default()
        };

        if let Some(url) = browser.landing_url() {
            for (key, value) in url.query_pairs() {
                match key.as_ref() {
                    "utm_source" => source.utm_source = value.into_owned(),
                    "utm_medium" => source.utm_medium = value.into_owned(),
                    "utm_campaign" => source.utm_campaign = value.into_owned(),
                    _ => {}
                }
            }
        }

        source
    }
}

/// Production context for the terminal binary: referrer and landing URL come
/// from configuration (a phone agent pastes the caller's landing link).
pub struct EnvContext {
    referrer: String,
    landing_url: Option<Url>,
}

impl EnvContext {
    pub fn from_config(cfg: &WizardConfig) -> Self {
        let landing_url = cfg.landing_url.as_deref().and_then(|raw| {
            match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("Ignoring unparseable landing URL {:?}: {}", raw, e);
                    None
                }
            }
        });
        Self {
            referrer: cfg.referrer.clone().unwrap_or_default(),
            landing_url,
        }
    }
}

impl BrowsingContext for EnvContext {
    fn referrer(&self) -> String {
        self.referrer.clone()
    }

    fn landing_url(&self) -> Option<Url> {
        self.landing_url.clone()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubContext;
    use super::*;

    #[test]
    fn capture_extracts_utm_parameters() {
        let ctx = StubContext::with_landing(
            "https://summitridgeroofing.example/estimate?utm_source=google&utm_medium=cpc&utm_campaign=spring-storm&gclid=abc",
        );
        let source = LeadSource::capture("website", "spring-2026", &ctx);
        assert_eq!(source.channel, "website");
        assert_eq!(source.campaign, "spring-2026");
        assert_eq!(source.referrer, "https://www.google.com/");
        assert_eq!(source.utm_source, "google");
        assert_eq!(source.utm_medium, "cpc");
        assert_eq!(source.utm_campaign, "spring-storm");
    }

    #[test]
    fn capture_defaults_to_empty_strings() {
        let source = LeadSource::capture("", "", &StubContext::empty());
        assert_eq!(source, LeadSource::default());
    }

    #[test]
    fn env_context_ignores_bad_landing_url() {
        let cfg = WizardConfig {
            landing_url: Some("not a url".to_string()),
            referrer: Some("https://maps.example/".to_string()),
            ..WizardConfig::default()
        };
        let ctx = EnvContext::from_config(&cfg);
        assert!(ctx.landing_url().is_none());
        assert_eq!(ctx.referrer(), "https://maps.example/");
    }
}
