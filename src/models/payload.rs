// Outbound lead submission models
//
// The payload is derived fresh from the form snapshot at submit time and is
// never mutated in place. Wire format is camelCase JSON; the lead-capture
// endpoint is the only consumer.

use serde::{Deserialize, Serialize};

use super::form::FormData;
use crate::source::LeadSource;

/// Number of wizard screens, reported to lead scoring as a constant.
pub const PROGRESSIVE_STEPS: u32 = 3;

/// Derived engagement signals attached to a submission. Non-authoritative:
/// used for downstream lead scoring, never for validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInteractions {
    /// Filled-field count over the fixed declared-field count, in [0, 1].
    pub completion_rate: f64,
    /// Total recorded field dwell time, in seconds.
    pub field_focus_time_seconds: f64,
    pub progressive_steps: u32,
}

/// Site-level engagement placeholders. Not wired to real analytics; the
/// endpoint expects the keys so they are populated with derived stand-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteEngagement {
    pub pages_visited: u32,
    pub time_on_site_minutes: f64,
    pub return_visits: u32,
}

impl WebsiteEngagement {
    pub fn placeholder(elapsed_ms: u128) -> Self {
        Self {
            pages_visited: 1,
            time_on_site_minutes: elapsed_ms as f64 / 60_000.0,
            return_visits: 0,
        }
    }
}

/// The single outbound record POSTed to the lead-capture endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub form: FormData,
    pub source: LeadSource,
    pub form_interactions: FormInteractions,
    pub website_engagement: WebsiteEngagement,
}

/// Acknowledgement of a successful submission. Only receipt matters to the
/// state machine; `lead_id` is parsed leniently for diagnostics when the
/// endpoint provides one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAck {
    pub status: u16,
    pub lead_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::ProjectType;

    #[test]
    fn payload_flattens_form_fields_to_top_level() {
        let mut form = FormData::default();
        form.project_type = Some(ProjectType::StormDamage);
        let payload = SubmissionPayload {
            form,
            source: LeadSource::default(),
            form_interactions: FormInteractions {
                completion_rate: 0.5,
                field_focus_time_seconds: 1.5,
                progressive_steps: PROGRESSIVE_STEPS,
            },
            website_engagement: WebsiteEngagement::placeholder(120_000),
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["projectType"], "storm-damage");
        assert_eq!(v["formInteractions"]["progressiveSteps"], 3);
        assert_eq!(v["websiteEngagement"]["pagesVisited"], 1);
        assert!((v["websiteEngagement"]["timeOnSiteMinutes"].as_f64().unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(v["source"]["utmSource"], "");
    }
}
