// Lead submission client
//
// One JSON POST per submit() invocation, no automatic retry: the wizard
// stays on the contact step after a failure, so retrying is a deliberate
// user action. Causes are logged here; callers only ever see the generic
// user-facing message.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::models::payload::{SubmissionAck, SubmissionPayload};
use crate::validation::SUBMIT_FAILED_MESSAGE;

/// Default request timeout; bounds a hung submission since there is no
/// cancellation path. Overridable through `request_timeout_secs` in config.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid lead endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lead endpoint returned HTTP {0}")]
    Status(u16),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SubmissionError {
    /// The one message shown to users regardless of cause. The specific
    /// cause is only suitable for logs.
    pub fn user_message(&self) -> &'static str {
        SUBMIT_FAILED_MESSAGE
    }
}

/// Transport seam for lead delivery.
/// Production code uses [`HttpLeadTransport`]; tests use a recording stub.
#[async_trait]
pub trait LeadTransport: Send + Sync {
    /// Deliver one lead. Exactly one network call per invocation.
    async fn post_lead(&self, payload: &SubmissionPayload)
        -> Result<SubmissionAck, SubmissionError>;
}

/// Lenient view of the endpoint's success body; nothing in it is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AckBody {
    lead_id: Option<String>,
}

pub struct HttpLeadTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpLeadTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SubmissionError> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl LeadTransport for HttpLeadTransport {
    async fn post_lead(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionAck, SubmissionError> {
        log::debug!(
            "Submitting lead for {} / {} to {}",
            crate::utils::logging::mask_email(&payload.form.email),
            crate::utils::logging::mask_phone(&payload.form.phone),
            self.endpoint
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Lead submission transport failure: {}", e);
                SubmissionError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Lead endpoint rejected submission: HTTP {}", status);
            return Err(SubmissionError::Status(status.as_u16()));
        }

        // Success bodies are optional and parsed leniently; only receipt of
        // the success status matters to the wizard.
        let lead_id = response
            .json::<AckBody>()
            .await
            .ok()
            .and_then(|body| body.lead_id);

        log::info!(
            "Lead accepted: HTTP {}{}",
            status.as_u16(),
            lead_id
                .as_deref()
                .map(|id| format!(", leadId={}", id))
                .unwrap_or_default()
        );

        Ok(SubmissionAck {
            status: status.as_u16(),
            lead_id,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Stub transport that records every payload it receives and replays a
    /// queue of prepared outcomes (defaulting to HTTP 200 acks).
    pub struct RecordingTransport {
        outcomes: Mutex<VecDeque<Result<SubmissionAck, SubmissionError>>>,
        posts: Mutex<Vec<serde_json::Value>>,
    }

    impl RecordingTransport {
        pub fn accepting() -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::new()),
                posts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_with_status(status: u16) -> Self {
            let stub = Self::accepting();
            stub.push_outcome(Err(SubmissionError::Status(status)));
            stub
        }

        pub fn push_outcome(&self, outcome: Result<SubmissionAck, SubmissionError>) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }

        pub fn posts(&self) -> Vec<serde_json::Value> {
            self.posts.lock().unwrap().clone()
        }

        pub fn post_count(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LeadTransport for RecordingTransport {
        async fn post_lead(
            &self,
            payload: &SubmissionPayload,
        ) -> Result<SubmissionAck, SubmissionError> {
            let body = serde_json::to_value(payload).expect("payload serializes");
            self.posts.lock().unwrap().push(body);
            self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(SubmissionAck {
                status: 200,
                lead_id: None,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use crate::models::form::FormData;
    use crate::models::payload::{FormInteractions, WebsiteEngagement, PROGRESSIVE_STEPS};
    use crate::source::LeadSource;

    fn sample_payload() -> SubmissionPayload {
        SubmissionPayload {
            form: FormData::default(),
            source: LeadSource::default(),
            form_interactions: FormInteractions {
                completion_rate: 0.25,
                field_focus_time_seconds: 0.0,
                progressive_steps: PROGRESSIVE_STEPS,
            },
            website_engagement: WebsiteEngagement::placeholder(0),
        }
    }

    #[test]
    fn endpoint_must_be_a_valid_url() {
        assert!(HttpLeadTransport::new("not a url", DEFAULT_REQUEST_TIMEOUT).is_err());
        assert!(HttpLeadTransport::new(
            "https://leads.summitridgeroofing.example/api/leads",
            DEFAULT_REQUEST_TIMEOUT
        )
        .is_ok());
    }

    #[test]
    fn every_cause_maps_to_the_same_user_message() {
        let err = SubmissionError::Status(500);
        assert_eq!(err.user_message(), SUBMIT_FAILED_MESSAGE);
        let err = SubmissionError::Endpoint(url::ParseError::EmptyHost);
        assert_eq!(err.user_message(), SUBMIT_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn recording_stub_captures_payload_and_defaults_to_ack() {
        let stub = RecordingTransport::accepting();
        let ack = stub.post_lead(&sample_payload()).await.unwrap();
        assert_eq!(ack.status, 200);
        assert_eq!(stub.post_count(), 1);
        assert_eq!(stub.posts()[0]["formInteractions"]["progressiveSteps"], 3);
    }

    #[tokio::test]
    async fn recording_stub_replays_prepared_failures() {
        let stub = RecordingTransport::failing_with_status(500);
        let err = stub.post_lead(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Status(500)));
        // Queue exhausted: subsequent posts succeed.
        assert!(stub.post_lead(&sample_payload()).await.is_ok());
    }
}
