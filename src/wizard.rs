// Wizard state machine
//
// One WizardSession per mounted form. All transitions run to completion
// synchronously; the only suspension point is the network call inside
// submit(), and the InFlight status is the real guard against a second
// submission while one is outstanding (disabling a button is a presentation
// nicety, not the invariant).

use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::engagement::{self, Clock, SystemClock};
use crate::models::form::FormData;
use crate::models::payload::{SubmissionPayload, WebsiteEngagement};
use crate::source::{BrowsingContext, LeadSource};
use crate::submission::LeadTransport;
use crate::validation::{validate_step, ErrorMap, SUBMIT_ERROR_KEY};

/// First form screen, 1-based.
pub const MIN_STEP: u8 = 1;

/// Last form screen; step 4 is the terminal submitted state.
pub const MAX_FORM_STEP: u8 = 3;

/// The wizard screens. `Submitted` is terminal and only reachable through a
/// successful submission, never through `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Project,
    Details,
    Contact,
    Submitted,
}

impl WizardStep {
    pub fn to_number(self) -> u8 {
        match self {
            WizardStep::Project => 1,
            WizardStep::Details => 2,
            WizardStep::Contact => 3,
            WizardStep::Submitted => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Project => "Your Project",
            WizardStep::Details => "Roof Details",
            WizardStep::Contact => "Contact Info",
            WizardStep::Submitted => "Request Sent",
        }
    }

    /// Next form screen; `None` at the step-3 boundary (the clamp) and on the
    /// terminal state.
    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Project => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Contact),
            WizardStep::Contact | WizardStep::Submitted => None,
        }
    }

    /// Previous screen; `None` at the step-1 boundary.
    fn prev(self) -> Option<WizardStep> {
        match self {
            WizardStep::Project => None,
            WizardStep::Details => Some(WizardStep::Project),
            WizardStep::Contact => Some(WizardStep::Details),
            WizardStep::Submitted => Some(WizardStep::Contact),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    InFlight,
    Success,
    Failed,
}

pub type StepChangeHook = Box<dyn Fn(u8) + Send>;
pub type SubmitHook = Box<dyn Fn(&FormData) + Send>;

/// The mutable wizard session. Created once per form mount, destroyed with
/// the hosting view; nothing here persists across runs.
pub struct WizardSession {
    step: WizardStep,
    data: FormData,
    errors: ErrorMap,
    touched_fields: BTreeSet<String>,
    focus_started: HashMap<String, Instant>,
    focus_durations: HashMap<String, Duration>,
    status: SubmissionStatus,
    mounted_at: Instant,
    clock: Arc<dyn Clock>,
    // Hosting configuration captured at mount; referrer/UTM are read at
    // submit time instead (see begin_submit).
    channel: String,
    campaign: String,
    on_step_change: Option<StepChangeHook>,
    on_submit: Option<SubmitHook>,
}

impl WizardSession {
    pub fn new(channel: impl Into<String>, campaign: impl Into<String>) -> Self {
        Self::with_clock(channel, campaign, Arc::new(SystemClock))
    }

    pub fn with_clock(
        channel: impl Into<String>,
        campaign: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mounted_at = clock.now();
        Self {
            step: WizardStep::Project,
            data: FormData::default(),
            errors: ErrorMap::new(),
            touched_fields: BTreeSet::new(),
            focus_started: HashMap::new(),
            focus_durations: HashMap::new(),
            status: SubmissionStatus::Idle,
            mounted_at,
            clock,
            channel: channel.into(),
            campaign: campaign.into(),
            on_step_change: None,
            on_submit: None,
        }
    }

    /// Invoked with the new 1-based step number on every step change.
    pub fn set_on_step_change(&mut self, hook: StepChangeHook) {
        self.on_step_change = Some(hook);
    }

    /// Invoked with the final form snapshot on successful submission.
    pub fn set_on_submit(&mut self, hook: SubmitHook) {
        self.on_submit = Some(hook);
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn step_number(&self) -> u8 {
        self.step.to_number()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn submission_status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn touched_fields(&self) -> &BTreeSet<String> {
        &self.touched_fields
    }

    pub fn focus_durations(&self) -> &HashMap<String, Duration> {
        &self.focus_durations
    }

    /// Apply edits to the accumulated form data. Touches neither `errors`
    /// nor the current step.
    pub fn update<F: FnOnce(&mut FormData)>(&mut self, apply: F) {
        apply(&mut self.data);
    }

    /// Validate the current step and move forward on success. Past step 3
    /// the clamp is silent: the step re-validates and stays put. Refused
    /// entirely while a submission is in flight.
    pub fn advance(&mut self) {
        if self.status == SubmissionStatus::InFlight {
            warn!("Ignoring advance: a submission is already in flight");
            return;
        }
        let errors = validate_step(self.step, &self.data);
        if !errors.is_empty() {
            debug!(
                "Step {} blocked by {} validation error(s)",
                self.step.to_number(),
                errors.len()
            );
            self.errors = errors;
            return;
        }
        self.errors.clear();
        if let Some(next) = self.step.next() {
            self.set_step(next);
        }
    }

    /// Move back one screen, clamped at step 1. No validation runs and
    /// existing errors are left alone. Refused entirely while a submission
    /// is in flight.
    pub fn retreat(&mut self) {
        if self.status == SubmissionStatus::InFlight {
            warn!("Ignoring retreat: a submission is already in flight");
            return;
        }
        if let Some(prev) = self.step.prev() {
            self.set_step(prev);
        }
    }

    fn set_step(&mut self, step: WizardStep) {
        self.step = step;
        info!("Wizard moved to step {} ({})", step.to_number(), step.label());
        if let Some(hook) = &self.on_step_change {
            hook(step.to_number());
        }
    }

    /// Record the instant a field gained focus.
    pub fn record_focus(&mut self, field: &str) {
        self.focus_started.insert(field.to_string(), self.clock.now());
    }

    /// Record a blur: derive the dwell time when a matching focus exists
    /// (revisits overwrite the previous interval) and mark the field touched
    /// unconditionally. The touched set only ever grows.
    pub fn record_blur(&mut self, field: &str) {
        if let Some(started) = self.focus_started.remove(field) {
            let dwell = self.clock.now().saturating_duration_since(started);
            self.focus_durations.insert(field.to_string(), dwell);
        }
        self.touched_fields.insert(field.to_string());
    }

    /// Start a submission: enforce the in-flight guard, re-validate step 3,
    /// and on success mark the session in flight and return the payload
    /// snapshot for delivery. Returns `None` when submission must not
    /// proceed; inspect `errors()` / `submission_status()` for why.
    ///
    /// Source attribution is captured here, at submit time, so the payload
    /// reflects the context current when the user actually submits.
    pub fn begin_submit(&mut self, browser: &dyn BrowsingContext) -> Option<SubmissionPayload> {
        if self.status == SubmissionStatus::InFlight {
            warn!("Ignoring submit: a submission is already in flight");
            return None;
        }
        if self.step != WizardStep::Contact {
            warn!(
                "Ignoring submit from step {}: only valid on step 3",
                self.step.to_number()
            );
            return None;
        }

        let errors = validate_step(WizardStep::Contact, &self.data);
        if !errors.is_empty() {
            debug!("Submit blocked by {} validation error(s)", errors.len());
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.status = SubmissionStatus::InFlight;

        let elapsed_ms = self
            .clock
            .now()
            .saturating_duration_since(self.mounted_at)
            .as_millis();

        Some(SubmissionPayload {
            form: self.data.clone(),
            source: LeadSource::capture(&self.channel, &self.campaign, browser),
            form_interactions: engagement::derive_interactions(&self.data, &self.focus_durations),
            website_engagement: WebsiteEngagement::placeholder(elapsed_ms),
        })
    }

    /// Apply the delivery outcome of a payload handed out by
    /// [`begin_submit`]. Success reaches the terminal step; failure keeps
    /// the user on step 3 with the generic retryable error.
    pub fn finish_submit(
        &mut self,
        result: Result<crate::models::payload::SubmissionAck, crate::submission::SubmissionError>,
    ) {
        if self.status != SubmissionStatus::InFlight {
            warn!("finish_submit without a matching begin_submit; ignoring");
            return;
        }
        match result {
            Ok(ack) => {
                info!("Lead submission acknowledged (HTTP {})", ack.status);
                self.status = SubmissionStatus::Success;
                self.set_step(WizardStep::Submitted);
                if let Some(hook) = &self.on_submit {
                    hook(&self.data);
                }
            }
            Err(e) => {
                warn!("Lead submission failed: {}", e);
                self.status = SubmissionStatus::Failed;
                self.errors
                    .insert(SUBMIT_ERROR_KEY.to_string(), e.user_message().to_string());
            }
        }
    }

    /// Validate, deliver, and apply the outcome in one call. The UI layer
    /// uses the begin/finish split instead so the network call can run off
    /// the event loop.
    pub async fn submit(
        &mut self,
        transport: &dyn LeadTransport,
        browser: &dyn BrowsingContext,
    ) -> SubmissionStatus {
        if let Some(payload) = self.begin_submit(browser) {
            let result = transport.post_lead(&payload).await;
            self.finish_submit(result);
        }
        self.status
    }
}
