//! Headless terminal wizard for lead capture.
//!
//! Layout (mirrors the hosted web wizard):
//! - Centered window frame titled "Summit Ridge Roofing"
//! - Left banner panel
//! - Main content panel with one classic wizard page per step
//! - Bottom button row: [ Back ] [ Next ] [ Cancel ]
//! - Modal cancel confirmation
//!
//! Note: Logging is file-only in TUI mode (stdout logging is disabled) to
//! avoid corrupting the terminal UI.

use crate::config::WizardConfig;
use crate::models::form::{
    BudgetRange, PreferredContact, ProjectType, PropertyType, RoofIssue, Urgency,
};
use crate::models::payload::SubmissionAck;
use crate::source::EnvContext;
use crate::submission::{HttpLeadTransport, LeadTransport, SubmissionError};
use crate::validation::SUBMIT_ERROR_KEY;
use crate::wizard::{SubmissionStatus, WizardSession, WizardStep, MAX_FORM_STEP};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::info;
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use uuid::Uuid;

const ASCII_LOGO: &str = r#"        /\
       /  \
      / /\ \
     / /  \ \
    / / /\ \ \
   /_/_/  \_\_\
   SUMMIT RIDGE
     ROOFING"#;

const TAGLINE: &str = "Free estimates.\nLicensed & insured.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Project,
    Details,
    Contact,
    Submitting,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Field(usize),
    Button(ButtonFocus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    ConfirmCancel,
}

#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor = (self.cursor + 1).min(self.value.len());
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 && !self.value.is_empty() {
                    let idx = self.cursor - 1;
                    self.value.remove(idx);
                    self.cursor = idx;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() && !self.value.is_empty() {
                    self.value.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }
}

enum UiMsg {
    SubmitFinished(Result<SubmissionAck, SubmissionError>),
}

struct TuiState {
    cfg: WizardConfig,
    session: WizardSession,
    focus: FocusTarget,
    modal: Option<Modal>,
    modal_yes: bool,
    quit: bool,
    issue_cursor: usize,
    roof_age: TextInput,
    first_name: TextInput,
    last_name: TextInput,
    email: TextInput,
    phone: TextInput,
    street: TextInput,
    city: TextInput,
    zip: TextInput,
    reference_code: Option<String>,
    submitting_since: Option<Instant>,
}

impl TuiState {
    fn new(cfg: WizardConfig) -> Self {
        let mut session = WizardSession::new(cfg.source.clone(), cfg.campaign.clone());
        session.record_focus("projectType");
        Self {
            cfg,
            session,
            focus: FocusTarget::Field(0),
            modal: None,
            modal_yes: false,
            quit: false,
            issue_cursor: 0,
            roof_age: TextInput::default(),
            first_name: TextInput::default(),
            last_name: TextInput::default(),
            email: TextInput::default(),
            phone: TextInput::default(),
            street: TextInput::default(),
            city: TextInput::default(),
            zip: TextInput::default(),
            reference_code: None,
            submitting_since: None,
        }
    }
}

fn page(state: &TuiState) -> Page {
    match state.session.current_step() {
        WizardStep::Submitted => Page::Complete,
        WizardStep::Contact if state.session.submission_status() == SubmissionStatus::InFlight => {
            Page::Submitting
        }
        WizardStep::Project => Page::Project,
        WizardStep::Details => Page::Details,
        WizardStep::Contact => Page::Contact,
    }
}

/// Wire field names per page, in focus order. Drives both focus cycling and
/// the engagement focus/blur bookkeeping.
fn field_names(page: Page) -> &'static [&'static str] {
    match page {
        Page::Project => &["projectType", "urgency", "propertyType"],
        Page::Details => &["currentRoofAge", "issues", "budgetRange"],
        Page::Contact => &[
            "firstName",
            "lastName",
            "email",
            "phone",
            "street",
            "city",
            "zipCode",
            "preferredContact",
        ],
        Page::Submitting | Page::Complete => &[],
    }
}

fn can_go_back(page: Page) -> bool {
    matches!(page, Page::Details | Page::Contact)
}

fn can_go_next(page: Page) -> bool {
    !matches!(page, Page::Submitting)
}

fn can_cancel(page: Page) -> bool {
    !matches!(page, Page::Submitting | Page::Complete)
}

fn next_label(page: Page) -> &'static str {
    match page {
        Page::Contact => "Submit",
        Page::Complete => "Finish",
        _ => "Next",
    }
}

/// Cycle an optional catalog selection. `None` enters the catalog at either
/// end depending on direction.
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let idx = current.and_then(|c| all.iter().position(|x| *x == c));
    let next = match (idx, forward) {
        (None, true) => 0,
        (None, false) => all.len() - 1,
        (Some(i), true) => (i + 1) % all.len(),
        (Some(i), false) => (i + all.len() - 1) % all.len(),
    };
    Some(all[next])
}

/// Move focus, recording blur/focus on the wizard session so dwell times
/// reflect actual terminal navigation.
fn set_focus(state: &mut TuiState, target: FocusTarget) {
    let names = field_names(page(state));
    if let FocusTarget::Field(i) = state.focus {
        if let Some(name) = names.get(i) {
            state.session.record_blur(name);
        }
    }
    if let FocusTarget::Field(i) = target {
        if let Some(name) = names.get(i) {
            state.session.record_focus(name);
        }
    }
    state.focus = target;
}

fn focus_ring(page: Page) -> Vec<FocusTarget> {
    let mut ring: Vec<FocusTarget> = (0..field_names(page).len())
        .map(FocusTarget::Field)
        .collect();
    if can_go_back(page) {
        ring.push(FocusTarget::Button(ButtonFocus::Back));
    }
    ring.push(FocusTarget::Button(ButtonFocus::Next));
    if can_cancel(page) {
        ring.push(FocusTarget::Button(ButtonFocus::Cancel));
    }
    ring
}

fn tab_focus(state: &mut TuiState, forward: bool) {
    let ring = focus_ring(page(state));
    if ring.is_empty() {
        return;
    }
    let pos = ring.iter().position(|t| *t == state.focus).unwrap_or(0);
    let next = if forward {
        (pos + 1) % ring.len()
    } else {
        (pos + ring.len() - 1) % ring.len()
    };
    set_focus(state, ring[next]);
}

fn move_field_focus(state: &mut TuiState, down: bool) {
    let count = field_names(page(state)).len();
    if count == 0 {
        return;
    }
    match state.focus {
        FocusTarget::Field(i) => {
            let next = if down {
                (i + 1) % count
            } else {
                (i + count - 1) % count
            };
            set_focus(state, FocusTarget::Field(next));
        }
        FocusTarget::Button(_) => set_focus(state, FocusTarget::Field(0)),
    }
}

fn sync_roof_age(state: &mut TuiState) {
    let parsed = state.roof_age.value.trim().parse::<u32>().ok();
    state.session.update(|d| d.current_roof_age = parsed);
}

fn sync_contact_field(state: &mut TuiState, index: usize) {
    let value = match index {
        0 => state.first_name.value.clone(),
        1 => state.last_name.value.clone(),
        2 => state.email.value.clone(),
        3 => state.phone.value.clone(),
        4 => state.street.value.clone(),
        5 => state.city.value.clone(),
        6 => state.zip.value.clone(),
        _ => return,
    };
    state.session.update(|d| match index {
        0 => d.first_name = value,
        1 => d.last_name = value,
        2 => d.email = value,
        3 => d.phone = value,
        4 => d.address.street = value,
        5 => d.address.city = value,
        6 => d.address.zip_code = value,
        _ => {}
    });
}

fn contact_input_mut(state: &mut TuiState, index: usize) -> Option<&mut TextInput> {
    match index {
        0 => Some(&mut state.first_name),
        1 => Some(&mut state.last_name),
        2 => Some(&mut state.email),
        3 => Some(&mut state.phone),
        4 => Some(&mut state.street),
        5 => Some(&mut state.city),
        6 => Some(&mut state.zip),
        _ => None,
    }
}

fn start_submit(state: &mut TuiState, tx: &mpsc::Sender<UiMsg>) {
    // Land focus on the button so the active field's dwell time is closed
    // out before metrics are derived.
    set_focus(state, FocusTarget::Button(ButtonFocus::Next));

    let browser = EnvContext::from_config(&state.cfg);
    let Some(payload) = state.session.begin_submit(&browser) else {
        // Validation refused it; errors render on the contact page.
        return;
    };
    state.submitting_since = Some(Instant::now());

    let endpoint = state.cfg.endpoint_url.clone();
    let timeout = state.cfg.request_timeout();
    let tx = tx.clone();
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build();
        let result = match rt {
            Ok(rt) => match HttpLeadTransport::new(&endpoint, timeout) {
                Ok(transport) => rt.block_on(transport.post_lead(&payload)),
                Err(e) => Err(e),
            },
            Err(e) => Err(SubmissionError::Io(e)),
        };
        let _ = tx.send(UiMsg::SubmitFinished(result));
    });
}

fn drain_messages(state: &mut TuiState, rx: &mpsc::Receiver<UiMsg>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            UiMsg::SubmitFinished(result) => {
                state.session.finish_submit(result);
                state.submitting_since = None;
                if state.session.submission_status() == SubmissionStatus::Success {
                    // Cosmetic reference code for the confirmation screen,
                    // not a server correlation id.
                    let code = Uuid::new_v4().simple().to_string();
                    state.reference_code = Some(format!("SRR-{}", code[..8].to_uppercase()));
                }
                state.focus = FocusTarget::Button(ButtonFocus::Next);
            }
        }
    }
}

fn button_action(state: &mut TuiState, button: ButtonFocus, tx: &mpsc::Sender<UiMsg>) {
    let current = page(state);
    match button {
        ButtonFocus::Back => {
            if can_go_back(current) {
                state.session.retreat();
                set_focus(state, FocusTarget::Field(0));
            }
        }
        ButtonFocus::Next => match current {
            Page::Project | Page::Details => {
                let before = state.session.step_number();
                state.session.advance();
                if state.session.step_number() != before {
                    set_focus(state, FocusTarget::Field(0));
                }
            }
            Page::Contact => start_submit(state, tx),
            Page::Complete => state.quit = true,
            Page::Submitting => {}
        },
        ButtonFocus::Cancel => {
            if can_cancel(current) {
                state.modal = Some(Modal::ConfirmCancel);
                state.modal_yes = false;
            }
        }
    }
}

fn handle_key(state: &mut TuiState, code: KeyCode, tx: &mpsc::Sender<UiMsg>) {
    if state.modal == Some(Modal::ConfirmCancel) {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => state.modal_yes = !state.modal_yes,
            KeyCode::Enter => {
                if state.modal_yes {
                    info!("Wizard cancelled by user");
                    state.quit = true;
                } else {
                    state.modal = None;
                }
            }
            KeyCode::Esc => state.modal = None,
            _ => {}
        }
        return;
    }

    let current = page(state);

    if code == KeyCode::Esc {
        if current == Page::Complete {
            state.quit = true;
        } else if can_cancel(current) {
            state.modal = Some(Modal::ConfirmCancel);
            state.modal_yes = false;
        }
        return;
    }

    if code == KeyCode::Tab {
        tab_focus(state, true);
        return;
    }
    if code == KeyCode::BackTab {
        tab_focus(state, false);
        return;
    }
    // Up/Down moves among fields everywhere except inside the Details page
    // issue list, which handles them itself.
    let details_field_focus = current == Page::Details && matches!(state.focus, FocusTarget::Field(_));
    if matches!(code, KeyCode::Up | KeyCode::Down) && !details_field_focus {
        move_field_focus(state, code == KeyCode::Down);
        return;
    }

    if let FocusTarget::Button(b) = state.focus {
        match code {
            KeyCode::Enter => button_action(state, b, tx),
            KeyCode::Left | KeyCode::Right => tab_focus(state, code == KeyCode::Right),
            _ => {}
        }
        return;
    }

    let FocusTarget::Field(index) = state.focus else {
        return;
    };

    match current {
        Page::Project => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                let forward = code != KeyCode::Left;
                state.session.update(|d| match index {
                    0 => d.project_type = cycle(&ProjectType::ALL, d.project_type, forward),
                    1 => d.urgency = cycle(&Urgency::ALL, d.urgency, forward),
                    2 => d.property_type = cycle(&PropertyType::ALL, d.property_type, forward),
                    _ => {}
                });
            }
            KeyCode::Enter => tab_focus(state, true),
            _ => {}
        },
        Page::Details => match index {
            0 => match code {
                KeyCode::Up | KeyCode::Down => move_field_focus(state, code == KeyCode::Down),
                KeyCode::Char(c) if !c.is_ascii_digit() => {}
                KeyCode::Enter => tab_focus(state, true),
                other => {
                    if state.roof_age.handle_key(other) {
                        sync_roof_age(state);
                    }
                }
            },
            1 => match code {
                KeyCode::Up => {
                    if state.issue_cursor == 0 {
                        move_field_focus(state, false);
                    } else {
                        state.issue_cursor -= 1;
                    }
                }
                KeyCode::Down => {
                    if state.issue_cursor + 1 >= RoofIssue::ALL.len() {
                        move_field_focus(state, true);
                    } else {
                        state.issue_cursor += 1;
                    }
                }
                KeyCode::Char(' ') => {
                    let issue = RoofIssue::ALL[state.issue_cursor];
                    state.session.update(|d| d.toggle_issue(issue));
                }
                KeyCode::Enter => tab_focus(state, true),
                _ => {}
            },
            2 => match code {
                KeyCode::Up | KeyCode::Down => move_field_focus(state, code == KeyCode::Down),
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    let forward = code != KeyCode::Left;
                    state.session.update(|d| {
                        d.budget_range = cycle(&BudgetRange::ALL, d.budget_range, forward)
                    });
                }
                KeyCode::Enter => tab_focus(state, true),
                _ => {}
            },
            _ => {}
        },
        Page::Contact => {
            if index == 7 {
                match code {
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                        let forward = code != KeyCode::Left;
                        state.session.update(|d| {
                            d.preferred_contact =
                                cycle(&PreferredContact::ALL, Some(d.preferred_contact), forward)
                                    .unwrap_or(d.preferred_contact)
                        });
                    }
                    KeyCode::Enter => tab_focus(state, true),
                    _ => {}
                }
            } else {
                match code {
                    KeyCode::Enter => tab_focus(state, true),
                    other => {
                        let handled = contact_input_mut(state, index)
                            .map(|input| input.handle_key(other))
                            .unwrap_or(false);
                        if handled {
                            sync_contact_field(state, index);
                        }
                    }
                }
            }
        }
        Page::Submitting | Page::Complete => {}
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  ! {}", message),
        Style::default().fg(Color::Red),
    ))
}

fn selector_line(focused: bool, label: &str, value: String) -> Line<'static> {
    let marker = if focused { ">" } else { " " };
    let text = format!("{} {:<22} < {} >", marker, label, value);
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(text, style))
}

fn input_line(focused: bool, label: &str, input: &TextInput) -> Line<'static> {
    let marker = if focused { ">" } else { " " };
    let caret = if focused { "_" } else { "" };
    let text = format!("{} {:<22} {}{}", marker, label, input.value, caret);
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(text, style))
}

fn page_title(state: &TuiState) -> String {
    let step = state.session.current_step();
    match page(state) {
        Page::Submitting => "Submitting".to_string(),
        Page::Complete => step.label().to_string(),
        _ => format!(
            "Step {} of {}: {}",
            step.to_number(),
            MAX_FORM_STEP,
            step.label()
        ),
    }
}

fn project_page_lines(state: &TuiState) -> Vec<Line<'static>> {
    let data = state.session.data();
    let focused = |i: usize| state.focus == FocusTarget::Field(i);
    let mut lines = vec![
        Line::from("What can we help you with?"),
        Line::from(""),
        selector_line(
            focused(0),
            "Project type",
            data.project_type
                .map(|v| v.label().to_string())
                .unwrap_or_else(|| "select".to_string()),
        ),
        selector_line(
            focused(1),
            "How soon?",
            data.urgency
                .map(|v| v.label().to_string())
                .unwrap_or_else(|| "select".to_string()),
        ),
        selector_line(
            focused(2),
            "Property type",
            data.property_type
                .map(|v| v.label().to_string())
                .unwrap_or_else(|| "select".to_string()),
        ),
        Line::from(""),
        Line::from("Left/Right changes a selection. Tab moves on."),
    ];
    for key in ["projectType", "urgency", "propertyType"] {
        if let Some(msg) = state.session.errors().get(key) {
            lines.push(error_line(msg));
        }
    }
    lines
}

fn details_page_lines(state: &TuiState) -> Vec<Line<'static>> {
    let data = state.session.data();
    let focused = |i: usize| state.focus == FocusTarget::Field(i);
    let mut lines = vec![
        Line::from("Tell us about the roof (all optional)."),
        Line::from(""),
        input_line(focused(0), "Roof age (years)", &state.roof_age),
        Line::from(""),
        Line::from("  Known issues (Space toggles):"),
    ];
    for (i, issue) in RoofIssue::ALL.iter().enumerate() {
        let cursor = if focused(1) && state.issue_cursor == i {
            ">"
        } else {
            " "
        };
        let check = if data.has_issue(*issue) { "x" } else { " " };
        lines.push(Line::from(format!(
            "  {} [{}] {}",
            cursor,
            check,
            issue.label()
        )));
    }
    lines.push(Line::from(""));
    lines.push(selector_line(
        focused(2),
        "Budget range",
        data.budget_range
            .map(|v| v.label().to_string())
            .unwrap_or_else(|| "select".to_string()),
    ));
    lines
}

fn contact_page_lines(state: &TuiState) -> Vec<Line<'static>> {
    let focused = |i: usize| state.focus == FocusTarget::Field(i);
    let mut lines = vec![
        Line::from("How do we reach you?"),
        Line::from(""),
        input_line(focused(0), "First name *", &state.first_name),
        input_line(focused(1), "Last name", &state.last_name),
        input_line(focused(2), "Email *", &state.email),
        input_line(focused(3), "Phone *", &state.phone),
        input_line(focused(4), "Street address", &state.street),
        input_line(focused(5), "City", &state.city),
        input_line(focused(6), "ZIP code *", &state.zip),
        selector_line(
            focused(7),
            "Preferred contact",
            state.session.data().preferred_contact.label().to_string(),
        ),
    ];
    for key in ["firstName", "email", "phone", "zipCode", SUBMIT_ERROR_KEY] {
        if let Some(msg) = state.session.errors().get(key) {
            lines.push(error_line(msg));
        }
    }
    lines
}

fn submitting_page_lines(state: &TuiState) -> Vec<Line<'static>> {
    let dots = state
        .submitting_since
        .map(|t| (t.elapsed().as_millis() / 300) % 4)
        .unwrap_or(0);
    vec![
        Line::from(""),
        Line::from(format!(
            "Submitting your request{}",
            ".".repeat(dots as usize)
        )),
        Line::from(""),
        Line::from("This usually takes a moment."),
    ]
}

fn complete_page_lines(state: &TuiState) -> Vec<Line<'static>> {
    let name = state.session.data().first_name.clone();
    let mut lines = vec![
        Line::from(format!("Thank you, {}!", name)),
        Line::from(""),
        Line::from("Your estimate request has been received."),
        Line::from("We'll contact you within one business day."),
        Line::from(""),
    ];
    if let Some(code) = &state.reference_code {
        lines.push(Line::from(format!("Reference: {}", code)));
    }
    lines
}

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &TuiState) {
    let window_area = centered_window(area, 96, 28);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Summit Ridge Roofing");
    f.render_widget(outer_block, window_area);

    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner);

    let body = rows[0];
    let buttons = rows[1];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)].as_ref())
        .split(body);

    let banner_block = Block::default().borders(Borders::ALL);
    let logo = Paragraph::new(format!("{}\n\n{}", ASCII_LOGO, TAGLINE))
        .block(banner_block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(logo, cols[0]);

    let lines = match page(state) {
        Page::Project => project_page_lines(state),
        Page::Details => details_page_lines(state),
        Page::Contact => contact_page_lines(state),
        Page::Submitting => submitting_page_lines(state),
        Page::Complete => complete_page_lines(state),
    };
    let content_block = Block::default()
        .borders(Borders::ALL)
        .title(page_title(state));
    let content = Paragraph::new(Text::from(lines))
        .block(content_block)
        .wrap(Wrap { trim: false });
    f.render_widget(content, cols[1]);

    draw_buttons(f, buttons, state);

    if state.modal == Some(Modal::ConfirmCancel) {
        draw_cancel_modal(f, window_area, state);
    }
}

fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let text = format!("[ {} ]", label);
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Span::styled(text, style)
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &TuiState) {
    let current = page(state);
    let back = button_text(
        "Back",
        state.focus == FocusTarget::Button(ButtonFocus::Back),
        can_go_back(current),
    );
    let next = button_text(
        next_label(current),
        state.focus == FocusTarget::Button(ButtonFocus::Next),
        can_go_next(current),
    );
    let cancel = button_text(
        "Cancel",
        state.focus == FocusTarget::Button(ButtonFocus::Cancel),
        can_cancel(current),
    );

    let line = Line::from(vec![back, Span::raw(" "), next, Span::raw(" "), cancel]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn draw_cancel_modal(f: &mut ratatui::Frame<'_>, window: Rect, state: &TuiState) {
    let modal_area = centered_window(window, 46, 7);
    f.render_widget(Clear, modal_area);
    let yes = button_text("Yes", state.modal_yes, true);
    let no = button_text("No", !state.modal_yes, true);
    let text = Text::from(vec![
        Line::from("Cancel your estimate request?"),
        Line::from(""),
        Line::from(vec![yes, Span::raw("   "), no]),
    ]);
    let block = Block::default().borders(Borders::ALL).title("Confirm");
    let p = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(p, modal_area);
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn run(cfg: WizardConfig) -> Result<()> {
    info!("Starting lead wizard TUI");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, cfg);
    restore_terminal(&mut terminal)?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cfg: WizardConfig) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut state = TuiState::new(cfg);
    let (tx, rx) = mpsc::channel::<UiMsg>();

    while !state.quit {
        drain_messages(&mut state, &rx);
        terminal.draw(|f| draw(f.size(), f, &state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut state, key.code, &tx),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Non-interactive smoke mode: render a single frame for a given page on a
/// test backend and exit. Used by automated checks.
pub fn smoke(cfg: WizardConfig, target: Option<String>) -> Result<()> {
    let target = target.unwrap_or_else(|| "project".to_string());
    let backend = TestBackend::new(96, 28);
    let mut terminal = Terminal::new(backend)?;
    let mut state = TuiState::new(cfg);

    let fill_step1 = |state: &mut TuiState| {
        state.session.update(|d| {
            d.project_type = Some(ProjectType::RoofRepair);
            d.urgency = Some(Urgency::WithinWeek);
            d.property_type = Some(PropertyType::Residential);
        });
    };
    let fill_contact = |state: &mut TuiState| {
        state.session.update(|d| {
            d.first_name = "Sam".to_string();
            d.email = "sam@example.com".to_string();
            d.phone = "3035550100".to_string();
            d.address.zip_code = "80202".to_string();
        });
    };

    match target.as_str() {
        "project" => {}
        "details" => {
            fill_step1(&mut state);
            state.session.advance();
        }
        "contact" => {
            fill_step1(&mut state);
            state.session.advance();
            state.session.advance();
        }
        "complete" => {
            fill_step1(&mut state);
            state.session.advance();
            state.session.advance();
            fill_contact(&mut state);
            let browser = EnvContext::from_config(&state.cfg);
            if state.session.begin_submit(&browser).is_some() {
                state.session.finish_submit(Ok(SubmissionAck {
                    status: 200,
                    lead_id: None,
                }));
            }
            state.reference_code = Some("SRR-SMOKE001".to_string());
        }
        other => anyhow::bail!("Unknown TUI smoke target: {}", other),
    }

    terminal.draw(|f| draw(f.size(), f, &state))?;
    println!("TUI smoke OK: page={}", target);
    Ok(())
}
