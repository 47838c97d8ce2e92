//! Main TUI application state machine.
//!
//! Handles:
//! - Route navigation behind the login gate
//! - Input event handling per screen and per overlay
//! - Background API requests via the worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::fixture::FixtureAnalysis;
use crate::adapters::http::HttpPatientApi;
use crate::adapters::memory::InMemoryPatientApi;
use crate::adapters::sqlite::SqliteCredentialStore;
use crate::application::{
    resolve, sidebar_links, AuthError, NavLink, PatientList, PatientService, Profile, Route, SessionService,
    SurveyWizard,
};
use crate::config::Config;
use crate::domain::{MeetingAction, TwinPanels};
use crate::ports::PatientApi;

use super::ui::{
    about::render_about,
    detail::{render_detail, DetailState},
    form::FormState,
    login::{login_form, render_login, EMAIL, PASSWORD},
    modal::{
        add_patient_form, contact_update_from, delete_form, edit_patient_form, new_patient_from, render_modal,
        InfoModal, Modal,
    },
    patients::{render_patient_list, ListState},
    profile::{render_profile, ProfileState, CONFIRM_PASSWORD, CURRENT_PASSWORD, FIRST_NAME, LAST_NAME, NEW_PASSWORD},
    render_disclaimer,
    sidebar::render_sidebar,
    survey::{render_survey, SurveyState},
};
use super::worker::{ApiOutcome, ApiRequest, ApiResponse, ApiWorker, RequestKind};

type Api = Box<dyn PatientApi>;
type Patients = PatientService<Api, FixtureAnalysis>;
type Session = SessionService<SqliteCredentialStore>;
type Worker = ApiWorker<Api, FixtureAnalysis, SqliteCredentialStore>;

const SIDEBAR_WIDTH: u16 = 24;
const SURVEY_SUBMITTED: &str = "설문이 성공적으로 제출되었습니다.";
const PROFILE_UPDATED: &str = "프로필 정보가 성공적으로 업데이트되었습니다.";
const PASSWORD_CHANGED: &str = "비밀번호가 성공적으로 변경되었습니다. 보안을 위해 다시 로그인해 주세요.";
const SECTION_NOT_READY: &str = "준비 중인 메뉴입니다.";

/// Main application state
pub struct App {
    /// Current screen
    route: Route,

    /// Token presence, read on every navigation
    authenticated: bool,

    /// Whether the app should quit
    should_quit: bool,

    session: Session,
    patients: Patients,
    worker: Worker,
    profile: Profile,

    login: FormState,
    login_notice: Option<String>,
    list: ListState,
    detail: DetailState,
    survey: SurveyState,
    profile_state: ProfileState,
    about_scroll: u16,

    /// Overlay on top of the current screen
    modal: Option<Modal>,
}

impl App {
    /// Create the application from configuration.
    ///
    /// Uses the HTTP API, or the in-memory API seeded with sample patients
    /// when `offline` is set.
    ///
    /// # Errors
    /// Returns error if the state file or HTTP client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteCredentialStore::new(&config.state_path)?);

        let api: Api = if config.offline {
            tracing::info!("Offline mode: using in-memory patient API with sample patients");
            Box::new(InMemoryPatientApi::with_fixtures())
        } else {
            tracing::info!(base_url = %config.api_base_url, "Using patient API");
            Box::new(HttpPatientApi::new(config)?)
        };

        let patients = PatientService::new(Arc::new(api), Arc::new(FixtureAnalysis));
        Ok(Self::with_dependencies(patients, SessionService::new(store)))
    }

    /// Create application with injected services (Composition Root pattern).
    ///
    /// Lands on the root route, which resolves to the list or login.
    #[must_use]
    pub fn with_dependencies(patients: Patients, session: Session) -> Self {
        let worker = ApiWorker::new(patients.clone(), session.clone());
        let profile = Profile::default();
        let profile_state = ProfileState::new(&profile);

        let mut app = Self {
            route: Route::Root,
            authenticated: false,
            should_quit: false,
            session,
            patients,
            worker,
            profile,
            login: login_form(),
            login_notice: None,
            list: ListState::default(),
            detail: DetailState::default(),
            survey: SurveyState::default(),
            profile_state,
            about_scroll: 0,
            modal: None,
        };
        app.navigate(Route::Root);
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive while requests are in flight
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn sidebar(&self) -> Option<Vec<NavLink>> {
        sidebar_links(&self.route, self.authenticated)
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let mut content = chunks[0];
        if let Some(links) = self.sidebar() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[0]);
            render_sidebar(f, columns[0], &links, &self.route);
            content = columns[1];
        }

        match &self.route {
            Route::Login | Route::Root | Route::Logout => {
                render_login(f, content, &self.login, self.login_notice.as_deref());
            }
            Route::PatientList => render_patient_list(f, content, &self.list),
            Route::PatientDetail(_) => render_detail(f, content, &self.detail),
            Route::Survey(_) => render_survey(f, content, &self.survey),
            Route::Profile => render_profile(f, content, &self.profile_state),
            Route::About => render_about(f, content, self.about_scroll),
        }

        render_disclaimer(f, chunks[1]);

        if let Some(modal) = &self.modal {
            render_modal(f, area, modal);
        }
    }

    /// Go to a route through the login gate and start its fetch.
    fn navigate(&mut self, target: Route) {
        if target == Route::Logout {
            if let Err(e) = self.session.logout() {
                tracing::error!("Failed to clear session token: {e}");
            }
        }

        self.authenticated = self.session.is_authenticated();
        let route = resolve(target, self.authenticated);
        tracing::debug!(route = %route, "Navigating");

        self.route = route.clone();
        self.modal = None;

        match &route {
            Route::Login => {
                self.login = login_form();
            }
            Route::PatientList => {
                self.list.loading = true;
                self.list.error = None;
                self.list.editing_term = false;
                self.request(ApiRequest::LoadList);
            }
            Route::PatientDetail(id) => {
                self.detail = DetailState {
                    loading: true,
                    ..DetailState::default()
                };
                self.request(ApiRequest::LoadPatient(id.clone()));
            }
            Route::Survey(id) => {
                self.survey = SurveyState {
                    loading: true,
                    ..SurveyState::default()
                };
                self.request(ApiRequest::LoadPatient(id.clone()));
            }
            Route::Profile => {
                self.profile_state = ProfileState::new(&self.profile);
            }
            Route::About => {
                self.about_scroll = 0;
            }
            // `resolve` never lands on these
            Route::Root | Route::Logout => {}
        }
    }

    fn request(&mut self, request: ApiRequest) {
        // Detached; the outcome arrives over the worker channel.
        drop(self.worker.spawn(self.route.clone(), request));
    }

    /// Apply every finished request. Results for routes no longer shown are dropped.
    fn poll_worker(&mut self) {
        while let Some(outcome) = self.worker.try_recv() {
            if outcome.route != self.route {
                tracing::debug!(
                    issued_on = %outcome.route,
                    current = %self.route,
                    "Dropping result for a screen no longer shown"
                );
                continue;
            }
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: ApiOutcome) {
        let response = match outcome.result {
            Ok(response) => response,
            Err(message) => {
                self.apply_failure(outcome.kind, message);
                return;
            }
        };

        match response {
            ApiResponse::List(patients) => {
                self.list.roster = PatientList::new(patients);
                self.list.loading = false;
                self.list.error = None;
                self.list.clamp_selection();
            }
            ApiResponse::Patient(patient) => match self.route {
                Route::PatientDetail(_) => {
                    self.detail.panels = Some(self.patients.twin_panels(&patient));
                    self.detail.patient = Some(patient);
                    self.detail.loading = false;
                }
                Route::Survey(_) => {
                    self.survey.wizard = Some(SurveyWizard::new(patient));
                    self.survey.selected = 0;
                    self.survey.loading = false;
                }
                _ => {}
            },
            ApiResponse::Added(patient) => {
                // A refresh that finished first may already hold the record.
                if !self.list.roster.replace(patient.clone()) {
                    self.list.roster.append(patient);
                }
                self.modal = None;
            }
            ApiResponse::Updated(patient) => {
                if !self.list.roster.replace(patient) {
                    tracing::warn!("Updated patient is no longer in the list");
                }
                self.modal = None;
            }
            ApiResponse::Deleted(id) => {
                self.list.roster.remove(&id);
                self.list.clamp_selection();
                self.modal = None;
            }
            ApiResponse::SurveySubmitted(patient) => {
                self.navigate(Route::PatientDetail(patient.id));
                self.detail.notice = Some(SURVEY_SUBMITTED.to_string());
            }
        }
    }

    fn apply_failure(&mut self, kind: RequestKind, message: String) {
        match kind {
            RequestKind::Load => match self.route {
                Route::PatientList => {
                    self.list.loading = false;
                    self.list.error = Some(message);
                }
                Route::PatientDetail(_) => {
                    self.detail.loading = false;
                    self.detail.error = Some(message);
                }
                Route::Survey(_) => {
                    self.survey.loading = false;
                    self.survey.error = Some(message);
                }
                _ => {}
            },
            RequestKind::Add | RequestKind::Update => {
                // The form comes back when the alert is dismissed.
                let then = self.modal.take().map(|mut modal| {
                    if let Some(form) = modal.form_mut() {
                        form.submitting = false;
                    }
                    Box::new(modal)
                });
                self.modal = Some(Modal::Alert { message, then });
            }
            RequestKind::Delete => {
                self.modal = Some(Modal::alert(message));
            }
            RequestKind::Survey => {
                self.survey.submitting = false;
                self.modal = Some(Modal::alert(message));
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        if let Some(links) = self.sidebar() {
            if key == KeyCode::Char('d') && modifiers.contains(KeyModifiers::CONTROL) {
                self.modal = Some(Modal::info(InfoModal::Disclaimer));
                return;
            }
            if let KeyCode::F(n) = key {
                let link = usize::from(n).checked_sub(1).and_then(|idx| links.get(idx));
                match link.map(|l| (l.label, l.target.clone())) {
                    Some((_, Some(target))) => self.navigate(target),
                    Some((label, None)) => {
                        tracing::debug!(section = label, "Sidebar section has no screen yet");
                        self.modal = Some(Modal::alert(SECTION_NOT_READY));
                    }
                    None => {}
                }
                return;
            }
        }

        match self.route.clone() {
            Route::Login | Route::Root | Route::Logout => self.handle_login_key(key),
            Route::PatientList => self.handle_list_key(key),
            Route::PatientDetail(id) => self.handle_detail_key(key, &id),
            Route::Survey(id) => self.handle_survey_key(key, &id),
            Route::Profile => self.handle_profile_key(key),
            Route::About => self.handle_about_key(key),
        }
    }

    fn handle_form_key(form: &mut FormState, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right => form.cycle_choice(true),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        if key != KeyCode::Enter {
            Self::handle_form_key(&mut self.login, key);
            return;
        }

        match self.session.login(self.login.value(EMAIL), self.login.value(PASSWORD)) {
            Ok(()) => {
                self.login.clear_sensitive();
                self.login_notice = None;
                self.navigate(Route::PatientList);
            }
            Err(e) => self.login.error = Some(e.user_message().to_string()),
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        if self.list.editing_term {
            match key {
                KeyCode::Char(c) => self.list.filter.term.push(c),
                KeyCode::Backspace => {
                    self.list.filter.term.pop();
                }
                KeyCode::Enter | KeyCode::Esc => self.list.editing_term = false,
                _ => {}
            }
            self.list.clamp_selection();
            return;
        }

        match key {
            KeyCode::Up => self.list.select_prev(),
            KeyCode::Down => self.list.select_next(),
            KeyCode::Enter => {
                if let Some(id) = self.list.selected_patient().map(|p| p.id.clone()) {
                    self.navigate(Route::PatientDetail(id));
                }
            }
            KeyCode::Char('/') => self.list.editing_term = true,
            KeyCode::Char('f') => self.list.filter.field = self.list.filter.field.next(),
            KeyCode::Char('s') => {
                self.list.filter.status = self.list.filter.status.next();
                self.list.clamp_selection();
            }
            KeyCode::Char('d') => {
                self.list.filter.show_deleted = !self.list.filter.show_deleted;
                self.list.clamp_selection();
            }
            KeyCode::Char('a') => self.modal = Some(Modal::AddPatient(add_patient_form())),
            KeyCode::Char('e') => {
                if let Some(patient) = self.list.selected_patient().cloned() {
                    let form = edit_patient_form(&patient);
                    self.modal = Some(Modal::EditPatient { patient, form });
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(patient) = self.list.selected_patient() {
                    self.modal = Some(Modal::DeletePatient {
                        id: patient.id.clone(),
                        name: patient.display_name(),
                        form: delete_form(),
                    });
                }
            }
            KeyCode::Char('r') => self.navigate(Route::PatientList),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode, id: &str) {
        match key {
            KeyCode::Esc => self.navigate(Route::PatientList),
            KeyCode::Char('s') => self.navigate(Route::Survey(id.to_string())),
            KeyCode::Char('t') => self.modal = Some(Modal::info(InfoModal::AboutTest)),
            KeyCode::Char('g') => self.modal = Some(Modal::info(InfoModal::RareDisorder)),
            KeyCode::Char(c @ '1'..='3') => {
                let idx = usize::from(c as u8 - b'1');
                if matches!(self.detail.panels, Some(TwinPanels::Ready(_))) {
                    self.meeting_action(MeetingAction::ALL[idx], id);
                }
            }
            _ => {}
        }
    }

    /// No meeting provider is configured, so the request is noted and logged.
    fn meeting_action(&mut self, action: MeetingAction, id: &str) {
        tracing::info!(patient_id = %id, action = action.label(), "Counseling meeting requested; no meeting provider configured");
        self.detail.notice = Some(format!("{}: 연결된 화상 상담 서비스가 없습니다.", action.label()));
    }

    fn handle_survey_key(&mut self, key: KeyCode, id: &str) {
        if self.survey.submitting {
            return;
        }
        if key == KeyCode::Esc {
            self.navigate(Route::PatientDetail(id.to_string()));
            return;
        }

        let item = self.survey.current_item();
        match key {
            KeyCode::Up => self.survey.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.survey.select_next(),
            KeyCode::Char(' ') => {
                let toggled = match (item, self.survey.wizard.as_mut()) {
                    (Some(item), Some(wizard)) => item.toggle(wizard),
                    _ => false,
                };
                if !toggled {
                    self.survey.input_char(' ');
                }
                self.survey.clamp_selection();
            }
            KeyCode::Left | KeyCode::Right => {
                if let (Some(item), Some(wizard)) = (item, self.survey.wizard.as_mut()) {
                    item.cycle_choice(wizard, key == KeyCode::Right);
                }
            }
            KeyCode::Char(c) => self.survey.input_char(c),
            KeyCode::Backspace => self.survey.delete_char(),
            KeyCode::PageDown => self.survey.next_step(),
            KeyCode::PageUp => self.survey.prev_step(),
            KeyCode::Enter => {
                let draft = match &self.survey.wizard {
                    Some(wizard) if wizard.is_last_step() => wizard.draft().clone(),
                    Some(_) => {
                        self.survey.next_step();
                        return;
                    }
                    None => return,
                };
                self.survey.submitting = true;
                self.request(ApiRequest::SubmitSurvey(draft));
            }
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyCode) {
        if key != KeyCode::Enter {
            Self::handle_form_key(&mut self.profile_state.form, key);
            self.profile_state.notice = None;
            return;
        }

        let editing_password = self.profile_state.editing_password();
        let form = &mut self.profile_state.form;
        if editing_password {
            let result = self.session.change_password(
                form.value(CURRENT_PASSWORD),
                form.value(NEW_PASSWORD),
                form.value(CONFIRM_PASSWORD),
            );
            match result {
                Ok(()) => {
                    form.clear_sensitive();
                    self.login_notice = Some(PASSWORD_CHANGED.to_string());
                    self.navigate(Route::Login);
                }
                Err(e) => form.error = Some(e.user_message().to_string()),
            }
        } else {
            match self.profile.update(form.value(FIRST_NAME), form.value(LAST_NAME)) {
                Ok(()) => self.profile_state.notice = Some(PROFILE_UPDATED.to_string()),
                Err(e) => form.error = Some(e.user_message().to_string()),
            }
        }
    }

    fn handle_about_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.about_scroll = self.about_scroll.saturating_sub(1),
            KeyCode::Down => self.about_scroll = self.about_scroll.saturating_add(1),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyCode) {
        let Some(modal) = self.modal.take() else {
            return;
        };

        match modal {
            Modal::Info { kind, scroll } => {
                let scroll = match key {
                    KeyCode::Esc | KeyCode::Enter => return,
                    KeyCode::Up => scroll.saturating_sub(1),
                    KeyCode::Down => scroll.saturating_add(1),
                    _ => scroll,
                };
                self.modal = Some(Modal::Info { kind, scroll });
            }
            Modal::Alert { message, then } => match key {
                KeyCode::Enter | KeyCode::Esc => self.modal = then.map(|modal| *modal),
                _ => self.modal = Some(Modal::Alert { message, then }),
            },
            mut modal => {
                let Some(form) = modal.form_mut() else {
                    return;
                };
                if form.submitting {
                    self.modal = Some(modal);
                    return;
                }
                match key {
                    KeyCode::Esc => return,
                    KeyCode::Enter => {
                        self.submit_modal(modal);
                        return;
                    }
                    key => Self::handle_form_key(form, key),
                }
                self.modal = Some(modal);
            }
        }
    }

    /// Validate a form overlay locally, then hand it to the worker.
    fn submit_modal(&mut self, mut modal: Modal) {
        let request = match &mut modal {
            Modal::AddPatient(form) => {
                let new = new_patient_from(form);
                match new.validate() {
                    Ok(()) => {
                        form.submitting = true;
                        Some(ApiRequest::AddPatient(new))
                    }
                    Err(e) => {
                        form.error = Some(e.user_message().to_string());
                        None
                    }
                }
            }
            Modal::EditPatient { patient, form } => {
                let update = contact_update_from(form);
                match update.validate(patient.dob.as_deref()) {
                    Ok(()) => {
                        form.submitting = true;
                        Some(ApiRequest::UpdateContact {
                            patient: patient.clone(),
                            update,
                        })
                    }
                    Err(e) => {
                        form.error = Some(e.user_message().to_string());
                        None
                    }
                }
            }
            Modal::DeletePatient { id, form, .. } => {
                let password = form.value(0).to_string();
                form.clear_sensitive();
                if password.is_empty() {
                    form.error = Some(AuthError::EmptyPassword.user_message().to_string());
                    None
                } else {
                    form.submitting = true;
                    Some(ApiRequest::Delete {
                        id: id.clone(),
                        password,
                    })
                }
            }
            Modal::Info { .. } | Modal::Alert { .. } => None,
        };

        self.modal = Some(modal);
        if let Some(request) = request {
            self.request(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use crate::ports::DEFAULT_PASSWORD;

    fn app() -> App {
        let api: Api = Box::new(InMemoryPatientApi::with_fixtures());
        let patients = PatientService::new(Arc::new(api), Arc::new(FixtureAnalysis));
        let session = SessionService::new(Arc::new(
            SqliteCredentialStore::in_memory().expect("Should create db"),
        ));
        App::with_dependencies(patients, session)
    }

    fn settle(app: &mut App) {
        for _ in 0..300 {
            app.poll_worker();
            if app.worker.in_flight() == 0 {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("Requests did not finish");
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn logged_in() -> App {
        let mut app = app();
        type_text(&mut app, crate::application::DEMO_EMAIL);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, DEFAULT_PASSWORD);
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        app
    }

    #[test]
    fn test_starts_on_login() {
        let app = app();
        assert_eq!(app.route, Route::Login);
        assert!(app.sidebar().is_none());
    }

    #[test]
    fn test_wrong_login_shows_error() {
        let mut app = app();
        type_text(&mut app, "demo@predictivcare.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "wrong");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.login.error.as_deref(),
            Some("이메일 또는 비밀번호가 올바르지 않습니다.")
        );
    }

    #[test]
    fn test_login_loads_list() {
        let app = logged_in();
        assert_eq!(app.route, Route::PatientList);
        assert!(!app.list.loading);
        assert_eq!(app.list.roster.len(), 5);
        assert!(app.sidebar().is_some());
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut app = logged_in();
        app.navigate(Route::PatientList);
        app.navigate(Route::About);
        app.list.roster = PatientList::default();
        settle(&mut app);
        assert_eq!(app.route, Route::About);
        assert!(app.list.roster.is_empty());
    }

    #[test]
    fn test_added_patient_already_in_refreshed_list() {
        let mut app = logged_in();
        let mut created = app.list.roster.patients()[0].clone();
        created.id = "patient-6".to_string();

        let mut refreshed = app.list.roster.patients().to_vec();
        refreshed.push(created.clone());
        app.apply_outcome(ApiOutcome {
            route: Route::PatientList,
            kind: RequestKind::Load,
            result: Ok(ApiResponse::List(refreshed)),
        });
        app.apply_outcome(ApiOutcome {
            route: Route::PatientList,
            kind: RequestKind::Add,
            result: Ok(ApiResponse::Added(created)),
        });

        assert_eq!(app.list.roster.len(), 6);
        let copies = app.list.roster.patients().iter().filter(|p| p.id == "patient-6").count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn test_filter_keys() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "철수");
        press(&mut app, KeyCode::Enter);
        let visible: Vec<String> = app.list.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(visible, vec!["김철수".to_string()]);
    }

    #[test]
    fn test_add_patient_validation_blocks_request() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.worker.in_flight(), 0);
        match &app.modal {
            Some(Modal::AddPatient(form)) => {
                assert_eq!(form.error.as_deref(), Some("모든 필수 정보를 입력해주세요."));
            }
            other => panic!("Unexpected modal: {other:?}"),
        }
    }

    #[test]
    fn test_delete_flow() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            &app.modal,
            Some(Modal::DeletePatient { form, .. }) if form.error.as_deref() == Some("비밀번호를 입력해주세요.")
        ));

        type_text(&mut app, "wrong");
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        assert!(matches!(&app.modal, Some(Modal::Alert { .. })));
        assert_eq!(app.list.roster.len(), 5);
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());

        press(&mut app, KeyCode::Char('x'));
        type_text(&mut app, DEFAULT_PASSWORD);
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        assert!(app.modal.is_none());
        assert_eq!(app.list.roster.len(), 4);
        assert!(app.list.roster.get("patient-1").is_none());
    }

    #[test]
    fn test_detail_and_survey_submission() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        assert_eq!(app.route, Route::PatientDetail("patient-1".to_string()));
        assert!(matches!(app.detail.panels, Some(TwinPanels::Ready(_))));

        press(&mut app, KeyCode::Char('s'));
        settle(&mut app);
        assert_eq!(app.route, Route::Survey("patient-1".to_string()));
        assert!(app.survey.wizard.is_some());

        for _ in 0..6 {
            press(&mut app, KeyCode::PageDown);
        }
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(app.route, Route::PatientDetail("patient-1".to_string()));
        assert_eq!(app.detail.notice.as_deref(), Some(SURVEY_SUBMITTED));
        let patient = app.detail.patient.as_ref().expect("Loaded");
        assert_eq!(patient.survey.consent_to_genetic_counseling, Some(true));
    }

    #[test]
    fn test_sidebar_function_keys() {
        let mut app = logged_in();
        press(&mut app, KeyCode::F(3));
        assert_eq!(app.route, Route::About);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.route, Route::Profile);
        press(&mut app, KeyCode::F(4));
        assert_eq!(app.route, Route::Login);
        assert!(!app.authenticated);
    }

    #[test]
    fn test_placeholder_section_alerts() {
        let mut app = logged_in();
        app.navigate(Route::PatientDetail("patient-1".to_string()));
        settle(&mut app);
        press(&mut app, KeyCode::F(2));
        assert!(matches!(&app.modal, Some(Modal::Alert { message, .. }) if message == SECTION_NOT_READY));
    }

    #[test]
    fn test_meeting_actions_need_ready_panels() {
        let mut app = logged_in();
        app.navigate(Route::PatientDetail("patient-1".to_string()));
        settle(&mut app);
        app.detail.panels = Some(TwinPanels::Pending);
        press(&mut app, KeyCode::Char('1'));
        assert!(app.detail.notice.is_none());

        app.detail.panels = Some(app.patients.twin_panels(app.detail.patient.as_ref().expect("Loaded")));
        press(&mut app, KeyCode::Char('2'));
        assert!(app
            .detail
            .notice
            .as_deref()
            .is_some_and(|n| n.starts_with(MeetingAction::Join.label())));
    }

    #[test]
    fn test_change_password_returns_to_login() {
        let mut app = logged_in();
        app.navigate(Route::Profile);
        for _ in 0..2 {
            press(&mut app, KeyCode::Down);
        }
        type_text(&mut app, DEFAULT_PASSWORD);
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "newpass1");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "newpass1");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login_notice.as_deref(), Some(PASSWORD_CHANGED));
        assert!(app.session.verify_password("newpass1").is_ok());
    }
}
