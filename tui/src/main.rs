//! DIAGNO: interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  DIAGNO   /prediction/heart                          signed in: Ana │
//!   ├─── body (per screen) ───────────────────────────────────────────────┤
//!   │  login │ disease selection │ form + result/chart/plan │ reports     │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  notice line                                                        │
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! Every screen change goes through the route guard, so protected screens
//! fall back to the login screen without a session.

use std::{
    fs::OpenOptions,
    io,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use diagno_app::{
    catalog, dashboard::DASHBOARD_PATH, display, MockBackend, Outcome, PredictionClient,
    PredictionDashboard, ReportClient, SaveStatus,
};
use diagno_contracts::{
    account::{ROLE_RELATIVE, ROLE_USER},
    disease::DiseaseType,
    error::DiagnoResult,
    report::TestReport,
};
use diagno_core::{
    traits::{SessionStore, Transport},
    ApiClient, ClientConfig, HttpTransport,
};
use diagno_forms::{FieldDescriptor, FieldKind, TypedForm};
use diagno_guard::{engine::LOGIN_PATH, GuardDecision, RouteGuard};
use diagno_session::{AuthService, FileSessionStore, InMemorySessionStore, Session};

const SELECTION_PATH: &str = "/disease-selection";

#[derive(Parser)]
#[command(name = "diagno-tui", about = "DIAGNO interactive risk assessment")]
struct Args {
    /// Client configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Route table (TOML); the built-in table when omitted.
    #[arg(long)]
    routes: Option<PathBuf>,
    /// Use the built-in demo backend (log in as demo/demo).
    #[arg(long)]
    mock: bool,
}

// ── Screens ───────────────────────────────────────────────────────────────────

struct LoginForm {
    username: String,
    password: String,
    role: &'static str,
    /// 0 = username, 1 = password, 2 = role.
    focus: usize,
}

impl LoginForm {
    fn new(prefill: bool) -> Self {
        let demo = if prefill { "demo" } else { "" };
        Self {
            username: demo.to_string(),
            password: demo.to_string(),
            role: ROLE_USER,
            focus: 0,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.username),
            1 => Some(&mut self.password),
            _ => None,
        }
    }

    fn toggle_role(&mut self) {
        self.role = if self.role == ROLE_USER { ROLE_RELATIVE } else { ROLE_USER };
    }
}

/// One disease form with its dashboard.
struct Assessment {
    form: TypedForm,
    dashboard: PredictionDashboard,
    cursor: usize,
    /// Text being typed into the field under the cursor.
    editing: Option<String>,
}

impl Assessment {
    fn selected_field(&self) -> Option<&'static FieldDescriptor> {
        self.form.fields().get(self.cursor)
    }

    /// Step a choice field to the next (`forward`) or previous option.
    fn cycle_choice(&mut self, forward: bool) -> Result<(), String> {
        let Some(field) = self.selected_field() else {
            return Ok(());
        };
        let FieldKind::Choice(options) = field.kind else {
            return Ok(());
        };
        if options.is_empty() {
            return Ok(());
        }
        let current = self.form.value(field.name).unwrap_or(field.default);
        let index = options
            .iter()
            .position(|o| f64::from(o.value) == current)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % options.len()
        } else {
            (index + options.len() - 1) % options.len()
        };
        self.form
            .set(field.name, &options[next].value.to_string())
            .map_err(|e| e.to_string())
    }
}

enum Screen {
    Login(LoginForm),
    /// `naming` holds the greeting-name prompt while it is open.
    Select { cursor: usize, naming: Option<String> },
    Assess(Box<Assessment>),
    Reports { reports: Vec<TestReport>, error: Option<String> },
}

/// Blocking work deferred until the next frame is on screen, so the
/// "working" notice is visible while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Login,
    Predict,
    Save,
}

struct Notice {
    text: String,
    error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), error: false }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), error: true }
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    config: ClientConfig,
    guard: RouteGuard,
    session: Arc<Session>,
    api: ApiClient,
    mock: bool,

    route: String,
    screen: Screen,
    notice: Option<Notice>,
    pending: Option<Pending>,
    quit: bool,
}

impl App {
    fn new(config: ClientConfig, guard: RouteGuard, mock: bool) -> DiagnoResult<Self> {
        let (transport, store): (Arc<dyn Transport>, Arc<dyn SessionStore>) = if mock {
            (Arc::new(MockBackend::demo()), Arc::new(InMemorySessionStore::new()))
        } else {
            (
                Arc::new(HttpTransport::from_config(&config)?),
                Arc::new(FileSessionStore::new(&config.session_path)),
            )
        };
        let session = Arc::new(Session::new(store));
        let api = ApiClient::new(transport, session.clone());

        let mut app = Self {
            config,
            guard,
            session,
            api,
            mock,
            route: String::new(),
            screen: Screen::Select { cursor: 0, naming: None },
            notice: None,
            pending: None,
            quit: false,
        };
        app.navigate(SELECTION_PATH);
        Ok(app)
    }

    fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.session.clone())
    }

    /// Open `path`, or wherever the route guard sends it.
    fn navigate(&mut self, path: &str) {
        let decision = self.guard.evaluate(path, self.session.is_authenticated());
        if let GuardDecision::Redirect { reason, .. } = &decision {
            self.notice = Some(Notice::info(reason.clone()));
        }
        let destination = decision.destination(path).to_string();

        self.screen = self.open(&destination);
        self.route = destination;
    }

    fn open(&mut self, path: &str) -> Screen {
        if path == LOGIN_PATH {
            return Screen::Login(LoginForm::new(self.mock));
        }
        if let Some(tag) = path.strip_prefix("/prediction/") {
            match tag.parse::<DiseaseType>() {
                Ok(disease) => return Screen::Assess(Box::new(self.assessment(disease))),
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
            }
        }
        match path {
            DASHBOARD_PATH | "/reports" => {
                let (reports, error) = match ReportClient::new(self.api.clone()).accessible_reports() {
                    Ok(reports) => (reports, None),
                    Err(e) => (Vec::new(), Some(e.to_string())),
                };
                Screen::Reports { reports, error }
            }
            _ if self.session.is_authenticated() => Screen::Select { cursor: 0, naming: None },
            _ => Screen::Login(LoginForm::new(self.mock)),
        }
    }

    fn assessment(&self, disease: DiseaseType) -> Assessment {
        Assessment {
            form: TypedForm::new(disease),
            dashboard: PredictionDashboard::new(
                disease,
                PredictionClient::new(self.api.clone(), self.config.fallback),
                ReportClient::new(self.api.clone()),
                self.session.clone(),
                Duration::from_millis(self.config.auto_navigate_ms),
            ),
            cursor: 0,
            editing: None,
        }
    }

    fn logout(&mut self) {
        if let Err(e) = self.auth().logout() {
            warn!(error = %e, "logout failed");
        }
        self.notice = Some(Notice::info("Signed out."));
        self.navigate(LOGIN_PATH);
    }

    /// Run the deferred blocking call, if any.
    fn run_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match (pending, &mut self.screen) {
            (Pending::Login, Screen::Login(form)) => {
                let (username, password, role) = (form.username.clone(), form.password.clone(), form.role);
                match self.auth().login(&username, &password, role) {
                    Ok(login) => {
                        self.notice = Some(Notice::info(format!("Welcome, {}.", login.full_name)));
                        self.navigate(SELECTION_PATH);
                    }
                    Err(e) => self.notice = Some(Notice::error(e.to_string())),
                }
            }
            (Pending::Predict, Screen::Assess(assessment)) => {
                self.notice = match assessment.form.submit() {
                    Ok(input) => match assessment.dashboard.submit(input) {
                        Ok(Outcome::Synthetic(_)) => {
                            Some(Notice::info("Prediction service unreachable; showing a simulated result."))
                        }
                        Ok(_) => None,
                        Err(e) => Some(Notice::error(e.to_string())),
                    },
                    Err(e) => Some(Notice::error(e.to_string())),
                };
            }
            (Pending::Save, Screen::Assess(assessment)) => {
                self.notice = Some(match assessment.dashboard.save_report() {
                    Ok(SaveStatus::Saved(report)) => {
                        info!(report_id = report.id, "report saved from tui");
                        Notice::info(format!("Report #{} saved. Opening dashboard...", report.id))
                    }
                    Ok(SaveStatus::Skipped) => Notice::error("Run a prediction first."),
                    Err(e) => Notice::error(e.to_string()),
                });
            }
            _ => {}
        }
    }

    /// Follow the post-save redirect once its delay has passed.
    fn tick(&mut self) {
        let next = match &self.screen {
            Screen::Assess(assessment) => assessment.dashboard.pending_navigation(Instant::now()),
            _ => None,
        };
        if let Some(path) = next {
            self.navigate(path);
        }
    }

    fn is_typing(&self) -> bool {
        match &self.screen {
            Screen::Login(form) => form.focus < 2,
            Screen::Assess(assessment) => assessment.editing.is_some(),
            Screen::Select { naming, .. } => naming.is_some(),
            _ => false,
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        if !self.is_typing() && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
            self.quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Login(form) => match key.code {
                KeyCode::Tab | KeyCode::Down => form.focus = (form.focus + 1) % 3,
                KeyCode::BackTab | KeyCode::Up => form.focus = (form.focus + 2) % 3,
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if form.focus == 2 => form.toggle_role(),
                KeyCode::Enter => {
                    self.notice = Some(Notice::info("Signing in..."));
                    self.pending = Some(Pending::Login);
                }
                KeyCode::Backspace => {
                    if let Some(text) = form.focused_text() {
                        text.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(text) = form.focused_text() {
                        text.push(c);
                    }
                }
                _ => {}
            },

            Screen::Select { cursor, naming } => {
                if let Some(buffer) = naming.as_mut() {
                    match key.code {
                        KeyCode::Char(c) => buffer.push(c),
                        KeyCode::Backspace => {
                            buffer.pop();
                        }
                        KeyCode::Esc => *naming = None,
                        KeyCode::Enter => {
                            let name = buffer.clone();
                            *naming = None;
                            self.notice = Some(match self.session.set_display_name(&name) {
                                Ok(()) => Notice::info(format!("Greeting name: {}", self.session.display_name())),
                                Err(e) => Notice::error(e.to_string()),
                            });
                        }
                        _ => {}
                    }
                    return;
                }

                match key.code {
                    KeyCode::Up => *cursor = cursor.saturating_sub(1),
                    KeyCode::Down => *cursor = (*cursor + 1).min(catalog::DISEASES.len() - 1),
                    KeyCode::Enter => {
                        let slug = catalog::DISEASES[*cursor].disease.slug();
                        self.navigate(&format!("/prediction/{}", slug));
                    }
                    KeyCode::Char('n') => *naming = Some(String::new()),
                    KeyCode::Char('d') => self.navigate(DASHBOARD_PATH),
                    KeyCode::Char('l') => self.logout(),
                    _ => {}
                }
            }

            Screen::Assess(assessment) => {
                if let Some(buffer) = assessment.editing.as_mut() {
                    match key.code {
                        KeyCode::Char(c) => buffer.push(c),
                        KeyCode::Backspace => {
                            buffer.pop();
                        }
                        KeyCode::Esc => assessment.editing = None,
                        KeyCode::Enter => {
                            let raw = buffer.clone();
                            assessment.editing = None;
                            if let Some(field) = assessment.selected_field() {
                                if let Err(e) = assessment.form.set(field.name, &raw) {
                                    self.notice = Some(Notice::error(e.to_string()));
                                }
                            }
                        }
                        _ => {}
                    }
                    return;
                }

                match key.code {
                    KeyCode::Up => assessment.cursor = assessment.cursor.saturating_sub(1),
                    KeyCode::Down => {
                        assessment.cursor = (assessment.cursor + 1).min(assessment.form.fields().len() - 1)
                    }
                    KeyCode::Left | KeyCode::Right => {
                        if let Err(e) = assessment.cycle_choice(key.code == KeyCode::Right) {
                            self.notice = Some(Notice::error(e));
                        }
                    }
                    KeyCode::Enter => {
                        let current = assessment
                            .selected_field()
                            .and_then(|f| assessment.form.value(f.name))
                            .map(|v| v.to_string())
                            .unwrap_or_default();
                        assessment.editing = Some(current);
                    }
                    KeyCode::Char('p') if !assessment.dashboard.is_loading() => {
                        self.notice = Some(Notice::info("Analyzing your health data..."));
                        self.pending = Some(Pending::Predict);
                    }
                    KeyCode::Char('s') if !assessment.dashboard.is_saving() => {
                        self.notice = Some(Notice::info("Saving..."));
                        self.pending = Some(Pending::Save);
                    }
                    KeyCode::Char('r') => assessment.form.reset(),
                    KeyCode::Esc => self.navigate(SELECTION_PATH),
                    _ => {}
                }
            }

            Screen::Reports { .. } => match key.code {
                KeyCode::Char('n') | KeyCode::Esc => self.navigate(SELECTION_PATH),
                KeyCode::Char('r') => self.navigate(DASHBOARD_PATH),
                KeyCode::Char('l') => self.logout(),
                _ => {}
            },
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // screen body
            Constraint::Length(1), // notice
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    match &app.screen {
        Screen::Login(form) => render_login(f, chunks[1], form),
        Screen::Select { cursor, naming } => render_selection(f, chunks[1], *cursor, naming.as_deref()),
        Screen::Assess(assessment) => render_assessment(f, chunks[1], assessment, app.pending),
        Screen::Reports { reports, error } => render_reports(f, chunks[1], reports, error.as_deref()),
    }
    render_notice(f, chunks[2], app);
    render_footer(f, chunks[3], app);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let user = if app.session.is_authenticated() {
        format!("signed in: {}", app.session.display_name())
    } else {
        "not signed in".to_string()
    };
    let line = Line::from(vec![
        Span::styled("DIAGNO    ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(app.route.as_str(), Style::default().fg(Color::White)),
        Span::raw("    "),
        Span::styled(user, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn render_login(f: &mut Frame, area: Rect, form: &LoginForm) {
    let row = |index: usize, label: &str, value: String| {
        let style = if form.focus == index {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), Style::default().fg(Color::Gray)),
            Span::styled(format!(" {:<24}", value), style),
        ])
    };

    let lines = vec![
        Line::from(""),
        row(0, "Username", form.username.clone()),
        row(1, "Password", "*".repeat(form.password.chars().count())),
        row(2, "Role", format!("< {} >", form.role)),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Sign in")), area);
}

fn render_selection(f: &mut Frame, area: Rect, cursor: usize, naming: Option<&str>) {
    let area = match naming {
        Some(buffer) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)])
                .split(area);
            let prompt = Line::from(vec![
                Span::styled("  Name ", Style::default().fg(Color::Gray)),
                Span::styled(format!(" {:<24}", buffer), Style::default().fg(Color::Black).bg(Color::Cyan)),
            ]);
            f.render_widget(Paragraph::new(prompt).block(panel("Greeting name")), rows[0]);
            rows[1]
        }
        None => area,
    };

    let items: Vec<ListItem> = catalog::DISEASES
        .iter()
        .enumerate()
        .map(|(i, info)| {
            let accent = hex_color(info.color);
            let marker = if i == cursor { "▸ " } else { "  " };
            let title_style = if i == cursor {
                Style::default().fg(accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::raw(format!("{} ", info.icon)),
                    Span::styled(info.title, title_style),
                ]),
                Line::from(Span::styled(
                    format!("     {}", info.description),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Choose an assessment")), area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment, pending: Option<Pending>) {
    let disease = assessment.form.disease();
    let accent = hex_color(catalog::info(disease).color);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Form column.
    let items: Vec<ListItem> = assessment
        .form
        .entries()
        .enumerate()
        .map(|(i, (field, value))| {
            let selected = i == assessment.cursor;
            let shown = match (&assessment.editing, field.kind) {
                (Some(buffer), _) if selected => format!("{}_", buffer),
                (_, FieldKind::Choice(options)) => options
                    .iter()
                    .find(|o| f64::from(o.value) == value)
                    .map(|o| format!("< {} >", o.label))
                    .unwrap_or_else(|| value.to_string()),
                _ => value.to_string(),
            };
            let value_color = if field.violation(value).is_some() { Color::Red } else { Color::White };
            let label_style = if selected {
                Style::default().fg(Color::Black).bg(accent)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<34}", truncate(field.label, 34)), label_style),
                Span::styled(format!(" {}", shown), Style::default().fg(value_color)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(panel(disease.display_name())), columns[0]);

    // Result column.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Length(9), Constraint::Min(6)])
        .split(columns[1]);

    let result_block = panel("Result");
    match assessment.dashboard.outcome() {
        _ if pending == Some(Pending::Predict) => f.render_widget(
            Paragraph::new("  Analyzing your health data...").block(result_block),
            rows[0],
        ),
        None => f.render_widget(
            Paragraph::new(Span::styled(
                "  Fill in the form and press [p] to predict.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(result_block),
            rows[0],
        ),
        Some(Outcome::Unavailable { reason }) => f.render_widget(
            Paragraph::new(Span::styled(format!("  {}", reason), Style::default().fg(Color::Red)))
                .block(result_block),
            rows[0],
        ),
        Some(outcome) => {
            if let Some(result) = outcome.result() {
                let percentage = display::risk_percentage(result);
                let level = display::risk_level(result.prediction, result.probability);
                let color = if result.is_at_risk() { Color::Red } else { Color::Green };

                let inner = result_block.inner(rows[0]);
                f.render_widget(result_block, rows[0]);
                let lines = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
                    .split(inner);

                f.render_widget(
                    Gauge::default()
                        .gauge_style(Style::default().fg(color))
                        .ratio((percentage as f64 / 100.0).clamp(0.0, 1.0))
                        .label(format!("{}% risk", percentage)),
                    lines[0],
                );
                let mut heading = vec![Span::styled(
                    format!(" {}", level.label),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )];
                if outcome.is_synthetic() {
                    heading.push(Span::styled("  (simulated)", Style::default().fg(Color::Yellow)));
                }
                if assessment.dashboard.is_saved() {
                    heading.push(Span::styled("  saved", Style::default().fg(Color::Green)));
                }
                f.render_widget(Paragraph::new(Line::from(heading)), lines[1]);
                f.render_widget(
                    Paragraph::new(format!(" {}", result.message)).wrap(Wrap { trim: true }),
                    lines[2],
                );
            }
        }
    }

    // Input chart.
    let points = display::chart_data(&assessment.form.to_json());
    let bars: Vec<(&str, u64)> = points
        .iter()
        .map(|(name, value)| (name.as_str(), value.max(0.0).round() as u64))
        .collect();
    f.render_widget(
        BarChart::default()
            .block(panel("Inputs"))
            .data(bars.as_slice())
            .bar_width(10)
            .bar_gap(1)
            .bar_style(Style::default().fg(accent))
            .value_style(Style::default().fg(Color::Black).bg(accent)),
        rows[1],
    );

    // Weekly plan.
    let mut lines: Vec<Line> = Vec::new();
    match assessment.dashboard.plan() {
        Some(plan) => {
            lines.push(Line::from(vec![
                Span::styled("  Sleep: ", Style::default().fg(Color::Gray)),
                Span::raw(plan.sleep_hours),
            ]));
            lines.push(Line::from(Span::styled("  Food", Style::default().fg(Color::Gray))));
            lines.extend(plan.food_recommendations.into_iter().map(|item| Line::from(format!("   • {}", item))));
            lines.push(Line::from(Span::styled("  Exercise", Style::default().fg(Color::Gray))));
            lines.extend(plan.workout_tips.into_iter().map(|item| Line::from(format!("   • {}", item))));
        }
        None => lines.push(Line::from(Span::styled(
            "  Your weekly plan appears after a prediction.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    f.render_widget(
        Paragraph::new(lines).block(panel("Weekly plan")).wrap(Wrap { trim: false }),
        rows[2],
    );
}

fn render_reports(f: &mut Frame, area: Rect, reports: &[TestReport], error: Option<&str>) {
    let mut items: Vec<ListItem> = Vec::new();

    if let Some(error) = error {
        items.push(ListItem::new(Span::styled(format!("  {}", error), Style::default().fg(Color::Red))));
    } else if reports.is_empty() {
        items.push(ListItem::new(Span::styled(
            "  No reports yet. Press [n] to start an assessment.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for report in reports {
        let level = display::risk_level(report.prediction_result, report.probability);
        let color = if report.prediction_result == 1 { Color::Red } else { Color::Green };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("  #{:<4}", report.id), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{:<22}", display::format_timestamp(&report.created_at))),
            Span::raw(format!("{:<12}", report.disease_type)),
            Span::styled(format!("{:<10}", level.label), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{:>7}  ", level.confidence)),
            Span::styled(report.user_name.as_str(), Style::default().fg(Color::Gray)),
        ])));
    }

    let summary = display::summarize(reports);
    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::from(vec![
        Span::styled(format!("  Total {}  ", summary.total), Style::default().fg(Color::White)),
        Span::styled(format!("Low risk {}  ", summary.low_risk), Style::default().fg(Color::Green)),
        Span::styled(format!("High risk {}", summary.high_risk), Style::default().fg(Color::Red)),
    ])));

    f.render_widget(List::new(items).block(panel("Reports")), area);
}

fn render_notice(f: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = &app.notice else {
        return;
    };
    let color = if notice.error { Color::Red } else { Color::Yellow };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", notice.text), Style::default().fg(color))),
        area,
    );
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = match &app.screen {
        Screen::Login(_) => &[("[Tab]", "Next field"), ("[←/→]", "Role"), ("[Enter]", "Sign in"), ("[Ctrl-C]", "Quit")],
        Screen::Select { naming: Some(_), .. } => &[("[Enter]", "Set name"), ("[Esc]", "Cancel")],
        Screen::Select { .. } => &[
            ("[↑/↓]", "Move"),
            ("[Enter]", "Open"),
            ("[n]", "Name"),
            ("[d]", "Reports"),
            ("[l]", "Logout"),
            ("[q]", "Quit"),
        ],
        Screen::Assess(a) if a.editing.is_some() => &[("[Enter]", "Apply"), ("[Esc]", "Cancel")],
        Screen::Assess(_) => &[
            ("[↑/↓]", "Field"),
            ("[Enter]", "Edit"),
            ("[←/→]", "Option"),
            ("[p]", "Predict"),
            ("[s]", "Save"),
            ("[r]", "Reset"),
            ("[Esc]", "Back"),
            ("[q]", "Quit"),
        ],
        Screen::Reports { .. } => &[("[n]", "New assessment"), ("[r]", "Reload"), ("[l]", "Logout"), ("[q]", "Quit")],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (key, label) in keys {
        spans.push(Span::styled(format!("{} ", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!("{}  ", label)));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray))),
        area,
    );
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// `#rrggbb` to a terminal colour; cyan if unparseable.
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| digits.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Cyan,
    }
}

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file beside the session store; stdout belongs to the terminal UI.
fn init_logging(config: &ClientConfig) {
    let path = config.session_path.with_file_name("diagno-tui.log");
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let args = Args::parse();

    let setup = ClientConfig::load(args.config.as_deref()).and_then(|config| {
        let guard = match &args.routes {
            Some(path) => RouteGuard::from_file(path)?,
            None => RouteGuard::default_routes()?,
        };
        Ok((config, guard))
    });
    let (config, guard) = match setup {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("diagno-tui: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config);

    let mut app = match App::new(config, guard, args.mock) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("diagno-tui: {}", e);
            std::process::exit(1);
        }
    };

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    const TICK_MS: u64 = 200;

    while !app.quit {
        terminal.draw(|f| ui(f, &app))?;

        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        if event::poll(Duration::from_millis(TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }
        app.tick();
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
