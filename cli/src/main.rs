//! DIAGNO command-line client.
//!
//! Talks to the prediction backend configured in a TOML file (or
//! `DIAGNO_API_URL`). The session lives in a JSON file so a login survives
//! between invocations.
//!
//! Usage:
//!   diagno login alice --password secret
//!   diagno predict heart --set age=61 --set chol=280 --save
//!   diagno reports accessible
//!   diagno --mock predict diabetes

use std::{path::PathBuf, process, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use diagno_app::{
    catalog, display, health_recommendations, MockBackend, Outcome, PredictionClient,
    PredictionDashboard, ReportClient, SaveStatus,
};
use diagno_contracts::{
    account::{AddRelativeRequest, SignupRequest, User, ROLE_USER},
    disease::DiseaseType,
    error::DiagnoResult,
    prediction::{PredictionResult, WeeklyPlan},
    report::TestReport,
};
use diagno_core::{
    traits::{SessionStore, Transport},
    ApiClient, ClientConfig, HttpTransport,
};
use diagno_forms::{FieldKind, TypedForm};
use diagno_guard::RouteGuard;
use diagno_session::{AuthService, FileSessionStore, InMemorySessionStore, Session};

// ── CLI definition ────────────────────────────────────────────────────────────

/// DIAGNO: disease risk assessment from clinical measurements.
#[derive(Parser)]
#[command(name = "diagno", about = "DIAGNO health risk-prediction client")]
struct Cli {
    /// Client configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the built-in demo backend, signed in as demo/demo.
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the diseases that can be assessed.
    Diseases,
    /// Show the input fields of a disease form with their defaults.
    Fields { disease: DiseaseType },
    /// Run a risk prediction.
    Predict {
        disease: DiseaseType,
        /// Field value as NAME=VALUE; repeatable. Unset fields keep defaults.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
        /// Save the result as a report (requires login).
        #[arg(long)]
        save: bool,
    },
    /// Show the weekly plan for a disease tag and outcome (0 or 1).
    Plan {
        disease: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        prediction: u8,
    },
    /// Sign in and keep the session.
    Login {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = ROLE_USER)]
        role: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// Set the name used in greetings. It outlives logout.
    Name { name: String },
    /// Register a new account.
    Signup(AccountArgs),
    /// Fetch the signed-in user's profile.
    Profile,
    /// Manage linked relatives.
    #[command(subcommand)]
    Relatives(RelativesCommand),
    /// Browse saved reports.
    #[command(subcommand)]
    Reports(ReportsCommand),
    /// Check where a navigation request would land.
    Route {
        path: String,
        /// Route table (TOML); the built-in table when omitted.
        #[arg(long)]
        routes: Option<PathBuf>,
    },
}

#[derive(Args)]
struct AccountArgs {
    username: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    medical_history: Option<String>,
}

impl AccountArgs {
    fn into_request(self) -> SignupRequest {
        SignupRequest {
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            password: self.password,
            phone_number: self.phone,
            gender: self.gender,
            age: self.age,
            medical_history: self.medical_history,
        }
    }
}

#[derive(Subcommand)]
enum RelativesCommand {
    List,
    Add {
        #[command(flatten)]
        account: AccountArgs,
        #[arg(long)]
        relationship: Option<String>,
    },
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum ReportsCommand {
    /// Your reports.
    Mine,
    /// Your reports plus those of linked relatives.
    Accessible,
    /// Your reports for one disease.
    Disease { disease: String },
    /// One report with its inputs.
    Show { id: i64 },
    /// Number of saved reports.
    Count,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("diagno: {}", e);
            process::exit(1);
        }
    };

    // RUST_LOG wins over the configured filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run(cli, config) {
        eprintln!("diagno: {}", e);
        process::exit(1);
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

struct Client {
    config: ClientConfig,
    session: Arc<Session>,
    api: ApiClient,
}

impl Client {
    fn connect(config: ClientConfig, mock: bool) -> DiagnoResult<Self> {
        let (transport, store): (Arc<dyn Transport>, Arc<dyn SessionStore>) = if mock {
            (Arc::new(MockBackend::demo()), Arc::new(InMemorySessionStore::new()))
        } else {
            (
                Arc::new(HttpTransport::from_config(&config)?),
                Arc::new(FileSessionStore::new(&config.session_path)),
            )
        };
        debug!(api = %config.api_base_url, mock, "client ready");

        let session = Arc::new(Session::new(store));
        let api = ApiClient::new(transport, session.clone());
        let client = Self { config, session, api };

        if mock {
            client.auth().login("demo", "demo", ROLE_USER)?;
        }
        Ok(client)
    }

    fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.session.clone())
    }

    fn reports(&self) -> ReportClient {
        ReportClient::new(self.api.clone())
    }
}

fn run(cli: Cli, config: ClientConfig) -> DiagnoResult<()> {
    // Commands that never touch the backend.
    match &cli.command {
        Command::Diseases => {
            print_diseases();
            return Ok(());
        }
        Command::Fields { disease } => {
            print_fields(&TypedForm::new(*disease));
            return Ok(());
        }
        Command::Plan { disease, prediction } => {
            print_plan(&health_recommendations(disease, *prediction));
            return Ok(());
        }
        _ => {}
    }

    let client = Client::connect(config, cli.mock)?;

    match cli.command {
        Command::Diseases | Command::Fields { .. } | Command::Plan { .. } => {}
        Command::Predict { disease, values, save } => predict(&client, disease, &values, save)?,
        Command::Login { username, password, role } => {
            let login = client.auth().login(&username, &password, &role)?;
            println!("Signed in as {} ({})", login.full_name, login.role);
        }
        Command::Logout => {
            client.auth().logout()?;
            println!("Signed out.");
        }
        Command::Whoami => match client.auth().current_user()? {
            Some(user) if client.auth().is_authenticated() => {
                println!("{}", client.session.display_name());
                print_user(&user);
            }
            _ => println!("Not signed in."),
        },
        Command::Name { name } => {
            client.session.set_display_name(&name)?;
            println!("Greeting name: {}", client.session.display_name());
        }
        Command::Signup(account) => {
            client.auth().signup(&account.into_request())?;
            println!("Account created. You can now log in.");
        }
        Command::Profile => print_user(&client.auth().profile()?),
        Command::Relatives(command) => relatives(&client, command)?,
        Command::Reports(command) => reports(&client, command)?,
        Command::Route { path, routes } => {
            let guard = match routes {
                Some(file) => RouteGuard::from_file(&file)?,
                None => RouteGuard::default_routes()?,
            };
            let decision = guard.evaluate(&path, client.session.is_authenticated());
            println!("{}", decision.destination(&path));
        }
    }
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn predict(client: &Client, disease: DiseaseType, values: &[String], save: bool) -> DiagnoResult<()> {
    let mut form = TypedForm::new(disease);
    for pair in values {
        let (name, raw) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
        form.set(name.trim(), raw)?;
    }
    let input = form.submit()?;

    let mut dashboard = PredictionDashboard::new(
        disease,
        PredictionClient::new(client.api.clone(), client.config.fallback),
        client.reports(),
        client.session.clone(),
        Duration::from_millis(client.config.auto_navigate_ms),
    );

    match dashboard.submit(input)? {
        Outcome::Backend(result) => print_result(disease, result),
        Outcome::Synthetic(result) => {
            println!("(prediction service unreachable; showing a simulated result)");
            print_result(disease, result);
        }
        Outcome::Unavailable { reason } => println!("{}", reason),
    }

    if let Some(plan) = dashboard.plan() {
        println!();
        print_plan(&plan);
    }

    if save {
        match dashboard.save_report()? {
            SaveStatus::Saved(report) => println!("\nSaved as report #{}.", report.id),
            SaveStatus::Skipped => println!("\nNothing saved: sign in and get a result first."),
        }
    }
    Ok(())
}

fn relatives(client: &Client, command: RelativesCommand) -> DiagnoResult<()> {
    let auth = client.auth();
    match command {
        RelativesCommand::List => {
            let relatives = auth.relatives()?;
            if relatives.is_empty() {
                println!("No relatives linked.");
            }
            for user in &relatives {
                println!("#{:<4} {:<20} {:<12} {}", user.id, user.full_name, user.role, user.email);
            }
        }
        RelativesCommand::Add { account, relationship } => {
            auth.add_relative(&AddRelativeRequest {
                account: account.into_request(),
                relationship,
            })?;
            println!("Relative added.");
        }
        RelativesCommand::Remove { id } => {
            auth.remove_relative(id)?;
            println!("Relative removed.");
        }
    }
    Ok(())
}

fn reports(client: &Client, command: ReportsCommand) -> DiagnoResult<()> {
    let reports = client.reports();
    match command {
        ReportsCommand::Mine => print_reports(&reports.my_reports()?),
        ReportsCommand::Accessible => print_reports(&reports.accessible_reports()?),
        ReportsCommand::Disease { disease } => print_reports(&reports.reports_by_disease(&disease)?),
        ReportsCommand::Show { id } => print_report(&reports.report(id)?),
        ReportsCommand::Count => println!("{}", reports.test_count()?),
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_diseases() {
    for info in &catalog::DISEASES {
        println!("{:<11} {} {}: {}", info.disease.slug(), info.icon, info.title, info.description);
    }
}

fn print_fields(form: &TypedForm) {
    for (field, value) in form.entries() {
        let accepts = match field.kind {
            FieldKind::Number { min, max, step } => format!("{} to {} (step {})", min, max, step),
            FieldKind::Choice(options) => options
                .iter()
                .map(|o| format!("{}={}", o.value, o.label))
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!("{:<22} {:<10} {}  [{}]", field.name, value, field.label, accepts);
    }
}

fn print_result(disease: DiseaseType, result: &PredictionResult) {
    let level = display::risk_level(result.prediction, result.probability);
    println!("{} assessment", disease.display_name());
    println!("  {}  {}%", level.label, display::risk_percentage(result));
    if !result.message.is_empty() {
        println!("  {}", result.message);
    }
}

fn print_plan(plan: &WeeklyPlan) {
    println!("Sleep: {}", plan.sleep_hours);
    println!("Food:");
    for item in &plan.food_recommendations {
        println!("  - {}", item);
    }
    println!("Exercise:");
    for item in &plan.workout_tips {
        println!("  - {}", item);
    }
}

fn print_user(user: &User) {
    println!("  username: {}", user.username);
    println!("  name:     {}", user.full_name);
    println!("  email:    {}", user.email);
    println!("  role:     {}", user.role);
    if let Some(phone) = &user.phone_number {
        println!("  phone:    {}", phone);
    }
    if let Some(age) = user.age {
        println!("  age:      {}", age);
    }
}

fn print_reports(reports: &[TestReport]) {
    for report in reports {
        let level = display::risk_level(report.prediction_result, report.probability);
        println!(
            "#{:<4} {:<22} {:<11} {:<9} {:>6}  {}",
            report.id,
            display::format_timestamp(&report.created_at),
            report.disease_type,
            level.label,
            level.confidence,
            report.user_name,
        );
    }
    let summary = display::summarize(reports);
    println!(
        "{} reports: {} low risk, {} high risk",
        summary.total, summary.low_risk, summary.high_risk
    );
}

fn print_report(report: &TestReport) {
    let level = display::risk_level(report.prediction_result, report.probability);
    println!("Report #{} ({})", report.id, report.disease_type);
    println!("  taken:  {}", display::format_timestamp(&report.created_at));
    println!("  by:     {} <{}>", report.user_name, report.user_email);
    println!("  result: {} ({})", level.label, level.confidence);
    println!("  {}", report.prediction_message);

    println!("  inputs:");
    for line in input_lines(&report.input_data) {
        println!("    {}", line);
    }
}

/// Every submitted field under its wire name, in submission order. Input
/// that is not a JSON object is shown verbatim.
fn input_lines(input_data: &str) -> Vec<String> {
    let fields = match serde_json::from_str::<serde_json::Value>(input_data) {
        Ok(serde_json::Value::Object(fields)) => fields,
        _ => return vec![input_data.to_string()],
    };
    let width = fields.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            format!("{:<width$} {}", name, value, width = width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Report inputs ──

    #[test]
    fn every_parkinsons_field_is_listed_with_its_wire_name() {
        let form = TypedForm::new(DiseaseType::Parkinsons);
        let lines = input_lines(&form.to_json().to_string());

        let names: Vec<&str> = form.fields().iter().map(|f| f.name).collect();
        assert_eq!(lines.len(), names.len());
        assert!(lines.len() > 6);
        for (line, name) in lines.iter().zip(&names) {
            assert!(line.starts_with(name), "{line:?} should start with {name:?}");
        }
        assert!(lines.iter().any(|l| l.starts_with("MDVP:Fo(Hz) ")));
    }

    #[test]
    fn long_names_are_not_cut() {
        let lines = input_lines(r#"{"DiabetesPedigreeFunction":0.5,"age":"61"}"#);
        assert_eq!(
            lines,
            vec![
                "DiabetesPedigreeFunction 0.5".to_string(),
                "age                      61".to_string(),
            ]
        );
    }

    #[test]
    fn unparseable_inputs_are_shown_verbatim() {
        assert_eq!(input_lines("not json"), vec!["not json".to_string()]);
        assert_eq!(input_lines("[1,2]"), vec!["[1,2]".to_string()]);
    }
}
