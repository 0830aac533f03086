use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use desk_api_client::HttpPatientsApi;
use desk_core::{
    DeskConfig, PageView, PatientForm, PatientId, PatientListController, PatientsApi,
    TreatmentDraft,
    config::{alert_timeout_from_env_value, date_format_from_env_value},
};

mod console;
mod session;

use console::{ConsoleModal, ConsolePage};

/// The controller as wired for a terminal session.
pub(crate) type Desk = PatientListController<HttpPatientsApi, ConsolePage, ConsoleModal>;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "patient-desk")]
#[command(about = "Patient list desk for the Patients API")]
struct Cli {
    /// Base URL of the Patients API (overrides PATIENT_DESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive page session (default)
    Session,
    /// Print the patient table
    List {
        /// Only show rows containing this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Print one patient record as JSON
    Show {
        id: PatientId,
    },
    /// Show the risk analysis for a patient
    Risk {
        id: PatientId,
    },
    /// Show the follow-up reminder for a patient
    Reminder {
        id: PatientId,
    },
    /// Create a patient
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        /// Date of last visit (YYYY-MM-DD)
        #[arg(long)]
        last_visit: Option<String>,
        /// Date of next visit (YYYY-MM-DD)
        #[arg(long)]
        next_visit: Option<String>,
        #[arg(long)]
        treatment_status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a treatment for a patient
    Treatment {
        #[arg(long)]
        patient_id: PatientId,
        #[arg(long)]
        treatment_type: String,
        /// Date of the treatment (defaults to now)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        complications: Option<String>,
        /// Date of the next follow-up (YYYY-MM-DD)
        #[arg(long)]
        next_follow_up: Option<String>,
    },
}

/// Main entry point for the patient desk
///
/// Resolves configuration, wires the HTTP client to the console page and runs either the
/// interactive session or a single command.
///
/// # Environment Variables
/// - `PATIENT_DESK_API_URL`: Patients API base URL (default: "http://127.0.0.1:5000")
/// - `PATIENT_DESK_ALERT_SECS`: seconds before a notification is dismissed (default: 5)
/// - `PATIENT_DESK_DATE_FORMAT`: chrono pattern for visit dates (default: "%-m/%-d/%Y")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_desk=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let api_url = cli
        .api_url
        .or_else(|| std::env::var("PATIENT_DESK_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.into());
    let alert_timeout = alert_timeout_from_env_value(std::env::var("PATIENT_DESK_ALERT_SECS").ok())?;
    let date_format = date_format_from_env_value(std::env::var("PATIENT_DESK_DATE_FORMAT").ok())?;
    let cfg = Arc::new(DeskConfig::new(alert_timeout, date_format)?);

    let api = HttpPatientsApi::new(&api_url)?;
    tracing::info!("++ Patient desk using Patients API at {}", api.base_url());

    let desk: Desk = PatientListController::new(
        cfg,
        api,
        Arc::new(ConsolePage::new()),
        ConsoleModal::default(),
    );

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => session::run(&desk).await?,
        Commands::List { search } => {
            desk.initialise().await;
            if let Some(term) = search {
                desk.filter_patients(&term);
            }
        }
        Commands::Show { id } => {
            let patient = desk
                .api()
                .get_patient(&id)
                .await
                .with_context(|| format!("loading patient {id}"))?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Commands::Risk { id } => desk.view_patient_risk(&id).await,
        Commands::Reminder { id } => desk.view_patient_reminder(&id).await,
        Commands::Add {
            name,
            email,
            phone,
            last_visit,
            next_visit,
            treatment_status,
            notes,
        } => {
            desk.add_new_patient();
            desk.view().fill_form(&PatientForm {
                name,
                email,
                phone: phone.unwrap_or_default(),
                last_visit: last_visit.unwrap_or_default(),
                next_visit: next_visit.unwrap_or_default(),
                treatment_status: treatment_status.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            });
            desk.save_patient().await;
            if desk.modal().is_open() {
                bail!("patient was not saved");
            }
        }
        Commands::Treatment {
            patient_id,
            treatment_type,
            date,
            status,
            complications,
            next_follow_up,
        } => {
            let draft = TreatmentDraft {
                patient_id,
                treatment_type,
                date: date.unwrap_or_else(|| {
                    chrono::Local::now()
                        .format("%Y-%m-%dT%H:%M:%S")
                        .to_string()
                }),
                status,
                complications,
                next_follow_up,
            };
            if !desk.record_treatment(&draft).await {
                bail!("treatment was not recorded");
            }
        }
    }

    Ok(())
}
