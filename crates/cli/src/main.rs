use clap::{Parser, Subcommand};
use patientor_core::{to_new_entry, to_new_patient, CoreConfig, PatientService};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient record CLI")]
struct Cli {
    /// Directory holding patients.json and diagnoses.json (defaults to the built-in seed)
    #[arg(long, env = "PATIENTOR_SEED_DIR")]
    seed_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show a patient with all entries
    Show {
        /// Patient id
        id: String,
    },
    /// List the diagnosis catalogue
    Diagnoses,
    /// Validate an entry payload (JSON file, or - for stdin)
    CheckEntry {
        /// Path to the JSON payload
        path: String,
    },
    /// Validate a create-patient payload (JSON file, or - for stdin)
    CheckPatient {
        /// Path to the JSON payload
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'patientor --help' for commands");
        return Ok(());
    };

    match command {
        Commands::List => {
            let service = service(cli.seed_dir)?;
            let patients = service.list_patients()?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for patient in patients {
                println!(
                    "ID: {}, Name: {}, Born: {}, Gender: {}, Occupation: {}",
                    patient.id,
                    patient.name,
                    patient.date_of_birth,
                    patient.gender,
                    patient.occupation
                );
            }
        }
        Commands::Show { id } => {
            let service = service(cli.seed_dir)?;
            let patient = service.get_patient(&id)?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Commands::Diagnoses => {
            let service = service(cli.seed_dir)?;
            for diagnosis in service.diagnoses() {
                match &diagnosis.latin {
                    Some(latin) => println!("{}: {} ({})", diagnosis.code, diagnosis.name, latin),
                    None => println!("{}: {}", diagnosis.code, diagnosis.name),
                }
            }
        }
        Commands::CheckEntry { path } => match to_new_entry(&read_payload(&path)?) {
            Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            Err(e) => {
                eprintln!("Invalid entry: {e}");
                std::process::exit(1);
            }
        },
        Commands::CheckPatient { path } => match to_new_patient(&read_payload(&path)?) {
            Ok(patient) => println!("{}", serde_json::to_string_pretty(&patient)?),
            Err(e) => {
                eprintln!("Invalid patient: {e}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn service(seed_dir: Option<PathBuf>) -> anyhow::Result<PatientService> {
    let cfg = CoreConfig::new(seed_dir)?;
    Ok(PatientService::from_config(&cfg)?)
}

/// Reads a JSON payload from `path`, or from stdin when `path` is `-`.
fn read_payload(path: &str) -> anyhow::Result<Value> {
    tracing::debug!("reading payload from {path}");
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}
