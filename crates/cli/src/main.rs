use api_client::ApiClient;
use clap::{Parser, Subcommand};
use clinilab_core::{ClientConfig, PostalCode, Sex, StudyKind};
use clinilab_dashboard::{
    patient_row, results_view, CardValue, FormController, ListCoordinator, StatisticsCards,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinilab")]
#[command(about = "CliniLab patient dashboard CLI")]
struct Cli {
    /// Backend base URL (defaults to CLINILAB_BASE_URL, then http://127.0.0.1:5000)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard statistics cards
    Stats,
    /// List all registered patients
    List,
    /// Show one patient's lab results
    Show {
        /// Patient identifier
        id: String,
    },
    /// Register a new patient and generate their study
    Create {
        /// First name
        nombre: String,
        /// Paternal surname
        apellido_paterno: String,
        /// Birth date (YYYY-MM-DD)
        fecha_nacimiento: String,
        /// Sex: M or F
        #[arg(long, default_value = "M")]
        sexo: String,
        /// Five-digit postal code
        #[arg(long)]
        codigo_postal: String,
        /// Colony; defaults to the first one the postal lookup returns
        #[arg(long)]
        colonia: Option<String>,
        /// Study panel: biometria_hematica, quimica_sanguinea or examen_orina
        #[arg(long, default_value = "biometria_hematica")]
        tipo_estudio: String,
    },
    /// Edit an existing patient
    Edit {
        /// Patient identifier
        id: String,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        apellido_paterno: Option<String>,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        fecha_nacimiento: Option<String>,
        /// Sex: M or F
        #[arg(long)]
        sexo: Option<String>,
        /// Five-digit postal code
        #[arg(long)]
        codigo_postal: Option<String>,
        #[arg(long)]
        colonia: Option<String>,
        #[arg(long)]
        tipo_estudio: Option<String>,
    },
    /// Delete a patient (asks for confirmation)
    Delete {
        /// Patient identifier
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Look up a postal code in the directory
    Cp {
        /// Five-digit postal code
        codigo: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let base_url = cli.base_url.or_else(|| std::env::var("CLINILAB_BASE_URL").ok());
    let config = ClientConfig::from_env_value(base_url)?;
    let client = ApiClient::new(config)?;

    match cli.command {
        Commands::Stats => {
            let mut coordinator = ListCoordinator::new();
            coordinator.load(&client).await?;
            if let Some(statistics) = coordinator.statistics() {
                print_stats(&StatisticsCards::from_statistics(statistics));
            }
        }
        Commands::List => {
            let mut coordinator = ListCoordinator::new();
            coordinator.load(&client).await?;
            if coordinator.patients().is_empty() {
                println!("No hay pacientes registrados.");
            } else {
                println!(
                    "{:<8} {:<28} {:>4}  {:<9} {:<38} {}",
                    "ID", "Nombre completo", "Edad", "Sexo", "Estudio", "Fecha"
                );
                for patient in coordinator.patients() {
                    let row = patient_row(patient);
                    println!(
                        "{:<8} {:<28} {:>4}  {:<9} {:<38} {}",
                        row.short_id, row.full_name, row.age_text, row.sex, row.study_name,
                        row.date_text
                    );
                }
            }
        }
        Commands::Show { id } => {
            let patient = client.get_patient(&id).await?;
            let view = results_view(&patient);
            println!("{} (#{})", view.full_name, view.short_id);
            println!("Edad: {}   Sexo: {}", view.age_text, view.sex);
            println!("Estudio: {} — {}", view.study_name, view.study_date_text);
            println!("{}", view.summary_text());
            println!();
            println!(
                "{:<24} {:<16} {:<12} {:<18} {}",
                "Parámetro", "Valor", "Unidad", "Rango Normal", "Estado"
            );
            for row in &view.rows {
                println!(
                    "{:<24} {:<16} {:<12} {:<18} {}",
                    row.parameter, row.value, row.unit, row.range_text, row.status
                );
            }
        }
        Commands::Create {
            nombre,
            apellido_paterno,
            fecha_nacimiento,
            sexo,
            codigo_postal,
            colonia,
            tipo_estudio,
        } => {
            let mut form = FormController::new();
            form.open_create();
            form.set_name(&nombre);
            form.set_paternal_surname(&apellido_paterno);
            form.set_birth_date(&fecha_nacimiento);
            form.set_sex(sexo.parse::<Sex>()?);
            form.set_study_kind(tipo_estudio.parse::<StudyKind>()?);

            if let Some(ticket) = form.postal_code_input(&codigo_postal) {
                form.lookup_postal_code(&client, ticket).await;
            }
            if let Some(colonia) = colonia {
                form.set_colony(&colonia);
            }
            if let Some(notice) = form.notice() {
                eprintln!("{notice}");
            }

            let patient = form.submit(&client).await?;
            println!(
                "Paciente creado: {} (#{})",
                patient.personal.full_name(),
                patient.short_id()
            );
            println!("Estudio generado: {}", patient.study.display_name);
        }
        Commands::Edit {
            id,
            nombre,
            apellido_paterno,
            fecha_nacimiento,
            sexo,
            codigo_postal,
            colonia,
            tipo_estudio,
        } => {
            let existing = client.get_patient(&id).await?;

            let mut form = FormController::new();
            if let Some(ticket) = form.open_edit(&existing) {
                form.lookup_postal_code(&client, ticket).await;
            }

            if let Some(nombre) = nombre {
                form.set_name(&nombre);
            }
            if let Some(apellido) = apellido_paterno {
                form.set_paternal_surname(&apellido);
            }
            if let Some(fecha) = fecha_nacimiento {
                form.set_birth_date(&fecha);
            }
            if let Some(sexo) = sexo {
                form.set_sex(sexo.parse::<Sex>()?);
            }
            if let Some(tipo) = tipo_estudio {
                form.set_study_kind(tipo.parse::<StudyKind>()?);
            }
            if let Some(cp) = codigo_postal {
                if let Some(ticket) = form.postal_code_input(&cp) {
                    form.lookup_postal_code(&client, ticket).await;
                }
            }
            if let Some(colonia) = colonia {
                form.set_colony(&colonia);
            }
            if let Some(notice) = form.notice() {
                eprintln!("{notice}");
            }

            let patient = form.submit(&client).await?;
            println!(
                "Paciente actualizado: {} (#{})",
                patient.personal.full_name(),
                patient.short_id()
            );
        }
        Commands::Delete { id, yes } => {
            let mut coordinator = ListCoordinator::new();
            coordinator.load(&client).await?;

            let Some(request) = coordinator.request_delete(&id) else {
                eprintln!("No se encontró el paciente {id}");
                std::process::exit(1);
            };

            let confirmed = yes
                || confirm(&format!(
                    "¿Eliminar al paciente {}?",
                    request.display_name()
                ))?;
            if !confirmed {
                println!("Operación cancelada.");
                return Ok(());
            }

            coordinator.confirm_delete(&client, request).await?;
            println!(
                "Paciente eliminado. Quedan {} pacientes registrados.",
                coordinator.patients().len()
            );
        }
        Commands::Cp { codigo } => {
            let code = PostalCode::parse(&codigo)?;
            let info = client.postal_code_info(&code).await?;
            println!("Estado: {}", info.state);
            println!("Municipio: {}", info.municipality);
            println!("Colonias:");
            for colony in &info.colonies {
                println!("  - {colony}");
            }
        }
    }

    Ok(())
}

fn print_stats(cards: &StatisticsCards) {
    println!("Total pacientes:  {}", cards.total_patients);
    println!("Estudios hoy:     {}", cards.studies_today);
    println!("Pendientes:       {}", card_or_unavailable(cards.pending));
    println!("En proceso:       {}", card_or_unavailable(cards.in_process));
    if !cards.by_study.is_empty() {
        println!("Por tipo de estudio:");
        for (name, count) in &cards.by_study {
            println!("  {count:>4}  {name}");
        }
    }
}

fn card_or_unavailable(value: CardValue) -> String {
    match value {
        CardValue::Count(n) => n.to_string(),
        CardValue::Unavailable => "— (sin datos)".to_string(),
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::{BufRead, Write};

    print!("{prompt} [s/N]: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "s" | "S" | "y" | "Y"))
}
