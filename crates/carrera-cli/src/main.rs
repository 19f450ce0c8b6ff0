use std::path::{Path, PathBuf};

use anyhow::Context;
use carrera_cli::accounts::{self, NewAccount};
use carrera_cli::{catalog, plans};
use carrera_config::{DuplicatePolicy, HeaderPolicy, ImportConfig, ImportMode};
use carrera_models::ids::{CareerId, FacultyId};
use carrera_models::imports::ImportOptions;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "carrera-cli")]
#[command(about = "Carrera CLI - Administrative tools for Carrera", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a student account
    CreateUser {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Faculty id of the profile
        #[arg(long)]
        faculty: Option<FacultyId>,

        /// Career id of the profile, must belong to the faculty
        #[arg(long)]
        career: Option<CareerId>,
    },
    /// Add a faculty to the catalog
    CreateFaculty {
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'a', long)]
        acronym: Option<String>,
    },
    /// Add a career to an existing faculty
    CreateCareer {
        /// Faculty id, name or acronym
        #[arg(short = 'f', long)]
        faculty: Option<String>,

        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Load faculties and careers from a `faculty,acronym,career` CSV file
    SeedCatalog {
        file: PathBuf,
    },
    /// Import a study plan CSV (`year,duration,name`) for a user
    ImportPlan {
        /// Owner of the imported subjects
        #[arg(short = 'u', long)]
        user: String,

        file: PathBuf,

        /// auto, always or never (defaults to IMPORT_HEADER_POLICY)
        #[arg(long)]
        header: Option<HeaderPolicy>,

        /// append or skip (defaults to IMPORT_DUPLICATE_POLICY)
        #[arg(long)]
        on_duplicate: Option<DuplicatePolicy>,

        /// best_effort or atomic (defaults to IMPORT_MODE)
        #[arg(long)]
        mode: Option<ImportMode>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = carrera_db::init_db_pool()
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            username,
            email,
            password,
            faculty,
            career,
        } => {
            let account = NewAccount {
                username: prompt_if_missing(username, "Username")?,
                email: prompt_if_missing(email, "Email address")?,
                password: match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()
                        .context("Failed to read password")?,
                },
                faculty_id: faculty,
                career_id: career,
            };

            let user_id = accounts::create_user(&pool, &account).await?;
            println!("\n✅ User created successfully!");
            println!("   Username: {}", account.username.trim());
            println!("   Id: {user_id}");
        }
        Commands::CreateFaculty { name, acronym } => {
            let name = prompt_if_missing(name, "Faculty name")?;
            let faculty_id = catalog::create_faculty(&pool, &name, acronym.as_deref()).await?;
            println!("\n✅ Faculty created: {} ({faculty_id})", name.trim());
        }
        Commands::CreateCareer { faculty, name } => {
            let faculty = prompt_if_missing(faculty, "Faculty (id, name or acronym)")?;
            let name = prompt_if_missing(name, "Career name")?;
            let career_id = catalog::create_career(&pool, &faculty, &name).await?;
            println!("\n✅ Career created: {} ({career_id})", name.trim());
        }
        Commands::SeedCatalog { file } => {
            let input = read_file(&file)?;
            let report = catalog::seed_catalog(&pool, &input).await?;
            println!("\n✅ Catalog seeded from {}", file.display());
            println!("   Rows: {}", report.rows);
            println!("   Faculties created: {}", report.faculties_created);
            println!("   Careers created: {}", report.careers_created);
        }
        Commands::ImportPlan {
            user,
            file,
            header,
            on_duplicate,
            mode,
        } => {
            let defaults = ImportOptions::from(&ImportConfig::from_env());
            let options = ImportOptions {
                header: header.unwrap_or(defaults.header),
                on_duplicate: on_duplicate.unwrap_or(defaults.on_duplicate),
                mode: mode.unwrap_or(defaults.mode),
            };

            let input = read_file(&file)?;
            let summary = plans::import_plan_file(&pool, &user, &input, &options).await?;

            if summary.committed {
                println!("\n✅ Plan imported for {user}");
            } else {
                println!("\n❌ Plan rejected, nothing was imported");
            }
            println!("   Imported: {}", summary.imported);
            println!("   Skipped duplicates: {}", summary.skipped_duplicates);
            if summary.header_skipped {
                println!("   Header row skipped");
            }
            for line in plans::format_row_errors(&summary) {
                println!("   ⚠️  {line}");
            }

            if !summary.committed {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
