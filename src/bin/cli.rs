use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use scolarite::cli::{clean_pending, create_user};
use scolarite::domain::access::UserRole;

#[derive(Parser)]
#[command(name = "scolarite-cli")]
#[command(about = "Scolarité CLI - Administrative tools for the academic backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Student,
    Teacher,
    Admin,
    Direction,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => UserRole::Student,
            RoleArg::Teacher => UserRole::Teacher,
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Direction => UserRole::Direction,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account (the only way to create staff accounts)
    CreateUser {
        /// Role of the account
        #[arg(short = 'r', long, value_enum)]
        role: RoleArg,

        /// Login username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Staff registration number
        #[arg(short = 'm', long)]
        matricule: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Delete PENDING enrollment requests older than the given age
    CleanPending {
        /// Age threshold in days
        #[arg(short = 'd', long, default_value = "30")]
        days: i64,

        /// Report what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            role,
            username,
            first_name,
            last_name,
            email,
            matricule,
            password,
        } => {
            handle_create_user(
                &pool, role, username, first_name, last_name, email, matricule, password,
            )
            .await
        }
        Commands::CleanPending { days, dry_run } => handle_clean_pending(&pool, days, dry_run).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_create_user(
    pool: &sqlx::postgres::PgPool,
    role: RoleArg,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    matricule: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Username")
            .interact_text()
            .expect("Failed to read username")
    });

    let first_name = first_name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("First name")
            .interact_text()
            .expect("Failed to read first name")
    });

    let last_name = last_name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Last name")
            .interact_text()
            .expect("Failed to read last name")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    match create_user(
        pool,
        &username,
        &first_name,
        &last_name,
        &email,
        &password,
        role.into(),
        matricule.as_deref(),
    )
    .await
    {
        Ok(_) => {
            println!("\n✅ User created successfully!");
            println!("   Username: {}", username);
            println!("   Email: {}", email);
            println!("   Role: {}", UserRole::from(role));
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clean_pending(pool: &sqlx::postgres::PgPool, days: i64, dry_run: bool) {
    match clean_pending(pool, days, dry_run).await {
        Ok(count) if dry_run => {
            println!("🔎 {count} pending request(s) older than {days} day(s) would be deleted");
        }
        Ok(count) => {
            println!("🧹 Deleted {count} pending request(s) older than {days} day(s)");
        }
        Err(e) => {
            eprintln!("❌ Error cleaning pending enrollments: {}", e);
            std::process::exit(1);
        }
    }
}
