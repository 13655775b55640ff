//! Teefinder CLI - Database migrations and catalog administration.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! tf-cli migrate
//!
//! # Create an admin user for the ingestion screen
//! tf-cli admin create --adminuser admin --password 's3cret'
//!
//! # Create a category
//! tf-cli category create --name "Oversized" --type mens
//!
//! # List categories of one gender
//! tf-cli category list --type womens
//! ```
//!
//! All commands read `TEEFINDER_DATABASE_URL` (or `DATABASE_URL`), honouring a
//! `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use teefinder_core::CategoryType;

mod commands;

#[derive(Parser)]
#[command(name = "tf-cli")]
#[command(author, version, about = "Teefinder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Login name
        #[arg(short, long)]
        adminuser: String,

        /// Password (stored as an Argon2 hash)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Create a new category
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Gender partition (`mens` or `womens`)
        #[arg(short = 't', long = "type")]
        category_type: CategoryType,
    },
    /// List the categories of one gender
    List {
        /// Gender partition (`mens` or `womens`)
        #[arg(short = 't', long = "type")]
        category_type: CategoryType,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                adminuser,
                password,
            } => {
                commands::admin::create_user(&adminuser, &password).await?;
            }
        },
        Commands::Category { action } => match action {
            CategoryAction::Create {
                name,
                category_type,
            } => {
                commands::category::create(&name, category_type).await?;
            }
            CategoryAction::List { category_type } => {
                commands::category::list(category_type).await?;
            }
        },
    }
    Ok(())
}
