//! CLI administration tool for estate-listings.
//!
//! Provides commands for seeding demo data, creating accounts, viewing
//! statistics, reading inquiries and performing database checks without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Load the demo user, features and properties
//! cargo run --bin admin -- seed
//!
//! # Create an account
//! cargo run --bin admin -- user create --email jane@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Read the inquiries for a property
//! cargo run --bin admin -- messages --property 3
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components) and optionally
//! `PASSWORD_HASH_ITERATIONS`.

use estate_listings::application::services::{AuthService, ContactService, Registration};
use estate_listings::config;
use estate_listings::domain::entities::{NewProperty, PropertyType};
use estate_listings::domain::repositories::{FeatureRepository, PropertyRepository, UserRepository};
use estate_listings::infrastructure::persistence::{
    PgContactMessageRepository, PgFeatureRepository, PgPropertyRepository, PgUserRepository,
};
use estate_listings::server;
use estate_listings::utils::password::PasswordHasher;

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

const DEMO_EMAIL: &str = "test@example.com";
const DEMO_PASSWORD: &str = "testpass123";

const DEMO_FEATURES: [&str; 10] = [
    "3 BHK", "Sea View", "Gym", "Parking", "Pool", "Garden", "WiFi", "Furnished", "Studio", "2 BHK",
];

/// A demo listing loaded by `admin seed`.
struct DemoProperty {
    title: &'static str,
    price: i64,
    city: &'static str,
    property_type: PropertyType,
    description: &'static str,
    features: &'static [&'static str],
    images: &'static [&'static str],
}

const DEMO_PROPERTIES: [DemoProperty; 3] = [
    DemoProperty {
        title: "Luxury Apartment in Mumbai",
        price: 12_000_000,
        city: "Mumbai",
        property_type: PropertyType::Buy,
        description: "Beautiful luxury apartment with sea view and modern amenities.",
        features: &["3 BHK", "Sea View", "Gym", "Parking"],
        images: &[
            "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=600&q=80",
            "https://images.unsplash.com/photo-1464983953574-0892a716854b?auto=format&fit=crop&w=600&q=80",
        ],
    },
    DemoProperty {
        title: "Cozy Studio in Pune",
        price: 18_000,
        city: "Pune",
        property_type: PropertyType::Rent,
        description: "Fully furnished studio apartment in prime location.",
        features: &["Studio", "Furnished", "WiFi"],
        images: &[
            "https://images.unsplash.com/photo-1523217582562-09d0def993a6?auto=format&fit=crop&w=600&q=80",
        ],
    },
    DemoProperty {
        title: "Modern 2BHK in Bangalore",
        price: 25_000,
        city: "Bangalore",
        property_type: PropertyType::Rent,
        description: "Modern 2BHK apartment with all amenities.",
        features: &["2 BHK", "Gym", "Parking", "Garden"],
        images: &[
            "https://images.unsplash.com/photo-1501594907352-04cda38ebc29?auto=format&fit=crop&w=600&q=80",
        ],
    },
];

/// CLI tool for managing estate-listings.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create the demo user, features and properties (safe to re-run)
    Seed,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// List the contact messages sent about a property
    Messages {
        /// Property ID
        #[arg(short, long)]
        property: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Password (prompted without echo if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = server::connect(&config).await?;
    let hasher = config.password_hasher();

    match cli.command {
        Commands::Seed => seed(&pool, hasher).await?,
        Commands::User { action } => handle_user_action(action, &pool, hasher).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Messages { property } => list_messages(&pool, property).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Loads the demo data set.
///
/// Each record is looked up first, so running the command twice leaves a
/// single copy: the user by email, features by name, properties by title.
async fn seed(pool: &PgPool, hasher: PasswordHasher) -> Result<()> {
    println!("{}", "🌱 Seeding demo data".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let features = PgFeatureRepository::new(pool.clone());
    let properties = PgPropertyRepository::new(pool.clone());

    let existing = users
        .find_by_email(DEMO_EMAIL)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let owner = match existing {
        Some(user) => {
            println!("  User already exists: {}", user.email.bright_black());
            user
        }
        None => {
            let auth = AuthService::new(users, hasher);
            let user = auth
                .register(Registration {
                    first_name: "Test".to_string(),
                    last_name: "User".to_string(),
                    email: DEMO_EMAIL.to_string(),
                    password: DEMO_PASSWORD.to_string(),
                })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;
            println!("  Created user: {}", user.email.green());
            user
        }
    };

    let mut created_features = 0;
    for name in DEMO_FEATURES {
        let before: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM features WHERE name = $1)")
                .bind(name)
                .fetch_one(pool.as_ref())
                .await?;

        features
            .get_or_create(name)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create feature '{}': {}", name, e))?;

        if !before {
            created_features += 1;
            println!("  Created feature: {}", name.green());
        }
    }

    for demo in &DEMO_PROPERTIES {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM properties WHERE title = $1 LIMIT 1")
                .bind(demo.title)
                .fetch_optional(pool.as_ref())
                .await?;

        if existing.is_some() {
            println!("  Property already exists: {}", demo.title.bright_black());
            continue;
        }

        let details = properties
            .create(NewProperty {
                title: demo.title.to_string(),
                price: BigDecimal::from(demo.price),
                city: demo.city.to_string(),
                address: String::new(),
                area: String::new(),
                latitude: None,
                longitude: None,
                property_type: demo.property_type,
                description: demo.description.to_string(),
                owner_id: owner.id,
                features: demo.features.iter().map(|f| f.to_string()).collect(),
                images: demo.images.iter().map(|i| i.to_string()).collect(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create property '{}': {}", demo.title, e))?;

        println!(
            "  Created property: {} {}",
            details.property.title.green(),
            format!("(#{})", details.property.id).bright_black()
        );
    }

    println!();
    println!(
        "{} {} new feature(s)",
        "✅ Demo data ready.".green().bold(),
        created_features.to_string().bright_white()
    );
    println!(
        "  Log in with {} / {}",
        DEMO_EMAIL.cyan(),
        DEMO_PASSWORD.bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool, hasher: PasswordHasher) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            email,
            first_name,
            last_name,
            password,
            yes,
        } => {
            create_user(
                AuthService::new(repo, hasher),
                email,
                first_name,
                last_name,
                password,
                yes,
            )
            .await?;
        }
    }

    Ok(())
}

/// Registers an account, prompting for anything not given on the command line.
async fn create_user(
    auth: AuthService<PgUserRepository>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let first_name = match first_name {
        Some(n) => n,
        None => Input::new().with_prompt("First name").interact_text()?,
    };
    let last_name = match last_name {
        Some(n) => n,
        None => Input::new().with_prompt("Last name").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    println!("  Name:  {} {}", first_name.cyan(), last_name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = auth
        .register(Registration {
            first_name,
            last_name,
            email,
            password,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created!".green().bold(),
        format!("(#{})", user.id).bright_black()
    );
    println!();

    Ok(())
}

/// Displays row counts per table.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let tables = [
        ("Users", "users"),
        ("Properties", "properties"),
        ("Features", "features"),
        ("Images", "property_images"),
        ("Messages", "contact_messages"),
    ];

    for (label, table) in tables {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<12} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Lists the contact messages for a property, newest first.
///
/// # Output Format
///
/// ```text
/// 📨 Messages for property #3
///
///   2025-01-15 10:30  Asha Rao <asha@example.com>
///     Is the flat still available?
/// ```
async fn list_messages(pool: &PgPool, property_id: i64) -> Result<()> {
    println!(
        "{}",
        format!("📨 Messages for property #{property_id}")
            .bright_blue()
            .bold()
    );
    println!();

    let pool = Arc::new(pool.clone());
    let service = ContactService::new(
        Arc::new(PgContactMessageRepository::new(pool.clone())),
        Arc::new(PgPropertyRepository::new(pool)),
    );

    let messages = service
        .messages_for_property(property_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if messages.is_empty() {
        println!("{}", "  No messages yet".yellow());
        println!();
        return Ok(());
    }

    for message in &messages {
        println!(
            "  {}  {} <{}>",
            message
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            message.name.cyan(),
            message.email
        );
        println!("    {}", message.message);
    }

    println!();
    println!(
        "  Total: {}",
        messages.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database check failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
