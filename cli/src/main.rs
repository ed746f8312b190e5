//! Check-in terminal
//!
//! # Usage
//!
//! ```bash
//! # Point the terminal at a club, then sign in
//! checkin resolve hagl 123456
//! checkin login -e staff@club.vn -p secret
//!
//! # Check one ticket and admit it
//! checkin check KHC-0001 --confirm
//!
//! # Feed a barcode scanner into stdin
//! checkin scan < /dev/ttyACM0
//!
//! # Show the last three pages of admissions
//! checkin history --pages 3
//! ```
//!
//! Configuration comes from the environment (a `.env` file is loaded first);
//! see `ClientConfig::from_env` and `FlowConfig::from_env`.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod render;
mod signal;

use context::Context;

#[derive(Parser)]
#[command(name = "checkin")]
#[command(author, version, about = "Gate-side ticket check-in")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a club domain to its backend and remember it
    Resolve {
        /// Club domain
        domain: String,
        /// Club passcode
        passcode: String,
    },
    /// Register a new club domain with the resolver
    RegisterDomain {
        /// Club display name
        #[arg(short, long)]
        club_name: String,
        /// Requested domain
        #[arg(short, long)]
        domain: String,
        /// Passcode staff will resolve the domain with
        #[arg(short, long)]
        passcode: String,
    },
    /// Remove a club domain and sign out
    DeleteDomain {
        /// Domain to remove
        domain: String,
    },
    /// Sign a staff member in
    Login {
        /// Staff email
        #[arg(short, long)]
        email: String,
        /// Staff password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the club
    Logout,
    /// Create a staff account
    Register {
        /// Family name
        #[arg(long)]
        family_name: String,
        /// First name
        #[arg(long)]
        first_name: String,
        /// Email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Phone number
        #[arg(long)]
        phone: String,
    },
    /// Delete the signed-in staff account
    DeleteAccount {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Show the stored club and sign-in state
    Status,
    /// Look a ticket up by code
    Check {
        /// Ticket code
        code: String,
        /// Admit the ticket if it is eligible
        #[arg(long)]
        confirm: bool,
    },
    /// Read scanned codes from stdin, one per line
    Scan,
    /// Show recent check-ins
    History {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,checkin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env().await?;

    match cli.command {
        Commands::Resolve { domain, passcode } => {
            commands::tenant::resolve(&ctx, &domain, &passcode).await?;
        },
        Commands::RegisterDomain {
            club_name,
            domain,
            passcode,
        } => commands::tenant::register_domain(&ctx, club_name, domain, passcode).await?,
        Commands::DeleteDomain { domain } => commands::tenant::delete_domain(&ctx, &domain).await?,
        Commands::Login { email, password } => {
            commands::account::login(&ctx, email, password).await?;
        },
        Commands::Logout => commands::account::logout(&ctx).await?,
        Commands::Register {
            family_name,
            first_name,
            email,
            password,
            phone,
        } => {
            let request = checkin_client::RegisterRequest {
                family_name,
                first_name,
                email,
                password,
                phone_number: phone,
            };
            commands::account::register(&ctx, &request).await?;
        },
        Commands::DeleteAccount { yes } => commands::account::delete_account(&ctx, yes).await?,
        Commands::Status => commands::account::status(&ctx).await,
        Commands::Check { code, confirm } => commands::checkin::check(&ctx, code, confirm).await?,
        Commands::Scan => commands::checkin::scan(&ctx).await?,
        Commands::History { pages } => commands::history::show(&ctx, pages).await?,
    }

    Ok(())
}
