//! HBnB CLI - command-line front end for the booking platform
//!
//! Wraps the resilient API client: browse places, manage bookings, and
//! administer the platform from a terminal instead of the web client.

use clap::{Parser, Subcommand};
use hbnb_api_client::{ClientConfig, HbnbClient};
use hbnb_core::session::FileSessionStore;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use std::sync::Arc;

mod commands;

use commands::{admin, auth, bookings, places};

/// Command-line front end for the HBnB booking platform
#[derive(Parser)]
#[command(name = "hbnb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email
        email: String,

        /// Account password
        password: String,
    },

    /// Passwordless login with a one-time code
    Otp {
        #[command(subcommand)]
        action: OtpAction,
    },

    /// Drop the stored session
    Logout,

    /// Show the authenticated user's profile
    Whoami,

    /// Browse places
    Places {
        #[command(subcommand)]
        action: PlacesAction,
    },

    /// Add or remove a favorite
    Favorite {
        /// Place ID
        place_id: String,

        /// Remove instead of add
        #[arg(long)]
        remove: bool,
    },

    /// Manage bookings
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },

    /// Back-office operations (admin role required)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum OtpAction {
    /// Send a one-time code to an email address
    Request {
        /// Account email
        email: String,
    },

    /// Verify a received code and log in
    Verify {
        /// Account email
        email: String,

        /// The received code
        code: String,
    },
}

#[derive(Subcommand)]
enum PlacesAction {
    /// Search places with filters
    List {
        /// Filter by city ID
        #[arg(long)]
        city: Option<String>,

        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,

        /// Minimum guest capacity
        #[arg(short, long)]
        guests: Option<u32>,

        /// Maximum nightly price
        #[arg(long)]
        max_price: Option<f64>,

        /// Sort order (newest, price_low, price_high, rating)
        #[arg(short, long)]
        sort: Option<String>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show the featured home-page rail
    Featured,

    /// Show one place in full
    Get {
        /// Place ID
        id: String,
    },
}

#[derive(Subcommand)]
enum BookingsAction {
    /// List your bookings
    List,

    /// Quote price and availability for a date range
    Quote {
        /// Place ID
        place_id: String,

        /// Check-in date (YYYY-MM-DD)
        check_in: String,

        /// Check-out date (YYYY-MM-DD)
        check_out: String,
    },

    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Platform-wide counters
    Dashboard,

    /// List users
    Users {
        /// Search by name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by role (guest, owner, admin)
        #[arg(short, long)]
        role: Option<String>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("hbnb=debug,hbnb_api_client=debug,hbnb_core=debug")
            .init();
    }

    let client = match build_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    // Subscribe to the session-expiry signal the way the web client's
    // router would: the notice and login hint are printed after the command
    // finishes, unless this command group handles expiry inline.
    let mut expiry = client.subscribe_session_expired();
    let surface = match &cli.command {
        Commands::Login { .. } | Commands::Otp { .. } => "/login",
        Commands::Admin { .. } => "/admin",
        _ => "/",
    };

    let result = match cli.command {
        Commands::Login { email, password } => {
            auth::login(&client, &email, &password, &cli.format).await
        }

        Commands::Otp { action } => match action {
            OtpAction::Request { email } => auth::request_otp(&client, &email, &cli.format).await,
            OtpAction::Verify { email, code } => {
                auth::verify_otp(&client, &email, &code, &cli.format).await
            }
        },

        Commands::Logout => auth::logout(&client),

        Commands::Whoami => auth::whoami(&client, &cli.format).await,

        Commands::Places { action } => match action {
            PlacesAction::List {
                city,
                query,
                guests,
                max_price,
                sort,
                page,
            } => {
                places::list(
                    &client,
                    city.as_deref(),
                    query.as_deref(),
                    guests,
                    max_price,
                    sort.as_deref(),
                    page,
                    &cli.format,
                )
                .await
            }
            PlacesAction::Featured => places::featured(&client, &cli.format).await,
            PlacesAction::Get { id } => places::get(&client, &id, &cli.format).await,
        },

        Commands::Favorite { place_id, remove } => {
            places::favorite(&client, &place_id, !remove).await
        }

        Commands::Bookings { action } => match action {
            BookingsAction::List => bookings::list(&client, &cli.format).await,
            BookingsAction::Quote {
                place_id,
                check_in,
                check_out,
            } => bookings::quote(&client, &place_id, &check_in, &check_out, &cli.format).await,
            BookingsAction::Cancel { id } => bookings::cancel(&client, &id).await,
        },

        Commands::Admin { action } => match action {
            AdminAction::Dashboard => admin::dashboard(&client, &cli.format).await,
            AdminAction::Users { search, role, page } => {
                admin::users(&client, search.as_deref(), role.as_deref(), page, &cli.format).await
            }
        },
    };

    if let Ok(event) = expiry.try_recv() {
        let policy = &client.config().redirect;
        eprintln!("{} {}", "session:".yellow().bold(), event.message);
        if policy.should_redirect(surface) {
            eprintln!(
                "{} log in again with: hbnb login <email> <password>",
                "hint:".dimmed()
            );
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn build_client() -> anyhow::Result<HbnbClient> {
    let store = Arc::new(FileSessionStore::default_location()?);
    let config = ClientConfig::from_env()?;
    Ok(HbnbClient::with_config(config, store)?)
}
