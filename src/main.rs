use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use household::api::{FamilyApi, HttpApi};
use household::cli::{
    handle_expense_command, handle_login, handle_logout, handle_member_command, handle_register,
    handle_show, ExpenseCommands, MemberCommands,
};
use household::config::{HouseholdPaths, Settings};
use household::services::Synchronizer;
use household::session::SessionStore;

#[derive(Parser)]
#[command(
    name = "household",
    version,
    about = "Terminal client for a family expense tracker",
    long_about = "Track a family's members, salaries and expenses against a shared \
                  server. Each earning member gets a 50% spending budget and a 20% \
                  savings target worked out from their salary."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (the default)
    #[command(alias = "ui")]
    Tui,

    /// Log in to an existing family
    Login {
        /// Family name
        name: String,
    },

    /// Register a new family and log in
    Register {
        /// Family name
        name: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the family summary and members
    Show,

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Point the client at a different server
    #[command(name = "set-api-url")]
    SetApiUrl {
        /// Base URL, e.g. http://localhost:5000/api
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = HouseholdPaths::new()?;
    paths.ensure_directories()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // A broken log file should not stop the client
    if let Err(e) = household::logging::init(&paths, &settings) {
        eprintln!("Warning: {}", e);
    }
    debug!(api_url = %settings.api_url, "starting");

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Config { action } => handle_config(&paths, &mut settings, action)?,
        Commands::Login { name } => {
            let mut sync = connect(&paths, &settings)?;
            handle_login(sync.api_handle().as_ref(), sync.session_mut(), &name)?
        }
        Commands::Register { name } => {
            let mut sync = connect(&paths, &settings)?;
            handle_register(sync.api_handle().as_ref(), sync.session_mut(), &name)?
        }
        Commands::Logout => {
            let mut sync = connect(&paths, &settings)?;
            handle_logout(sync.api_handle().as_ref(), sync.session_mut())?
        }
        Commands::Show => handle_show(&mut connect(&paths, &settings)?, &settings)?,
        Commands::Member(cmd) => {
            handle_member_command(&mut connect(&paths, &settings)?, &settings, cmd)?
        }
        Commands::Expense(cmd) => {
            handle_expense_command(&mut connect(&paths, &settings)?, &settings, cmd)?
        }
        Commands::Tui => {
            let sync = connect(&paths, &settings)?;
            household::tui::run_tui(sync, settings).inspect_err(|e| {
                warn!(error = %e, "tui exited with an error");
            })?
        }
    }

    Ok(())
}

/// HTTP client plus the stored session
fn connect(paths: &HouseholdPaths, settings: &Settings) -> Result<Synchronizer> {
    let api: Arc<dyn FamilyApi> = Arc::new(HttpApi::new(settings.api_url.clone())?);
    let session = SessionStore::open(paths)?;
    Ok(Synchronizer::new(api, session))
}

fn handle_config(
    paths: &HouseholdPaths,
    settings: &mut Settings,
    action: Option<ConfigCommands>,
) -> Result<()> {
    match action {
        Some(ConfigCommands::SetApiUrl { url }) => {
            settings.set_api_url(&url)?;
            settings.save(paths)?;
            println!("API URL set to {}", settings.api_url);
        }
        None => {
            println!("Household Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Session file:   {}", paths.session_file().display());
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  API URL:  {}", settings.api_url);
            println!("  Currency: {}", settings.currency_symbol);
            println!("  Log level: {}", settings.log_level);
        }
    }
    Ok(())
}
