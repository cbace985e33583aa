//! CLI administration tool for contact-relay.
//!
//! Checks deployment configuration and exercises the email transport
//! without going through the HTTP endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Validate environment configuration
//! cargo run --bin admin -- config check
//!
//! # Show the effective CORS allow-list
//! cargo run --bin admin -- origins
//!
//! # Check whether one origin would be accepted
//! cargo run --bin admin -- origins --check https://example.com
//!
//! # Send a sample notification
//! cargo run --bin admin -- email test --to you@example.com
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `contact_relay::config`.

use contact_relay::config::{self, Config};
use contact_relay::domain::entities::{BudgetRange, ServiceKind, ValidatedSubmission};
use contact_relay::infrastructure::email::templates::operator_notification;
use contact_relay::infrastructure::email::{EmailTransport, ResendTransport};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};

/// CLI tool for managing contact-relay.
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
    /// Configuration diagnostics
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the CORS allow-list
    Origins {
        /// Origin to evaluate against the allow-list
        #[arg(short, long)]
        check: Option<String>,
    },

    /// Email transport operations
    Email {
        #[command(subcommand)]
        action: EmailAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration
    Check,
}

/// Email subcommands.
#[derive(Subcommand)]
enum EmailAction {
    /// Send a sample notification
    Test {
        /// Recipient address (prompted if omitted)
        #[arg(short, long)]
        to: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => handle_config_action(action)?,
        Commands::Origins { check } => handle_origins(check)?,
        Commands::Email { action } => handle_email_action(action).await?,
    }

    Ok(())
}

/// Handles configuration diagnostic commands.
fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            println!("{}", "🔍 Checking configuration...".bright_blue());
            println!();

            let config = config::load_from_env().context("Configuration is invalid")?;

            print_config(&config);

            println!();
            println!("{}", "✅ Configuration OK".green().bold());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    let enabled = |on: bool| if on { "enabled".green() } else { "disabled".yellow() };

    println!("  Listen:       {}", config.listen_addr.cyan());
    println!(
        "  Environment:  {}",
        if config.production {
            "production".bright_white()
        } else {
            "development".yellow()
        }
    );
    println!(
        "  Rate limit:   {} per {}s",
        config.rate_limit_max.to_string().bright_white().bold(),
        config.rate_limit_window_seconds
    );
    println!("  Redis:        {}", enabled(config.is_redis_enabled()));
    println!("  Email:        {}", enabled(config.is_email_enabled()));
    println!("  Operator:     {}", config.contact_email.cyan());
    println!("  Body limit:   {} bytes", config.max_body_bytes);
}

/// Prints the effective allow-list and, optionally, one origin's decision.
///
/// # Output Format
///
/// ```text
/// 🌐 Allowed origins
///
///   https://shibasoftwareconsulting.com
///   https://www.shibasoftwareconsulting.com
///
///   https://evil.example → REJECTED
/// ```
fn handle_origins(check: Option<String>) -> Result<()> {
    let config = config::load_from_env().context("Configuration is invalid")?;
    let policy = config.origin_policy();

    println!("{}", "🌐 Allowed origins".bright_blue().bold());
    println!();

    for origin in policy.allowed_origins() {
        println!("  {}", origin.cyan());
    }

    if let Some(origin) = check {
        let decision = policy.decide(Some(&origin));
        let verdict = if decision.allowed {
            "ALLOWED".green().bold()
        } else {
            "REJECTED".red().bold()
        };

        println!();
        println!("  {} → {}", origin.bright_white(), verdict);
    }

    println!();

    Ok(())
}

/// Dispatches email commands.
async fn handle_email_action(action: EmailAction) -> Result<()> {
    match action {
        EmailAction::Test { to, yes } => send_test_email(to, yes).await,
    }
}

/// Sends a sample operator notification through the configured transport.
///
/// # Flow
///
/// 1. Load configuration and require `RESEND_API_KEY`
/// 2. Prompt for recipient (or use provided)
/// 3. Confirm (unless `--yes` flag)
/// 4. Send and report the outcome
async fn send_test_email(to: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "📧 Send Test Email".bright_blue().bold());
    println!();

    let config = config::load_from_env().context("Configuration is invalid")?;
    let api_key = config
        .email_api_key
        .clone()
        .context("RESEND_API_KEY must be set")?;

    let recipient = match to {
        Some(addr) => addr,
        None => Input::new()
            .with_prompt("Recipient")
            .with_initial_text(config.contact_email.clone())
            .interact_text()?,
    };

    let sample = ValidatedSubmission {
        name: "Admin Test".to_string(),
        email: recipient.clone(),
        company: None,
        service: ServiceKind::Consultation,
        budget: Some(BudgetRange::Under25k),
        message: "This is a test notification sent from the admin CLI.".to_string(),
    };

    let email = operator_notification(&sample, &config.email_from, &recipient)
        .map_err(|e| anyhow::anyhow!("Failed to render email: {}", e))?;

    println!("  From:     {}", email.from.cyan());
    println!("  To:       {}", recipient.cyan());
    println!("  Subject:  {}", email.subject.bright_white());
    println!("  Endpoint: {}", config.email_api_url.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Send this email?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let transport = ResendTransport::new(api_key, config.email_api_url.clone());

    transport
        .send(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;

    println!();
    println!("{}", "✅ Test email sent".green().bold());
    println!();

    Ok(())
}
