//! Command line front end for the TOTP generator.
//!
//! ```bash
//! # Print the current code for the configured secret
//! totp-gen code
//!
//! # Code for an explicit secret at a fixed time
//! totp-gen --secret GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ code --at 59
//!
//! # Show whether a secret is configured and how long the code lives
//! totp-gen info
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use totp_gen::config::SECRET_ENV;
use totp_gen::{Config, Totp};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "totp-gen")]
#[command(about = "Generate TOTP codes from a base32 secret or otpauth:// URI", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/totp-gen/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Secret or otpauth:// URI, overrides config and environment
    #[arg(short, long)]
    secret: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the code for the configured secret
    Code {
        /// Unix time to generate the code for instead of now
        #[arg(long)]
        at: Option<u64>,
    },
    /// Show configuration status and the current time window
    Info,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?
        .with_overrides(std::env::var(SECRET_ENV).ok(), cli.secret);

    let level = if cli.verbose || config.debug {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let totp = Totp::default();
    match cli.command.unwrap_or(Commands::Code { at: None }) {
        Commands::Code { at } => {
            let secret = config.require_secret()?;
            let code = match at {
                Some(unix_seconds) => totp.generate_at(secret, unix_seconds)?,
                None => totp.generate(secret)?,
            };
            debug!("code generated");
            println!("{code}");
        }
        Commands::Info => {
            let configured = config.require_secret().is_ok();
            println!(
                "secret: {}",
                if configured { "configured" } else { "not configured" }
            );
            println!("period: {}s", totp.period());
            println!("time step: {}", totp.time_step()?);
            println!("expires in: {}s", totp.seconds_remaining()?);
        }
    }

    Ok(())
}
