//! `avmatch` CLI — propose appointment windows from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Match a preference record against a profile file, print the updated record
//! avmatch suggest -p preference.json --profiles profiles.json
//!
//! # Read the record from stdin, pin the clock, print only the suggestions
//! cat preference.json | avmatch suggest --profiles profiles.json \
//!     --now 2026-03-16T12:00:00Z --suggestions-only
//!
//! # Resolve the next occurrence of a weekly slot
//! avmatch next --timezone America/Chicago --day monday --time 09:30
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` (e.g. `RUST_LOG=availability_match=debug`)
//! or pass `-v` to see dropped windows and fallbacks.

use anyhow::{Context, Result};
use availability_match::{generate_suggestions, load_profiles, ParentPreference};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "avmatch",
    version,
    about = "Match weekly availability against provider profiles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate suggestions for a preference record
    Suggest {
        /// Preference record JSON (reads from stdin if omitted)
        #[arg(short, long)]
        preference: Option<String>,
        /// Availability profiles JSON (missing or unreadable means no profiles)
        #[arg(long)]
        profiles: String,
        /// Time reference as RFC 3339 (defaults to the current time)
        #[arg(long, value_parser = parse_now)]
        now: Option<DateTime<Utc>>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print only the suggestions instead of the updated record
        #[arg(long)]
        suggestions_only: bool,
    },
    /// Resolve the next occurrence of a weekday and local time
    Next {
        /// IANA timezone, e.g. "America/New_York"
        #[arg(long)]
        timezone: String,
        /// Day name, e.g. "monday"
        #[arg(long)]
        day: String,
        /// Local time of day, e.g. "09:30"
        #[arg(long)]
        time: String,
        /// Time reference as RFC 3339 (defaults to the current time)
        #[arg(long, value_parser = parse_now)]
        now: Option<DateTime<Utc>>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Suggest {
            preference,
            profiles,
            now,
            output,
            suggestions_only,
        } => {
            let json = read_input(preference.as_deref())?;
            let mut record: ParentPreference =
                serde_json::from_str(&json).context("Failed to parse preference record")?;
            let profiles = load_profiles(&profiles);
            let now = now.unwrap_or_else(Utc::now);
            debug!(
                %now,
                profiles = profiles.len(),
                windows = record.windows.len(),
                "running suggest"
            );

            let suggestions = generate_suggestions(&mut record, &profiles, now)
                .context("Failed to generate suggestions")?;

            let pretty = if suggestions_only {
                serde_json::to_string_pretty(&suggestions)?
            } else {
                serde_json::to_string_pretty(&record)?
            };
            write_output(output.as_deref(), &format!("{}\n", pretty))?;
        }
        Commands::Next {
            timezone,
            day,
            time,
            now,
        } => {
            let now = now.unwrap_or_else(Utc::now);
            debug!(%now, %timezone, %day, %time, "resolving next occurrence");
            let at = availability_match::resolve(&timezone, &day, &time, now).with_context(|| {
                format!(
                    "Could not resolve next {} at '{}' in timezone '{}'",
                    day, time, timezone
                )
            })?;
            println!("{}", at.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn parse_now(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", s, e))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
