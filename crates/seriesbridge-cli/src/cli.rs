//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use seriesbridge_schemas::TribeSchemaVersion;

/// seriesbridge - move recurring series between a meeting platform and a
/// WordPress events calendar
#[derive(Debug, Parser)]
#[command(name = "seriesbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create recurring meetings from a meetings configuration file
    CreateMeetings {
        /// Path to the meetings configuration file
        #[arg(long, short, env = "SERIESBRIDGE_MEETINGS_CONFIG")]
        config: PathBuf,

        /// Print the meeting payloads instead of calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Create calendar events from an events configuration file
    CreateEvents {
        /// Path to the events configuration file
        #[arg(long, short, env = "SERIESBRIDGE_EVENTS_CONFIG")]
        config: PathBuf,

        /// Print the event payloads instead of calling the API
        #[arg(long)]
        dry_run: bool,

        /// Recurrence schema variant the target plugin version expects
        #[arg(long, value_enum, default_value_t = SchemaArg::Structured)]
        schema: SchemaArg,
    },

    /// Generate an events configuration from a meetings configuration
    Map {
        /// Path to the meetings configuration file
        #[arg(long, short)]
        input: PathBuf,

        /// Where to write the generated events config (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// WordPress site URL placed in the generated config
        #[arg(long, default_value = "https://wordpress.example.org")]
        wordpress_url: String,

        /// WordPress username placed in the generated config
        #[arg(long, default_value = "CHANGE_ME")]
        username: String,

        /// WordPress application password placed in the generated config
        #[arg(long, default_value = "CHANGE_ME")]
        app_password: String,

        /// Post status for the generated events
        #[arg(long, default_value = "draft")]
        status: String,

        /// Fallback timezone for meetings that do not set one
        #[arg(long, default_value = "America/New_York")]
        default_timezone: String,
    },
}

/// Recurrence schema variant, selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaArg {
    /// Nested Custom/Monthly rule payload
    Structured,
    /// Flat every-month rule payload
    Compact,
}

impl SchemaArg {
    /// Converts the CLI flag into the schema version type.
    pub fn version(self) -> TribeSchemaVersion {
        match self {
            Self::Structured => TribeSchemaVersion::Structured,
            Self::Compact => TribeSchemaVersion::Compact,
        }
    }
}
