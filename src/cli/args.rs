//! CLI argument definitions using clap
//!
//! Commands:
//! - rollbook serve [--config <path>] [--database-url <url>] [--host <host>] [--port <port>]
//! - rollbook list [--search <text>]
//! - rollbook add --name <name> --email <email> --contact <contact> --department <dept>
//! - rollbook edit <id> [--name ...] [--email ...] [--contact ...] [--department ...]
//! - rollbook delete <id> [--yes]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;
use crate::schema::StudentField;

pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// rollbook - student records service and terminal client
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP record service
    Serve(ServeArgs),

    /// List students, optionally filtered
    List {
        #[command(flatten)]
        server: ServerArgs,

        /// Case-insensitive text matched against every field
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a student
    Add {
        #[command(flatten)]
        server: ServerArgs,

        #[command(flatten)]
        fields: StudentArgs,
    },

    /// Edit an existing student
    Edit {
        #[command(flatten)]
        server: ServerArgs,

        /// Student id
        id: String,

        #[command(flatten)]
        fields: StudentArgs,
    },

    /// Delete a student
    Delete {
        #[command(flatten)]
        server: ServerArgs,

        /// Student id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// memory://, file://<dir> or a bare directory path
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Log output: text or json
    #[arg(long, env = "ROLLBOOK_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Base URL of the record service
    #[arg(long, env = "ROLLBOOK_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct StudentArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub department: Option<String>,
}

impl StudentArgs {
    /// Fields given on the command line, in field order.
    pub fn provided(&self) -> Vec<(StudentField, &str)> {
        StudentField::ALL
            .into_iter()
            .filter_map(|field| {
                let value = match field {
                    StudentField::Name => &self.name,
                    StudentField::Email => &self.email,
                    StudentField::Contact => &self.contact,
                    StudentField::Department => &self.department,
                };
                value.as_deref().map(|v| (field, v))
            })
            .collect()
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
