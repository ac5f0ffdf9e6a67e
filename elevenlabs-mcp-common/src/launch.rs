//! MCP server launch configuration.
//!
//! The client talks to the ElevenLabs MCP server over the stdio of a child
//! process. This module describes how that process is started and lets the
//! command line override what the environment configured.
//!
//! # Example
//!
//! ```ignore
//! use elevenlabs_mcp_common::launch::LaunchArgs;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct Args {
//!     #[command(flatten)]
//!     launch: LaunchArgs,
//! }
//!
//! let args = Args::parse();
//! let config = args.launch.load()?;
//! let launch = config.server_launch();
//! ```

use crate::config::Config;
use crate::error::ConfigError;
use clap::Args;
use std::fmt;

/// Program and arguments used to spawn the MCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLaunch {
    command: String,
    args: Vec<String>,
}

impl ServerLaunch {
    /// Create a launch description from a program and its arguments.
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The program to execute.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments passed to the program, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ServerLaunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Command-line overrides for the server launch.
///
/// Every option is optional; unset options fall back to the environment
/// as read by [`Config::from_env`].
#[derive(Args, Debug, Clone, Default)]
pub struct LaunchArgs {
    /// Directory of the MCP server project (overrides MCP_SERVER_DIR)
    #[arg(long)]
    pub server_dir: Option<String>,

    /// Launcher program (overrides MCP_SERVER_COMMAND)
    #[arg(long)]
    pub server_command: Option<String>,

    /// Entry point run by the launcher (overrides MCP_SERVER_ENTRY)
    #[arg(long)]
    pub server_entry: Option<String>,
}

impl LaunchArgs {
    /// Load the configuration, preferring command-line values over the
    /// environment and `.env` file.
    ///
    /// # Errors
    /// Same as [`Config::from_env`]; a `--server-dir` satisfies the
    /// MCP_SERVER_DIR requirement.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let _ = dotenvy::dotenv();

        Config::from_lookup(|name| self.lookup(name).or_else(|| std::env::var(name).ok()))
    }

    /// Value given on the command line for a configuration variable.
    pub fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "MCP_SERVER_DIR" => self.server_dir.clone(),
            "MCP_SERVER_COMMAND" => self.server_command.clone(),
            "MCP_SERVER_ENTRY" => self.server_entry.clone(),
            _ => None,
        }
    }
}
