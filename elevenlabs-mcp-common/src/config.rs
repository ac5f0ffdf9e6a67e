//! Configuration module for loading environment variables and settings.

use crate::error::ConfigError;
use crate::launch::ServerLaunch;

/// Launcher used to start the MCP server when none is configured.
pub const DEFAULT_SERVER_COMMAND: &str = "uv";

/// Entry point run by the launcher when none is configured.
pub const DEFAULT_SERVER_ENTRY: &str = "elevenlabs-mcp";

/// HTTP adapter port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the MCP server project (required)
    pub server_dir: String,
    /// Program used to launch the server
    pub server_command: String,
    /// Entry point the launcher runs inside `server_dir`
    pub server_entry: String,
    /// HTTP server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` if MCP_SERVER_DIR is not set, and
    /// `ConfigError::InvalidValue` if PORT is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// An empty `MCP_SERVER_DIR` counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_dir = lookup("MCP_SERVER_DIR")
            .filter(|dir| !dir.is_empty())
            .ok_or_else(|| ConfigError::missing_env_var("MCP_SERVER_DIR"))?;

        let server_command =
            lookup("MCP_SERVER_COMMAND").unwrap_or_else(|| DEFAULT_SERVER_COMMAND.to_string());

        let server_entry =
            lookup("MCP_SERVER_ENTRY").unwrap_or_else(|| DEFAULT_SERVER_ENTRY.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid_value("PORT", format!("'{}' is not a port", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            server_dir,
            server_command,
            server_entry,
            port,
        })
    }

    /// Command line that starts the MCP server as a child process.
    pub fn server_launch(&self) -> ServerLaunch {
        ServerLaunch::new(
            &self.server_command,
            [
                "--directory",
                self.server_dir.as_str(),
                "run",
                self.server_entry.as_str(),
            ],
        )
    }
}
