//! ElevenLabs MCP Client Library
//!
//! Requests text-to-speech generation from an ElevenLabs MCP server running
//! as a child process, and exposes the same operations over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use elevenlabs_mcp_client::{McpConnector, TtsClient};
//! use elevenlabs_mcp_common::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let client = TtsClient::new(McpConnector::child_process(&config.server_launch()));
//!
//! let response = client.generate_simple_audio("Hello!", None).await;
//! if response.success {
//!     println!("{}", response.message);
//! }
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod client;
pub mod error;
pub mod output;
pub mod request;
pub mod response;
pub mod web;


pub use channel::{Connector, McpChannel, McpConnector, ToolChannel};
pub use client::TtsClient;
pub use error::ClientError;
pub use request::{ScriptInput, ScriptInterface, ScriptPart, ToolRequest};
pub use response::{AudioData, AudioGenerationResponse, ToolResult};
