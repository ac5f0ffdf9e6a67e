//! ElevenLabs MCP Common Library
//!
//! Shared configuration, server launch description, error handling and
//! tracing setup for the ElevenLabs MCP client, its HTTP adapter and CLI.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod launch;
pub mod tracing;

#[cfg(test)]
mod config_test;

pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use launch::{LaunchArgs, ServerLaunch};
