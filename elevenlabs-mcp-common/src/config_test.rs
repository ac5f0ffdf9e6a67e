//! Tests for the configuration module.
//!
//! Configuration is exercised through `Config::from_lookup` with an
//! in-memory variable map, so no test touches the process environment.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::config::{Config, DEFAULT_PORT, DEFAULT_SERVER_COMMAND, DEFAULT_SERVER_ENTRY};
use crate::error::ConfigError;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

/// Strategy for generating server directories
fn server_dir_strategy() -> impl Strategy<Value = String> {
    "/[a-z][a-z0-9_/-]{0,40}"
}

/// Strategy for generating valid port numbers
fn port_strategy() -> impl Strategy<Value = u16> {
    1024u16..65535u16
}

#[cfg(test)]
mod config_logic_tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_server_dir_is_set() {
        let config = Config::from_lookup(lookup_from(&[("MCP_SERVER_DIR", "/srv/elevenlabs")]))
            .expect("config should load");

        assert_eq!(config.server_dir, "/srv/elevenlabs");
        assert_eq!(config.server_command, DEFAULT_SERVER_COMMAND);
        assert_eq!(config.server_entry, DEFAULT_SERVER_ENTRY);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn missing_server_dir_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "MCP_SERVER_DIR"));
    }

    #[test]
    fn empty_server_dir_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[("MCP_SERVER_DIR", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("MCP_SERVER_DIR", "/srv/elevenlabs"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "PORT"));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup_from(&[
            ("MCP_SERVER_DIR", "/opt/tts"),
            ("MCP_SERVER_COMMAND", "python"),
            ("MCP_SERVER_ENTRY", "tts-server"),
            ("PORT", "3000"),
        ]))
        .expect("config should load");

        assert_eq!(config.server_command, "python");
        assert_eq!(config.server_entry, "tts-server");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn server_launch_uses_directory_and_entry() {
        let config = Config::from_lookup(lookup_from(&[("MCP_SERVER_DIR", "/srv/elevenlabs")]))
            .expect("config should load");

        let launch = config.server_launch();
        assert_eq!(launch.command(), "uv");
        assert_eq!(
            launch.args(),
            ["--directory", "/srv/elevenlabs", "run", "elevenlabs-mcp"]
        );
    }

    #[test]
    fn config_is_cloneable() {
        let config = Config::from_lookup(lookup_from(&[("MCP_SERVER_DIR", "/srv/a")]))
            .expect("config should load");
        assert_eq!(config.clone(), config);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Any non-empty server directory is preserved and lands in the launch args.
        #[test]
        fn server_dir_is_preserved(dir in server_dir_strategy()) {
            let config = Config::from_lookup(lookup_from(&[("MCP_SERVER_DIR", dir.as_str())])).unwrap();
            prop_assert_eq!(&config.server_dir, &dir);
            let launch = config.server_launch();
            prop_assert_eq!(&launch.args()[1], &dir);
        }

        /// Any valid port string parses to the same port.
        #[test]
        fn port_is_parsed(port in port_strategy()) {
            let port_str = port.to_string();
            let config = Config::from_lookup(lookup_from(&[
                ("MCP_SERVER_DIR", "/srv/elevenlabs"),
                ("PORT", port_str.as_str()),
            ]))
            .unwrap();
            prop_assert_eq!(config.port, port);
        }
    }
}
