//! ElevenLabs MCP Client
//!
//! Command-line driver: runs the HTTP adapter or performs one-off
//! generations, writing the audio to an output directory.

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use elevenlabs_mcp_client::{
    McpConnector, ScriptInput, ScriptInterface, ScriptPart, TtsClient, output, web,
};
use elevenlabs_mcp_common::{LaunchArgs, tracing::init_tracing};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the client.
#[derive(Parser, Debug)]
#[command(name = "elevenlabs-mcp-client")]
#[command(about = "Text-to-speech through an ElevenLabs MCP server")]
struct Args {
    /// Server launch configuration
    #[command(flatten)]
    launch: LaunchArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP adapter
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate audio for a single text
    Simple {
        /// Text to speak
        #[arg(long)]
        text: String,

        /// Voice to use instead of the server default
        #[arg(long)]
        voice_id: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate audio for a multi-speaker script
    Script {
        /// JSON file with a `{"script": [...]}` document
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        file: Option<PathBuf>,

        /// Inline script JSON, sent as is
        #[arg(long)]
        json: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a simple generation and a short two-actor script
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Directory the audio files are written to
    #[arg(long, default_value = output::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn demo_script() -> ScriptInterface {
    ScriptInterface::new(vec![
        ScriptPart::new("Hello there!").with_actor("Tom"),
        ScriptPart::new("Hi Tom, how are you?").with_actor("Bob"),
        ScriptPart::new("I'am doing great, thanks for asking!").with_actor("Tom"),
    ])
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = args.launch.load()?;
    let launch = config.server_launch();
    tracing::info!(server = %launch, "Configuration loaded");

    let connector = McpConnector::child_process(&launch);

    match args.command {
        Command::Serve { port } => {
            let client = Arc::new(TtsClient::connect(connector).await);
            let port = port.unwrap_or(config.port);

            let outcome = web::serve(client.clone(), port, web::shutdown_signal()).await;
            client.close().await;
            outcome?;
        }
        Command::Simple {
            text,
            voice_id,
            output,
        } => {
            let client = TtsClient::new(connector);
            println!("Generating simple audio...");
            let response = client.generate_simple_audio(text, voice_id).await;
            let delivered = output::deliver(&output.output_dir, "Simple", &response).await;
            client.close().await;
            print!("{}", delivered?);
            if !response.success {
                bail!("generation failed");
            }
        }
        Command::Script { file, json, output } => {
            let script: ScriptInput = match (file, json) {
                (Some(path), _) => {
                    let text = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    text.into()
                }
                (None, Some(json)) => json.into(),
                (None, None) => bail!("either --file or --json is required"),
            };

            let client = TtsClient::new(connector);
            println!("Generating script audio...");
            let response = client.generate_script_audio(script).await;
            let delivered = output::deliver(&output.output_dir, "Script", &response).await;
            client.close().await;
            print!("{}", delivered?);
            if !response.success {
                bail!("generation failed");
            }
        }
        Command::Demo { output } => {
            let client = TtsClient::new(connector);

            println!("\nGenerating simple audio...");
            let simple = client
                .generate_simple_audio("Hello! This is a test of the ElevenLabs MCP client.", None)
                .await;
            match output::deliver(&output.output_dir, "Simple", &simple).await {
                Ok(report) => print!("{}", report),
                Err(e) => eprintln!("Error: {}", e),
            }

            println!("\nGenerating script audio...");
            let script = client.generate_script_audio(demo_script()).await;
            match output::deliver(&output.output_dir, "Script", &script).await {
                Ok(report) => print!("{}", report),
                Err(e) => eprintln!("Error: {}", e),
            }

            client.close().await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_simple() {
        let args = Args::try_parse_from([
            "elevenlabs-mcp-client",
            "--server-dir",
            "/srv/tts",
            "simple",
            "--text",
            "Hello",
            "--voice-id",
            "v1",
        ])
        .unwrap();

        assert_eq!(args.launch.server_dir.as_deref(), Some("/srv/tts"));
        match args.command {
            Command::Simple {
                text,
                voice_id,
                output,
            } => {
                assert_eq!(text, "Hello");
                assert_eq!(voice_id.as_deref(), Some("v1"));
                assert_eq!(output.output_dir, PathBuf::from("output"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_script_requires_a_source() {
        assert!(Args::try_parse_from(["elevenlabs-mcp-client", "script"]).is_err());
        assert!(
            Args::try_parse_from([
                "elevenlabs-mcp-client",
                "script",
                "--file",
                "a.json",
                "--json",
                "{}",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_serve_port_override() {
        let args = Args::try_parse_from(["elevenlabs-mcp-client", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(args.command, Command::Serve { port: Some(9000) }));
    }

    #[test]
    fn test_demo_script_lines() {
        let script = demo_script();
        let actors: Vec<_> = script
            .script
            .iter()
            .filter_map(|part| part.actor.as_deref())
            .collect();
        assert_eq!(actors, ["Tom", "Bob", "Tom"]);
    }
}
