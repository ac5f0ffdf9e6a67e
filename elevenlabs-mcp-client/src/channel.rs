//! Connection to the MCP server.
//!
//! The facade only needs two seams: something that establishes a
//! connection ([`Connector`]) and the established channel that runs tool
//! calls ([`ToolChannel`]). [`McpConnector`] implements both on top of the
//! `rmcp` client, spawning the server as a child process over stdio.

use crate::error::ClientError;
use crate::request::ToolRequest;
use crate::response::ToolResult;
use async_trait::async_trait;
use elevenlabs_mcp_common::launch::ServerLaunch;
use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParams, CallToolResult},
    service::{Peer, RunningService},
    transport::{IntoTransport, TokioChildProcess},
};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// An established duplex channel to a tool server.
#[async_trait]
pub trait ToolChannel: Send + Sync + 'static {
    /// Send a `tools/call` request and wait for its result.
    async fn call_tool(&self, request: &ToolRequest) -> Result<ToolResult, ClientError>;

    /// Release the channel.
    async fn close(&self) -> Result<(), ClientError>;
}

/// Establishes a [`ToolChannel`]. Consumed by the single connection attempt.
#[async_trait]
pub trait Connector: Send + 'static {
    type Channel: ToolChannel;

    async fn connect(self) -> Result<Self::Channel, ClientError>;
}

type ClientService = RunningService<RoleClient, ()>;

type PendingService = Pin<Box<dyn Future<Output = Result<ClientService, ClientError>> + Send>>;

/// Connector for an MCP server reached through `rmcp`.
pub struct McpConnector {
    description: String,
    pending: PendingService,
}

impl McpConnector {
    /// Spawn the server described by `launch` and talk to it over its stdio.
    ///
    /// Nothing is spawned until [`Connector::connect`] runs.
    pub fn child_process(launch: &ServerLaunch) -> Self {
        let description = launch.to_string();
        let mut command = Command::new(launch.command());
        command.args(launch.args());

        let spawn_description = description.clone();
        let pending = Box::pin(async move {
            let transport = TokioChildProcess::new(command).map_err(|e| {
                ClientError::connect(format!("failed to spawn '{}': {}", spawn_description, e))
            })?;
            handshake(transport).await
        });

        Self {
            description,
            pending,
        }
    }

    /// Connect over an already available rmcp client transport.
    pub fn from_transport<T, E, A>(transport: T, description: impl Into<String>) -> Self
    where
        T: IntoTransport<RoleClient, E, A> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        A: 'static,
    {
        Self {
            description: description.into(),
            pending: Box::pin(handshake(transport)),
        }
    }

    /// Human-readable description of the server endpoint.
    pub fn description(&self) -> &str {
        &self.description
    }
}

async fn handshake<T, E, A>(transport: T) -> Result<ClientService, ClientError>
where
    T: IntoTransport<RoleClient, E, A> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    ().serve(transport)
        .await
        .map_err(|e| ClientError::connect(e.to_string()))
}

#[async_trait]
impl Connector for McpConnector {
    type Channel = McpChannel;

    async fn connect(self) -> Result<McpChannel, ClientError> {
        let Self {
            description,
            pending,
        } = self;

        debug!(server = %description, "Connecting to MCP server");
        let service = pending.await?;
        info!(server = %description, "Connected to MCP server");

        Ok(McpChannel {
            peer: service.peer().clone(),
            service: Mutex::new(Some(service)),
        })
    }
}

/// Channel backed by a running rmcp client service.
pub struct McpChannel {
    peer: Peer<RoleClient>,
    service: Mutex<Option<ClientService>>,
}

/// Convert a request into rmcp call parameters.
pub fn call_params(request: &ToolRequest) -> Result<CallToolRequestParams, ClientError> {
    serde_json::from_value(json!({
        "name": request.name(),
        "arguments": request.arguments(),
    }))
    .map_err(|e| ClientError::encode(e.to_string()))
}

/// Convert an rmcp tool result into the decoder's input.
pub fn tool_result(result: &CallToolResult) -> Result<ToolResult, ClientError> {
    let value = serde_json::to_value(result).map_err(|e| ClientError::decode(e.to_string()))?;
    ToolResult::from_json(value)
}

#[async_trait]
impl ToolChannel for McpChannel {
    async fn call_tool(&self, request: &ToolRequest) -> Result<ToolResult, ClientError> {
        let params = call_params(request)?;
        debug!(tool = request.name(), "Sending tools/call");

        let result = self
            .peer
            .call_tool(params)
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        tool_result(&result)
    }

    async fn close(&self) -> Result<(), ClientError> {
        let Some(service) = self.service.lock().await.take() else {
            return Ok(());
        };

        let reason = service
            .cancel()
            .await
            .map_err(|e| ClientError::request(format!("failed to stop MCP service: {}", e)))?;
        debug!(reason = ?reason, "MCP service stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ScriptPart, ToolRequest};
    use rmcp::model::Content;

    #[test]
    fn test_call_params_simple() {
        let params = call_params(&ToolRequest::simple("Hi", Some("v1".to_string()))).unwrap();
        assert_eq!(params.name.as_ref(), "generate_audio_simple");
        let args = params.arguments.expect("arguments should be set");
        assert_eq!(args.get("text"), Some(&json!("Hi")));
        assert_eq!(args.get("voice_id"), Some(&json!("v1")));
    }

    #[test]
    fn test_call_params_script() {
        let request = ToolRequest::script(vec![ScriptPart::new("Hi").with_actor("A")]).unwrap();
        let params = call_params(&request).unwrap();
        assert_eq!(params.name.as_ref(), "generate_audio_script");
        let args = params.arguments.unwrap();
        assert!(args.get("script").and_then(|v| v.as_str()).is_some());
    }

    #[test]
    fn test_tool_result_from_rmcp_text() {
        let result = CallToolResult::success(vec![Content::text(
            "Audio generation successful\nDebug info:\nline",
        )]);

        let converted = tool_result(&result).unwrap();
        assert_eq!(converted.content.len(), 1);
        let response = crate::response::decode(&converted);
        assert!(response.success);
        assert_eq!(response.debug_info, vec!["line"]);
    }

    #[test]
    fn test_tool_result_from_rmcp_resource() {
        let content: Content = serde_json::from_value(json!({
            "type": "resource",
            "resource": {
                "uri": "file:///tmp/out/story.mp3",
                "mimeType": "audio/mpeg",
                "blob": "QUJD"
            }
        }))
        .unwrap();
        let result = CallToolResult::success(vec![Content::text("ok successful"), content]);

        let response = crate::response::decode(&tool_result(&result).unwrap());
        let audio = response.audio_data.unwrap();
        assert_eq!(audio.name, "story.mp3");
        assert_eq!(audio.data, "QUJD");
    }

    #[test]
    fn test_tool_result_ignores_image_parts() {
        let result = CallToolResult::success(vec![Content::image("AAAA", "image/png")]);
        let converted = tool_result(&result).unwrap();
        assert_eq!(converted.content.len(), 1);
        assert!(crate::response::decode(&converted).audio_data.is_none());
    }

    #[test]
    fn test_child_process_connector_describes_launch() {
        let launch = ServerLaunch::new("uv", ["--directory", "/srv/x", "run", "elevenlabs-mcp"]);
        let connector = McpConnector::child_process(&launch);
        assert_eq!(connector.description(), "uv --directory /srv/x run elevenlabs-mcp");
    }

    #[tokio::test]
    async fn test_child_process_spawn_failure_is_a_connect_error() {
        let launch = ServerLaunch::new("/nonexistent/elevenlabs-mcp-server", Vec::<String>::new());
        let err = McpConnector::child_process(&launch).connect().await.err().unwrap();
        assert!(matches!(err, ClientError::Connect(_)));
        assert!(err.to_string().contains("/nonexistent/elevenlabs-mcp-server"));
    }
}
