//! Client facade for audio generation.
//!
//! [`TtsClient`] runs each operation as one sequential pipeline: wait for
//! the connection, build the request, call the tool, decode the result.
//! Failures never escape the generation operations; they come back as a
//! response with `success == false`.

use crate::channel::{Connector, ToolChannel};
use crate::error::ClientError;
use crate::request::{ScriptInput, ToolRequest};
use crate::response::{AudioGenerationResponse, decode};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Progress of the single connection attempt.
enum Connecting<C: Connector> {
    /// Not started; the connector is still owned by the client.
    Idle(C),
    /// Running in its own task, so a dropped caller cannot abort it.
    Running(JoinHandle<Result<C::Channel, ClientError>>),
    /// Settled, or given up by `close()` before it started.
    Done,
}

/// Text-to-speech client for an ElevenLabs MCP server.
///
/// The connection is established at most once per client. Every caller,
/// concurrent or later, observes the same outcome, including a failure.
/// Calls share the channel without queuing; ordering is whatever the
/// transport provides.
pub struct TtsClient<C: Connector> {
    connecting: Mutex<Connecting<C>>,
    connection: OnceCell<Result<C::Channel, ClientError>>,
    closed: AtomicBool,
}

impl<C: Connector> TtsClient<C> {
    /// Create a client that connects on first use.
    pub fn new(connector: C) -> Self {
        Self {
            connecting: Mutex::new(Connecting::Idle(connector)),
            connection: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a client and establish its connection right away.
    ///
    /// Never fails: a connection failure is remembered and reported by
    /// every later operation.
    pub async fn connect(connector: C) -> Self {
        let client = Self::new(connector);
        if let Err(e) = client.connection().await {
            warn!(error = %e, "MCP server unavailable at startup");
        }
        client
    }

    /// Whether the connection has been established successfully.
    pub fn is_connected(&self) -> bool {
        matches!(self.connection.get(), Some(Ok(_))) && !self.closed.load(Ordering::SeqCst)
    }

    async fn connection(&self) -> Result<&C::Channel, ClientError> {
        let outcome = self
            .connection
            .get_or_init(|| self.settle())
            .await;

        outcome.as_ref().map_err(Clone::clone)
    }

    /// Start the connection task if needed and wait for it.
    ///
    /// Cancelling the caller leaves the task and its handle in place for
    /// the next caller to wait on.
    async fn settle(&self) -> Result<C::Channel, ClientError> {
        let mut state = self.connecting.lock().await;

        *state = match std::mem::replace(&mut *state, Connecting::Done) {
            Connecting::Idle(connector) => Connecting::Running(tokio::spawn(connector.connect())),
            other => other,
        };

        let Connecting::Running(task) = &mut *state else {
            return Err(ClientError::Closed);
        };

        let outcome = task.await.unwrap_or_else(|e| {
            Err(ClientError::connect(format!("connection task failed: {}", e)))
        });
        *state = Connecting::Done;

        if let Err(e) = &outcome {
            error!(error = %e, "Failed to connect");
        }
        outcome
    }

    async fn channel(&self) -> Result<&C::Channel, ClientError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ClientError::Closed);
        }
        self.connection().await
    }

    async fn call<F>(&self, build: F) -> Result<AudioGenerationResponse, ClientError>
    where
        F: FnOnce() -> Result<ToolRequest, ClientError>,
    {
        let channel = self.channel().await?;
        let request = build()?;

        info!(tool = request.name(), "Calling tool");
        let result = channel.call_tool(&request).await?;
        Ok(decode(&result))
    }

    fn fold(outcome: Result<AudioGenerationResponse, ClientError>) -> AudioGenerationResponse {
        match outcome {
            Ok(response) => {
                debug!(success = response.success, message = %response.message, "Tool call finished");
                response
            }
            Err(e) => {
                warn!(error = %e, "Audio generation failed");
                AudioGenerationResponse::failure(&e)
            }
        }
    }

    /// Generate audio for a single text.
    ///
    /// `voice_id` of `None` uses the server's default voice.
    #[instrument(level = "info", name = "generate_simple_audio", skip_all)]
    pub async fn generate_simple_audio(
        &self,
        text: impl Into<String>,
        voice_id: Option<String>,
    ) -> AudioGenerationResponse {
        let text = text.into();
        Self::fold(self.call(|| Ok(ToolRequest::simple(text, voice_id))).await)
    }

    /// Generate audio for a multi-speaker script.
    ///
    /// Accepts a structured [`ScriptInterface`](crate::request::ScriptInterface)
    /// or a pre-serialized script string, which is sent unchanged.
    #[instrument(level = "info", name = "generate_script_audio", skip_all)]
    pub async fn generate_script_audio(
        &self,
        script: impl Into<ScriptInput>,
    ) -> AudioGenerationResponse {
        let script = script.into();
        Self::fold(self.call(|| ToolRequest::script(script)).await)
    }

    /// Release the connection.
    ///
    /// A client that never started connecting drops its connector without
    /// connecting. Otherwise waits for the connection attempt to settle
    /// first. Failures are logged, never returned; repeated calls do nothing.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Client already closed");
            return;
        }

        {
            let mut state = self.connecting.lock().await;
            if let Connecting::Idle(_) = &*state {
                *state = Connecting::Done;
                info!("Client closed before connecting");
                return;
            }
        }

        match self.connection().await {
            Ok(channel) => match channel.close().await {
                Ok(()) => info!("Client closed"),
                Err(e) => error!(error = %e, "Error closing client"),
            },
            Err(e) => debug!(error = %e, "No connection to close"),
        }
    }
}
