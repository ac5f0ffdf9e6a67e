//! Tool results and their decoding into audio generation outcomes.
//!
//! The server answers a generation request with up to two content parts:
//!
//! - a `text` part whose first line is the status message, whose second
//!   line is a fixed `Debug info:` label, and whose remaining lines are
//!   debug output
//! - a `resource` part embedding the generated audio as a base64 blob
//!
//! [`decode`] folds the parts in order. When a variant occurs more than
//! once, the last occurrence wins.

use crate::error::ClientError;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Substring of the status line that marks a successful generation.
pub const SUCCESS_MARKER: &str = "successful";

/// Name used for audio when neither the resource nor its URI provide one.
pub const DEFAULT_AUDIO_NAME: &str = "audio";

/// Prefix of the message of every failure folded by the client.
pub const ERROR_MESSAGE_PREFIX: &str = "Error generating audio: ";

/// Result of a `tools/call` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    #[serde(default)]
    pub content: Vec<ContentPart>,

    #[serde(default, rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    pub fn new(content: Vec<ContentPart>) -> Self {
        Self {
            content,
            is_error: None,
        }
    }

    /// Parse a tool result from its JSON form.
    ///
    /// # Errors
    /// Returns `ClientError::Decode` if the value is not a tool result object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ClientError> {
        serde_json::from_value(value).map_err(|e| ClientError::decode(e.to_string()))
    }
}

/// One typed unit of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Status text
    Text {
        #[serde(default)]
        text: String,
    },
    /// Embedded resource, normally the generated audio
    Resource {
        #[serde(default)]
        resource: EmbeddedResource,
    },
    /// Any other content type (images, audio parts, resource links)
    #[serde(other)]
    Other,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn resource(resource: EmbeddedResource) -> Self {
        ContentPart::Resource { resource }
    }
}

/// Contents of an embedded resource.
///
/// Binary resources carry `blob`, text resources carry `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedResource {
    #[serde(default)]
    pub uri: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Base64 encoded payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EmbeddedResource {
    /// A binary resource without a declared name.
    pub fn blob(uri: impl Into<String>, blob: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            blob: Some(blob.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Audio returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioData {
    /// Resource locator reported by the server
    pub uri: String,
    /// File name for the audio
    pub name: String,
    /// Base64 encoded audio bytes
    pub data: String,
}

impl AudioData {
    /// Build audio data from a binary resource. Text resources yield `None`.
    ///
    /// The name is the declared resource name when non-empty, otherwise the
    /// last `/`-separated segment of the URI when non-empty, otherwise
    /// [`DEFAULT_AUDIO_NAME`].
    pub fn from_resource(resource: &EmbeddedResource) -> Option<Self> {
        let blob = resource.blob.as_ref()?;

        let name = resource
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                resource
                    .uri
                    .rsplit('/')
                    .next()
                    .filter(|segment| !segment.is_empty())
            })
            .unwrap_or(DEFAULT_AUDIO_NAME);

        Some(Self {
            uri: resource.uri.clone(),
            name: name.to_string(),
            data: blob.clone(),
        })
    }

    /// Decode the base64 payload into raw audio bytes.
    ///
    /// # Errors
    /// Returns `ClientError::Decode` if `data` is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ClientError> {
        BASE64
            .decode(self.data.trim())
            .map_err(|e| ClientError::decode(format!("invalid base64 audio data: {}", e)))
    }
}

/// Outcome of one generation request.
///
/// Serialized with the field names `success`, `message`, `debugInfo` and
/// `audioData` for the HTTP adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioGenerationResponse {
    /// Whether `message` contains [`SUCCESS_MARKER`]
    pub success: bool,
    /// First line of the status text
    pub message: String,
    /// Status text lines after the `Debug info:` label
    #[serde(default)]
    pub debug_info: Vec<String>,
    /// Audio from the last binary resource part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<AudioData>,
}

impl AudioGenerationResponse {
    /// Response for a failure that happened before a result was received.
    pub fn failure(error: &ClientError) -> Self {
        Self {
            success: false,
            message: format!("{}{}", ERROR_MESSAGE_PREFIX, error),
            debug_info: Vec::new(),
            audio_data: None,
        }
    }

    /// Apply a status text part.
    ///
    /// Line 0 is the message, line 1 is the debug label and is dropped,
    /// lines 2.. are the debug output.
    fn apply_status(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.message = first.to_string();
        }
        self.debug_info = lines.skip(1).map(str::to_string).collect();
        self.success = self.message.contains(SUCCESS_MARKER);
    }
}

/// Decode a tool result into an audio generation response.
///
/// Never fails: missing parts leave their fields at the defaults
/// (`success=false`, empty message and debug info, no audio). Parts are
/// folded in order, so for repeated text or binary resource parts the last
/// one determines the result. Unknown part types are ignored.
pub fn decode(result: &ToolResult) -> AudioGenerationResponse {
    let response = result
        .content
        .iter()
        .fold(AudioGenerationResponse::default(), |mut acc, part| {
            match part {
                ContentPart::Text { text } => acc.apply_status(text),
                ContentPart::Resource { resource } => {
                    if let Some(audio) = AudioData::from_resource(resource) {
                        acc.audio_data = Some(audio);
                    }
                }
                ContentPart::Other => {}
            }
            acc
        });

    debug!(
        parts = result.content.len(),
        success = response.success,
        debug_lines = response.debug_info.len(),
        has_audio = response.audio_data.is_some(),
        "Decoded tool result"
    );

    response
}
