//! Tool requests understood by the ElevenLabs MCP server.
//!
//! Two tools are supported:
//! - `generate_audio_simple`: one text, one (optional) voice
//! - `generate_audio_script`: a multi-speaker script sent as a JSON string

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Tool name for single-voice generation.
pub const GENERATE_AUDIO_SIMPLE: &str = "generate_audio_simple";

/// Tool name for multi-speaker script generation.
pub const GENERATE_AUDIO_SCRIPT: &str = "generate_audio_script";

/// JSON-RPC method used for every tool invocation.
pub const TOOLS_CALL_METHOD: &str = "tools/call";

/// One line of a multi-speaker script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPart {
    /// Text spoken for this line.
    pub text: String,

    /// Voice to use; the server picks one from `actor` or its default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,

    /// Speaker label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl ScriptPart {
    /// Create a script line with only text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: None,
            actor: None,
        }
    }

    /// Set the speaker label.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Set the voice.
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }
}

/// A full script. Order is playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInterface {
    pub script: Vec<ScriptPart>,
}

impl ScriptInterface {
    pub fn new(script: Vec<ScriptPart>) -> Self {
        Self { script }
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl FromIterator<ScriptPart> for ScriptInterface {
    fn from_iter<I: IntoIterator<Item = ScriptPart>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Script argument accepted by the script operation.
///
/// A raw string is forwarded verbatim and left for the server to validate;
/// a structured script is serialized to JSON first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptInput {
    Raw(String),
    Structured(ScriptInterface),
}

impl ScriptInput {
    /// The text sent as the `script` argument.
    pub fn into_text(self) -> Result<String, ClientError> {
        match self {
            ScriptInput::Raw(text) => Ok(text),
            ScriptInput::Structured(script) => {
                serde_json::to_string(&script).map_err(|e| ClientError::encode(e.to_string()))
            }
        }
    }
}

impl From<String> for ScriptInput {
    fn from(text: String) -> Self {
        ScriptInput::Raw(text)
    }
}

impl From<&str> for ScriptInput {
    fn from(text: &str) -> Self {
        ScriptInput::Raw(text.to_string())
    }
}

impl From<ScriptInterface> for ScriptInput {
    fn from(script: ScriptInterface) -> Self {
        ScriptInput::Structured(script)
    }
}

impl From<Vec<ScriptPart>> for ScriptInput {
    fn from(parts: Vec<ScriptPart>) -> Self {
        ScriptInput::Structured(ScriptInterface::new(parts))
    }
}

/// A `tools/call` request: tool name plus JSON arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    name: &'static str,
    arguments: Map<String, Value>,
}

impl ToolRequest {
    /// Build a `generate_audio_simple` request.
    ///
    /// `voice_id` is left out of the arguments when `None` so the server
    /// uses its default voice. Empty text is not rejected here.
    pub fn simple(text: impl Into<String>, voice_id: Option<String>) -> Self {
        let mut arguments = Map::new();
        arguments.insert("text".to_string(), Value::String(text.into()));
        if let Some(voice_id) = voice_id {
            arguments.insert("voice_id".to_string(), Value::String(voice_id));
        }

        Self {
            name: GENERATE_AUDIO_SIMPLE,
            arguments,
        }
    }

    /// Build a `generate_audio_script` request.
    ///
    /// # Errors
    /// Returns `ClientError::Encode` if a structured script cannot be serialized.
    pub fn script(script: impl Into<ScriptInput>) -> Result<Self, ClientError> {
        let mut arguments = Map::new();
        arguments.insert(
            "script".to_string(),
            Value::String(script.into().into_text()?),
        );

        Ok(Self {
            name: GENERATE_AUDIO_SCRIPT,
            arguments,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// Look up a single argument.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }

    /// The tool call as it appears on the wire.
    pub fn to_payload(&self) -> Value {
        json!({
            "method": TOOLS_CALL_METHOD,
            "params": {
                "name": self.name,
                "arguments": self.arguments,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_request_without_voice() {
        let request = ToolRequest::simple("Hello there", None);
        assert_eq!(request.name(), GENERATE_AUDIO_SIMPLE);
        assert_eq!(request.argument("text"), Some(&json!("Hello there")));
        assert!(request.argument("voice_id").is_none(), "voice_id should be omitted");
    }

    #[test]
    fn test_simple_request_with_voice() {
        let request = ToolRequest::simple("Hi", Some("21m00Tcm4TlvDq8ikWAM".to_string()));
        assert_eq!(request.argument("voice_id"), Some(&json!("21m00Tcm4TlvDq8ikWAM")));
    }

    #[test]
    fn test_simple_request_passes_empty_text() {
        let request = ToolRequest::simple("", None);
        assert_eq!(request.argument("text"), Some(&json!("")));
    }

    #[test]
    fn test_simple_payload_shape() {
        let payload = ToolRequest::simple("Hi", Some("v1".to_string())).to_payload();
        assert_eq!(
            payload,
            json!({
                "method": "tools/call",
                "params": {
                    "name": "generate_audio_simple",
                    "arguments": { "text": "Hi", "voice_id": "v1" }
                }
            })
        );
    }

    #[test]
    fn test_raw_script_passes_through_verbatim() {
        let raw = "not even json {";
        let request = ToolRequest::script(raw).unwrap();
        assert_eq!(request.name(), GENERATE_AUDIO_SCRIPT);
        assert_eq!(request.argument("script"), Some(&json!(raw)));
    }

    #[test]
    fn test_structured_script_round_trips() {
        let script = ScriptInterface::new(vec![
            ScriptPart::new("Hello there!").with_actor("Tom"),
            ScriptPart::new("Hi Tom, how are you?")
                .with_actor("Bob")
                .with_voice_id("pNInz6obpgDQGcFmaJgB"),
            ScriptPart::new("Narration without a speaker"),
        ]);

        let request = ToolRequest::script(script.clone()).unwrap();
        let text = request
            .argument("script")
            .and_then(Value::as_str)
            .expect("script should be sent as a string");

        let recovered: ScriptInterface = serde_json::from_str(text).unwrap();
        assert_eq!(recovered, script);
    }

    #[test]
    fn test_structured_script_omits_absent_fields() {
        let request = ToolRequest::script(vec![ScriptPart::new("Hi").with_actor("A")]).unwrap();
        let text = request.argument("script").and_then(Value::as_str).unwrap();
        assert_eq!(text, r#"{"script":[{"text":"Hi","actor":"A"}]}"#);
    }

    #[test]
    fn test_empty_script_is_allowed() {
        let request = ToolRequest::script(ScriptInterface::default()).unwrap();
        let text = request.argument("script").and_then(Value::as_str).unwrap();
        assert_eq!(text, r#"{"script":[]}"#);
    }

    #[test]
    fn test_script_input_deserializes_both_forms() {
        let raw: ScriptInput = serde_json::from_value(json!("{\"script\":[]}")).unwrap();
        assert!(matches!(raw, ScriptInput::Raw(_)));

        let structured: ScriptInput =
            serde_json::from_value(json!({ "script": [{ "text": "Hi", "actor": "A" }] })).unwrap();
        assert_eq!(
            structured,
            ScriptInput::Structured(ScriptInterface::new(vec![
                ScriptPart::new("Hi").with_actor("A")
            ]))
        );
    }

    #[test]
    fn test_script_interface_from_iterator() {
        let script: ScriptInterface = ["a", "b"].into_iter().map(ScriptPart::new).collect();
        assert_eq!(script.script.len(), 2);
        assert!(!script.is_empty());
    }
}
