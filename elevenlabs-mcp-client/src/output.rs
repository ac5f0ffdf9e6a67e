//! Writing generated audio to disk and reporting results on the console.

use crate::error::ClientError;
use crate::response::{AudioData, AudioGenerationResponse};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Directory used by the command-line driver when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Errors that can occur while saving audio.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The audio payload is not valid base64
    #[error(transparent)]
    Decode(#[from] ClientError),

    /// The resource name cannot be used as a file name
    #[error("Invalid audio file name: {0:?}")]
    InvalidName(String),

    /// Writing the file failed
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Path the audio is written to inside `dir`.
///
/// Only the final component of the resource name is used, so a name like
/// `../x.mp3` stays inside `dir`.
pub fn audio_path(dir: &Path, audio: &AudioData) -> Result<PathBuf, OutputError> {
    Path::new(&audio.name)
        .file_name()
        .map(|name| dir.join(name))
        .ok_or_else(|| OutputError::InvalidName(audio.name.clone()))
}

/// Decode the audio and write it to `dir`, creating the directory if needed.
pub async fn save_audio(dir: &Path, audio: &AudioData) -> Result<PathBuf, OutputError> {
    let path = audio_path(dir, audio)?;
    let bytes = audio.decode()?;

    let write_err = |source| OutputError::Write {
        path: path.clone(),
        source,
    };
    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
    tokio::fs::write(&path, &bytes).await.map_err(write_err)?;

    info!(path = %path.display(), bytes = bytes.len(), "Saved audio");
    Ok(path)
}

/// Human-readable report for one generation.
///
/// `saved` is where the audio was written, if it was.
pub fn render(label: &str, response: &AudioGenerationResponse, saved: Option<&Path>) -> String {
    let mut out = String::new();

    match (&response.audio_data, response.success) {
        (Some(audio), true) => {
            let _ = writeln!(out, "{} audio generated successfully!", label);
            let _ = writeln!(out, "Audio URI: {}", audio.uri);
            if let Some(path) = saved {
                let _ = writeln!(out, "Audio saved to: {}", path.display());
            }
        }
        _ => {
            let _ = writeln!(out, "{} generation failed: {}", label, response.message);
        }
    }

    if !response.debug_info.is_empty() {
        out.push_str("\nDebug Information:\n");
        for line in &response.debug_info {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Save the audio of a successful response and render its report.
pub async fn deliver(
    dir: &Path,
    label: &str,
    response: &AudioGenerationResponse,
) -> Result<String, OutputError> {
    let saved = match &response.audio_data {
        Some(audio) if response.success => Some(save_audio(dir, audio).await?),
        _ => None,
    };
    Ok(render(label, response, saved.as_deref()))
}
