use polyedit::InputEvent;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Script lists no sessions")]
    NoSessions,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// One scripted editing session: the frame to open and the input events to
/// replay over it. The session loop appends the terminating Escape itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionScript {
    /// Stem for the session's output files (PNG and GeoJSON)
    pub name: String,
    /// Path of the image file serving as the captured frame
    pub image: String,
    pub description: Option<String>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// A scripted editor run: sessions replayed in order, outputs collected in
/// one directory.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EditorScript {
    pub output_dir: String,
    pub sessions: Vec<SessionScript>,
}

impl EditorScript {
    /// Load a script from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a script from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ScriptError> {
        let script: EditorScript = toml::from_str(content)?;
        Ok(script)
    }

    /// Load a script from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a script from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ScriptError> {
        let script: EditorScript = serde_json::from_str(content)?;
        Ok(script)
    }

    /// Auto-detect file format and load the script
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ScriptError::UnsupportedFileFormat),
        }
    }

    /// Check the script is runnable
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.sessions.is_empty() {
            return Err(ScriptError::NoSessions);
        }
        Ok(())
    }

    /// Save the script to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ScriptError> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert the script to a TOML string
    pub fn to_toml(&self) -> Result<String, ScriptError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Save the script to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ScriptError> {
        let content = self.to_json()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert the script to a JSON string
    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}
