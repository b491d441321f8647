//! Control commands and the acknowledgement bodies the API returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::field::FieldConfig;

/// A control command the app can send to the mower.
///
/// `EmergencyStop` and `Pause` both halt cutting; the simulator does not
/// distinguish between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MowerCommand {
    /// Halt immediately (`emergency_stop`).
    EmergencyStop,
    /// Halt until resumed (`pause`).
    Pause,
    /// Continue cutting (`resume`).
    Resume,
}

impl MowerCommand {
    /// Whether the mower is cutting after this command is applied.
    pub const fn is_mowing_after(self) -> bool {
        matches!(self, Self::Resume)
    }

    /// Message returned to the app once the command is applied.
    pub const fn ack_message(self) -> &'static str {
        match self {
            Self::EmergencyStop => "Emergency stop executed",
            Self::Pause => "Mowing paused",
            Self::Resume => "Mowing resumed",
        }
    }

    /// Wire name of the command.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmergencyStop => "emergency_stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }
}

impl fmt::Display for MowerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command string the mower does not understand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0:?}")]
pub struct UnknownCommand(pub String);

impl MowerCommand {
    /// Read the command from a `POST /api/command` body.
    ///
    /// Anything other than a known name under a string `command` key is
    /// unknown: a missing key, a non-string value, or a body that is not
    /// an object at all.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCommand`] carrying the offending value as text.
    pub fn from_request(body: &Value) -> Result<Self, UnknownCommand> {
        match body.get("command") {
            Some(Value::String(name)) => name.parse(),
            Some(other) => Err(UnknownCommand(other.to_string())),
            None => Err(UnknownCommand(String::new())),
        }
    }
}

impl FromStr for MowerCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emergency_stop" => Ok(Self::EmergencyStop),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            other => Err(UnknownCommand(other.to_owned())),
        }
    }
}

/// Body of `POST /api/command` as the app sends it.
///
/// The server does not deserialize into this type; it reads the body with
/// [`MowerCommand::from_request`] so malformed values still get a 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CommandRequest {
    /// Command name; a missing value is treated as unknown.
    #[serde(default)]
    #[ts(optional)]
    pub command: Option<String>,
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AckResponse {
    /// Whether the request was accepted.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl AckResponse {
    /// A successful acknowledgement.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Response to a successful `POST /api/field-config`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FieldConfigResponse {
    /// Always `true`.
    pub success: bool,
    /// Size summary of the stored field.
    pub message: String,
    /// The configuration as stored.
    pub config: FieldConfig,
}
