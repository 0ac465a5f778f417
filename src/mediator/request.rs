//! Request traits and the JSON envelope types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed request routed by the mediator to exactly one handler.
///
/// `NAME` is the stable name used for JSON dispatch and tracing.
pub trait Request: DeserializeOwned + Send + 'static {
    const NAME: &'static str;
    type Response: Serialize + Send + 'static;
}

/// An inbound request addressed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Request name, e.g. `game.save`.
    pub request: String,
    /// JSON input payload.
    #[serde(default)]
    pub input: Value,
}

/// Response from dispatching a `CommandRequest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Handler result, or an error body.
    pub body: Value,
}
