//! Status value returned by requests that report failure without erroring.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Ok,
    Ko,
}

/// Outcome of an operation plus an optional failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    pub state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StateResponse {
    pub fn ok() -> Self {
        Self {
            state: State::Ok,
            message: None,
        }
    }

    pub fn ko(message: impl Into<String>) -> Self {
        Self {
            state: State::Ko,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.state == State::Ok
    }
}
