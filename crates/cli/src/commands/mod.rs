pub mod ask;
pub mod calculate;
pub mod compare;
pub mod rates;
pub mod regions;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { exit_code: 2, output: format!("error: {}", message.into()) }
    }

    pub fn json(payload: &impl Serialize) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failed(format!("could not serialize output: {error}")),
        }
    }
}
