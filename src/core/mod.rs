pub mod app;
pub mod entry;
pub mod show;

use serde_json::Value;

/// Result of a command: a human rendering and the JSON payload behind it.
#[derive(Debug)]
pub struct Report {
    pub human: String,
    pub payload: Value,
}

impl Report {
    pub fn new(human: impl Into<String>, payload: Value) -> Self {
        Self {
            human: human.into(),
            payload,
        }
    }
}
