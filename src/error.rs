use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("configuration file '{}' not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to parse configuration '{}': {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    /// Non-zero exit from the provisioning tool. `stderr` is what it printed.
    #[error("terraform {command} failed{}: {stderr}", exit_suffix(.code))]
    ExternalCommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {field}: {source}")]
    Serialization {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => " (terminated by signal)".to_string(),
    }
}
