use crate::model::Scope;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Nothing to save")]
    EmptyInput,

    #[error("Snippet not found: {name}{}", scope_suffix(.scope))]
    NotFound { name: String, scope: Option<Scope> },

    #[error("No local snippet directory found")]
    NoLocalStore,

    #[error("Snippet '{name}' requires arguments: {hint}")]
    MissingArguments { name: String, hint: String },

    #[error("Already exists: {}", .0.display())]
    NameConflict(PathBuf),

    #[error("Invalid snippet name: {0}")]
    InvalidName(String),

    #[error("{0} is not installed")]
    MissingTool(String),

    #[error("{0}")]
    Tool(String),

    #[error("{0}")]
    Api(String),
}

fn scope_suffix(scope: &Option<Scope>) -> String {
    match scope {
        Some(scope) => format!(" ({})", scope),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, SnipError>;
