use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A closing tag names another section than the one being parsed.
    /// Only reported by a strict [`Parser`](crate::Parser).
    #[error("section tags not balanced: {found} expected {}", .expected.as_deref().unwrap_or("no open section"))]
    MalformedTemplate {
        expected: Option<String>,
        found: String,
    },

    /// Input ended while a section was still open.
    /// Only reported by a strict [`Parser`](crate::Parser).
    #[error("section {name} is never closed")]
    UnclosedSection { name: String },

    #[error("Failed to parse options. Original error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Failed to convert value. Original error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
