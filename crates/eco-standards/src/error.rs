use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON {source_name}: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected an object at {location}")]
    NotAnObject { location: String },

    #[error("invalid entry {location}: {message}")]
    InvalidEntry { location: String, message: String },

    #[error("parameter {location} declares no classifications")]
    EmptyGroup { location: String },

    #[error("parameter {location} declares only one of 'mujer'/'hombre'")]
    IncompleteSexSplit { location: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            location: location.into(),
            message: message.into(),
        }
    }
}
