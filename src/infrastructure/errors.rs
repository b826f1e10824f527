use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid seed file - {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid seed data: {0}")]
    Seed(#[from] crate::domain::DomainError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl InfraError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        InfraError::Io {
            path: path.to_string(),
            source,
        }
    }
}
