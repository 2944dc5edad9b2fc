use thiserror::Error;

/// Errors that can occur while searching, loading or editing recipes
#[derive(Error, Debug)]
pub enum ForkifyError {
    /// Transport failure talking to the recipe provider
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider has no data for the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// The provider did not answer within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Input rejected by an entity (negative count, unparsed ingredients, ...)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A recipe with this id is already liked
    #[error("Recipe {0} is already liked")]
    Duplicate(String),

    /// Durable storage could not be read or written
    #[error("Storage error: {0}")]
    Persistence(String),

    /// Response or stored data was not valid JSON
    #[error("Failed to parse data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ForkifyError>;

impl ForkifyError {
    /// Message shown to the user. Provider failures share one message so the
    /// user is always told something went wrong without transport details.
    pub fn user_message(&self) -> String {
        match self {
            ForkifyError::Network(_) | ForkifyError::NotFound(_) | ForkifyError::Parse(_) => {
                "Something went wrong :(".to_string()
            }
            ForkifyError::Timeout(_) => {
                "The recipe service took too long to answer, please try again".to_string()
            }
            other => other.to_string(),
        }
    }
}
