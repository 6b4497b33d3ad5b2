#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Login failure. Deliberately carries no detail: unknown usernames and
    /// wrong passwords must be indistinguishable at the API boundary.
    #[error("wrong username or password")]
    Credentials,

    #[error("Internal error: {0}")]
    Internal(String),
}
