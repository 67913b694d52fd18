use thiserror::Error;
use vizhash::VizHashError;

#[derive(Debug, Error)]
pub enum PermitError {
    #[error("current person wasn't found")]
    CurrentPersonNotFound,
    #[error("permit {0} was not found")]
    PermitNotFound(String),
    #[error("current person doesn't own permit {0}")]
    NotOwner(String),
    #[error(transparent)]
    Image(#[from] VizHashError),
}

impl PermitError {
    /// Stable identifier for the outer API layer to map onto its responses.
    pub fn error_id(&self) -> &'static str {
        match self {
            PermitError::CurrentPersonNotFound => "greenlight:current-person-not-found",
            PermitError::PermitNotFound(_) => "greenlight:permit-not-found",
            PermitError::NotOwner(_) => "greenlight:person-does-not-own-permit",
            PermitError::Image(_) => "greenlight:image-creation-failed",
        }
    }
}
