use reminders_domain::{InvalidSnooze, ValidationError, ID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Invalid data provided. Error message: `{0}`")]
    Validation(#[from] ValidationError),
    #[error("Invalid argument. Error message: `{0}`")]
    InvalidArgument(String),
    #[error("The reminder with id: {0}, was not found.")]
    NotFound(ID),
    /// Failure reported by the storage collaborator, passed on unchanged
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<InvalidSnooze> for ReminderError {
    fn from(e: InvalidSnooze) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}
