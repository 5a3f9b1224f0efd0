pub mod date;
mod reminder;
mod shared;

pub use reminder::{
    InvalidSnooze, InvalidStatusError, NewReminder, Reminder, ReminderChanges, ReminderRecord,
    ReminderScope, ReminderStatus, DATA_MAX_LEN, OBJECT_MAX_LEN, PROJECT_MAX_LEN, SUBJECT_MAX_LEN,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::validation::ValidationError;
