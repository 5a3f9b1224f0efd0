mod error;
mod query;
mod reminder;
mod shared;

pub use error::ReminderError;
pub use query::ReminderQueryService;
pub use reminder::{
    CreateReminderUseCase, GetReminderUseCase, MarkReminderNotifiedUseCase, ReminderTransition,
    TransitionReminderUseCase, UpdateReminderUseCase,
};
pub use shared::usecase::{execute, UseCase};
