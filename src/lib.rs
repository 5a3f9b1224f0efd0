pub mod telemetry;

pub use reminders_core::{
    execute, CreateReminderUseCase, GetReminderUseCase, MarkReminderNotifiedUseCase,
    ReminderError, ReminderQueryService, ReminderTransition, TransitionReminderUseCase,
    UpdateReminderUseCase, UseCase,
};
pub use reminders_domain::{
    date, NewReminder, Reminder, ReminderScope, ReminderStatus, ValidationError, ID,
};
pub use reminders_infra::{setup_context, Config, ISys, RealSys, ReminderContext};
