use chrono::{DateTime, Utc};
use reminders::{ISys, ReminderContext};
use std::sync::{Arc, Mutex};

/// Clock the tests can move forward
#[derive(Clone)]
pub struct TestClock(Arc<Mutex<DateTime<Utc>>>);

impl TestClock {
    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl ISys for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// In-memory context on the real clock
pub fn spawn_context() -> ReminderContext {
    ReminderContext::create_inmemory()
}

pub fn spawn_context_at(now: DateTime<Utc>) -> (ReminderContext, TestClock) {
    let clock = TestClock(Arc::new(Mutex::new(now)));
    let mut ctx = ReminderContext::create_inmemory();
    ctx.sys = Arc::new(clock.clone());
    (ctx, clock)
}
