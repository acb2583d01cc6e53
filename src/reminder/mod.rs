pub mod channels;
pub mod scheduler;

pub use channels::{BellSink, DesktopSink, Dispatcher, NotificationSink, ToastSink};
pub use scheduler::{ReminderScheduler, TICK_PERIOD, TOLERANCE_MS};
