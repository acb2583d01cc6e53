use crate::task::Task;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// How often the TUI loop runs a due check.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Margin around the due instant within which a task still counts as due.
/// The tick granularity is one second, so an exact equality test would
/// routinely miss the instant.
pub const TOLERANCE_MS: i64 = 5000;

/// Tracks which task ids have already been reminded this session.
///
/// The set is never persisted and never shrinks: once a task fires it
/// stays fired until restart, even if its due date is edited afterwards.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    fired: HashSet<i64>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// One due-check tick. Returns the tasks whose due instant falls
    /// within the tolerance window around `now`, marking each as fired
    /// so it is never returned again.
    ///
    /// Completed tasks and tasks without a parseable date never fire.
    pub fn due_tasks<'a>(&mut self, tasks: &'a [Task], now: NaiveDateTime) -> Vec<&'a Task> {
        let mut due = Vec::new();

        for task in tasks {
            if task.completed || self.fired.contains(&task.id) {
                continue;
            }
            let Some(instant) = task.due_instant() else {
                continue;
            };

            let delta_ms = instant.signed_duration_since(now).num_milliseconds();
            if (-TOLERANCE_MS..=TOLERANCE_MS).contains(&delta_ms) {
                debug!(task_id = task.id, delta_ms, "task due, firing reminder");
                self.fired.insert(task.id);
                due.push(task);
            }
        }

        due
    }

    pub fn has_fired(&self, id: i64) -> bool {
        self.fired.contains(&id)
    }
}
