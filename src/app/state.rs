use super::mode::Mode;
use crate::config::Config;
use crate::datetime::split_date_time;
use crate::reminder::{Dispatcher, ReminderScheduler, TICK_PERIOD};
use crate::storage::{self, UiCache};
use crate::task::{Filter, Task};
use crate::ui::theme::Theme;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use ratatui::widgets::ListState;
use rusqlite::Connection;
use std::sync::mpsc;
use std::time::Instant;
use tracing::{debug, error};

/// The single owner of all mutable UI state: task list, filter, input
/// buffers and the reminder machinery. Everything the views show is
/// derived from here through pure selectors.
pub struct AppState {
    conn: Connection,
    pub tasks: Vec<Task>,
    pub filter: Filter,
    pub cursor_position: usize,
    pub list_state: ListState,
    pub mode: Mode,
    pub input_buffer: String,
    pub input_cursor: usize,
    pub edit_buffer: String,
    pub edit_cursor: usize,
    pub editing_task_id: Option<i64>,
    pub status_message: Option<(String, Instant)>,
    pub toast_duration_secs: u64,
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    scheduler: ReminderScheduler,
    dispatcher: Dispatcher,
    toast_rx: mpsc::Receiver<String>,
    last_tick: Instant,
}

impl AppState {
    pub fn new(conn: Connection, config: &Config, ui_cache: Option<UiCache>) -> Result<Self> {
        let tasks = storage::load_all_tasks(&conn)?;

        let (toast_tx, toast_rx) = mpsc::channel();
        let dispatcher = Dispatcher::from_config(config, toast_tx);
        let theme = Theme::from_config(config);

        let mut state = Self {
            conn,
            tasks,
            filter: Filter::All,
            cursor_position: 0,
            list_state: ListState::default(),
            mode: Mode::Navigate,
            input_buffer: String::new(),
            input_cursor: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            editing_task_id: None,
            status_message: None,
            toast_duration_secs: config.toast_duration_secs,
            should_quit: false,
            show_help: false,
            theme,
            scheduler: ReminderScheduler::new(),
            dispatcher,
            toast_rx,
            last_tick: Instant::now(),
        };

        if let Some(cache) = ui_cache {
            state.filter = cache.filter;
            if let Some(id) = cache.selected_task_id {
                let visible = state.visible_tasks();
                if let Some(pos) = visible.iter().position(|t| t.id == id) {
                    state.cursor_position = pos;
                }
            }
        }

        Ok(state)
    }

    /// The filtered view, original (id-descending) order preserved.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor_position).copied()
    }

    /// Re-fetch the full list from the store. The caller swallows errors
    /// so a failed fetch keeps the previous (stale) list on screen.
    pub fn reload_from_store(&mut self) -> Result<()> {
        self.tasks = storage::load_all_tasks(&self.conn)?;
        self.clamp_cursor();
        Ok(())
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.cursor_position = 0;
        } else if self.cursor_position >= len {
            self.cursor_position = len - 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.visible_tasks().len();
        if len > 0 && self.cursor_position < len - 1 {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_top(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_bottom(&mut self) {
        self.cursor_position = self.visible_tasks().len().saturating_sub(1);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_cursor();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.cycle());
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Submit the insert-mode buffer as a new task. The buffer is
    /// cleared whatever the outcome; a write failure is surfaced as a
    /// status toast instead of being dropped silently.
    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        self.input_cursor = 0;
        self.mode = Mode::Navigate;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return;
        }

        let today = Local::now().date_naive();
        let (text, user_date) = split_date_time(trimmed, today);
        let text = if text.is_empty() {
            // Input was nothing but a date; keep it visible as the title.
            trimmed.to_string()
        } else {
            text
        };

        let task = Task::new(text, user_date);
        match storage::insert_task(&self.conn, &task) {
            Ok(id) => {
                debug!(task_id = id, "task inserted");
                let _ = self.reload_from_store();
            }
            Err(e) => {
                error!("insert failed: {e:#}");
                self.set_status(format!("Save failed: {e}"));
            }
        }
    }

    pub fn start_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id;
        let buffer = match &task.user_date {
            Some(date) => format!("{} {}", task.text, date),
            None => task.text.clone(),
        };
        self.editing_task_id = Some(id);
        self.edit_buffer = buffer;
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
    }

    /// Commit the edit buffer, re-running date extraction so the stored
    /// date always went through the same rule as at creation. A fired
    /// reminder stays fired even if the date moved.
    pub fn commit_edit(&mut self) {
        let buffer = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;
        self.mode = Mode::Navigate;

        let Some(id) = self.editing_task_id.take() else {
            return;
        };
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return;
        }

        let today = Local::now().date_naive();
        let (text, user_date) = split_date_time(trimmed, today);
        let text = if text.is_empty() {
            trimmed.to_string()
        } else {
            text
        };

        match storage::update_task(&self.conn, id, &text, user_date.as_deref()) {
            Ok(()) => {
                let _ = self.reload_from_store();
            }
            Err(e) => {
                error!("update failed: {e:#}");
                self.set_status(format!("Save failed: {e}"));
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.editing_task_id = None;
        self.mode = Mode::Navigate;
    }

    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, completed) = (task.id, task.completed);
        match storage::set_completed(&self.conn, id, !completed) {
            Ok(()) => {
                let _ = self.reload_from_store();
            }
            Err(e) => {
                error!("toggle failed: {e:#}");
                self.set_status(format!("Save failed: {e}"));
            }
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id;
        match storage::delete_task(&self.conn, id) {
            Ok(()) => {
                let _ = self.reload_from_store();
            }
            Err(e) => {
                error!("delete failed: {e:#}");
                self.set_status(format!("Delete failed: {e}"));
            }
        }
    }

    pub fn clear_completed_tasks(&mut self) {
        match storage::clear_completed(&self.conn) {
            Ok(count) => {
                let _ = self.reload_from_store();
                self.set_status(format!(
                    "Cleared {count} completed task{}",
                    if count == 1 { "" } else { "s" }
                ));
            }
            Err(e) => {
                error!("clear completed failed: {e:#}");
                self.set_status(format!("Clear failed: {e}"));
            }
        }
    }

    /// Run a due check if a tick period has elapsed, fanning out every
    /// newly due task to the notification channels.
    pub fn maybe_tick_reminders(&mut self) {
        if self.last_tick.elapsed() < TICK_PERIOD {
            return;
        }
        self.last_tick = Instant::now();
        self.tick_reminders(Local::now().naive_local());
    }

    /// One due-check pass at an explicit instant.
    pub fn tick_reminders(&mut self, now: NaiveDateTime) {
        let due = self.scheduler.due_tasks(&self.tasks, now);
        for task in due {
            self.dispatcher.dispatch(task);
        }
    }

    /// Move toast-channel messages into the status bar.
    pub fn drain_toasts(&mut self) {
        while let Ok(message) = self.toast_rx.try_recv() {
            self.status_message = Some((message, Instant::now()));
        }
    }

    pub fn save_ui_cache(&self) {
        let cache = UiCache {
            selected_task_id: self.selected_task().map(|t| t.id),
            filter: self.filter,
        };
        if let Err(e) = cache.save() {
            debug!("could not save ui cache: {e}");
        }
    }
}
