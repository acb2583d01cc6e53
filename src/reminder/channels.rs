use crate::config::Config;
use crate::task::Task;
use anyhow::{Result, anyhow};
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use tracing::{debug, warn};

/// One delivery channel for a due-task reminder.
pub trait NotificationSink {
    fn name(&self) -> &'static str;
    fn notify(&mut self, task: &Task) -> Result<()>;
}

/// Fans a reminder out to every configured sink. Sinks are independent:
/// a failing sink is logged and the rest still run.
pub struct Dispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl Dispatcher {
    /// Build the sink set from config. The toast channel is always
    /// present; desktop and bell channels depend on config and on the
    /// OS notifier being available.
    pub fn from_config(config: &Config, toast_tx: mpsc::Sender<String>) -> Self {
        let mut sinks: Vec<Box<dyn NotificationSink>> = vec![Box::new(ToastSink::new(toast_tx))];

        if config.desktop_notifications {
            if DesktopSink::is_available() {
                sinks.push(Box::new(DesktopSink::new(config.toast_duration_secs * 1000)));
            } else {
                debug!("desktop notifier not available, channel disabled");
            }
        }
        if config.sound {
            sinks.push(Box::new(BellSink));
        }

        Self { sinks }
    }

    #[cfg(test)]
    pub fn with_sinks(sinks: Vec<Box<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn dispatch(&mut self, task: &Task) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.notify(task) {
                warn!(sink = sink.name(), task_id = task.id, "reminder channel failed: {e}");
            }
        }
    }
}

/// In-app toast: pushes the reminder text to the TUI loop, which shows
/// it in the status bar and expires it after a fixed delay.
pub struct ToastSink {
    tx: mpsc::Sender<String>,
}

impl ToastSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

impl NotificationSink for ToastSink {
    fn name(&self) -> &'static str {
        "toast"
    }

    fn notify(&mut self, task: &Task) -> Result<()> {
        self.tx
            .send(format!("Due now: {}", task.text))
            .map_err(|_| anyhow!("toast receiver dropped"))
    }
}

/// OS desktop notification, delivered by shelling out to the platform
/// notifier. Best-effort: the child is spawned and not waited on.
pub struct DesktopSink {
    timeout_ms: u64,
}

impl DesktopSink {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// Whether the platform notifier responds. This is the closest
    /// terminal analogue to a notification permission check.
    #[cfg(target_os = "linux")]
    pub fn is_available() -> bool {
        Command::new("notify-send")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[cfg(target_os = "macos")]
    pub fn is_available() -> bool {
        Command::new("osascript")
            .args(["-e", "return 0"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    pub fn is_available() -> bool {
        false
    }

    #[cfg(target_os = "linux")]
    fn send(&self, title: &str, body: &str) -> Result<()> {
        Command::new("notify-send")
            .args(["-a", "duetui", "-t", &self.timeout_ms.to_string(), title, body])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn send(&self, title: &str, body: &str) -> Result<()> {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            body.replace('"', "'"),
            title.replace('"', "'")
        );
        Command::new("osascript")
            .args(["-e", &script])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn send(&self, _title: &str, _body: &str) -> Result<()> {
        Err(anyhow!("no desktop notifier on this platform"))
    }
}

impl NotificationSink for DesktopSink {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn notify(&mut self, task: &Task) -> Result<()> {
        let body = match &task.user_date {
            Some(date) => format!("{} ({})", task.text, date),
            None => task.text.clone(),
        };
        self.send("Task due", &body)
    }
}

/// Audio cue: the terminal bell. Raw mode passes BEL through untouched.
pub struct BellSink;

impl NotificationSink for BellSink {
    fn name(&self) -> &'static str {
        "bell"
    }

    fn notify(&mut self, _task: &Task) -> Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}
