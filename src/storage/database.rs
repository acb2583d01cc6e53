use crate::task::Task;
use crate::utils::paths::{get_database_path, get_due_tui_dir};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::fs;

fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Raw data from a database row before conversion to Task
struct TaskRowData {
    id: i64,
    text: String,
    user_date: Option<String>,
    completed: i64,
    created_at_str: String,
}

impl TaskRowData {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            user_date: row.get(2)?,
            completed: row.get(3)?,
            created_at_str: row.get(4)?,
        })
    }

    fn into_task(self) -> Task {
        let created_at = parse_rfc3339(&self.created_at_str).unwrap_or_else(Utc::now);
        Task {
            id: self.id,
            text: self.text,
            user_date: self.user_date,
            completed: self.completed != 0,
            created_at,
        }
    }
}

pub fn get_connection() -> Result<Connection> {
    let dir = get_due_tui_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let db_path = get_database_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Failed to open database at {db_path:?}"))?;
    Ok(conn)
}

pub fn init_database(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            user_date TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed)",
        [],
    )?;

    Ok(())
}

/// All tasks, newest first (id descending).
pub fn load_all_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, user_date, completed, created_at
         FROM tasks
         ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], TaskRowData::from_row)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?.into_task());
    }
    Ok(result)
}

/// Insert a task and return the id the store assigned.
pub fn insert_task(conn: &Connection, task: &Task) -> Result<i64> {
    conn.execute(
        "INSERT INTO tasks (text, user_date, completed, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            &task.text,
            &task.user_date,
            task.completed as i64,
            task.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update text and due date of an existing task.
pub fn update_task(conn: &Connection, id: i64, text: &str, user_date: Option<&str>) -> Result<()> {
    conn.execute(
        "UPDATE tasks SET text = ?1, user_date = ?2 WHERE id = ?3",
        params![text, user_date, id],
    )?;
    Ok(())
}

pub fn set_completed(conn: &Connection, id: i64, completed: bool) -> Result<()> {
    conn.execute(
        "UPDATE tasks SET completed = ?1 WHERE id = ?2",
        params![completed as i64, id],
    )?;
    Ok(())
}

pub fn delete_task(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
    Ok(())
}

/// Bulk delete of every completed task. Returns how many rows went away.
pub fn clear_completed(conn: &Connection) -> Result<usize> {
    let count = conn.execute("DELETE FROM tasks WHERE completed = 1", [])?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_database(&conn).unwrap();
        conn
    }

    fn insert(conn: &Connection, text: &str, user_date: Option<&str>) -> i64 {
        let task = Task::new(text.to_string(), user_date.map(str::to_string));
        insert_task(conn, &task).unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let conn = test_conn();
        let first = insert(&conn, "a", None);
        let second = insert(&conn, "b", None);
        assert!(second > first);
    }

    #[test]
    fn test_load_orders_by_id_descending() {
        let conn = test_conn();
        insert(&conn, "oldest", None);
        insert(&conn, "middle", None);
        insert(&conn, "newest", None);

        let tasks = load_all_tasks(&conn).unwrap();
        let texts: Vec<_> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let conn = test_conn();
        let id = insert(&conn, "Buy milk", Some("25/12/2025 6:30 PM"));

        let tasks = load_all_tasks(&conn).unwrap();
        let task = tasks.iter().find(|t| t.id == id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.user_date.as_deref(), Some("25/12/2025 6:30 PM"));
        assert!(!task.completed);
    }

    #[test]
    fn test_update_task_fields() {
        let conn = test_conn();
        let id = insert(&conn, "old text", Some("1/1/2025"));

        update_task(&conn, id, "new text", Some("2/2/2025 9:00 AM")).unwrap();

        let tasks = load_all_tasks(&conn).unwrap();
        assert_eq!(tasks[0].text, "new text");
        assert_eq!(tasks[0].user_date.as_deref(), Some("2/2/2025 9:00 AM"));
    }

    #[test]
    fn test_update_can_clear_date() {
        let conn = test_conn();
        let id = insert(&conn, "x", Some("1/1/2025"));

        update_task(&conn, id, "x", None).unwrap();

        let tasks = load_all_tasks(&conn).unwrap();
        assert_eq!(tasks[0].user_date, None);
    }

    #[test]
    fn test_set_completed_toggle() {
        let conn = test_conn();
        let id = insert(&conn, "x", None);

        set_completed(&conn, id, true).unwrap();
        assert!(load_all_tasks(&conn).unwrap()[0].completed);

        set_completed(&conn, id, false).unwrap();
        assert!(!load_all_tasks(&conn).unwrap()[0].completed);
    }

    #[test]
    fn test_delete_task() {
        let conn = test_conn();
        let id = insert(&conn, "gone", None);
        insert(&conn, "stays", None);

        delete_task(&conn, id).unwrap();

        let tasks = load_all_tasks(&conn).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "stays");
    }

    #[test]
    fn test_clear_completed_only_removes_completed() {
        let conn = test_conn();
        let a = insert(&conn, "done 1", None);
        insert(&conn, "active", None);
        let c = insert(&conn, "done 2", None);
        set_completed(&conn, a, true).unwrap();
        set_completed(&conn, c, true).unwrap();

        let removed = clear_completed(&conn).unwrap();
        assert_eq!(removed, 2);

        let tasks = load_all_tasks(&conn).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "active");
    }

    #[test]
    fn test_open_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        let conn = Connection::open(&path).unwrap();
        init_database(&conn).unwrap();

        insert(&conn, "persisted", None);
        drop(conn);

        let conn = Connection::open(&path).unwrap();
        let tasks = load_all_tasks(&conn).unwrap();
        assert_eq!(tasks.len(), 1);
    }
}
