use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::task::Filter;
use crate::utils::paths::get_ui_cache_path;

/// Small bits of UI state restored on next launch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiCache {
    /// The id of the task the cursor was on
    pub selected_task_id: Option<i64>,
    /// Last active filter mode
    #[serde(default)]
    pub filter: Filter,
}

impl UiCache {
    pub fn load() -> Result<Self> {
        let path = get_ui_cache_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let cache: UiCache = serde_json::from_str(&content)?;
        Ok(cache)
    }

    pub fn save(&self) -> Result<()> {
        let path = get_ui_cache_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
