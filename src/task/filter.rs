use super::Task;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-side view mode over the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Projection preserving the original ordering.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    pub fn cycle(&self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "ALL"),
            Filter::Active => write!(f, "ACTIVE"),
            Filter::Completed => write!(f, "COMPLETED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_tasks() -> Vec<Task> {
        let mut tasks = vec![
            Task::new("a".to_string(), None),
            Task::new("b".to_string(), None),
            Task::new("c".to_string(), None),
        ];
        tasks[0].id = 3;
        tasks[1].id = 2;
        tasks[2].id = 1;
        tasks[1].completed = true;
        tasks
    }

    #[test]
    fn test_all_is_identity() {
        let tasks = sample_tasks();
        let filtered = Filter::All.apply(&tasks);
        assert_eq!(filtered.len(), tasks.len());
    }

    #[test]
    fn test_active_excludes_completed() {
        let tasks = sample_tasks();
        let filtered = Filter::Active.apply(&tasks);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_completed_only() {
        let tasks = sample_tasks();
        let filtered = Filter::Completed.apply(&tasks);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|t| t.completed));
    }

    #[test]
    fn test_filtered_and_excluded_partition_input() {
        let tasks = sample_tasks();
        for filter in [Filter::All, Filter::Active, Filter::Completed] {
            let kept = filter.apply(&tasks).len();
            let excluded = tasks.iter().filter(|t| !filter.matches(t)).count();
            assert_eq!(kept + excluded, tasks.len());
        }
    }

    #[test]
    fn test_apply_preserves_order() {
        let tasks = sample_tasks();
        let filtered = Filter::Active.apply(&tasks);
        assert_eq!(filtered[0].text, "a");
        assert_eq!(filtered[1].text, "c");
    }

    #[test]
    fn test_cycle_covers_all_modes() {
        assert_eq!(Filter::All.cycle(), Filter::Active);
        assert_eq!(Filter::Active.cycle(), Filter::Completed);
        assert_eq!(Filter::Completed.cycle(), Filter::All);
    }
}
