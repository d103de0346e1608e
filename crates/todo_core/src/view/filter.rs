//! Category filter stage.

use crate::model::task::{Category, Task};
use std::fmt::{Display, Formatter};

/// Category selector for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Sentinel: keep every task.
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parses `all` (or `全部`) or any category label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" | "全部" => Some(Self::All),
            other => Category::parse(other).map(Self::Only),
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Returns the tasks matching `filter`, preserving relative order.
pub fn filter_by_category(tasks: &[Task], filter: CategoryFilter) -> Vec<Task> {
    match filter {
        CategoryFilter::All => tasks.to_vec(),
        CategoryFilter::Only(_) => tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect(),
    }
}
