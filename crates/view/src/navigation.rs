#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: String,
    pub label: String,
}

/// Path from the root subgraph to the one currently open. The current parent is always the last
/// breadcrumb (or the root when there is none), so the two cannot drift apart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationStack {
    breadcrumbs: Vec<Breadcrumb>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_parent_id(&self) -> Option<&str> {
        self.breadcrumbs.last().map(|crumb| crumb.id.as_str())
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    pub fn is_root(&self) -> bool {
        self.breadcrumbs.is_empty()
    }

    pub fn navigate_into(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.breadcrumbs.push(Breadcrumb {
            id: id.into(),
            label: label.into(),
        });
    }

    /// Pops one level. At the root this is a no-op.
    pub fn navigate_up(&mut self) -> Option<Breadcrumb> {
        self.breadcrumbs.pop()
    }

    pub fn reset(&mut self) {
        self.breadcrumbs.clear();
    }
}
