#![forbid(unsafe_code)]

//! Per-view client state. Created when a view mounts and dropped with it; nothing here is
//! written back to the store.

use crate::hierarchy::{Forest, HierarchyRow, build_forest, flatten};
use crate::navigation::NavigationStack;
use ng_core::graph::RenderNode;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring over label and description. Empty matches everything.
    pub search: String,
    /// Resolved type name (`nodeType`), exact match.
    pub node_type: Option<String>,
    /// Every selected tag must be present on a node.
    pub tags: Vec<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.node_type.is_none() && self.tags.is_empty()
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, node: &RenderNode) -> bool {
        let data = &node.data;
        let search_match = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            data.label.to_lowercase().contains(&needle)
                || data.description.to_lowercase().contains(&needle)
        };
        let type_match = self
            .node_type
            .as_deref()
            .is_none_or(|wanted| data.node_type == wanted);
        let tags_match = self.tags.iter().all(|tag| data.tags.contains(tag));
        search_match && type_match && tags_match
    }
}

/// Which rows are expanded. Each id toggles independently; unknown ids read as collapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: HashSet<String>,
}

impl ExpandState {
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Returns the new state of `id`.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    /// Replaces the set with every id present in `forest`.
    pub fn expand_all(&mut self, forest: &Forest<'_>) {
        self.expanded = forest.ids().map(str::to_string).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// Everything a graph or table view keeps between renders.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub navigation: NavigationStack,
    pub filter: FilterState,
    pub expand: ExpandState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn forest<'a>(&self, nodes: &'a [RenderNode]) -> Forest<'a> {
        build_forest(nodes, &self.filter, &self.expand)
    }

    /// Rows to render: the flattened forest restricted to visible entries.
    pub fn rows<'a>(&self, nodes: &'a [RenderNode]) -> Vec<HierarchyRow<'a>> {
        flatten(&self.forest(nodes))
            .into_iter()
            .filter(|row| row.is_visible)
            .collect()
    }

    pub fn expand_all(&mut self, nodes: &[RenderNode]) {
        let forest = build_forest(nodes, &self.filter, &self.expand);
        self.expand.expand_all(&forest);
    }

    pub fn collapse_all(&mut self) {
        self.expand.collapse_all();
    }
}
