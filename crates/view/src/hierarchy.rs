#![forbid(unsafe_code)]

//! Rebuilds the containment forest from a flat node list and flattens it into table rows.
//!
//! The forest is kept as a pre-order arena (`depth` per entry) instead of nested children, so
//! assembly and visibility both run with explicit stacks whatever the nesting depth.

use crate::state::{ExpandState, FilterState};
use ng_core::graph::RenderNode;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Clone, Debug, PartialEq)]
pub struct ForestEntry<'a> {
    pub node: &'a RenderNode,
    /// Root entries are 0.
    pub depth: usize,
    pub is_expanded: bool,
    pub has_children: bool,
    pub parent_name: Option<String>,
}

/// Filtered hierarchy in depth-first pre-order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Forest<'a> {
    entries: Vec<ForestEntry<'a>>,
}

impl<'a> Forest<'a> {
    pub fn entries(&self) -> &[ForestEntry<'a>] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.node.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &ForestEntry<'a>> {
        self.entries.iter().filter(|entry| entry.depth == 0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyRow<'a> {
    pub node: &'a RenderNode,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_visible: bool,
    pub has_children: bool,
    pub parent_name: Option<String>,
}

pub fn filter_nodes<'a>(nodes: &'a [RenderNode], filter: &FilterState) -> Vec<&'a RenderNode> {
    nodes.iter().filter(|node| filter.matches(node)).collect()
}

pub fn build_forest<'a>(
    nodes: &'a [RenderNode],
    filter: &FilterState,
    expand: &ExpandState,
) -> Forest<'a> {
    let filtered = filter_nodes(nodes, filter);
    let kept = filtered
        .iter()
        .map(|node| node.id.as_str())
        .collect::<HashSet<_>>();

    // Children in input order, restricted to the filtered set.
    let mut children: HashMap<&'a str, Vec<&'a RenderNode>> = HashMap::new();
    for &node in &filtered {
        if let Some(parent_id) = node.parent_node.as_deref() {
            children.entry(parent_id).or_default().push(node);
        }
    }

    let mut assembly = Assembly {
        children: &children,
        expand,
        processed: HashSet::new(),
        entries: Vec::with_capacity(filtered.len()),
    };

    for &node in filtered.iter().filter(|node| node.parent_node.is_none()) {
        assembly.walk(node);
    }
    // Nodes whose parent was filtered out (or is missing) surface as roots.
    for &node in &filtered {
        let parent_kept = node
            .parent_node
            .as_deref()
            .is_some_and(|parent_id| kept.contains(parent_id));
        if !parent_kept {
            assembly.walk(node);
        }
    }
    // Whatever is left sits on a parent cycle with no entry point.
    for &node in &filtered {
        assembly.walk(node);
    }

    Forest {
        entries: assembly.entries,
    }
}

struct Assembly<'a, 'm> {
    children: &'m HashMap<&'a str, Vec<&'a RenderNode>>,
    expand: &'m ExpandState,
    processed: HashSet<&'a str>,
    entries: Vec<ForestEntry<'a>>,
}

impl<'a> Assembly<'a, '_> {
    fn walk(&mut self, root: &'a RenderNode) {
        if self.processed.contains(root.id.as_str()) {
            return;
        }
        let mut stack: Vec<(&'a RenderNode, usize, Option<String>)> = vec![(root, 0, None)];
        while let Some((node, depth, parent_name)) = stack.pop() {
            if !self.processed.insert(node.id.as_str()) {
                continue;
            }
            let kids = self
                .children
                .get(node.id.as_str())
                .map(|kids| {
                    kids.iter()
                        .copied()
                        .filter(|kid| !self.processed.contains(kid.id.as_str()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            self.entries.push(ForestEntry {
                node,
                depth,
                is_expanded: self.expand.is_expanded(&node.id),
                has_children: !kids.is_empty(),
                parent_name: parent_name.or_else(|| node.data.parent_name.clone()),
            });
            for kid in kids.into_iter().rev() {
                stack.push((kid, depth + 1, Some(node.data.label.clone())));
            }
        }
    }
}

/// Every entry of `forest` with its effective visibility: roots are visible, anything deeper is
/// visible only if its parent is both visible and expanded.
pub fn flatten<'a>(forest: &Forest<'a>) -> Vec<HierarchyRow<'a>> {
    // opens[d]: whether children of the current entry at depth d are visible.
    let mut opens: Vec<bool> = Vec::new();
    let mut rows = Vec::with_capacity(forest.len());
    for entry in forest.entries() {
        opens.truncate(entry.depth);
        let is_visible = match entry.depth {
            0 => true,
            d => opens.get(d - 1).copied().unwrap_or(false),
        };
        opens.push(is_visible && entry.is_expanded);
        rows.push(HierarchyRow {
            node: entry.node,
            depth: entry.depth,
            is_expanded: entry.is_expanded,
            is_visible,
            has_children: entry.has_children,
            parent_name: entry.parent_name.clone(),
        });
    }
    rows
}

/// Sorted, de-duplicated tags across `nodes`, for the tag picker.
pub fn available_tags(nodes: &[RenderNode]) -> Vec<String> {
    nodes
        .iter()
        .flat_map(|node| node.data.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, de-duplicated resolved type names across `nodes`.
pub fn available_types(nodes: &[RenderNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| node.data.node_type.clone())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests;
