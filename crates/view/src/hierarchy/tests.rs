use super::*;
use crate::state::ViewState;
use ng_core::graph::{DataBag, Position, RenderNodeData};
use proptest::prelude::*;

fn node(id: &str, label: &str, parent: Option<&str>, node_type: &str, tags: &[&str]) -> RenderNode {
    RenderNode {
        id: id.to_string(),
        position: Position::default(),
        data: RenderNodeData {
            label: label.to_string(),
            node_type: node_type.to_string(),
            type_id: node_type.to_lowercase(),
            description: String::new(),
            color: "#ccc".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            parent_name: None,
            extra: DataBag::new(),
        },
        parent_node: parent.map(str::to_string),
    }
}

/// root -> (a -> (a1, a2), b), other
fn sample() -> Vec<RenderNode> {
    vec![
        node("root", "Roadmap", None, "Initiative", &["plan"]),
        node("a", "Auth", Some("root"), "Epic", &["security", "q3"]),
        node("a1", "Login form", Some("a"), "Task", &["q3"]),
        node("a2", "Token refresh", Some("a"), "Task", &["security"]),
        node("b", "Billing", Some("root"), "Epic", &["q4"]),
        node("other", "Loose note", None, "Proposal", &[]),
    ]
}

fn ids<'a>(rows: &[HierarchyRow<'a>]) -> Vec<&'a str> {
    rows.iter().map(|row| row.node.id.as_str()).collect()
}

#[test]
fn forest_is_depth_first_preorder() {
    let nodes = sample();
    let forest = build_forest(&nodes, &FilterState::default(), &ExpandState::default());
    let order = forest
        .entries()
        .iter()
        .map(|e| (e.node.id.as_str(), e.depth))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![("root", 0), ("a", 1), ("a1", 2), ("a2", 2), ("b", 1), ("other", 0)]
    );
    assert_eq!(forest.roots().count(), 2);
    let a1 = &forest.entries()[2];
    assert_eq!(a1.parent_name.as_deref(), Some("Auth"));
    assert!(!a1.has_children);
    assert!(forest.entries()[1].has_children);
}

#[test]
fn collapsed_by_default_shows_roots_only() {
    let nodes = sample();
    let view = ViewState::new();
    assert_eq!(ids(&view.rows(&nodes)), vec!["root", "other"]);
}

#[test]
fn visibility_needs_every_ancestor_expanded() {
    let nodes = sample();
    let mut view = ViewState::new();

    // Expanding a hidden node alone reveals nothing.
    view.expand.toggle("a");
    assert_eq!(ids(&view.rows(&nodes)), vec!["root", "other"]);

    view.expand.toggle("root");
    assert_eq!(
        ids(&view.rows(&nodes)),
        vec!["root", "a", "a1", "a2", "b", "other"]
    );

    view.expand.toggle("a");
    assert_eq!(ids(&view.rows(&nodes)), vec!["root", "a", "b", "other"]);
}

#[test]
fn flatten_keeps_hidden_rows_with_flag() {
    let nodes = sample();
    let forest = build_forest(&nodes, &FilterState::default(), &ExpandState::default());
    let rows = flatten(&forest);
    assert_eq!(rows.len(), nodes.len());
    let hidden = rows.iter().filter(|row| !row.is_visible).count();
    assert_eq!(hidden, 4);
}

#[test]
fn expand_all_and_collapse_all() {
    let nodes = sample();
    let mut view = ViewState::new();
    view.expand_all(&nodes);
    assert_eq!(view.expand.len(), nodes.len());
    assert_eq!(view.rows(&nodes).len(), nodes.len());

    view.collapse_all();
    assert!(view.expand.is_empty());
    assert_eq!(view.rows(&nodes).len(), 2);
}

#[test]
fn expand_all_covers_only_the_filtered_forest() {
    let nodes = sample();
    let mut view = ViewState::new();
    view.filter.node_type = Some("Task".to_string());
    view.expand_all(&nodes);
    assert_eq!(view.expand.len(), 2);
    assert!(view.expand.is_expanded("a1"));
    assert!(!view.expand.is_expanded("root"));
}

#[test]
fn search_matches_label_or_description_case_insensitively() {
    let mut nodes = sample();
    nodes[4].data.description = "Invoices and PAYMENTS".to_string();
    let filter = FilterState {
        search: "payments".to_string(),
        ..FilterState::default()
    };
    let matched = filter_nodes(&nodes, &filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "b");

    let filter = FilterState {
        search: "TOKEN".to_string(),
        ..FilterState::default()
    };
    assert_eq!(filter_nodes(&nodes, &filter)[0].id, "a2");
}

#[test]
fn tag_filter_requires_every_selected_tag() {
    let nodes = vec![
        node("alpha", "Alpha", None, "Task", &["x"]),
        node("beta", "Beta", None, "Task", &["y"]),
    ];
    let mut filter = FilterState::default();
    filter.toggle_tag("x");
    assert_eq!(filter_nodes(&nodes, &filter).len(), 1);
    filter.toggle_tag("y");
    assert!(filter_nodes(&nodes, &filter).is_empty());
    filter.toggle_tag("x");
    assert_eq!(filter.tags, vec!["y"]);
    assert_eq!(filter_nodes(&nodes, &filter)[0].id, "beta");
}

#[test]
fn filtered_out_parent_promotes_children_to_roots() {
    let nodes = sample();
    let mut view = ViewState::new();
    view.filter.tags = vec!["security".to_string()];
    // "a" matches, its parent "root" does not; "a2" stays under "a".
    let forest = view.forest(&nodes);
    let order = forest
        .entries()
        .iter()
        .map(|e| (e.node.id.as_str(), e.depth))
        .collect::<Vec<_>>();
    assert_eq!(order, vec![("a", 0), ("a2", 1)]);
    assert_eq!(forest.entries()[1].parent_name.as_deref(), Some("Auth"));

    view.filter.tags = vec!["q3".to_string()];
    view.filter.search = "login".to_string();
    let forest = view.forest(&nodes);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest.entries()[0].node.id, "a1");
    assert_eq!(forest.entries()[0].depth, 0);
}

#[test]
fn orphan_keeps_server_parent_name() {
    let mut nodes = sample();
    nodes[2].data.parent_name = Some("Auth".to_string());
    let filter = FilterState {
        node_type: Some("Task".to_string()),
        ..FilterState::default()
    };
    let forest = build_forest(&nodes, &filter, &ExpandState::default());
    assert_eq!(forest.entries()[0].node.id, "a1");
    assert_eq!(forest.entries()[0].parent_name.as_deref(), Some("Auth"));
    assert_eq!(forest.entries()[1].parent_name, None);
}

#[test]
fn dangling_parent_and_cycles_still_surface() {
    let nodes = vec![
        node("lost", "Lost", Some("gone"), "Task", &[]),
        node("c1", "Cycle one", Some("c2"), "Task", &[]),
        node("c2", "Cycle two", Some("c1"), "Task", &[]),
    ];
    let forest = build_forest(&nodes, &FilterState::default(), &ExpandState::default());
    let mut seen = forest.ids().collect::<Vec<_>>();
    seen.sort_unstable();
    assert_eq!(seen, vec!["c1", "c2", "lost"]);
}

#[test]
fn available_tags_and_types_are_sorted_unique() {
    let nodes = sample();
    assert_eq!(available_tags(&nodes), vec!["plan", "q3", "q4", "security"]);
    assert_eq!(
        available_types(&nodes),
        vec!["Epic", "Initiative", "Proposal", "Task"]
    );
}

#[test]
fn clear_filters_resets_every_predicate() {
    let mut view = ViewState::new();
    view.filter.search = "x".to_string();
    view.filter.node_type = Some("Task".to_string());
    view.filter.toggle_tag("q3");
    view.clear_filters();
    assert!(view.filter.is_empty());
}

const TAG_POOL: &[&str] = &["a", "b", "c", "d"];

fn arb_nodes() -> impl Strategy<Value = Vec<RenderNode>> {
    prop::collection::vec(
        (
            prop::option::of(0usize..24),
            prop::sample::subsequence(TAG_POOL.to_vec(), 0..=TAG_POOL.len()),
            prop::sample::select(vec!["Task", "Epic"]),
        ),
        1..24,
    )
    .prop_map(|specs| {
        specs
            .iter()
            .enumerate()
            .map(|(i, (parent, tags, node_type))| {
                // Parents point at earlier nodes only, so the input is a forest.
                let parent = parent.filter(|p| *p < i).map(|p| format!("n{p}"));
                node(&format!("n{i}"), &format!("Node {i}"), parent.as_deref(), node_type, tags)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn adding_a_tag_never_grows_the_result(
        nodes in arb_nodes(),
        selected in prop::sample::subsequence(TAG_POOL.to_vec(), 0..TAG_POOL.len()),
        extra in prop::sample::select(TAG_POOL.to_vec()),
    ) {
        let mut filter = FilterState {
            tags: selected.iter().map(|t| t.to_string()).collect(),
            ..FilterState::default()
        };
        let before = filter_nodes(&nodes, &filter).len();
        if !filter.tags.iter().any(|t| t == extra) {
            filter.tags.push(extra.to_string());
        }
        let after = filter_nodes(&nodes, &filter).len();
        prop_assert!(after <= before);
    }

    #[test]
    fn visible_rows_have_expanded_ancestors(
        nodes in arb_nodes(),
        expanded in prop::collection::vec(0usize..24, 0..24),
        selected in prop::sample::subsequence(TAG_POOL.to_vec(), 0..2),
    ) {
        let mut view = ViewState::new();
        for i in expanded {
            let id = format!("n{i}");
            if !view.expand.is_expanded(&id) {
                view.expand.toggle(&id);
            }
        }
        view.filter.tags = selected.iter().map(|t| t.to_string()).collect();

        let forest = view.forest(&nodes);
        let rows = flatten(&forest);
        // Every filtered node appears exactly once.
        prop_assert_eq!(rows.len(), filter_nodes(&nodes, &view.filter).len());

        let mut ancestors: Vec<&HierarchyRow<'_>> = Vec::new();
        for row in &rows {
            ancestors.truncate(row.depth);
            if row.is_visible {
                prop_assert!(ancestors.iter().all(|a| a.is_expanded && a.is_visible));
            } else {
                prop_assert!(row.depth > 0);
            }
            ancestors.push(row);
        }

        let visible = view.rows(&nodes);
        prop_assert!(visible.iter().all(|row| row.is_visible));
    }
}
