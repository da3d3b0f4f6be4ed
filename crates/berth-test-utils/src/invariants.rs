//! Structural invariant checks for [`DockTree`].

use berth_dock::{DockTree, ROOT_ID};

/// Every structural rule the tree breaks, as readable messages.
///
/// Checked for every node reachable from the root:
/// - a node has children or tabs, never both
/// - a container has one splitter fewer than children, each oriented along it
/// - only the root may keep a single child
/// - tab strip and content surface agree on length, order and active index
/// - children point back at their parent
pub fn tree_invariant_violations(tree: &DockTree) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(root) = tree.node(tree.root()) else {
        return vec!["root node missing".to_string()];
    };
    if root.id() != ROOT_ID {
        violations.push(format!("root id is {:?}", root.id()));
    }
    if !root.tabs().is_empty() {
        violations.push("root hosts tabs".to_string());
    }

    for id in tree.walk() {
        let Some(node) = tree.node(id) else {
            violations.push(format!("{:?} reachable but missing", id));
            continue;
        };
        let name = node.id();

        if node.is_container() && !node.tabs().is_empty() {
            violations.push(format!("{name}: has both children and tabs"));
        }

        let expected = node.children().len().saturating_sub(1);
        if node.splitters().len() != expected {
            violations.push(format!(
                "{name}: {} splitters for {} children",
                node.splitters().len(),
                node.children().len()
            ));
        }
        if node.is_container() {
            match node.orientation() {
                None => violations.push(format!("{name}: container without orientation")),
                Some(orientation) => {
                    if node.splitters().iter().any(|s| s.orientation() != orientation) {
                        violations.push(format!("{name}: splitter orientation differs"));
                    }
                }
            }
            if node.splitters().iter().any(|s| s.parent() != id) {
                violations.push(format!("{name}: splitter owned by another node"));
            }
        }

        if node.children().len() == 1 && !node.is_root() {
            violations.push(format!("{name}: container with a single child"));
        }

        let tabs = node.tabs();
        let panels = node.panels();
        if tabs.len() != panels.len() {
            violations.push(format!("{name}: {} tabs but {} panels", tabs.len(), panels.len()));
        }
        if tabs.active() != panels.active() {
            violations.push(format!(
                "{name}: active tab {:?} but active panel {:?}",
                tabs.active(),
                panels.active()
            ));
        }
        for (tab, panel) in tabs.iter().zip(panels.iter()) {
            if tab.instance != panel.id {
                violations.push(format!("{name}: tab {} out of step with its panel", tab.panel_id));
            }
        }

        for &child in node.children() {
            if tree.node(child).and_then(|c| c.parent()) != Some(id) {
                violations.push(format!("{name}: child {:?} has a stale parent", child));
            }
        }
    }

    violations
}

/// Panic with every violation if the tree is not well formed.
#[track_caller]
pub fn assert_tree_invariants(tree: &DockTree) {
    let violations = tree_invariant_violations(tree);
    assert!(
        violations.is_empty(),
        "dock tree invariants violated:\n  {}\n{:#?}",
        violations.join("\n  "),
        tree.snapshot()
    );
}
