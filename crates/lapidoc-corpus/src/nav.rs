//! Navigation tree.
//!
//! The sidebar is an ordered forest of [`NavItem`]s. Items with children are groups and are
//! not documents themselves; leaves point at document ids.

use serde::{Deserialize, Serialize};

/// A node in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Document id for leaves, group key for groups.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Child entries; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Creates a leaf entry pointing at a document.
    pub fn leaf(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children: Vec::new(),
        }
    }

    /// Creates a group entry.
    pub fn group(id: &str, label: &str, children: Vec<Self>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children,
        }
    }

    /// Returns true if this entry has children.
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Returns every leaf in pre-order.
pub fn leaves(items: &[NavItem]) -> Vec<&NavItem> {
    let mut out = Vec::new();
    collect_leaves(items, &mut out);
    out
}

/// Recursive helper for [`leaves`].
fn collect_leaves<'a>(items: &'a [NavItem], out: &mut Vec<&'a NavItem>) {
    for item in items {
        if item.is_group() {
            collect_leaves(&item.children, out);
        } else {
            out.push(item);
        }
    }
}

/// Visits every entry in pre-order with its depth (0 for top level).
pub fn walk<'a>(items: &'a [NavItem], visit: &mut impl FnMut(usize, &'a NavItem)) {
    walk_at(items, 0, visit);
}

/// Recursive helper for [`walk`].
fn walk_at<'a>(items: &'a [NavItem], depth: usize, visit: &mut impl FnMut(usize, &'a NavItem)) {
    for item in items {
        visit(depth, item);
        walk_at(&item.children, depth + 1, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<NavItem> {
        vec![
            NavItem::group(
                "getting-started",
                "Getting Started",
                vec![
                    NavItem::leaf("intro", "Introduction"),
                    NavItem::leaf("installation", "Installation"),
                ],
            ),
            NavItem::leaf("changelog", "Changelog"),
        ]
    }

    #[test]
    fn leaves_are_in_preorder() {
        let nav = sample();
        let ids: Vec<_> = leaves(&nav).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "installation", "changelog"]);
    }

    #[test]
    fn walk_reports_depth() {
        let nav = sample();
        let mut seen = Vec::new();
        walk(&nav, &mut |depth, item| seen.push((depth, item.id.clone())));
        assert_eq!(
            seen,
            vec![
                (0, "getting-started".to_string()),
                (1, "intro".to_string()),
                (1, "installation".to_string()),
                (0, "changelog".to_string()),
            ]
        );
    }

    #[test]
    fn group_detection() {
        let nav = sample();
        assert!(nav[0].is_group());
        assert!(!nav[1].is_group());
    }
}
